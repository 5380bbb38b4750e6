pub mod cursor;
pub mod entity;
pub mod filter;
pub mod repository;

pub use cursor::AuditLogCursor;
pub use entity::{AuditAction, AuditLog, NewAuditLog};
pub use filter::AuditDateFilter;
pub use repository::AuditLogRepository;
