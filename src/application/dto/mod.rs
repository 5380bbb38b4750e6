pub mod advertisements;
pub mod articles;
pub mod audit;
pub mod auth;
pub mod pagination;
pub mod serde_time;
pub mod users;

pub use advertisements::{AdvertisementDto, PlanSnapshotDto, StatusTotalDto};
pub use articles::{ArticleDto, DestinationDto, FaqEntryDto, SeoMetadataDto};
pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::CursorPage;
pub use users::{CapabilityView, UserDto, UserProfileDto};
