pub mod cursor;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use cursor::AdvertisementCursor;
pub use entity::{Advertisement, AdvertisementUpdate, NewAdvertisement, ServingWindow};
pub use repository::{AdvertisementListFilter, AdvertisementRepository, StatusTotal};
pub use value_objects::{AdStatus, AdvertisementId, DeletedVisibility, EngagementKind, PlanSnapshot};
