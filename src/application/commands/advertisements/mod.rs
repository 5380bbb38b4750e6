mod activate;
mod cancel;
mod capability;
mod engagement;
mod purchase;
mod restore;
mod service;

pub use activate::ActivateAdvertisementCommand;
pub use cancel::CancelAdvertisementCommand;
pub use engagement::RecordEngagementCommand;
pub use purchase::PurchaseAdvertisementCommand;
pub use restore::RestoreAdvertisementCommand;
pub use service::AdvertisementCommandService;
