use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::advertisement::repository::AdvertisementRepository;

pub struct AdvertisementQueryService {
    pub(super) repo: Arc<dyn AdvertisementRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AdvertisementQueryService {
    pub fn new(repo: Arc<dyn AdvertisementRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}
