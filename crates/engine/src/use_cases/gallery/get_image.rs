//! Point lookup of a single image record.

use std::sync::Arc;

use atelier_domain::{ImageId, ImageRecord};

use crate::infrastructure::ports::{ImageRepo, RepoError};

pub struct GetImage {
    image_repo: Arc<dyn ImageRepo>,
}

impl GetImage {
    pub fn new(image_repo: Arc<dyn ImageRepo>) -> Self {
        Self { image_repo }
    }

    /// `None` when no such image exists; the caller decides how to report it.
    pub async fn execute(&self, image_id: ImageId) -> Result<Option<ImageRecord>, RepoError> {
        self.image_repo.get_record(image_id).await
    }
}
