//! Public explore feed with pagination and sort mode.

use std::sync::Arc;

use atelier_domain::{ExploreSort, ImageRecord};

use crate::infrastructure::ports::{ImageRepo, RepoError};

pub struct ListExploreImages {
    image_repo: Arc<dyn ImageRepo>,
}

impl ListExploreImages {
    pub fn new(image_repo: Arc<dyn ImageRepo>) -> Self {
        Self { image_repo }
    }

    /// No identity involved: the feed is public.
    pub async fn execute(
        &self,
        limit: i64,
        offset: i64,
        sort: ExploreSort,
    ) -> Result<Vec<ImageRecord>, RepoError> {
        self.image_repo.list_explore(limit, offset, sort).await
    }
}
