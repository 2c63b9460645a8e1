//! Ids of every image a user has liked.

use std::sync::Arc;

use atelier_domain::{ImageId, UserRef};

use crate::infrastructure::ports::{ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct ListLikedImages {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
}

impl ListLikedImages {
    pub fn new(resolve_user: Arc<ResolveUser>, image_repo: Arc<dyn ImageRepo>) -> Self {
        Self {
            resolve_user,
            image_repo,
        }
    }

    pub async fn execute(&self, user_ref: UserRef) -> Result<Vec<ImageId>, ListLikedError> {
        let user_id = self.resolve_user.execute(user_ref).await?;
        let ids = self.image_repo.liked_image_ids(&user_id).await?;
        Ok(ids)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListLikedError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
