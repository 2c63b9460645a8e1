//! Like an image on behalf of a user.

use std::sync::Arc;

use atelier_domain::{ImageId, UserRef};

use crate::infrastructure::ports::{ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct LikeImage {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
}

impl LikeImage {
    pub fn new(resolve_user: Arc<ResolveUser>, image_repo: Arc<dyn ImageRepo>) -> Self {
        Self {
            resolve_user,
            image_repo,
        }
    }

    /// A repeated like from the same user is a conflict, not a double count.
    pub async fn execute(&self, image_id: ImageId, user_ref: UserRef) -> Result<(), LikeError> {
        let user_id = self.resolve_user.execute(user_ref).await?;

        let added = self.image_repo.add_like(image_id, &user_id).await?;
        if !added {
            return Err(LikeError::AlreadyLiked);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Image already liked by this user")]
    AlreadyLiked,

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
