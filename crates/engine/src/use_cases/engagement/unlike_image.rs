//! Remove a user's like from an image.

use std::sync::Arc;

use atelier_domain::{ImageId, UserRef};

use crate::infrastructure::ports::{ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct UnlikeImage {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
}

impl UnlikeImage {
    pub fn new(resolve_user: Arc<ResolveUser>, image_repo: Arc<dyn ImageRepo>) -> Self {
        Self {
            resolve_user,
            image_repo,
        }
    }

    /// Unliking something the user never liked is a conflict, and the
    /// counter stays untouched.
    pub async fn execute(&self, image_id: ImageId, user_ref: UserRef) -> Result<(), UnlikeError> {
        let user_id = self.resolve_user.execute(user_ref).await?;

        let removed = self.image_repo.remove_like(image_id, &user_id).await?;
        if !removed {
            return Err(UnlikeError::NotLiked);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnlikeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Image not liked by this user")]
    NotLiked,

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
