//! Delete an image, gated on ownership.

use std::sync::Arc;

use atelier_domain::{ImageId, UserRef};

use crate::infrastructure::ports::{ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct DeleteImage {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
}

impl DeleteImage {
    pub fn new(resolve_user: Arc<ResolveUser>, image_repo: Arc<dyn ImageRepo>) -> Self {
        Self {
            resolve_user,
            image_repo,
        }
    }

    /// Removes the image together with its like and comment rows. Refused
    /// when the image is missing or owned by someone else, without telling
    /// the caller which of the two it was.
    pub async fn execute(&self, image_id: ImageId, user_ref: UserRef) -> Result<(), DeleteError> {
        let user_id = self.resolve_user.execute(user_ref).await?;

        let deleted = self.image_repo.delete_owned(image_id, &user_id).await?;
        if !deleted {
            tracing::warn!(image_id = %image_id, user_id = %user_id, "Delete refused");
            return Err(DeleteError::NotOwned);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Image not found or not owned by this user")]
    NotOwned,

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
