//! Save a generated image as a durable gallery record.

use std::sync::Arc;

use atelier_domain::{Image, ImageRecord, UserRef};

use crate::infrastructure::ports::{ClockPort, ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct SaveImage {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SaveImage {
    pub fn new(
        resolve_user: Arc<ResolveUser>,
        image_repo: Arc<dyn ImageRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            resolve_user,
            image_repo,
            clock,
        }
    }

    /// Persist the image for the resolved owner and return the stored
    /// record, owner display name included.
    pub async fn execute(
        &self,
        user_ref: UserRef,
        image_url: &str,
        prompt: &str,
        refined_prompt: Option<String>,
    ) -> Result<ImageRecord, SaveError> {
        let user_id = self.resolve_user.execute(user_ref).await?;

        let image = Image::new(
            user_id,
            image_url,
            prompt,
            refined_prompt,
            self.clock.now(),
        );
        self.image_repo.insert(&image).await?;

        // Read back through the join so the response carries the owner name.
        let record = self
            .image_repo
            .get_record(image.id())
            .await?
            .ok_or_else(|| RepoError::not_found("Image", image.id()))?;

        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
