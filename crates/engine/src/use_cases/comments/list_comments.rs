//! Comments on an image, oldest first.

use std::sync::Arc;

use atelier_domain::{Comment, ImageId};

use crate::infrastructure::ports::{CommentRepo, RepoError};

pub struct ListComments {
    comment_repo: Arc<dyn CommentRepo>,
}

impl ListComments {
    pub fn new(comment_repo: Arc<dyn CommentRepo>) -> Self {
        Self { comment_repo }
    }

    /// An unknown image simply has no comments; there is no existence check.
    pub async fn execute(&self, image_id: ImageId) -> Result<Vec<Comment>, RepoError> {
        self.comment_repo.list_for_image(image_id).await
    }
}
