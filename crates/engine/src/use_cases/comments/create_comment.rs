//! Attach a new comment to an image.

use std::sync::Arc;

use atelier_domain::{Comment, ImageId, UserId};

use crate::infrastructure::ports::{ClockPort, CommentRepo, RepoError};

/// Takes the commenter's id and display name as given; unlike the
/// image operations there is no identity resolution here.
pub struct CreateComment {
    comment_repo: Arc<dyn CommentRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreateComment {
    pub fn new(comment_repo: Arc<dyn CommentRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            comment_repo,
            clock,
        }
    }

    /// Mint the comment, store it, and return the stored row. A store
    /// failure fails the operation; nothing is substituted.
    pub async fn execute(
        &self,
        image_id: ImageId,
        user_id: UserId,
        user_name: &str,
        text: &str,
    ) -> Result<Comment, RepoError> {
        let comment = Comment::new(image_id, user_id, user_name, text, self.clock.now());
        self.comment_repo.insert(&comment).await
    }
}
