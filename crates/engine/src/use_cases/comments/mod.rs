//! Comment use cases.

mod create_comment;
mod list_comments;

pub use create_comment::CreateComment;
pub use list_comments::ListComments;

use std::sync::Arc;

/// Container for comment use cases.
pub struct CommentUseCases {
    pub list: Arc<ListComments>,
    pub create: Arc<CreateComment>,
}

impl CommentUseCases {
    pub fn new(list: Arc<ListComments>, create: Arc<CreateComment>) -> Self {
        Self { list, create }
    }
}
