//! Like/unlike use cases.

mod like_image;
mod list_liked_images;
mod unlike_image;

pub use like_image::{LikeError, LikeImage};
pub use list_liked_images::{ListLikedError, ListLikedImages};
pub use unlike_image::{UnlikeError, UnlikeImage};

use std::sync::Arc;

/// Container for engagement use cases.
pub struct EngagementUseCases {
    pub like: Arc<LikeImage>,
    pub unlike: Arc<UnlikeImage>,
    pub list_liked: Arc<ListLikedImages>,
}

impl EngagementUseCases {
    pub fn new(
        like: Arc<LikeImage>,
        unlike: Arc<UnlikeImage>,
        list_liked: Arc<ListLikedImages>,
    ) -> Self {
        Self {
            like,
            unlike,
            list_liked,
        }
    }
}
