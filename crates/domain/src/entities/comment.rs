//! Comment entity - viewer commentary attached to an image

use atelier_domain::{CommentId, ImageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on an image. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub image_id: ImageId,
    pub user_id: UserId,
    /// Denormalized for display
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        image_id: ImageId,
        user_id: UserId,
        user_name: impl Into<String>,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            image_id,
            user_id,
            user_name: user_name.into(),
            text: text.into(),
            created_at: now,
        }
    }
}
