//! Image entity - a generated image with its prompt lineage and like counter

use atelier_domain::{ImageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored image owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    id: ImageId,
    /// Owning account in the external identity system
    user_id: UserId,
    /// Durable URL the client renders
    image_url: String,
    /// Prompt exactly as the user typed it
    prompt: String,
    /// LLM-refined prompt, present only when refinement ran and succeeded
    refined_prompt: Option<String>,
    created_at: DateTime<Utc>,
    /// Denormalized like counter, kept in step with the like rows
    likes: i64,
}

impl Image {
    /// Create a new image record. The like counter starts at zero.
    pub fn new(
        user_id: UserId,
        image_url: impl Into<String>,
        prompt: impl Into<String>,
        refined_prompt: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ImageId::new(),
            user_id,
            image_url: image_url.into(),
            prompt: prompt.into(),
            refined_prompt,
            created_at: now,
            likes: 0,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn refined_prompt(&self) -> Option<&str> {
        self.refined_prompt.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }
}

/// An image row joined with its owner's display name, as read back by queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    pub user_id: UserId,
    pub image_url: String,
    pub prompt: String,
    pub refined_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    /// Denormalized for display
    pub user_name: Option<String>,
}
