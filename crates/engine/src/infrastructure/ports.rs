//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Persistence (the image/like/comment store and the external user table)
//! - Prompt refinement (chat-completion provider)
//! - Image generation (image provider)
//! - Asset publishing (durable image hosting)
//! - Clock (injected time for deterministic tests)

// Port traits define the full store contract; a few methods are only
// exercised by the integration tests today.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use atelier_domain::{Comment, ExploreSort, Image, ImageId, ImageRecord, User, UserId};

// ============================================================================
// Error Types
// ============================================================================

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Stored data could not be mapped back into a domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the prompt refinement provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// Errors from the image generation provider.
#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    #[error("Image generation request failed: {0}")]
    RequestFailed(String),

    #[error("Image generation returned no image: {0}")]
    NoImage(String),
}

/// Errors from the durable asset store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to download source image: {0}")]
    DownloadFailed(String),

    #[error("Failed to upload image to storage: {0}")]
    UploadFailed(String),
}

// ============================================================================
// Persistence Ports (one per entity type)
// ============================================================================

/// Lookups against the externally-owned user table. This service never
/// creates or mutates users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Find a user id by exact, case-sensitive email match.
    async fn find_id_by_email(&self, email: &str) -> Result<Option<UserId>, RepoError>;

    /// Point lookup by id.
    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError>;
}

/// Image rows plus their like bookkeeping. Likes live here rather than in a
/// separate repo because every like mutation must update the image's counter
/// in the same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepo: Send + Sync {
    async fn insert(&self, image: &Image) -> Result<(), RepoError>;

    /// Point lookup, joined with the owner's display name.
    async fn get_record(&self, id: ImageId) -> Result<Option<ImageRecord>, RepoError>;

    /// All images owned by a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ImageRecord>, RepoError>;

    /// Public feed page.
    async fn list_explore(
        &self,
        limit: i64,
        offset: i64,
        sort: ExploreSort,
    ) -> Result<Vec<ImageRecord>, RepoError>;

    /// Record a like. Returns `false` without mutating anything when the
    /// (image, user) pair is already present.
    async fn add_like(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError>;

    /// Remove a like. Returns `false` without mutating anything when no
    /// such like exists.
    async fn remove_like(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError>;

    /// Ids of all images a user has liked. Order is not significant.
    async fn liked_image_ids(&self, user_id: &UserId) -> Result<Vec<ImageId>, RepoError>;

    /// Delete an image with its like and comment rows, gated on ownership.
    /// Returns `false` when the image is missing or owned by someone else.
    async fn delete_owned(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    /// Persist the comment and read back the stored row.
    async fn insert(&self, comment: &Comment) -> Result<Comment, RepoError>;

    /// All comments on an image, oldest first.
    async fn list_for_image(&self, image_id: ImageId) -> Result<Vec<Comment>, RepoError>;
}

// ============================================================================
// Provider Ports
// ============================================================================

/// Rewrites raw prompts into richer generation prompts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptRefinerPort: Send + Sync {
    async fn refine(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Turns a prompt into a provider-hosted image URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenPort: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenError>;
}

/// Re-hosts a provider-temporary image at a durable URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStorePort: Send + Sync {
    async fn publish(&self, image_url: &str) -> Result<String, StorageError>;
}

// ============================================================================
// Clock Port
// ============================================================================

/// Time source, injected so tests control timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
