//! Resolve a caller-supplied identity reference to a canonical user id.

use std::sync::Arc;

use atelier_domain::{UserId, UserRef};

use crate::infrastructure::ports::{RepoError, UserRepo};

/// Maps an email-or-id reference onto the canonical user id.
///
/// Ids pass through untouched; emails are looked up in the user store with
/// an exact match. An email with no account is a fatal precondition for
/// whichever operation asked, never a retry.
pub struct ResolveUser {
    user_repo: Arc<dyn UserRepo>,
}

impl ResolveUser {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_ref: UserRef) -> Result<UserId, ResolveError> {
        match user_ref {
            UserRef::ById(id) => Ok(id),
            UserRef::ByEmail(email) => {
                let resolved = self.user_repo.find_id_by_email(&email).await?;
                resolved.ok_or_else(|| {
                    tracing::warn!(email = %email, "No user found for email");
                    ResolveError::UnknownEmail(email.clone())
                })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No user found for email: {0}")]
    UnknownEmail(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
