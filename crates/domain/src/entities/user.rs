//! User entity - read-only mirror of the external identity system's records

use atelier_domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account owned by the external identity system.
///
/// This service never creates or mutates users; it only resolves and reads
/// them, so every profile field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
