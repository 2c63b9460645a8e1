//! Outcome of a generation run, before any save happens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly generated image with its prompt lineage.
///
/// `prompt` is always the text the user submitted. `refined_prompt` is set
/// only when refinement ran and succeeded; a failed or skipped refinement
/// leaves it empty rather than echoing the original prompt back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
    pub prompt: String,
    pub refined_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
}
