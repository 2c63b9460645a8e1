//! Sort modes for the public explore feed

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExploreSort {
    /// Newest first
    #[default]
    Newest,
    /// Highest like count first, newest breaking ties
    MostLiked,
}

impl ExploreSort {
    /// Interpret the optional `sort` query value. Only the literal
    /// `"likes"` selects [`ExploreSort::MostLiked`]; anything else falls
    /// back to newest-first.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("likes") => Self::MostLiked,
            _ => Self::Newest,
        }
    }
}
