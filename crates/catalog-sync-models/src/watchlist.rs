use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted membership record in the user's list.
///
/// `movie_id` is a plain reference into the catalog with no enforced
/// constraint: deleting the movie leaves the record dangling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    /// Record id minted from the creation timestamp in milliseconds.
    pub id: u64,
    pub movie_id: u64,
    pub watched: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a watchlist item. `Some` fields are merged into the
/// stored record; everything else is left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched: Option<bool>,
}

impl WatchlistPatch {
    pub fn watched(value: bool) -> Self {
        Self {
            watched: Some(value),
        }
    }
}
