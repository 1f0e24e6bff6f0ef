use serde::{Deserialize, Serialize};

/// A catalog entry. The catalog dataset owns these; the state container and
/// the selection slot only ever hold value copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub synopsis: String,
    pub genre: String,
    pub rating: String, // display string, e.g. "4.5/5"
    pub duration: String, // display string; "eps" marks episodic titles
    pub release_date: String,
    pub director: String,
    pub cast: String,
    pub age_rating: String,
    pub poster: Poster,
    pub badge: String, // "top10", "new" or "none"
}

impl Movie {
    /// Builds a full catalog entry from submitted fields plus an assigned id.
    pub fn from_draft(id: u64, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            synopsis: draft.synopsis,
            genre: draft.genre,
            rating: draft.rating,
            duration: draft.duration,
            release_date: draft.release_date,
            director: draft.director,
            cast: draft.cast,
            age_rating: draft.age_rating,
            poster: draft.poster,
            badge: draft.badge,
        }
    }

    /// Episodic titles carry an episode count in their duration string
    /// ("16 eps") instead of a running time ("2h 28m").
    pub fn is_series(&self) -> bool {
        self.duration.contains("eps")
    }
}

/// Poster image paths for the two layouts a title is rendered in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub portrait: String,
    pub landscape: String,
}

impl Default for Poster {
    fn default() -> Self {
        Self {
            portrait: "/img/poster/portrait/default.png".to_string(),
            landscape: "/img/poster/landscape/default.png".to_string(),
        }
    }
}

/// The submittable fields of a catalog entry, without an id.
///
/// Defaults mirror the blank entry form: empty text fields plus the
/// placeholder rating, duration, age rating, poster and badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieDraft {
    pub title: String,
    pub synopsis: String,
    pub genre: String,
    pub rating: String,
    pub duration: String,
    pub release_date: String,
    pub director: String,
    pub cast: String,
    pub age_rating: String,
    pub poster: Poster,
    pub badge: String,
}

impl Default for MovieDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            synopsis: String::new(),
            genre: String::new(),
            rating: "0/5".to_string(),
            duration: "0m".to_string(),
            release_date: String::new(),
            director: String::new(),
            cast: String::new(),
            age_rating: "PG".to_string(),
            poster: Poster::default(),
            badge: "none".to_string(),
        }
    }
}
