//! Fixed user-facing strings for operation outcomes.
//!
//! Every rejected operation surfaces exactly one of these, regardless of
//! what actually went wrong underneath; the underlying error detail is
//! logged and then discarded.

pub const LOAD_CATALOG_FAILED: &str = "Failed to load the movie catalog.";
pub const LOAD_WATCHLIST_FAILED: &str = "Failed to load your list.";
pub const ADD_TO_WATCHLIST_FAILED: &str = "Failed to add the movie to your list.";
pub const REMOVE_FROM_WATCHLIST_FAILED: &str = "Failed to remove the movie from your list.";
pub const SET_WATCHED_FAILED: &str = "Failed to update the watched status.";
pub const CREATE_MOVIE_FAILED: &str = "Failed to add the new movie.";
pub const UPDATE_MOVIE_FAILED: &str = "Failed to update the movie.";
pub const DELETE_MOVIE_FAILED: &str = "Failed to delete the movie.";

pub const MOVIE_CREATED: &str = "Movie added successfully.";
pub const MOVIE_UPDATED: &str = "Movie updated successfully.";
pub const MOVIE_DELETED: &str = "Movie deleted successfully.";

/// Validation message shown by callers before dispatching a create or
/// update; the orchestrator itself never produces it.
pub const TITLE_REQUIRED: &str = "A movie title is required.";
