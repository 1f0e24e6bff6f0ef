use catalog_sync_models::{Movie, Notification, NotificationKind, WatchlistItem};
use serde::Serialize;

use crate::messages;

/// Operation families tracked by the in-flight counters.
///
/// Only the two loads and the three catalog mutations signal loading;
/// watchlist mutations never have, and adding that would change how every
/// consumer renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    LoadCatalog,
    LoadWatchlist,
    CreateMovie,
    UpdateMovie,
    DeleteMovie,
}

/// Per-family in-flight operation counters.
///
/// A single shared boolean would let overlapping operations clear each
/// other's signal; counters keep the derived `is_loading` view true until
/// the last outstanding operation settles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOps {
    load_catalog: u32,
    load_watchlist: u32,
    create_movie: u32,
    update_movie: u32,
    delete_movie: u32,
}

impl PendingOps {
    fn slot(&mut self, kind: PendingKind) -> &mut u32 {
        match kind {
            PendingKind::LoadCatalog => &mut self.load_catalog,
            PendingKind::LoadWatchlist => &mut self.load_watchlist,
            PendingKind::CreateMovie => &mut self.create_movie,
            PendingKind::UpdateMovie => &mut self.update_movie,
            PendingKind::DeleteMovie => &mut self.delete_movie,
        }
    }

    fn begin(&mut self, kind: PendingKind) {
        *self.slot(kind) += 1;
    }

    fn finish(&mut self, kind: PendingKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_sub(1);
    }

    pub fn in_flight(&self, kind: PendingKind) -> u32 {
        match kind {
            PendingKind::LoadCatalog => self.load_catalog,
            PendingKind::LoadWatchlist => self.load_watchlist,
            PendingKind::CreateMovie => self.create_movie,
            PendingKind::UpdateMovie => self.update_movie,
            PendingKind::DeleteMovie => self.delete_movie,
        }
    }

    pub fn any(&self) -> bool {
        self.load_catalog > 0
            || self.load_watchlist > 0
            || self.create_movie > 0
            || self.update_movie > 0
            || self.delete_movie > 0
    }
}

/// One step of an orchestrated operation's lifecycle, or a synchronous UI
/// intent. Applying events to snapshots is the only way state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    CatalogRequested,
    CatalogLoaded(Vec<Movie>),
    CatalogFailed(String),

    WatchlistRequested,
    WatchlistLoaded(Vec<WatchlistItem>),
    WatchlistFailed(String),

    WatchlistItemAdded(WatchlistItem),
    WatchlistAddFailed(String),
    WatchlistItemRemoved { movie_id: u64 },
    WatchlistRemoveFailed(String),
    WatchedChanged(WatchlistItem),
    WatchedChangeFailed(String),

    MovieCreateRequested,
    MovieCreated(Movie),
    MovieCreateFailed(String),
    MovieUpdateRequested,
    MovieUpdated(Movie),
    MovieUpdateFailed(String),
    MovieDeleteRequested,
    MovieDeleted { id: u64 },
    MovieDeleteFailed(String),

    MovieSelected(Movie),
    SelectionCleared,

    NotificationShown { message: String, kind: NotificationKind },
    NotificationHidden,
    NotificationExpired { seq: u64 },
}

/// The authoritative application snapshot.
///
/// Consumers receive clones and treat them as read-only; all writes funnel
/// through `apply`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Catalog copy. Ids stay unique as long as creates are awaited; the
    /// dispatch-time id rule permits collisions under concurrent dispatch.
    pub all_movies: Vec<Movie>,
    /// Cached watchlist. Unique by `movie_id` because the add merge
    /// enforces it here, and only here.
    pub my_list: Vec<WatchlistItem>,
    /// Detail-view selection: a value copy frozen at selection time. Later
    /// catalog edits or deletes do not refresh or invalidate it.
    pub selected: Option<Movie>,
    pub pending: PendingOps,
    /// Fixed message from the most recent rejected operation.
    pub last_error: Option<String>,
    pub notification: Notification,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived "anything pending" view over the per-family counters.
    pub fn is_loading(&self) -> bool {
        self.pending.any()
    }

    /// The id a movie created from this snapshot would receive: one past
    /// the highest current id, or 1 for an empty catalog. Deleting the
    /// highest-id movie makes its id mintable again.
    pub fn next_movie_id(&self) -> u64 {
        self.all_movies.iter().map(|m| m.id).max().map_or(1, |max| max + 1)
    }

    /// Pure transition: consumes the current snapshot and one event and
    /// produces the successor snapshot. No I/O, no clocks, no randomness.
    pub fn apply(mut self, event: StateEvent) -> AppState {
        match event {
            StateEvent::CatalogRequested => {
                self.pending.begin(PendingKind::LoadCatalog);
                self.last_error = None;
            }
            StateEvent::CatalogLoaded(movies) => {
                self.pending.finish(PendingKind::LoadCatalog);
                self.all_movies = movies;
            }
            StateEvent::CatalogFailed(message) => {
                self.pending.finish(PendingKind::LoadCatalog);
                self.last_error = Some(message);
            }

            // The watchlist load leaves last_error alone: a stale catalog
            // error stays visible while the list refreshes.
            StateEvent::WatchlistRequested => {
                self.pending.begin(PendingKind::LoadWatchlist);
            }
            StateEvent::WatchlistLoaded(items) => {
                self.pending.finish(PendingKind::LoadWatchlist);
                self.my_list = items;
            }
            StateEvent::WatchlistFailed(message) => {
                self.pending.finish(PendingKind::LoadWatchlist);
                self.last_error = Some(message);
            }

            StateEvent::WatchlistItemAdded(item) => {
                // Sole enforcement of uniqueness-by-movie. The store happily
                // keeps duplicates when driven directly.
                if !self.my_list.iter().any(|i| i.movie_id == item.movie_id) {
                    self.my_list.push(item);
                }
            }
            StateEvent::WatchlistAddFailed(message) => {
                self.last_error = Some(message);
            }
            StateEvent::WatchlistItemRemoved { movie_id } => {
                self.my_list.retain(|i| i.movie_id != movie_id);
            }
            StateEvent::WatchlistRemoveFailed(message) => {
                self.last_error = Some(message);
            }
            StateEvent::WatchedChanged(item) => {
                if let Some(entry) = self.my_list.iter_mut().find(|i| i.movie_id == item.movie_id) {
                    entry.watched = item.watched;
                }
            }
            StateEvent::WatchedChangeFailed(message) => {
                self.last_error = Some(message);
            }

            StateEvent::MovieCreateRequested => {
                self.pending.begin(PendingKind::CreateMovie);
                self.last_error = None;
            }
            StateEvent::MovieCreated(movie) => {
                self.pending.finish(PendingKind::CreateMovie);
                self.all_movies.push(movie);
                self.notification = self
                    .notification
                    .next_shown(messages::MOVIE_CREATED, NotificationKind::Success);
            }
            StateEvent::MovieCreateFailed(message) => {
                self.pending.finish(PendingKind::CreateMovie);
                self.notification = self
                    .notification
                    .next_shown(message.clone(), NotificationKind::Error);
                self.last_error = Some(message);
            }

            StateEvent::MovieUpdateRequested => {
                self.pending.begin(PendingKind::UpdateMovie);
                self.last_error = None;
            }
            StateEvent::MovieUpdated(movie) => {
                self.pending.finish(PendingKind::UpdateMovie);
                // Wholesale replacement: fields missing from the submitted
                // entry are gone, not preserved. The frozen selection copy
                // is not refreshed.
                if let Some(slot) = self.all_movies.iter_mut().find(|m| m.id == movie.id) {
                    *slot = movie;
                }
                self.notification = self
                    .notification
                    .next_shown(messages::MOVIE_UPDATED, NotificationKind::Success);
            }
            StateEvent::MovieUpdateFailed(message) => {
                self.pending.finish(PendingKind::UpdateMovie);
                self.notification = self
                    .notification
                    .next_shown(message.clone(), NotificationKind::Error);
                self.last_error = Some(message);
            }

            StateEvent::MovieDeleteRequested => {
                self.pending.begin(PendingKind::DeleteMovie);
                self.last_error = None;
            }
            StateEvent::MovieDeleted { id } => {
                self.pending.finish(PendingKind::DeleteMovie);
                // Not cascading: watchlist records referencing the movie
                // stay behind as dangling references.
                self.all_movies.retain(|m| m.id != id);
                self.notification = self
                    .notification
                    .next_shown(messages::MOVIE_DELETED, NotificationKind::Success);
            }
            StateEvent::MovieDeleteFailed(message) => {
                self.pending.finish(PendingKind::DeleteMovie);
                self.notification = self
                    .notification
                    .next_shown(message.clone(), NotificationKind::Error);
                self.last_error = Some(message);
            }

            StateEvent::MovieSelected(movie) => {
                self.selected = Some(movie);
            }
            StateEvent::SelectionCleared => {
                self.selected = None;
            }

            StateEvent::NotificationShown { message, kind } => {
                self.notification = self.notification.next_shown(message, kind);
            }
            StateEvent::NotificationHidden => {
                self.notification = self.notification.hidden();
            }
            StateEvent::NotificationExpired { seq } => {
                // A dismiss timer only closes the notification it was
                // scheduled for; anything newer has a higher seq.
                if self.notification.visible && self.notification.seq == seq {
                    self.notification = self.notification.hidden();
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sync_models::MovieDraft;
    use chrono::Utc;

    fn create_movie(id: u64, title: &str) -> Movie {
        Movie::from_draft(
            id,
            MovieDraft {
                title: title.to_string(),
                ..MovieDraft::default()
            },
        )
    }

    fn create_item(id: u64, movie_id: u64) -> WatchlistItem {
        WatchlistItem {
            id,
            movie_id,
            watched: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = AppState::new();
        assert!(!state.is_loading());
        assert!(state.all_movies.is_empty());
        assert!(state.my_list.is_empty());
        assert!(state.selected.is_none());
        assert!(state.last_error.is_none());
        assert!(!state.notification.visible);
    }

    #[test]
    fn test_catalog_request_sets_loading_and_clears_error() {
        let state = AppState::new()
            .apply(StateEvent::CatalogFailed("boom".to_string()))
            .apply(StateEvent::CatalogRequested);

        assert!(state.is_loading());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_watchlist_request_preserves_last_error() {
        let state = AppState::new()
            .apply(StateEvent::CatalogFailed(
                messages::LOAD_CATALOG_FAILED.to_string(),
            ))
            .apply(StateEvent::WatchlistRequested);

        assert!(state.is_loading());
        assert_eq!(state.last_error.as_deref(), Some(messages::LOAD_CATALOG_FAILED));
    }

    #[test]
    fn test_catalog_loaded_replaces_movies() {
        let state = AppState::new()
            .apply(StateEvent::CatalogRequested)
            .apply(StateEvent::CatalogLoaded(vec![create_movie(1, "A")]));

        assert!(!state.is_loading());
        assert_eq!(state.all_movies.len(), 1);

        let state = state.apply(StateEvent::CatalogLoaded(vec![
            create_movie(2, "B"),
            create_movie(3, "C"),
        ]));
        assert_eq!(state.all_movies.len(), 2, "loads replace, never merge");
    }

    #[test]
    fn test_overlapping_loads_keep_loading_until_the_last_settles() {
        let state = AppState::new()
            .apply(StateEvent::CatalogRequested)
            .apply(StateEvent::CatalogRequested)
            .apply(StateEvent::CatalogLoaded(vec![]));

        assert!(state.is_loading(), "one load is still outstanding");
        assert_eq!(state.pending.in_flight(PendingKind::LoadCatalog), 1);

        let state = state.apply(StateEvent::CatalogFailed("x".to_string()));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_add_enforces_uniqueness_by_movie() {
        let state = AppState::new()
            .apply(StateEvent::WatchlistItemAdded(create_item(100, 1)))
            .apply(StateEvent::WatchlistItemAdded(create_item(200, 1)));

        assert_eq!(state.my_list.len(), 1);
        assert_eq!(state.my_list[0].id, 100, "the first record wins");
    }

    #[test]
    fn test_remove_drops_every_record_for_the_movie() {
        // Duplicates can reach the snapshot through a load of a store that
        // was written to directly; removal clears all of them.
        let state = AppState::new()
            .apply(StateEvent::WatchlistLoaded(vec![
                create_item(100, 1),
                create_item(200, 1),
                create_item(300, 2),
            ]))
            .apply(StateEvent::WatchlistItemRemoved { movie_id: 1 });

        assert_eq!(state.my_list.len(), 1);
        assert_eq!(state.my_list[0].movie_id, 2);
    }

    #[test]
    fn test_watched_change_patches_matching_entry_only() {
        let mut changed = create_item(100, 1);
        changed.watched = true;

        let state = AppState::new()
            .apply(StateEvent::WatchlistLoaded(vec![
                create_item(100, 1),
                create_item(200, 2),
            ]))
            .apply(StateEvent::WatchedChanged(changed));

        assert!(state.my_list[0].watched);
        assert!(!state.my_list[1].watched);
    }

    #[test]
    fn test_watched_change_for_unknown_movie_is_ignored() {
        let mut changed = create_item(100, 9);
        changed.watched = true;

        let state = AppState::new()
            .apply(StateEvent::WatchlistLoaded(vec![create_item(100, 1)]))
            .apply(StateEvent::WatchedChanged(changed));

        assert!(!state.my_list[0].watched);
    }

    #[test]
    fn test_create_appends_and_notifies() {
        let state = AppState::new()
            .apply(StateEvent::MovieCreateRequested)
            .apply(StateEvent::MovieCreated(create_movie(1, "A")));

        assert!(!state.is_loading());
        assert_eq!(state.all_movies.len(), 1);
        assert!(state.notification.visible);
        assert_eq!(state.notification.message, messages::MOVIE_CREATED);
        assert_eq!(state.notification.kind, NotificationKind::Success);
    }

    #[test]
    fn test_update_replaces_the_entry_wholesale() {
        let mut rich = create_movie(1, "A");
        rich.badge = "top10".to_string();

        let state = AppState::new()
            .apply(StateEvent::CatalogLoaded(vec![rich]))
            .apply(StateEvent::MovieUpdated(create_movie(1, "A edited")));

        assert_eq!(state.all_movies[0].title, "A edited");
        assert_eq!(
            state.all_movies[0].badge, "none",
            "fields absent from the submitted entry are lost, not preserved"
        );
        assert_eq!(state.notification.message, messages::MOVIE_UPDATED);
    }

    #[test]
    fn test_update_for_unknown_id_changes_nothing_but_still_notifies() {
        let state = AppState::new()
            .apply(StateEvent::CatalogLoaded(vec![create_movie(1, "A")]))
            .apply(StateEvent::MovieUpdated(create_movie(9, "Ghost")));

        assert_eq!(state.all_movies.len(), 1);
        assert_eq!(state.all_movies[0].title, "A");
        assert!(state.notification.visible);
    }

    #[test]
    fn test_delete_is_not_cascading() {
        let movie = create_movie(1, "A");
        let state = AppState::new()
            .apply(StateEvent::CatalogLoaded(vec![movie.clone(), create_movie(2, "B")]))
            .apply(StateEvent::WatchlistItemAdded(create_item(100, 1)))
            .apply(StateEvent::MovieSelected(movie))
            .apply(StateEvent::MovieDeleted { id: 1 });

        assert_eq!(state.all_movies.len(), 1);
        assert_eq!(
            state.my_list[0].movie_id, 1,
            "the watchlist record dangles after the delete"
        );
        assert_eq!(
            state.selected.as_ref().map(|m| m.id),
            Some(1),
            "the frozen selection copy survives the delete"
        );
    }

    #[test]
    fn test_failed_mutation_sets_error_and_notification() {
        let state = AppState::new()
            .apply(StateEvent::MovieDeleteRequested)
            .apply(StateEvent::MovieDeleteFailed(
                messages::DELETE_MOVIE_FAILED.to_string(),
            ));

        assert!(!state.is_loading());
        assert_eq!(state.last_error.as_deref(), Some(messages::DELETE_MOVIE_FAILED));
        assert_eq!(state.notification.kind, NotificationKind::Error);
        assert_eq!(state.notification.message, messages::DELETE_MOVIE_FAILED);
    }

    #[test]
    fn test_selection_is_a_frozen_value_copy() {
        let original = create_movie(1, "A");
        let state = AppState::new()
            .apply(StateEvent::CatalogLoaded(vec![original.clone()]))
            .apply(StateEvent::MovieSelected(original))
            .apply(StateEvent::MovieUpdated(create_movie(1, "A edited")));

        assert_eq!(state.all_movies[0].title, "A edited");
        assert_eq!(state.selected.as_ref().map(|m| m.title.as_str()), Some("A"));

        let state = state.apply(StateEvent::SelectionCleared);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_notification_shown_replaces_the_previous_one() {
        let state = AppState::new()
            .apply(StateEvent::NotificationShown {
                message: "first".to_string(),
                kind: NotificationKind::Success,
            })
            .apply(StateEvent::NotificationShown {
                message: "second".to_string(),
                kind: NotificationKind::Error,
            });

        assert_eq!(state.notification.message, "second");
        assert_eq!(state.notification.seq, 2);
    }

    #[test]
    fn test_expiry_with_stale_seq_is_a_no_op() {
        let state = AppState::new()
            .apply(StateEvent::NotificationShown {
                message: "first".to_string(),
                kind: NotificationKind::Success,
            })
            .apply(StateEvent::NotificationShown {
                message: "second".to_string(),
                kind: NotificationKind::Success,
            })
            .apply(StateEvent::NotificationExpired { seq: 1 });

        assert!(state.notification.visible, "the stale timer must not close the newer toast");

        let state = state.apply(StateEvent::NotificationExpired { seq: 2 });
        assert!(!state.notification.visible);
    }

    #[test]
    fn test_seq_stays_monotonic_across_hides() {
        let state = AppState::new()
            .apply(StateEvent::NotificationShown {
                message: "first".to_string(),
                kind: NotificationKind::Success,
            })
            .apply(StateEvent::NotificationHidden)
            .apply(StateEvent::NotificationShown {
                message: "second".to_string(),
                kind: NotificationKind::Success,
            });

        assert_eq!(state.notification.seq, 2);
    }

    #[test]
    fn test_next_movie_id_is_one_past_the_maximum() {
        let state = AppState::new();
        assert_eq!(state.next_movie_id(), 1);

        let state = state.apply(StateEvent::CatalogLoaded(vec![
            create_movie(1, "A"),
            create_movie(2, "B"),
        ]));
        assert_eq!(state.next_movie_id(), 3);

        // Deleting the highest id makes it mintable again
        let state = state.apply(StateEvent::MovieDeleted { id: 2 });
        assert_eq!(state.next_movie_id(), 2);

        // Deleting a lower id does not
        let state = state
            .apply(StateEvent::CatalogLoaded(vec![create_movie(1, "A"), create_movie(2, "B")]))
            .apply(StateEvent::MovieDeleted { id: 1 });
        assert_eq!(state.next_movie_id(), 3);
    }

    #[test]
    fn test_snapshot_serializes_for_structured_output() {
        let state = AppState::new()
            .apply(StateEvent::CatalogLoaded(vec![create_movie(1, "A")]))
            .apply(StateEvent::WatchlistItemAdded(create_item(100, 1)));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["allMovies"][0]["id"], 1);
        assert_eq!(value["myList"][0]["movieId"], 1);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let base = AppState::new().apply(StateEvent::CatalogLoaded(vec![create_movie(1, "A")]));
        let event = StateEvent::MovieDeleted { id: 1 };

        let first = base.clone().apply(event.clone());
        let second = base.apply(event);
        assert_eq!(first, second);
    }
}
