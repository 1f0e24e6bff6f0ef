use catalog_sync_models::{Movie, MovieDraft, NotificationKind, WatchlistPatch};
use catalog_sync_store::PersistenceService;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::messages;
use crate::state::{AppState, StateEvent};

/// How long a notification stays visible before its scheduled dismiss.
pub const DEFAULT_DISMISS_DELAY: Duration = Duration::from_millis(3000);

/// Maps user intents to persistence calls and folds the outcomes back into
/// the state container.
///
/// Each async operation applies its request event synchronously at
/// dispatch, awaits the service, then applies exactly one of the fulfilled
/// or rejected events. The orchestrator is the single writer of the
/// snapshot, and the state lock is never held across an await.
pub struct StateOrchestrator {
    service: Arc<PersistenceService>,
    state: Arc<RwLock<AppState>>,
    dismiss_delay: Duration,
    dismiss_task: Mutex<Option<JoinHandle<()>>>,
}

fn apply_to(state: &RwLock<AppState>, event: StateEvent) {
    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    let next = std::mem::take(&mut *guard).apply(event);
    *guard = next;
}

impl StateOrchestrator {
    pub fn new(service: PersistenceService) -> Self {
        Self {
            service: Arc::new(service),
            state: Arc::new(RwLock::new(AppState::new())),
            dismiss_delay: DEFAULT_DISMISS_DELAY,
            dismiss_task: Mutex::new(None),
        }
    }

    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay = delay;
        self
    }

    /// Current snapshot, cloned. Consumers render from this and never
    /// mutate it; all writes go through the operation surface.
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn load_catalog(&self) {
        self.apply(StateEvent::CatalogRequested);
        let movies = self.service.fetch_catalog().await;
        debug!("Catalog load fulfilled: {} titles", movies.len());
        self.apply(StateEvent::CatalogLoaded(movies));
    }

    pub async fn load_watchlist(&self) {
        self.apply(StateEvent::WatchlistRequested);
        match self.service.fetch_watchlist().await {
            Ok(items) => {
                debug!("Watchlist load fulfilled: {} items", items.len());
                self.apply(StateEvent::WatchlistLoaded(items));
            }
            Err(e) => {
                warn!("Watchlist load failed: {}", e);
                self.apply(StateEvent::WatchlistFailed(
                    messages::LOAD_WATCHLIST_FAILED.to_string(),
                ));
            }
        }
    }

    /// Put `movie` on the list. The store keeps whatever it is handed;
    /// uniqueness by movie holds only in the snapshot merge.
    pub async fn add_to_watchlist(&self, movie: &Movie) {
        match self.service.add_watchlist_item(movie.id).await {
            Ok(item) => self.apply(StateEvent::WatchlistItemAdded(item)),
            Err(e) => {
                warn!("Add to watchlist failed for movie {}: {}", movie.id, e);
                self.apply(StateEvent::WatchlistAddFailed(
                    messages::ADD_TO_WATCHLIST_FAILED.to_string(),
                ));
            }
        }
    }

    /// Take `movie_id` off the list. The stored record is resolved from the
    /// dispatch-time snapshot; with nothing resolved the removal is a
    /// successful no-op, the same as removing an absent record upstream.
    pub async fn remove_from_watchlist(&self, movie_id: u64) {
        let outcome = match self.find_item_id(movie_id) {
            Some(item_id) => self.service.remove_watchlist_item(item_id).await,
            None => {
                tokio::time::sleep(self.service.latency()).await;
                Ok(())
            }
        };
        match outcome {
            Ok(()) => self.apply(StateEvent::WatchlistItemRemoved { movie_id }),
            Err(e) => {
                warn!("Remove from watchlist failed for movie {}: {}", movie_id, e);
                self.apply(StateEvent::WatchlistRemoveFailed(
                    messages::REMOVE_FROM_WATCHLIST_FAILED.to_string(),
                ));
            }
        }
    }

    /// Flip the watched flag on the list entry for `movie_id`.
    pub async fn set_watched(&self, movie_id: u64, watched: bool) {
        match self.find_item_id(movie_id) {
            Some(item_id) => {
                match self
                    .service
                    .update_watchlist_item(item_id, WatchlistPatch::watched(watched))
                    .await
                {
                    Ok(item) => self.apply(StateEvent::WatchedChanged(item)),
                    Err(e) => {
                        warn!("Watched change failed for movie {}: {}", movie_id, e);
                        self.apply(StateEvent::WatchedChangeFailed(
                            messages::SET_WATCHED_FAILED.to_string(),
                        ));
                    }
                }
            }
            None => {
                tokio::time::sleep(self.service.latency()).await;
                warn!("Watched change failed: no list entry for movie {}", movie_id);
                self.apply(StateEvent::WatchedChangeFailed(
                    messages::SET_WATCHED_FAILED.to_string(),
                ));
            }
        }
    }

    /// Create a catalog movie from `draft`.
    ///
    /// The id is one past the highest id in the snapshot *at dispatch
    /// time*. Overlapping creates read the same snapshot and mint the same
    /// id; await each create before dispatching the next to keep ids
    /// unique.
    pub async fn create_movie(&self, draft: MovieDraft) {
        let id = self.snapshot().next_movie_id();
        self.apply(StateEvent::MovieCreateRequested);
        // No durable backend sits behind catalog mutations; they simulate
        // the latency of one and complete in memory.
        tokio::time::sleep(self.service.latency()).await;
        let movie = Movie::from_draft(id, draft);
        debug!("Movie created: id={} title={:?}", id, movie.title);
        self.apply(StateEvent::MovieCreated(movie));
        self.schedule_dismiss_for_current();
    }

    /// Replace the catalog entry `id` with one built from `draft`.
    pub async fn update_movie(&self, id: u64, draft: MovieDraft) {
        self.apply(StateEvent::MovieUpdateRequested);
        tokio::time::sleep(self.service.latency()).await;
        let movie = Movie::from_draft(id, draft);
        debug!("Movie updated: id={}", id);
        self.apply(StateEvent::MovieUpdated(movie));
        self.schedule_dismiss_for_current();
    }

    pub async fn delete_movie(&self, id: u64) {
        self.apply(StateEvent::MovieDeleteRequested);
        tokio::time::sleep(self.service.latency()).await;
        debug!("Movie deleted: id={}", id);
        self.apply(StateEvent::MovieDeleted { id });
        self.schedule_dismiss_for_current();
    }

    /// Store a value copy for the detail view, frozen as of now.
    pub fn select(&self, movie: &Movie) {
        self.apply(StateEvent::MovieSelected(movie.clone()));
    }

    pub fn clear_selection(&self) {
        self.apply(StateEvent::SelectionCleared);
    }

    /// Show a notification, replacing whatever is visible, and schedule its
    /// dismissal.
    pub fn show_notification(&self, message: impl Into<String>, kind: NotificationKind) {
        self.apply(StateEvent::NotificationShown {
            message: message.into(),
            kind,
        });
        self.schedule_dismiss_for_current();
    }

    /// Hide the current notification and cancel its dismiss timer.
    pub fn hide_notification(&self) {
        self.cancel_dismiss();
        self.apply(StateEvent::NotificationHidden);
    }

    fn apply(&self, event: StateEvent) {
        apply_to(&self.state, event);
    }

    /// Resolve the stored record id for a movie from the current snapshot.
    fn find_item_id(&self, movie_id: u64) -> Option<u64> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .my_list
            .iter()
            .find(|i| i.movie_id == movie_id)
            .map(|i| i.id)
    }

    /// Schedule the dismiss for whatever notification is showing, replacing
    /// any previously scheduled timer. The spawned timer carries the
    /// notification's seq, so it expires only its own notification.
    fn schedule_dismiss_for_current(&self) {
        let seq = {
            let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if !guard.notification.visible {
                return;
            }
            guard.notification.seq
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No runtime, no timer: the notification stays until hidden.
            return;
        };

        let state = Arc::clone(&self.state);
        let delay = self.dismiss_delay;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            apply_to(&state, StateEvent::NotificationExpired { seq });
        });

        let mut slot = self
            .dismiss_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }

    fn cancel_dismiss(&self) {
        let mut slot = self
            .dismiss_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}
