pub mod messages;
pub mod orchestrator;
pub mod state;

pub use orchestrator::{StateOrchestrator, DEFAULT_DISMISS_DELAY};
pub use state::{AppState, PendingKind, StateEvent};
