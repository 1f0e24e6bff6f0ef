pub mod movie;
pub mod notification;
pub mod watchlist;

pub use movie::{Movie, MovieDraft, Poster};
pub use notification::{Notification, NotificationKind};
pub use watchlist::{WatchlistItem, WatchlistPatch};
