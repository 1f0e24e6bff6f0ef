use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient toast state. At most one notification exists at a time;
/// showing a new one replaces whatever is visible.
///
/// The notification carries no timer of its own. Whoever shows it schedules
/// the dismissal, keyed to `seq`, so a timer left over from an earlier
/// notification can never close a later one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
    pub kind: NotificationKind,
    /// Instance key, bumped on every show. Monotonic for the lifetime of
    /// the state container, including across hides.
    pub seq: u64,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            kind: NotificationKind::Success,
            seq: 0,
        }
    }
}

impl Notification {
    /// The next visible notification, keyed one past this instance.
    pub fn next_shown(&self, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            visible: true,
            message: message.into(),
            kind,
            seq: self.seq + 1,
        }
    }

    /// The blank hidden state with the instance key carried forward.
    pub fn hidden(&self) -> Self {
        Self {
            seq: self.seq,
            ..Self::default()
        }
    }
}
