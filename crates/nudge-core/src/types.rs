use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored reminder. Assigned by the store on insert
/// and stable for the row's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(pub String);

impl ReminderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ReminderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReminderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A pending, one-time, time-of-day-only delivery.
///
/// There is no stored date: a reminder means "today at HH:MM, or the next
/// occurrence of that time". Day resolution (catch-up vs. rollover) belongs
/// to the reconciliation scheduler, not to this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    /// Local wall-clock hour of intended delivery (0–23).
    pub hour: u8,
    /// Minute of intended delivery (0–59).
    pub minute: u8,
    /// Text delivered when the reminder fires. Always phrased as a direct
    /// address ("reminder to do X"), never raw instructions.
    pub message: String,
}
