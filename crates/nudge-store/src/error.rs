use thiserror::Error;

/// Errors that can occur within the reminder store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No reminder with the given ID exists in the store.
    #[error("Reminder not found: {id}")]
    NotFound { id: String },

    /// Hour or minute outside the valid wall-clock ranges.
    #[error("Invalid time: {hour:02}:{minute:02}")]
    InvalidTime { hour: u8, minute: u8 },
}

pub type Result<T> = std::result::Result<T, StoreError>;
