//! `nudge-store` — SQLite-backed collection of pending reminders.
//!
//! The store is the only durable record in the system: the scheduler's
//! in-memory task set is derived from it and rebuilt on every reconciliation
//! pass. A reminder exists here from successful insertion until it is
//! delivered and deleted.

pub mod db;
pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::ReminderStore;
