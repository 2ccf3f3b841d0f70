//! `nudge-core` — shared types, configuration, and errors for the reminder engine.
//!
//! Everything here is pure data: no database handles, no HTTP clients, no
//! background tasks. The other crates depend on this one and never on each
//! other's internals.

pub mod config;
pub mod error;
pub mod types;

pub use config::NudgeConfig;
pub use error::{NudgeError, Result};
pub use types::{Reminder, ReminderId};
