//! `nudge-notify` — outbound delivery of fired reminders.
//!
//! Delivery is fire-and-forget from the scheduler's perspective: a failed
//! delivery is logged by the caller, never retried here, and never fatal.

pub mod error;
pub mod log;
pub mod webhook;

use async_trait::async_trait;

pub use error::{NotifyError, Result};
pub use log::LogNotifier;
pub use webhook::WebhookNotifier;

/// Common interface for outbound reminder delivery channels.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name for logging and error messages.
    fn name(&self) -> &str;

    /// Deliver `message` through the channel. Failures must not propagate as
    /// fatal to the caller.
    async fn deliver(&self, message: &str) -> Result<()>;
}
