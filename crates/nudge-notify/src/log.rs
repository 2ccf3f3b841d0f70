use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::Notifier;

/// Placeholder channel used when no delivery transport is configured.
///
/// Logs the message at warn level and reports success so reconciliation
/// still retires the reminder.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, message: &str) -> Result<()> {
        warn!(%message, "no notifier configured — reminder logged and dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let n = LogNotifier;
        assert!(n.deliver("reminder to water the plants").await.is_ok());
    }
}
