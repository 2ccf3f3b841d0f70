use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset};
use tokio::task::AbortHandle;
use tracing::{error, info, warn};

use nudge_core::types::ReminderId;
use nudge_notify::Notifier;
use nudge_store::ReminderStore;

use crate::classify::{classify, Disposition};
use crate::error::Result;

/// Owned per-task capture of a reminder about to fire. Each scheduled action
/// gets its own value — never a reference into the reconciliation loop.
#[derive(Debug, Clone)]
struct FiredReminder {
    id: ReminderId,
    message: String,
}

/// Rebuilds the delivery schedule from the store on every pass.
///
/// The engine owns the in-memory set of scheduled one-shot tasks; nothing
/// else may mutate it. It is constructed once at process start and handed to
/// whatever triggers reconciliation — there is no ambient global state.
pub struct ReconcilerEngine {
    store: ReminderStore,
    notifier: Arc<dyn Notifier>,
    catch_up_window: Duration,
    /// Abort handles for not-yet-fired delivery tasks from the latest pass.
    scheduled: Vec<AbortHandle>,
}

impl ReconcilerEngine {
    pub fn new(store: ReminderStore, notifier: Arc<dyn Notifier>, catch_up_window_secs: u64) -> Self {
        Self {
            store,
            notifier,
            catch_up_window: Duration::seconds(catch_up_window_secs as i64),
            scheduled: Vec::new(),
        }
    }

    /// Run one reconciliation pass against `now` in the configured zone.
    ///
    /// Discards all previously scheduled tasks, then classifies every stored
    /// reminder: just-missed ones are delivered immediately and retired,
    /// the rest get a fresh one-shot delivery task for today or tomorrow.
    /// Returns the number of reminders processed. A single reminder's
    /// delivery or delete failure never aborts the pass; only a failed store
    /// listing does.
    ///
    /// The reset can abort a task that is parked inside `deliver` after the
    /// request went out but before the row was deleted; the next pass then
    /// reschedules that reminder and it may be delivered twice. Accepted:
    /// the store stays authoritative and no reminder is ever lost.
    pub async fn reconcile(&mut self, now: DateTime<FixedOffset>) -> Result<usize> {
        // Blanket reset: the pass is authoritative and total. The store still
        // holds every pending reminder, so nothing is lost by discarding.
        for handle in self.scheduled.drain(..) {
            handle.abort();
        }

        let reminders = self.store.list_all()?;
        let count = reminders.len();
        let mut fired = 0usize;
        let mut deferred = 0usize;

        for reminder in reminders {
            match classify(reminder.hour, reminder.minute, now, self.catch_up_window) {
                None => {
                    error!(
                        reminder_id = %reminder.id,
                        hour = reminder.hour,
                        minute = reminder.minute,
                        "unrepresentable reminder time — skipping"
                    );
                }
                Some(Disposition::FireNow) => {
                    info!(reminder_id = %reminder.id, "within catch-up window — firing now");
                    let target = FiredReminder {
                        id: reminder.id,
                        message: reminder.message,
                    };
                    deliver_and_retire(&self.store, self.notifier.as_ref(), &target).await;
                    fired += 1;
                }
                Some(Disposition::ScheduleAt(at)) => {
                    let delay = (at - now).to_std().unwrap_or_default();
                    let target = FiredReminder {
                        id: reminder.id,
                        message: reminder.message,
                    };
                    info!(reminder_id = %target.id, fire_at = %at, "delivery scheduled");

                    let store = self.store.clone();
                    let notifier = Arc::clone(&self.notifier);
                    let handle = tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        deliver_and_retire(&store, notifier.as_ref(), &target).await;
                    });
                    self.scheduled.push(handle.abort_handle());
                    deferred += 1;
                }
            }
        }

        info!(count, fired, deferred, "reconciliation pass complete");
        Ok(count)
    }

    /// Number of not-yet-fired tasks registered by the latest pass.
    pub fn scheduled_len(&self) -> usize {
        self.scheduled.len()
    }
}

/// Deliver, then retire. At-most-once-attempted: the row is deleted even
/// when the channel reported failure, so a failed delivery is logged and
/// lost rather than retried.
async fn deliver_and_retire(store: &ReminderStore, notifier: &dyn Notifier, target: &FiredReminder) {
    if let Err(e) = notifier.deliver(&target.message).await {
        warn!(
            reminder_id = %target.id,
            channel = notifier.name(),
            error = %e,
            "delivery failed — reminder retired without retry"
        );
    }
    if let Err(e) = store.delete(&target.id) {
        warn!(reminder_id = %target.id, error = %e, "failed to retire reminder");
    }
}
