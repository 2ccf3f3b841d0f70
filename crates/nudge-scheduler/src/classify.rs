use chrono::{DateTime, Duration, FixedOffset, TimeZone};

/// What a reconciliation pass should do with one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Time-of-day just passed — deliver immediately, then retire.
    FireNow,
    /// Register a one-shot delivery at the given instant (today or tomorrow).
    ScheduleAt(DateTime<FixedOffset>),
}

/// Classify a reminder's `(hour, minute)` against `now`.
///
/// The candidate is today at HH:MM:00 in `now`'s zone. A candidate in the
/// past fires immediately when its lateness is within `catch_up_window`
/// (absorbing the jitter between a reminder's nominal time and the pass
/// observing it); beyond the window it is reinterpreted as tomorrow.
///
/// Returns `None` only when `hour`/`minute` cannot form a valid time.
pub fn classify(
    hour: u8,
    minute: u8,
    now: DateTime<FixedOffset>,
    catch_up_window: Duration,
) -> Option<Disposition> {
    let naive = now
        .date_naive()
        .and_hms_opt(u32::from(hour), u32::from(minute), 0)?;
    // A fixed offset has no DST gaps, so the local time is always unambiguous.
    let candidate = now.offset().from_local_datetime(&naive).single()?;

    if candidate <= now {
        if now - candidate <= catch_up_window {
            Some(Disposition::FireNow)
        } else {
            // Today's window has passed — advance to tomorrow.
            Some(Disposition::ScheduleAt(candidate + Duration::days(1)))
        }
    } else {
        Some(Disposition::ScheduleAt(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 60;

    fn ist(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 14, h, m, s)
            .unwrap()
    }

    fn window() -> Duration {
        Duration::seconds(WINDOW)
    }

    #[test]
    fn fifty_nine_seconds_late_fires_now() {
        let now = ist(10, 0, 59);
        assert_eq!(classify(10, 0, now, window()), Some(Disposition::FireNow));
    }

    #[test]
    fn exactly_window_late_still_fires() {
        let now = ist(10, 1, 0);
        assert_eq!(classify(10, 0, now, window()), Some(Disposition::FireNow));
    }

    #[test]
    fn sixty_one_seconds_late_rolls_to_tomorrow() {
        let now = ist(10, 1, 1);
        let expected = ist(10, 0, 0) + Duration::days(1);
        assert_eq!(
            classify(10, 0, now, window()),
            Some(Disposition::ScheduleAt(expected))
        );
    }

    #[test]
    fn exactly_now_fires() {
        let now = ist(10, 0, 0);
        assert_eq!(classify(10, 0, now, window()), Some(Disposition::FireNow));
    }

    #[test]
    fn future_today_is_scheduled_for_today() {
        let now = ist(9, 30, 0);
        assert_eq!(
            classify(14, 15, now, window()),
            Some(Disposition::ScheduleAt(ist(14, 15, 0)))
        );
    }

    #[test]
    fn missed_overnight_is_scheduled_for_next_occurrence() {
        // A 23:50 reminder observed at 00:05 the next calendar day: today's
        // candidate is 23:50 of the *new* day, still ahead — scheduled, not
        // fired, and a full day after the originally intended slot.
        let now = ist(0, 5, 0);
        assert_eq!(
            classify(23, 50, now, window()),
            Some(Disposition::ScheduleAt(ist(23, 50, 0)))
        );
    }

    #[test]
    fn unrepresentable_time_is_none() {
        let now = ist(9, 0, 0);
        assert_eq!(classify(24, 0, now, window()), None);
    }
}
