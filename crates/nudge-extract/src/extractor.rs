use chrono::{DateTime, Duration, FixedOffset, Timelike};
use tracing::{debug, warn};

use crate::prompt::{reminder_schema, system_prompt};
use crate::provider::CompletionProvider;

/// Lexical markers that suggest the input carries an explicit time.
/// Checked as case-insensitive substrings, alongside any ASCII digit.
const TIME_MARKERS: [&str; 5] = ["am", "pm", "minute", "hour", ":"];

/// The structured result of extraction: a same-day wall-clock time plus the
/// message to deliver. Hour and minute are always in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReminder {
    pub hour: u8,
    pub minute: u8,
    pub message: String,
}

/// Turns free text plus a reference timestamp into an [`ExtractedReminder`].
///
/// Total: never returns an error to the caller. Every failure path resolves
/// to the deterministic fallback of `now + fallback_offset` with a
/// greeting-wrapped message built from the raw input.
pub struct TimeExtractor {
    provider: Box<dyn CompletionProvider>,
    fallback_offset: Duration,
}

impl TimeExtractor {
    pub fn new(provider: Box<dyn CompletionProvider>, fallback_offset_mins: u64) -> Self {
        Self {
            provider,
            fallback_offset: Duration::minutes(fallback_offset_mins as i64),
        }
    }

    /// Extract `(hour, minute, message)` from `text` relative to `now`.
    ///
    /// Inputs with no time signal skip the provider call entirely — the
    /// short-circuit avoids a completion round-trip for clearly time-free
    /// requests.
    pub async fn extract(&self, text: &str, now: DateTime<FixedOffset>) -> ExtractedReminder {
        if !has_time_signal(text) {
            debug!("no time signal in input — skipping extraction");
            return self.fallback(text, now);
        }

        let schema = reminder_schema();
        match self.provider.complete(&system_prompt(now), text, &schema).await {
            Ok(value) => match validate(value) {
                Some(extracted) => extracted,
                None => {
                    warn!(
                        provider = self.provider.name(),
                        "extraction response failed schema validation — using fallback"
                    );
                    self.fallback(text, now)
                }
            },
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "extraction call failed — using fallback"
                );
                self.fallback(text, now)
            }
        }
    }

    /// Deterministic default: `now + fallback_offset`, greeting-wrapped input.
    /// Day rollover is expressed purely via the wrapped hour value.
    fn fallback(&self, text: &str, now: DateTime<FixedOffset>) -> ExtractedReminder {
        let at = now + self.fallback_offset;
        ExtractedReminder {
            hour: at.hour() as u8,
            minute: at.minute() as u8,
            message: format!(
                "Hello! This is your friendly reminder call to {}.",
                text.trim()
            ),
        }
    }
}

/// True when the input carries any lexical time marker or digit.
pub fn has_time_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    TIME_MARKERS.iter().any(|m| lower.contains(m)) || text.chars().any(|c| c.is_ascii_digit())
}

/// Check the provider's structured response against the schema contract.
///
/// A message that does not start with a greeting passes through unchanged —
/// normalisation is best-effort, not corrective.
fn validate(value: serde_json::Value) -> Option<ExtractedReminder> {
    let hour = value.get("hour")?.as_u64()?;
    let minute = value.get("minute")?.as_u64()?;
    let message = value.get("reminder_message")?.as_str()?;
    if hour > 23 || minute > 59 || message.is_empty() {
        return None;
    }
    Some(ExtractedReminder {
        hour: hour as u8,
        minute: minute as u8,
        message: message.to_string(),
    })
}
