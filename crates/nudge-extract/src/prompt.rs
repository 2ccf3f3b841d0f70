//! Prompt and schema construction for reminder extraction.

use chrono::{DateTime, FixedOffset};
use serde_json::json;

use crate::provider::FunctionSchema;

/// Extraction rules embedded in the system prompt.
///
/// Date qualifiers are deliberately ignored: only a time of day is ever
/// extracted, and day resolution belongs to the reconciliation scheduler.
const EXTRACTION_RULES: &str = "\
You are an AI assistant that extracts reminder time and message from user requests.

Rules:
- Handle absolute times (e.g., \"4:30 PM\") and relative times (e.g., \"in 15 minutes\", \"in 2 hours\").
- If the user says a relative time, add it to the current time to calculate the absolute hour and minute.
- Ignore words like \"tomorrow\", \"next week\" — only use today's time.
- Return time in 24-hour format (hour 0-23).
- The reminder_message must be friendly, conversational, and sound like a human phone reminder.
- Always start with a greeting, mention it's a reminder call, and then say the actual reminder content.";

/// Build the full system prompt with the reference time embedded as 24-hour HH:MM.
pub fn system_prompt(now: DateTime<FixedOffset>) -> String {
    format!(
        "You are a helpful assistant that extracts reminder times and messages. \
         Follow the JSON schema strictly.\n{}\nThe current time is {} in 24-hour format.",
        EXTRACTION_RULES,
        now.format("%H:%M"),
    )
}

/// The fixed function schema the provider must satisfy: all three fields
/// mandatory, hour and minute already range-bounded.
pub fn reminder_schema() -> FunctionSchema {
    FunctionSchema {
        name: "extract_reminder_time".to_string(),
        description: "Extract reminder time (hour, minute) and reminder message from a user message."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "hour": {
                    "type": "integer",
                    "description": "Hour in 24-hour format (0-23)"
                },
                "minute": {
                    "type": "integer",
                    "description": "Minute (0-59)"
                },
                "reminder_message": {
                    "type": "string",
                    "description": "Short friendly reminder message to play during a call"
                }
            },
            "required": ["hour", "minute", "reminder_message"]
        }),
    }
}
