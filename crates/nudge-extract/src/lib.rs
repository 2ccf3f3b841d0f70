//! `nudge-extract` — natural-language time extraction with a guaranteed fallback.
//!
//! # Overview
//!
//! [`TimeExtractor::extract`] turns free text plus a reference timestamp into
//! a `(hour, minute, message)` tuple. It is total: every failure path — no
//! provider configured, transport error, malformed response, out-of-range
//! fields — resolves to the same deterministic fallback of "reference time
//! plus a configured offset" with a greeting-wrapped message.
//!
//! Inputs with no lexical time signal (no `am`/`pm`/`minute`/`hour`/colon and
//! no digits) skip the provider call entirely, saving cost and latency.

pub mod extractor;
pub mod groq;
pub mod prompt;
pub mod provider;

pub use extractor::{ExtractedReminder, TimeExtractor};
pub use groq::GroqProvider;
pub use provider::{CompletionProvider, FunctionSchema, ProviderError};
