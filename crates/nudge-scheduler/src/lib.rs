//! `nudge-scheduler` — reconciliation of stored reminders against wall-clock time.
//!
//! # Overview
//!
//! A reconciliation pass is a full resync: the engine discards every
//! previously scheduled delivery task, lists the store, and classifies each
//! reminder into one of three dispositions:
//!
//! | Disposition        | Condition                                   |
//! |--------------------|---------------------------------------------|
//! | fire now           | time-of-day passed within the catch-up window |
//! | schedule for today | time-of-day still ahead                     |
//! | schedule tomorrow  | time-of-day passed beyond the window        |
//!
//! The store is the only source of truth; the in-memory task set is a cache
//! of "what to do next", safe to throw away and rebuild because
//! reconciliation is cheap.

pub mod classify;
pub mod engine;
pub mod error;

pub use classify::{classify, Disposition};
pub use engine::ReconcilerEngine;
pub use error::{ReconcileError, Result};
