use thiserror::Error;

/// Errors that can occur within the reconciliation scheduler.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Listing the store failed — the pass cannot even begin.
    #[error("Store error: {0}")]
    Store(#[from] nudge_store::StoreError),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
