use thiserror::Error;

/// Workspace-level errors. The subsystem crates carry their own enums
/// (`StoreError`, `ProviderError`, `NotifyError`, `ReconcileError`); this one
/// only covers concerns owned by `nudge-core` itself.
#[derive(Debug, Error)]
pub enum NudgeError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NudgeError>;
