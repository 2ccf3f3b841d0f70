use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Delivery rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, NotifyError>;
