use async_trait::async_trait;

/// A function/tool definition sent to the completion API to constrain the
/// response to a fixed JSON shape.
#[derive(Debug, Clone)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema for the function parameters.
    pub parameters: serde_json::Value,
}

/// Common interface for natural-language completion providers.
///
/// Treated as unreliable by design: every call site must have a fallback.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging and error messages.
    fn name(&self) -> &str;

    /// Send `system` + `user` to the provider, constrained to `schema`, and
    /// return the structured arguments of the resulting function call.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        schema: &FunctionSchema,
    ) -> Result<serde_json::Value, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}
