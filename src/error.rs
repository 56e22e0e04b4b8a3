use thiserror::Error;

/// Custom error type for Holocron operations.
#[derive(Debug, Error)]
pub enum HolocronError {
    /// Requested resource does not exist upstream. Never retried.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Catalog returned a non-success status (429/5xx only after the
    /// retry ceiling was exhausted).
    #[error("Catalog request failed with status {status}: {url}")]
    Upstream { status: u16, url: String },

    /// Transport-level failure after the retry ceiling was exhausted.
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// A 2xx response body that could not be parsed. Non-2xx bodies are
    /// never assumed parseable and do not produce this variant.
    #[error("Invalid response body from {url}: {message}")]
    Decode { url: String, message: String },

    /// Required configuration is missing or invalid. Fails before any
    /// network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model-requested tool call referenced an unknown tool or carried
    /// arguments that do not match the tool's schema. Reported back into
    /// the model-visible history, not to the end user.
    #[error("Invalid tool call: {0}")]
    ToolValidation(String),

    /// The model call itself failed or the turn could not start.
    #[error("Agent error: {0}")]
    Orchestrator(String),
}

impl HolocronError {
    /// True when the error means "this entity does not exist", letting
    /// callers render a missing-entity state without matching on URLs.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HolocronError::NotFound { .. })
    }
}
