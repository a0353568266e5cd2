//! Larder error types

/// Larder error types
#[derive(Debug, thiserror::Error)]
pub enum LarderError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("credential quota exhausted")]
    QuotaExhausted,

    /// Every credential in the pool failed or was rejected.
    ///
    /// The provider absorbs this and walks the fallback chain (stale
    /// cache, then offline catalog); callers of the provider never see it.
    #[error("all credentials in the pool failed")]
    CredentialsExhausted,

    // Recommendation errors
    /// Training artifacts (vocabulary, term matrix, catalog) are absent.
    ///
    /// The one condition surfaced to callers as-is: there is no sensible
    /// automatic fallback for an untrained index, so the caller decides
    /// whether to trigger training or report gracefully.
    #[error("recommendation model not trained")]
    ModelNotTrained,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("data error: {0}")]
    DataError(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl LarderError {
    /// Whether this error should advance the credential pool and retry
    /// with the next key.
    ///
    /// Unauthorized, payment-required, and rate-limited responses are the
    /// provider's designated rotate signals; transport-level failures
    /// (timeouts, connection errors) rotate as well. Any other API status
    /// fails the attempt outright.
    pub fn is_rotate_signal(&self) -> bool {
        matches!(
            self,
            LarderError::AuthenticationFailed
                | LarderError::QuotaExhausted
                | LarderError::RateLimited
                | LarderError::Http(_)
        )
    }
}

/// Result type alias for larder operations
pub type Result<T> = std::result::Result<T, LarderError>;
