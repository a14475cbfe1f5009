use thiserror::Error;

/// Top-level error type for Polyglot.
#[derive(Debug, Error)]
pub enum PolyglotError {
    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Error from a translation provider.
    #[error("translator error: {0}")]
    Translator(#[from] TranslateError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a single translation call failed.
///
/// Users only ever see one generic message for all of these; the variants
/// exist so the logs can tell them apart.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The endpoint answered with something other than 200.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// 200 with a JSON body that has no `translatedText`.
    #[error("response is missing translatedText")]
    MissingField,

    /// The body could not be decoded as JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The call did not finish within the request timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, DNS, TLS, or any other transport failure.
    #[error("request failed: {0}")]
    Network(String),
}

impl TranslateError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
