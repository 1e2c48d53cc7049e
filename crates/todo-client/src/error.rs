/// Client-specific result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors from the todo API gateway
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Envelope message, or the status reason phrase
        message: String,
        /// Stable machine-readable identifier, when the server sent one
        code: Option<String>,
    },

    /// Transport failure; passed through without reshaping
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request payload could not be serialized
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Success body did not match the expected type
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of an API failure
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable code of an API failure
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
