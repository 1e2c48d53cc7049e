use std::fmt;

use serde::{Deserialize, Serialize};

/// Message sent for every validation failure
pub const VALIDATION_MESSAGE: &str = "Validation error";

/// Message sent in place of internal failure text
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Uniform body of every non-success response
///
/// Both fields are optional on the way in so that a client can decode
/// bodies from servers that only partially follow the contract. The
/// server always fills `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable machine-readable identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorEnvelope {
    /// Create an envelope with a message and a well-known code
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: Some(message.into()),
            code: Some(code.as_str().to_owned()),
        }
    }

    /// Decode an error body, substituting an empty envelope when the body
    /// is not a JSON object of the expected shape
    pub fn parse_lenient(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Codes emitted by the server's fault translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request input failed validation
    Validation,
    /// Any other client-attributable failure
    Client,
    /// Server fault; details are never exposed
    Internal,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Client => "CLIENT_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
