use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use todo_core::envelope::{INTERNAL_MESSAGE, VALIDATION_MESSAGE};
use todo_core::{ErrorCode, ErrorEnvelope, ValidationErrors};

/// Marks a response whose body is already an error envelope
///
/// The boundary middleware leaves marked responses untouched, so a request
/// is never answered twice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Translated;

/// Every failure a request can end in
///
/// Handlers return `Result<_, Fault>`. `?` on an `anyhow::Error` produces
/// [`Fault::Unclassified`]; on [`ValidationErrors`] it produces
/// [`Fault::Validation`].
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// Input failed validation; field detail stays in the server log
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Failure that already knows its HTTP status
    #[error("{message}")]
    Classified { status: StatusCode, message: String },

    /// Anything else; always answered with a generic 500
    #[error("internal error: {0}")]
    Unclassified(#[from] anyhow::Error),
}

impl Fault {
    /// Failure with an explicit status and message
    pub fn classified(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Classified {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::classified(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::classified(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::classified(StatusCode::CONFLICT, message)
    }

    /// Status code sent to the client
    ///
    /// A classified status outside 4xx/5xx is not an error status and is
    /// answered as 500.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Classified { status, .. } if status.is_client_error() || status.is_server_error() => *status,
            Self::Classified { .. } | Self::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope sent to the client
    ///
    /// Only client-attributable messages are forwarded; server faults are
    /// replaced by a generic message.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            Self::Validation(_) => ErrorEnvelope::new(VALIDATION_MESSAGE, ErrorCode::Validation),
            Self::Classified { message, .. } if self.status().is_client_error() => {
                ErrorEnvelope::new(message.clone(), ErrorCode::Client)
            }
            Self::Classified { .. } | Self::Unclassified(_) => ErrorEnvelope::new(INTERNAL_MESSAGE, ErrorCode::Internal),
        }
    }

    fn log(&self, status: StatusCode) {
        let status = status.as_u16();

        match self {
            Self::Validation(errors) => {
                tracing::error!(status, fields = ?errors.fields(), "request error: {errors}");
            }
            Self::Classified { message, .. } => {
                tracing::error!(status, "request error: {message}");
            }
            Self::Unclassified(error) => {
                tracing::error!(status, error = ?error, "request error: {error:#}");
            }
        }
    }
}

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let mut response = (status, Json(self.envelope())).into_response();
        response.extensions_mut().insert(Translated);
        response
    }
}
