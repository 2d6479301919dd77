//! Application error type and its HTTP mapping.
//!
//! Every failure a request can run into is expressed as an [`AppError`].
//! Client errors carry a short message that is safe to return as-is; store
//! failures are logged with their cause and answered with a generic
//! `Server error` body so driver details never reach the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every server-side failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Message returned when a custom code fails the format check on creation.
pub const CUSTOM_CODE_FORMAT_MESSAGE: &str = "Custom code must match [A-Za-z0-9]{6,8}";

/// Message returned when a code path parameter fails the format check.
pub const CODE_FORMAT_MESSAGE: &str = "Invalid code format";

/// JSON body of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The target is missing, unparsable, or not `http`/`https`.
    #[error("Invalid target URL")]
    InvalidTarget,

    /// A code does not match `[A-Za-z0-9]{6,8}`.
    #[error("{message}")]
    InvalidCodeFormat { message: &'static str },

    /// The request body could not be read as a link request.
    #[error("{0}")]
    Validation(String),

    /// The code is already taken (or reserved).
    #[error("{message}")]
    CodeConflict { message: &'static str },

    #[error("Not found")]
    NotFound,

    /// No free code was found across every length and attempt.
    #[error("Unable to generate unique code")]
    AllocationExhausted,

    /// A store call or a pool checkout exceeded its time budget.
    #[error("Store operation timed out")]
    StoreTimeout,

    #[error("Store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl AppError {
    pub fn invalid_custom_code() -> Self {
        Self::InvalidCodeFormat {
            message: CUSTOM_CODE_FORMAT_MESSAGE,
        }
    }

    pub fn invalid_code() -> Self {
        Self::InvalidCodeFormat {
            message: CODE_FORMAT_MESSAGE,
        }
    }

    pub fn code_taken() -> Self {
        Self::CodeConflict {
            message: "Code already exists",
        }
    }

    pub fn code_reserved() -> Self {
        Self::CodeConflict {
            message: "Code is reserved",
        }
    }

    /// HTTP status this error is answered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTarget | Self::InvalidCodeFormat { .. } | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::CodeConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AllocationExhausted | Self::StoreTimeout | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message that may be shown to the client.
    ///
    /// Server errors collapse to [`SERVER_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Logs server-side failures with their internal cause.
    pub fn log(&self) {
        if self.is_server_error() {
            tracing::error!(error = %self, source = ?std::error::Error::source(self), "Request failed");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::PoolTimedOut) {
            return Self::StoreTimeout;
        }

        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return Self::code_taken();
        }

        Self::Store(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
