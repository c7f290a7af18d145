//! Mapping of lifecycle failures onto HTTP responses.

use super::views::ErrorView;
use crate::report::services::{ReportErrorKind, ReportLifecycleError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ReportErrorKind,
    message: String,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ReportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ReportErrorKind {
        self.kind
    }

    /// Returns the HTTP status for the error kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            ReportErrorKind::NotFound => StatusCode::NOT_FOUND,
            ReportErrorKind::Unauthorized => StatusCode::FORBIDDEN,
            ReportErrorKind::InvalidState => StatusCode::CONFLICT,
            ReportErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            ReportErrorKind::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ReportLifecycleError> for ApiError {
    fn from(err: ReportLifecycleError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ReportErrorKind::ValidationFailure, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = %self.kind, message = %self.message, "request failed");
        } else {
            warn!(kind = %self.kind, message = %self.message, "request rejected");
        }

        let body = ErrorView {
            name: self.kind.name().to_owned(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}
