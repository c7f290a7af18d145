//! Error types for report domain validation and parsing.

use super::{ReportId, ReportStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain report values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportDomainError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// The password is empty or whitespace only.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The comment body is empty after trimming.
    #[error("comment body must not be empty")]
    EmptyCommentBody,

    /// The requested status change is not permitted by the state machine.
    #[error("report {report_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Report being transitioned.
        report_id: ReportId,
        /// Current status.
        from: ReportStatus,
        /// Requested status.
        to: ReportStatus,
    },
}

/// Error returned while parsing report statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown report status: {0}")]
pub struct ParseReportStatusError(pub String);
