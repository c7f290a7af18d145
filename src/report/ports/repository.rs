//! Repository port for report and comment persistence.

use crate::report::domain::{Comment, Password, Report, ReportId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for report repository operations.
pub type ReportRepositoryResult<T> = Result<T, ReportRepositoryError>;

/// Report persistence contract.
///
/// Every method is a single logical transaction against durable storage.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Returns every report whose status is `open`, oldest first.
    async fn fetch_open_reports(&self) -> ReportRepositoryResult<Vec<Report>>;

    /// Stores a new report and returns the stored record.
    ///
    /// Returns `None` when the store acknowledged the write without
    /// producing a record.
    ///
    /// # Errors
    ///
    /// Returns [`ReportRepositoryError::DuplicateReport`] when the identifier
    /// already exists.
    async fn create_report(&self, report: &Report) -> ReportRepositoryResult<Option<Report>>;

    /// Atomically verifies `password` and moves the report from `open` to
    /// `closed`.
    ///
    /// Checks run in order: existence, password, status. At most one of
    /// several concurrent closes of the same report succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ReportRepositoryError::NotFound`],
    /// [`ReportRepositoryError::PasswordMismatch`] or
    /// [`ReportRepositoryError::AlreadyClosed`]; nothing is written in any of
    /// these cases.
    async fn close_report(
        &self,
        id: ReportId,
        password: &Password,
        closed_at: DateTime<Utc>,
    ) -> ReportRepositoryResult<Report>;

    /// Stores a comment for an existing report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportRepositoryError::NotFound`] without writing when the
    /// report does not exist.
    async fn create_comment(&self, comment: &Comment) -> ReportRepositoryResult<Comment>;

    /// Returns the comments attached to any of the given reports, oldest
    /// first.
    async fn fetch_comments(&self, report_ids: &[ReportId]) -> ReportRepositoryResult<Vec<Comment>>;
}

/// Errors returned by report repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReportRepositoryError {
    /// A report with the same identifier already exists.
    #[error("duplicate report identifier: {0}")]
    DuplicateReport(ReportId),

    /// The report was not found.
    #[error("report does not exist with id {0}")]
    NotFound(ReportId),

    /// The supplied password does not match the report.
    #[error("password incorrect for report {0}")]
    PasswordMismatch(ReportId),

    /// The report has already been closed.
    #[error("report {0} has already been closed")]
    AlreadyClosed(ReportId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReportRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
