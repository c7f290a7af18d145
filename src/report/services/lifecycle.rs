//! Service layer for report submission, listing, closing and commenting.

use crate::report::{
    domain::{
        Comment, CommentFields, NewReport, Password, Report, ReportDomainError, ReportId,
    },
    ports::{ReportRepository, ReportRepositoryError},
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for submitting a new report.
#[derive(Clone, PartialEq, Eq)]
pub struct SubmitReportRequest {
    title: String,
    description: String,
    location: String,
    password: String,
}

impl SubmitReportRequest {
    /// Creates a submission request.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SubmitReportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitReportRequest")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Request payload for closing a report.
#[derive(Clone, PartialEq, Eq)]
pub struct CloseReportRequest {
    report_id: String,
    password: String,
}

impl CloseReportRequest {
    /// Creates a close request from a raw report identifier.
    #[must_use]
    pub fn new(report_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CloseReportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseReportRequest")
            .field("report_id", &self.report_id)
            .finish_non_exhaustive()
    }
}

/// Request payload for commenting on a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    report_id: String,
    body: String,
    extra: Map<String, Value>,
}

impl AddCommentRequest {
    /// Creates a comment request from a raw report identifier.
    #[must_use]
    pub fn new(report_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            body: body.into(),
            extra: Map::new(),
        }
    }

    /// Sets free-form comment fields.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

/// An open report together with its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReport {
    report: Report,
    comments: Vec<Comment>,
}

impl OpenReport {
    /// Returns the report.
    #[must_use]
    pub const fn report(&self) -> &Report {
        &self.report
    }

    /// Returns the comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

/// Outcome category of a failed lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportErrorKind {
    /// The referenced report does not exist.
    NotFound,
    /// The password does not match.
    Unauthorized,
    /// The report is not in a state that allows the operation.
    InvalidState,
    /// The store failed or misbehaved.
    PersistenceFailure,
    /// The request input is malformed.
    ValidationFailure,
}

impl ReportErrorKind {
    /// Returns the client-facing error name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Unauthorized => "Unauthorized",
            Self::InvalidState => "InvalidState",
            Self::PersistenceFailure => "PersistenceFailure",
            Self::ValidationFailure => "ValidationFailure",
        }
    }
}

impl fmt::Display for ReportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Service-level errors for report lifecycle operations.
#[derive(Debug, Error)]
pub enum ReportLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ReportDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ReportRepositoryError),
    /// The supplied report identifier is not well formed.
    #[error("report does not exist with id {0}")]
    UnknownReportId(String),
    /// The store acknowledged an operation without returning a record.
    #[error("report store returned no record from {0}")]
    MissingRecord(&'static str),
}

impl ReportLifecycleError {
    /// Classifies the error into the client-facing taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ReportErrorKind {
        match self {
            Self::Domain(ReportDomainError::InvalidStateTransition { .. })
            | Self::Repository(ReportRepositoryError::AlreadyClosed(_)) => {
                ReportErrorKind::InvalidState
            }
            Self::Domain(_) => ReportErrorKind::ValidationFailure,
            Self::Repository(ReportRepositoryError::NotFound(_)) | Self::UnknownReportId(_) => {
                ReportErrorKind::NotFound
            }
            Self::Repository(ReportRepositoryError::PasswordMismatch(_)) => {
                ReportErrorKind::Unauthorized
            }
            Self::Repository(
                ReportRepositoryError::DuplicateReport(_) | ReportRepositoryError::Persistence(_),
            )
            | Self::MissingRecord(_) => ReportErrorKind::PersistenceFailure,
        }
    }
}

/// Result type for report lifecycle service operations.
pub type ReportLifecycleResult<T> = Result<T, ReportLifecycleError>;

/// Report lifecycle orchestration service.
///
/// Holds no state of its own between calls; every rule that needs
/// atomicity is delegated to the repository.
#[derive(Clone)]
pub struct ReportLifecycleService<R, C>
where
    R: ReportRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ReportLifecycleService<R, C>
where
    R: ReportRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new report lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists open reports with their comments embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ReportLifecycleError::Repository`] when the store fails.
    pub async fn list_open_reports(&self) -> ReportLifecycleResult<Vec<OpenReport>> {
        let reports: Vec<Report> = self
            .repository
            .fetch_open_reports()
            .await?
            .into_iter()
            .filter(Report::is_open)
            .collect();

        let report_ids: Vec<ReportId> = reports.iter().map(Report::id).collect();
        let mut comments_by_report: HashMap<ReportId, Vec<Comment>> = HashMap::new();
        for comment in self.repository.fetch_comments(&report_ids).await? {
            comments_by_report
                .entry(comment.report_id())
                .or_default()
                .push(comment);
        }

        debug!(count = reports.len(), "listed open reports");
        Ok(reports
            .into_iter()
            .map(|report| {
                let comments = comments_by_report.remove(&report.id()).unwrap_or_default();
                OpenReport { report, comments }
            })
            .collect())
    }

    /// Submits a new open report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportLifecycleError::Domain`] when a field is blank,
    /// [`ReportLifecycleError::MissingRecord`] when the store returns
    /// nothing, or [`ReportLifecycleError::Repository`] when it fails.
    pub async fn submit_report(&self, request: SubmitReportRequest) -> ReportLifecycleResult<Report> {
        let new_report = NewReport::new(
            request.title,
            request.description,
            request.location,
            request.password,
        )?;
        let report = Report::submit(new_report, &*self.clock);
        let stored = self
            .repository
            .create_report(&report)
            .await?
            .ok_or(ReportLifecycleError::MissingRecord("create_report"))?;

        info!(report_id = %stored.id(), "report submitted");
        Ok(stored)
    }

    /// Closes a report when the password matches.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`ReportErrorKind::NotFound`],
    /// [`ReportErrorKind::Unauthorized`], [`ReportErrorKind::InvalidState`],
    /// [`ReportErrorKind::ValidationFailure`] (blank password) or
    /// [`ReportErrorKind::PersistenceFailure`].
    pub async fn close_report(&self, request: CloseReportRequest) -> ReportLifecycleResult<Report> {
        let report_id = parse_report_id(&request.report_id)?;
        let password = Password::new(request.password)?;
        let closed = self
            .repository
            .close_report(report_id, &password, self.clock.utc())
            .await?;

        info!(report_id = %closed.id(), "report closed");
        Ok(closed)
    }

    /// Adds a comment to an existing report, open or closed.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`ReportErrorKind::NotFound`] when the
    /// report does not exist, [`ReportErrorKind::ValidationFailure`] for a
    /// blank body, or [`ReportErrorKind::PersistenceFailure`].
    pub async fn add_comment(&self, request: AddCommentRequest) -> ReportLifecycleResult<Comment> {
        let report_id = parse_report_id(&request.report_id)?;
        let fields = CommentFields::new(request.body)?.with_extra(request.extra);
        let comment = Comment::new(report_id, fields, &*self.clock);
        let stored = self.repository.create_comment(&comment).await?;

        info!(report_id = %report_id, comment_id = %stored.id(), "comment added");
        Ok(stored)
    }
}

fn parse_report_id(raw: &str) -> ReportLifecycleResult<ReportId> {
    raw.parse::<ReportId>()
        .map_err(|_| ReportLifecycleError::UnknownReportId(raw.to_owned()))
}
