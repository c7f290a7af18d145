//! JSON request bodies and response views.

use crate::report::{
    domain::{Comment, CommentId, Report, ReportId, ReportStatus},
    services::OpenReport,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /reports`.
#[derive(Deserialize)]
pub(crate) struct SubmitReportBody {
    pub title: String,
    pub description: String,
    pub location: String,
    pub password: String,
}

/// Body of `DELETE /reports/:report_id`.
#[derive(Deserialize)]
pub(crate) struct CloseReportBody {
    pub password: String,
}

/// Body of `POST /reports/:report_id/comments`.
#[derive(Deserialize)]
pub(crate) struct AddCommentBody {
    #[serde(alias = "content")]
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Public representation of a report. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    /// Report identifier.
    pub id: ReportId,
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Where the reported issue is.
    pub location: String,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Closing timestamp, `null` while open.
    pub closed_at: Option<DateTime<Utc>>,
    /// Embedded comments; only present in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView>>,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id(),
            title: report.title().to_owned(),
            description: report.description().to_owned(),
            location: report.location().to_owned(),
            status: report.status(),
            created_at: report.created_at(),
            closed_at: report.closed_at(),
            comments: None,
        }
    }
}

impl From<&OpenReport> for ReportView {
    fn from(open: &OpenReport) -> Self {
        Self {
            comments: Some(open.comments().iter().map(CommentView::from).collect()),
            ..Self::from(open.report())
        }
    }
}

/// Public representation of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment identifier.
    pub id: CommentId,
    /// Owning report.
    pub report_id: ReportId,
    /// Comment text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Free-form caller fields, inlined.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            report_id: comment.report_id(),
            body: comment.body().to_owned(),
            created_at: comment.created_at(),
            extra: comment.extra().clone(),
        }
    }
}

/// Response of `GET /reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportListView {
    /// Open reports, oldest first.
    pub reports: Vec<ReportView>,
}

/// Error payload returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    /// Error kind name, e.g. `NotFound`.
    pub name: String,
    /// Human-readable message.
    pub message: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct HealthView {
    pub status: &'static str,
}
