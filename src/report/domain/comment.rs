//! Comments attached to reports.

use super::{CommentId, ReportDomainError, ReportId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::{Map, Value};

/// Keys owned by the system that callers cannot set through extra fields.
const RESERVED_KEYS: [&str; 5] = ["id", "reportId", "createdAt", "body", "content"];

/// Caller-supplied comment content: a text body plus free-form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    body: String,
    extra: Map<String, Value>,
}

impl CommentFields {
    /// Creates comment fields with a validated body, kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ReportDomainError::EmptyCommentBody`] when the body is blank.
    pub fn new(body: impl Into<String>) -> Result<Self, ReportDomainError> {
        let raw = body.into();
        if raw.trim().is_empty() {
            return Err(ReportDomainError::EmptyCommentBody);
        }
        Ok(Self {
            body: raw,
            extra: Map::new(),
        })
    }

    /// Attaches free-form fields, dropping any reserved keys.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra
            .into_iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .collect();
        self
    }

    /// Returns the comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the free-form fields.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// A comment attached to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    report_id: ReportId,
    fields: CommentFields,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Owning report.
    pub report_id: ReportId,
    /// Persisted body.
    pub body: String,
    /// Persisted free-form fields.
    pub extra: Map<String, Value>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment for `report_id`.
    #[must_use]
    pub fn new(report_id: ReportId, fields: CommentFields, clock: &impl Clock) -> Self {
        Self {
            id: CommentId::new(),
            report_id,
            fields,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            report_id: data.report_id,
            fields: CommentFields {
                body: data.body,
                extra: data.extra,
            },
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning report identifier.
    #[must_use]
    pub const fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        self.fields.body()
    }

    /// Returns the free-form fields.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        self.fields.extra()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
