//! Report aggregate root and related lifecycle types.

use super::{ParseReportStatusError, Password, PasswordDigest, ReportDomainError, ReportId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Report accepts closing and is listed publicly.
    Open,
    /// Report has been closed by its submitter. Terminal.
    Closed,
}

impl ReportStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` when the state machine permits moving to `target`.
    ///
    /// The only permitted transition is `open -> closed`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Open, Self::Closed))
    }

    /// Returns `true` for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReportStatus {
    type Error = ParseReportStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseReportStatusError(value.to_owned())),
        }
    }
}

/// Validated submission data for a report that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    title: String,
    description: String,
    location: String,
    password: Password,
}

impl NewReport {
    /// Validates submission fields.
    ///
    /// Text fields are stored trimmed; the password is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ReportDomainError::EmptyField`] for a blank `title`,
    /// `description` or `location`, and [`ReportDomainError::EmptyPassword`]
    /// for a blank password.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ReportDomainError> {
        Ok(Self {
            title: required_text("title", title)?,
            description: required_text("description", description)?,
            location: required_text("location", location)?,
            password: Password::new(password)?,
        })
    }
}

fn required_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ReportDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReportDomainError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

/// Report aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    id: ReportId,
    title: String,
    description: String,
    location: String,
    password_digest: PasswordDigest,
    status: ReportStatus,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted report aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReportData {
    /// Persisted report identifier.
    pub id: ReportId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted location.
    pub location: String,
    /// Persisted password digest.
    pub password_digest: PasswordDigest,
    /// Persisted lifecycle status.
    pub status: ReportStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted closing timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Creates a new open report from validated submission data.
    #[must_use]
    pub fn submit(new_report: NewReport, clock: &impl Clock) -> Self {
        let id = ReportId::new();
        let NewReport {
            title,
            description,
            location,
            password,
        } = new_report;

        Self {
            id,
            title,
            description,
            location,
            password_digest: password.digest_for(id),
            status: ReportStatus::Open,
            created_at: clock.utc(),
            closed_at: None,
        }
    }

    /// Reconstructs a report from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReportData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            location: data.location,
            password_digest: data.password_digest,
            status: data.status,
            created_at: data.created_at,
            closed_at: data.closed_at,
        }
    }

    /// Returns the report identifier.
    #[must_use]
    pub const fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns `true` while the report is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, ReportStatus::Open)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the closing timestamp, if closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns `true` when `password` is the one chosen at submission.
    #[must_use]
    pub fn password_matches(&self, password: &Password) -> bool {
        self.password_digest.matches(self.id, password)
    }

    /// Closes the report at the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`ReportDomainError::InvalidStateTransition`] when the report
    /// is already closed.
    pub fn close_at(&mut self, closed_at: DateTime<Utc>) -> Result<(), ReportDomainError> {
        let target = ReportStatus::Closed;
        if !self.status.can_transition_to(target) {
            return Err(ReportDomainError::InvalidStateTransition {
                report_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.closed_at = Some(closed_at);
        Ok(())
    }

    /// Closes the report using the clock's current time.
    ///
    /// # Errors
    ///
    /// See [`Report::close_at`].
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), ReportDomainError> {
        self.close_at(clock.utc())
    }
}
