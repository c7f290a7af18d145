//! Domain model for report lifecycle management.
//!
//! Reports move from `open` to `closed` exactly once. Comments reference a
//! report without taking part in its lifecycle. Secrets never leave this
//! boundary in clear text: only salted digests are persisted.

mod comment;
mod error;
mod ids;
mod password;
mod report;

pub use comment::{Comment, CommentFields, PersistedCommentData};
pub use error::{ParseReportStatusError, ReportDomainError};
pub use ids::{CommentId, ReportId};
pub use password::{Password, PasswordDigest};
pub use report::{NewReport, PersistedReportData, Report, ReportStatus};
