//! Report passwords and their persisted digests.

use super::{ReportDomainError, ReportId};
use sha2::{Digest, Sha256};
use std::fmt;

/// Caller-supplied secret that authorises closing a report.
///
/// The value is kept exactly as supplied (no trimming) so that matching is
/// exact. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ReportDomainError::EmptyPassword`] when the value is empty
    /// or consists only of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ReportDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReportDomainError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    /// Computes the digest of this password salted with `report_id`.
    #[must_use]
    pub fn digest_for(&self, report_id: ReportId) -> PasswordDigest {
        PasswordDigest::compute(report_id, self)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Lowercase hex SHA-256 of the report id bytes followed by the password.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Computes the digest for a password bound to a report.
    #[must_use]
    pub fn compute(report_id: ReportId, password: &Password) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(report_id.as_ref().as_bytes());
        hasher.update(password.0.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Wraps a digest loaded from storage.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` when `password` is the one this digest was built from.
    #[must_use]
    pub fn matches(&self, report_id: ReportId, password: &Password) -> bool {
        *self == Self::compute(report_id, password)
    }

    /// Returns the digest as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
