//! Port contracts for report lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by report services.

pub mod repository;

pub use repository::{ReportRepository, ReportRepositoryError, ReportRepositoryResult};
