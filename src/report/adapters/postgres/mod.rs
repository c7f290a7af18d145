//! `PostgreSQL` adapters for report lifecycle persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresReportRepository, ReportPgPool};
