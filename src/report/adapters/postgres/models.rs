//! Diesel row models for report persistence.

use super::schema::{report_comments, reports};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row shape shared by report queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReportRow {
    /// Report identifier.
    pub id: uuid::Uuid,
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Where the reported issue is.
    pub location: String,
    /// Salted password digest.
    pub password_digest: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Closing timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Row shape shared by comment queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = report_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning report.
    pub report_id: uuid::Uuid,
    /// Comment text.
    pub body: String,
    /// Free-form caller fields as a JSON object.
    pub fields: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
