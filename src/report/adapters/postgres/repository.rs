//! `PostgreSQL` repository implementation for report lifecycle storage.

use super::{
    models::{CommentRow, ReportRow},
    schema::{report_comments, reports},
};
use crate::report::{
    domain::{
        Comment, CommentId, Password, PasswordDigest, PersistedCommentData, PersistedReportData,
        Report, ReportId, ReportStatus,
    },
    ports::{ReportRepository, ReportRepositoryError, ReportRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by report adapters.
pub type ReportPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed report repository.
#[derive(Debug, Clone)]
pub struct PostgresReportRepository {
    pool: ReportPgPool,
}

/// Stored rows that cannot be mapped back into domain values.
#[derive(Debug, Error)]
enum RowConversionError {
    #[error("comment {0} has non-object fields payload")]
    NonObjectFields(uuid::Uuid),
}

/// Result of the guarded close statement, classified inside the transaction.
enum CloseOutcome {
    Closed(ReportRow),
    Missing,
    PasswordMismatch,
    AlreadyClosed,
}

impl PostgresReportRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReportPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReportRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReportRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReportRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReportRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn fetch_open_reports(&self) -> ReportRepositoryResult<Vec<Report>> {
        self.run_blocking(|connection| {
            let rows = reports::table
                .filter(reports::status.eq(ReportStatus::Open.as_str()))
                .order((reports::created_at.asc(), reports::id.asc()))
                .select(ReportRow::as_select())
                .load::<ReportRow>(connection)
                .map_err(ReportRepositoryError::persistence)?;
            rows.into_iter().map(row_to_report).collect()
        })
        .await
    }

    async fn create_report(&self, report: &Report) -> ReportRepositoryResult<Option<Report>> {
        let report_id = report.id();
        let new_row = to_report_row(report);

        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(reports::table)
                .values(&new_row)
                .returning(ReportRow::as_returning())
                .get_result::<ReportRow>(connection)
                .optional()
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ReportRepositoryError::DuplicateReport(report_id)
                    }
                    _ => ReportRepositoryError::persistence(err),
                })?;
            stored.map(row_to_report).transpose()
        })
        .await
    }

    async fn close_report(
        &self,
        id: ReportId,
        password: &Password,
        closed_at: DateTime<Utc>,
    ) -> ReportRepositoryResult<Report> {
        let digest = password.digest_for(id);

        self.run_blocking(move |connection| {
            let outcome = connection
                .transaction::<_, DieselError, _>(|tx| close_guarded(tx, id, &digest, closed_at))
                .map_err(ReportRepositoryError::persistence)?;

            match outcome {
                CloseOutcome::Closed(row) => row_to_report(row),
                CloseOutcome::Missing => Err(ReportRepositoryError::NotFound(id)),
                CloseOutcome::PasswordMismatch => {
                    Err(ReportRepositoryError::PasswordMismatch(id))
                }
                CloseOutcome::AlreadyClosed => Err(ReportRepositoryError::AlreadyClosed(id)),
            }
        })
        .await
    }

    async fn create_comment(&self, comment: &Comment) -> ReportRepositoryResult<Comment> {
        let report_id = comment.report_id();
        let new_row = to_comment_row(comment);

        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(report_comments::table)
                .values(&new_row)
                .returning(CommentRow::as_returning())
                .get_result::<CommentRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        ReportRepositoryError::NotFound(report_id)
                    }
                    _ => ReportRepositoryError::persistence(err),
                })?;
            row_to_comment(stored)
        })
        .await
    }

    async fn fetch_comments(&self, report_ids: &[ReportId]) -> ReportRepositoryResult<Vec<Comment>> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<uuid::Uuid> = report_ids.iter().map(|id| id.into_inner()).collect();

        self.run_blocking(move |connection| {
            let rows = report_comments::table
                .filter(report_comments::report_id.eq_any(ids))
                .order((report_comments::created_at.asc(), report_comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(ReportRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

/// Runs the check-and-set close and classifies a zero-row update.
///
/// The `UPDATE` only matches an open row with the right digest, so two
/// concurrent closes serialise on the row lock and the loser sees zero rows.
fn close_guarded(
    connection: &mut PgConnection,
    id: ReportId,
    digest: &PasswordDigest,
    closed_at: DateTime<Utc>,
) -> Result<CloseOutcome, DieselError> {
    let uuid = id.into_inner();
    let updated = diesel::update(
        reports::table
            .filter(reports::id.eq(uuid))
            .filter(reports::status.eq(ReportStatus::Open.as_str()))
            .filter(reports::password_digest.eq(digest.as_str())),
    )
    .set((
        reports::status.eq(ReportStatus::Closed.as_str()),
        reports::closed_at.eq(Some(closed_at)),
    ))
    .returning(ReportRow::as_returning())
    .get_result::<ReportRow>(connection)
    .optional()?;

    if let Some(row) = updated {
        return Ok(CloseOutcome::Closed(row));
    }

    let existing = reports::table
        .find(uuid)
        .select(ReportRow::as_select())
        .first::<ReportRow>(connection)
        .optional()?;

    Ok(match existing {
        None => CloseOutcome::Missing,
        Some(row) if row.password_digest != digest.as_str() => CloseOutcome::PasswordMismatch,
        Some(_) => CloseOutcome::AlreadyClosed,
    })
}

fn to_report_row(report: &Report) -> ReportRow {
    ReportRow {
        id: report.id().into_inner(),
        title: report.title().to_owned(),
        description: report.description().to_owned(),
        location: report.location().to_owned(),
        password_digest: report.password_digest().as_str().to_owned(),
        status: report.status().as_str().to_owned(),
        created_at: report.created_at(),
        closed_at: report.closed_at(),
    }
}

fn row_to_report(row: ReportRow) -> ReportRepositoryResult<Report> {
    let ReportRow {
        id,
        title,
        description,
        location,
        password_digest,
        status: persisted_status,
        created_at,
        closed_at,
    } = row;

    let status = ReportStatus::try_from(persisted_status.as_str())
        .map_err(ReportRepositoryError::persistence)?;

    Ok(Report::from_persisted(PersistedReportData {
        id: ReportId::from_uuid(id),
        title,
        description,
        location,
        password_digest: PasswordDigest::from_persisted(password_digest),
        status,
        created_at,
        closed_at,
    }))
}

fn to_comment_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        report_id: comment.report_id().into_inner(),
        body: comment.body().to_owned(),
        fields: Value::Object(comment.extra().clone()),
        created_at: comment.created_at(),
    }
}

fn row_to_comment(row: CommentRow) -> ReportRepositoryResult<Comment> {
    let CommentRow {
        id,
        report_id,
        body,
        fields,
        created_at,
    } = row;

    let Value::Object(extra) = fields else {
        return Err(ReportRepositoryError::persistence(
            RowConversionError::NonObjectFields(id),
        ));
    };

    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(id),
        report_id: ReportId::from_uuid(report_id),
        body,
        extra,
        created_at,
    }))
}
