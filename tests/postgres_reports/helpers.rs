//! Temporary database provisioning for `PostgreSQL` report tests.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use reportline::report::adapters::postgres::PostgresReportRepository;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL creating the report schema.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_reports/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "reportline_test_template";

/// Creates a runtime for driving repository futures from synchronous tests.
///
/// Several workers are used so concurrent closes genuinely race.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), eyre::Report> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            execute_sql_statements(&mut conn, CREATE_SCHEMA_SQL)?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Executes each non-empty statement of a migration script in turn.
///
/// `diesel::sql_query` runs a single statement per call.
///
/// # Errors
///
/// Returns an error naming the statement that failed.
pub fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// A database cloned from the template and dropped when the value goes out
/// of scope.
pub struct TemporaryDatabase {
    cluster: &'static TestCluster,
    name: String,
    /// Repository bound to the temporary database.
    pub repo: PostgresReportRepository,
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let _dropped = self.cluster.drop_database(self.name.as_str());
    }
}

/// Creates a migrated temporary database on the shared embedded cluster.
///
/// # Errors
///
/// Returns an error if the template or the database cannot be created, or
/// if the pool cannot connect.
pub fn temporary_database(
    cluster: &'static TestCluster,
) -> Result<TemporaryDatabase, eyre::Report> {
    ensure_template(cluster)?;
    let name = format!("reportline_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database_from_template(name.as_str(), TEMPLATE_DB)
        .map_err(|e| eyre::eyre!("cannot create {name}: {e}"))?;
    let url = cluster.connection().database_url(&name);
    match Pool::builder()
        .max_size(4)
        .build(ConnectionManager::<PgConnection>::new(url))
    {
        Ok(pool) => Ok(TemporaryDatabase {
            cluster,
            name,
            repo: PostgresReportRepository::new(pool),
        }),
        Err(error) => {
            let _dropped = cluster.drop_database(name.as_str());
            Err(error.into())
        }
    }
}
