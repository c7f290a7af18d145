//! Runs the report HTTP API.
//!
//! Usage:
//!
//! ```text
//! REPORTLINE_BIND=0.0.0.0:8080 DATABASE_URL=postgres://... reportline
//! ```
//!
//! Without `DATABASE_URL` the server keeps reports in memory, which is only
//! suitable for local experimentation.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use reportline::{
    config::ServerConfig,
    http,
    report::{
        adapters::{memory::InMemoryReportRepository, postgres::PostgresReportRepository},
        ports::ReportRepository,
        services::ReportLifecycleService,
    },
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    telemetry::init(config.log_format)?;

    match config.database_url.as_deref() {
        Some(url) => {
            let manager = ConnectionManager::<PgConnection>::new(url);
            let pool = Pool::builder().max_size(config.pool_size).build(manager)?;
            info!(pool_size = config.pool_size, "using PostgreSQL report store");
            serve(&config, PostgresReportRepository::new(pool)).await
        }
        None => {
            warn!("DATABASE_URL is not set; reports are kept in memory only");
            serve(&config, InMemoryReportRepository::new()).await
        }
    }
}

async fn serve<R>(config: &ServerConfig, repository: R) -> Result<(), BoxError>
where
    R: ReportRepository + 'static,
{
    let service = ReportLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let app = http::router(Arc::new(service));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "reportline listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("reportline stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
