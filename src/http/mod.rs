//! HTTP surface for the report lifecycle service.
//!
//! Maps URL and method pairs to [`ReportLifecycleService`] operations and
//! serialises outcomes. Response views never carry password material.

mod error;
mod handlers;
mod views;

pub use error::ApiError;
pub use views::{CommentView, ErrorView, ReportListView, ReportView};

use crate::report::{ports::ReportRepository, services::ReportLifecycleService};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared service handle used as router state.
pub type SharedReportService<R, C> = Arc<ReportLifecycleService<R, C>>;

/// Builds the report API router.
#[must_use]
pub fn router<R, C>(service: SharedReportService<R, C>) -> Router
where
    R: ReportRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/reports",
            get(handlers::list_reports::<R, C>).post(handlers::submit_report::<R, C>),
        )
        .route("/reports/:report_id", delete(handlers::close_report::<R, C>))
        .route(
            "/reports/:report_id/comments",
            post(handlers::add_comment::<R, C>),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request handled"
    );
    response
}
