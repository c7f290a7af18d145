//! Route handlers. Each one extracts parameters, delegates to the service
//! and converts the outcome.

use super::{
    ApiError, SharedReportService,
    views::{
        AddCommentBody, CloseReportBody, CommentView, HealthView, ReportListView, ReportView,
        SubmitReportBody,
    },
};
use crate::report::{
    ports::ReportRepository,
    services::{AddCommentRequest, CloseReportRequest, SubmitReportRequest},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use mockable::Clock;

type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub(super) async fn health() -> Json<HealthView> {
    Json(HealthView { status: "ok" })
}

pub(super) async fn list_reports<R, C>(
    State(service): State<SharedReportService<R, C>>,
) -> Result<Json<ReportListView>, ApiError>
where
    R: ReportRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let open_reports = service.list_open_reports().await?;
    Ok(Json(ReportListView {
        reports: open_reports.iter().map(ReportView::from).collect(),
    }))
}

pub(super) async fn submit_report<R, C>(
    State(service): State<SharedReportService<R, C>>,
    payload: JsonBody<SubmitReportBody>,
) -> Result<Json<ReportView>, ApiError>
where
    R: ReportRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let request =
        SubmitReportRequest::new(body.title, body.description, body.location, body.password);
    let report = service.submit_report(request).await?;
    Ok(Json(ReportView::from(&report)))
}

pub(super) async fn close_report<R, C>(
    State(service): State<SharedReportService<R, C>>,
    Path(report_id): Path<String>,
    payload: JsonBody<CloseReportBody>,
) -> Result<Json<ReportView>, ApiError>
where
    R: ReportRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let report = service
        .close_report(CloseReportRequest::new(report_id, body.password))
        .await?;
    Ok(Json(ReportView::from(&report)))
}

pub(super) async fn add_comment<R, C>(
    State(service): State<SharedReportService<R, C>>,
    Path(report_id): Path<String>,
    payload: JsonBody<AddCommentBody>,
) -> Result<Json<CommentView>, ApiError>
where
    R: ReportRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let request = AddCommentRequest::new(report_id, body.body).with_extra(body.extra);
    let comment = service.add_comment(request).await?;
    Ok(Json(CommentView::from(&comment)))
}
