//! In-memory repository for report lifecycle tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::report::{
    domain::{Comment, Password, Report, ReportId},
    ports::{ReportRepository, ReportRepositoryError, ReportRepositoryResult},
};

/// Thread-safe in-memory report repository.
///
/// All writes take the same lock, so the close check-and-set is atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    state: Arc<RwLock<InMemoryReportState>>,
}

#[derive(Debug, Default)]
struct InMemoryReportState {
    reports: HashMap<ReportId, Report>,
    comments: HashMap<ReportId, Vec<Comment>>,
}

impl InMemoryReportRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ReportRepositoryResult<RwLockReadGuard<'_, InMemoryReportState>> {
        self.state.read().map_err(|err| {
            ReportRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ReportRepositoryResult<RwLockWriteGuard<'_, InMemoryReportState>> {
        self.state.write().map_err(|err| {
            ReportRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn fetch_open_reports(&self) -> ReportRepositoryResult<Vec<Report>> {
        let state = self.read()?;
        let mut open: Vec<Report> = state
            .reports
            .values()
            .filter(|report| report.is_open())
            .cloned()
            .collect();
        open.sort_by_key(|report| (report.created_at(), report.id()));
        Ok(open)
    }

    async fn create_report(&self, report: &Report) -> ReportRepositoryResult<Option<Report>> {
        let mut state = self.write()?;
        if state.reports.contains_key(&report.id()) {
            return Err(ReportRepositoryError::DuplicateReport(report.id()));
        }
        state.reports.insert(report.id(), report.clone());
        Ok(Some(report.clone()))
    }

    async fn close_report(
        &self,
        id: ReportId,
        password: &Password,
        closed_at: DateTime<Utc>,
    ) -> ReportRepositoryResult<Report> {
        let mut state = self.write()?;
        let report = state
            .reports
            .get_mut(&id)
            .ok_or(ReportRepositoryError::NotFound(id))?;

        if !report.password_matches(password) {
            return Err(ReportRepositoryError::PasswordMismatch(id));
        }
        report
            .close_at(closed_at)
            .map_err(|_| ReportRepositoryError::AlreadyClosed(id))?;
        Ok(report.clone())
    }

    async fn create_comment(&self, comment: &Comment) -> ReportRepositoryResult<Comment> {
        let mut state = self.write()?;
        let report_id = comment.report_id();
        if !state.reports.contains_key(&report_id) {
            return Err(ReportRepositoryError::NotFound(report_id));
        }
        state
            .comments
            .entry(report_id)
            .or_default()
            .push(comment.clone());
        Ok(comment.clone())
    }

    async fn fetch_comments(&self, report_ids: &[ReportId]) -> ReportRepositoryResult<Vec<Comment>> {
        let state = self.read()?;
        let mut comments: Vec<Comment> = report_ids
            .iter()
            .filter_map(|id| state.comments.get(id))
            .flatten()
            .cloned()
            .collect();
        comments.sort_by_key(Comment::created_at);
        Ok(comments)
    }
}
