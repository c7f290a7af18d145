//! Racing close attempts against the in-memory store.

use super::helpers::{POTHOLE_PASSWORD, TestService, service, submit_pothole};
use eyre::ensure;
use reportline::report::services::{CloseReportRequest, ReportErrorKind};
use rstest::rstest;
use std::sync::Arc;

const CONTENDERS: usize = 16;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_closes_succeed_exactly_once(service: TestService) -> Result<(), eyre::Report> {
    let report = submit_pothole(&service).await?;
    let shared = Arc::new(service);

    let mut handles = Vec::with_capacity(CONTENDERS);
    for _ in 0..CONTENDERS {
        let contender = Arc::clone(&shared);
        let request = CloseReportRequest::new(report.id().to_string(), POTHOLE_PASSWORD);
        handles.push(tokio::spawn(async move {
            contender.close_report(request).await
        }));
    }

    let mut successes = 0_usize;
    for handle in handles {
        match handle.await? {
            Ok(_) => successes += 1,
            Err(err) => ensure!(
                err.kind() == ReportErrorKind::InvalidState,
                "losing close must observe InvalidState, got {err}"
            ),
        }
    }

    ensure!(successes == 1, "expected exactly one successful close, got {successes}");
    Ok(())
}
