//! Port contract checks for the `PostgreSQL` report repository.

use super::helpers::{temporary_database, test_runtime};
use eyre::ensure;
use mockable::{Clock, DefaultClock};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use reportline::report::{
    domain::{Comment, CommentFields, NewReport, Password, Report, ReportId, ReportStatus},
    ports::{ReportRepository, ReportRepositoryError},
};
use rstest::rstest;
use serde_json::{Map, json};
use std::sync::Arc;

fn pothole() -> Result<Report, eyre::Report> {
    let new_report = NewReport::new("Pothole", "Large pothole", "Main St", "secret123")?;
    Ok(Report::submit(new_report, &DefaultClock))
}

#[rstest]
fn create_and_list_round_trip_without_exposing_password(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = temporary_database(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let report = pothole()?;

        let stored = db
            .repo
            .create_report(&report)
            .await?
            .ok_or_else(|| eyre::eyre!("insert returned no row"))?;
        ensure!(stored.id() == report.id(), "id changed on insert");
        ensure!(stored.password_digest() == report.password_digest(), "digest changed");

        let open = db.repo.fetch_open_reports().await?;
        ensure!(open.len() == 1, "expected one open report");
        ensure!(
            open.iter().all(|listed| listed.status() == ReportStatus::Open),
            "listing must contain only open reports"
        );
        Ok(())
    })
}

#[rstest]
fn close_classifies_failures_in_order(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = temporary_database(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let report = pothole()?;
        db.repo.create_report(&report).await?;
        let right = Password::new("secret123")?;
        let wrong = Password::new("wrongpass")?;
        let now = DefaultClock.utc();

        let missing = db.repo.close_report(ReportId::new(), &right, now).await;
        ensure!(
            matches!(missing, Err(ReportRepositoryError::NotFound(_))),
            "expected NotFound, got {missing:?}"
        );

        let mismatch = db.repo.close_report(report.id(), &wrong, now).await;
        ensure!(
            matches!(mismatch, Err(ReportRepositoryError::PasswordMismatch(_))),
            "expected PasswordMismatch, got {mismatch:?}"
        );
        ensure!(
            db.repo.fetch_open_reports().await?.len() == 1,
            "failed close must not change status"
        );

        let closed = db.repo.close_report(report.id(), &right, now).await?;
        ensure!(closed.status() == ReportStatus::Closed, "expected closed");

        let again = db.repo.close_report(report.id(), &right, now).await;
        ensure!(
            matches!(again, Err(ReportRepositoryError::AlreadyClosed(_))),
            "expected AlreadyClosed, got {again:?}"
        );
        ensure!(db.repo.fetch_open_reports().await?.is_empty(), "closed report listed");
        Ok(())
    })
}

#[rstest]
fn wrong_password_on_closed_report_is_a_mismatch(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = temporary_database(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let report = pothole()?;
        db.repo.create_report(&report).await?;
        let now = DefaultClock.utc();
        db.repo
            .close_report(report.id(), &Password::new("secret123")?, now)
            .await?;

        let result = db
            .repo
            .close_report(report.id(), &Password::new("wrongpass")?, now)
            .await;
        ensure!(
            matches!(result, Err(ReportRepositoryError::PasswordMismatch(_))),
            "password check must precede the status check, got {result:?}"
        );
        Ok(())
    })
}

#[rstest]
fn concurrent_closes_succeed_exactly_once(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = temporary_database(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let report = pothole()?;
        db.repo.create_report(&report).await?;
        let repo = Arc::new(db.repo.clone());
        let password = Password::new("secret123")?;

        let mut handles = Vec::new();
        for _ in 0..4 {
            let contender = Arc::clone(&repo);
            let attempt = password.clone();
            let report_id = report.id();
            handles.push(tokio::spawn(async move {
                contender
                    .close_report(report_id, &attempt, DefaultClock.utc())
                    .await
            }));
        }

        let mut successes = 0_usize;
        for handle in handles {
            match handle.await? {
                Ok(_) => successes += 1,
                Err(ReportRepositoryError::AlreadyClosed(_)) => {}
                Err(other) => return Err(eyre::eyre!("unexpected close failure: {other}")),
            }
        }
        ensure!(successes == 1, "expected one successful close, got {successes}");
        Ok(())
    })
}

#[rstest]
fn comments_require_an_existing_report(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = temporary_database(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let report = pothole()?;
        db.repo.create_report(&report).await?;

        let mut extra = Map::new();
        extra.insert("author".to_owned(), json!("neighbour"));
        let fields = CommentFields::new("Fixed now")?.with_extra(extra);
        let comment = Comment::new(report.id(), fields.clone(), &DefaultClock);
        let stored = db.repo.create_comment(&comment).await?;
        ensure!(stored.extra().get("author") == Some(&json!("neighbour")), "fields lost");

        let orphan = Comment::new(ReportId::new(), fields, &DefaultClock);
        let result = db.repo.create_comment(&orphan).await;
        ensure!(
            matches!(result, Err(ReportRepositoryError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );

        let comments = db.repo.fetch_comments(&[report.id(), orphan.report_id()]).await?;
        ensure!(comments.len() == 1, "orphan comment must not be written");
        Ok(())
    })
}
