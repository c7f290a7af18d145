//! Then steps for report lifecycle BDD scenarios.

use super::world::{ReportWorld, run_async};
use reportline::report::domain::ReportStatus;
use rstest_bdd_macros::then;

fn listed_as_open(world: &ReportWorld) -> Result<bool, eyre::Report> {
    let report_id = world.report()?.id();
    let listed = run_async(world.service.list_open_reports())?;
    Ok(listed.iter().any(|open| open.report().id() == report_id))
}

#[then(r#"the report is "{status}""#)]
fn report_has_status(world: &ReportWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ReportStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    if let Some(err) = world.last_error.as_ref() {
        return Err(eyre::eyre!("unexpected failure: {err}"));
    }
    let actual = world.report()?.status();
    if actual != expected {
        return Err(eyre::eyre!("expected status {expected}, found {actual}"));
    }
    Ok(())
}

#[then("the report is listed as open")]
fn report_is_listed(world: &ReportWorld) -> Result<(), eyre::Report> {
    if !listed_as_open(world)? {
        return Err(eyre::eyre!("report missing from open listing"));
    }
    Ok(())
}

#[then("the report is not listed as open")]
fn report_is_not_listed(world: &ReportWorld) -> Result<(), eyre::Report> {
    if listed_as_open(world)? {
        return Err(eyre::eyre!("closed report still in open listing"));
    }
    Ok(())
}

#[then(r#"the operation fails with "{kind}""#)]
fn operation_fails_with(world: &ReportWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failure, but the operation succeeded"))?;
    if err.kind().name() != kind {
        return Err(eyre::eyre!("expected {kind} failure, got {}: {err}", err.kind()));
    }
    Ok(())
}

#[then("the comment references the report")]
fn comment_references_report(world: &ReportWorld) -> Result<(), eyre::Report> {
    let comment = world
        .last_comment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing comment; error was {:?}", world.last_error))?;
    let report_id = world.report()?.id();
    if comment.report_id() != report_id {
        return Err(eyre::eyre!("comment references {}", comment.report_id()));
    }
    Ok(())
}
