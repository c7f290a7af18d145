//! When steps for report lifecycle BDD scenarios.

use super::world::{ReportWorld, run_async};
use reportline::report::services::{AddCommentRequest, CloseReportRequest, SubmitReportRequest};
use rstest_bdd_macros::when;

#[when(
    r#"a report "{title}" described as "{description}" at "{location}" is submitted with password "{password}""#
)]
fn submit_report(
    world: &mut ReportWorld,
    title: String,
    description: String,
    location: String,
    password: String,
) {
    let request = SubmitReportRequest::new(title, description, location, password);
    let result = run_async(world.service.submit_report(request));
    world.record_report(result);
}

#[when(r#"the report is closed with password "{password}""#)]
fn close_report(world: &mut ReportWorld, password: String) -> Result<(), eyre::Report> {
    let report_id = world.report()?.id().to_string();
    let result = run_async(
        world
            .service
            .close_report(CloseReportRequest::new(report_id, password)),
    );
    world.record_report(result);
    Ok(())
}

#[when(r#"the comment "{body}" is added to the report"#)]
fn add_comment(world: &mut ReportWorld, body: String) -> Result<(), eyre::Report> {
    let report_id = world.report()?.id().to_string();
    add_comment_to(world, report_id, body);
    Ok(())
}

#[when(r#"the comment "{body}" is added to report "{report_id}""#)]
fn add_comment_to_report(world: &mut ReportWorld, body: String, report_id: String) {
    add_comment_to(world, report_id, body);
}

fn add_comment_to(world: &mut ReportWorld, report_id: String, body: String) {
    let result = run_async(
        world
            .service
            .add_comment(AddCommentRequest::new(report_id, body)),
    );
    match result {
        Ok(comment) => world.last_comment = Some(comment),
        Err(err) => world.last_error = Some(err),
    }
}
