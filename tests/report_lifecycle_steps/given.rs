//! Given steps for report lifecycle BDD scenarios.

use super::world::{ReportWorld, run_async};
use eyre::WrapErr;
use reportline::report::services::{CloseReportRequest, SubmitReportRequest};
use rstest_bdd_macros::given;

#[given(r#"a submitted report protected by password "{password}""#)]
fn submitted_report(world: &mut ReportWorld, password: String) -> Result<(), eyre::Report> {
    let request = SubmitReportRequest::new("Pothole", "Large pothole", "Main St", password);
    let report = run_async(world.service.submit_report(request))
        .wrap_err("submit report for scenario setup")?;
    world.last_report = Some(report);
    Ok(())
}

#[given(r#"the report has been closed with password "{password}""#)]
fn report_has_been_closed(world: &mut ReportWorld, password: String) -> Result<(), eyre::Report> {
    let report_id = world.report()?.id().to_string();
    let closed = run_async(
        world
            .service
            .close_report(CloseReportRequest::new(report_id, password)),
    )
    .wrap_err("close report for scenario setup")?;
    world.last_report = Some(closed);
    Ok(())
}
