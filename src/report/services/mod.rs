//! Application services for report lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    AddCommentRequest, CloseReportRequest, OpenReport, ReportErrorKind, ReportLifecycleError,
    ReportLifecycleResult, ReportLifecycleService, SubmitReportRequest,
};
