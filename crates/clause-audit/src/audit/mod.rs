//! Document audit service: evaluation, report persistence and HTTP routes.

mod domain;
mod router;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use domain::{report_stem, AnalyzeRequest, DocumentAnalysis, DocumentSubmission, RuleCatalogue};
pub use router::audit_router;
pub use service::{AuditService, AuditServiceError};
pub use store::{FileReportStore, ReportStore, StoreError, StoredReport};
