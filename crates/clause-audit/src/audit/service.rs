use std::sync::Arc;

use tracing::{info, info_span};

use super::domain::{report_stem, DocumentAnalysis, RuleCatalogue};
use super::store::{ReportStore, StoreError};
use crate::document::DocumentView;
use crate::engine::ClauseEngine;
use crate::report::ComplianceReport;

/// Service composing the shared clause engine with report persistence.
pub struct AuditService<S> {
    engine: Arc<ClauseEngine>,
    store: Arc<S>,
}

impl<S> AuditService<S>
where
    S: ReportStore + 'static,
{
    pub fn new(engine: Arc<ClauseEngine>, store: Arc<S>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ClauseEngine {
        &self.engine
    }

    /// Evaluate one extracted document, persist its report and return the API view.
    pub fn analyze(
        &self,
        filename: &str,
        raw_text: &str,
    ) -> Result<DocumentAnalysis, AuditServiceError> {
        let _span = info_span!("analyze", filename).entered();

        if raw_text.trim().is_empty() {
            return Err(AuditServiceError::EmptyDocument {
                filename: filename.to_string(),
            });
        }

        let evaluation = self.engine.evaluate(&DocumentView::from_raw(raw_text));
        let report = ComplianceReport::new(filename, &evaluation);
        let stem = report_stem(filename);
        let stored = self.store.save(&stem, &report)?;

        info!(
            stem = %stem,
            compliant = report.summary.compliant,
            partial = report.summary.partial,
            non_compliant = report.summary.non_compliant,
            "document analysed"
        );

        Ok(DocumentAnalysis {
            filename: filename.to_string(),
            report_data: report,
            json_url: format!("/reports/{}", stored.json_file),
            csv_url: format!("/reports/{}", stored.csv_file),
        })
    }

    /// Fetch a previously stored report by its artifact stem.
    pub fn report(&self, stem: &str) -> Result<ComplianceReport, AuditServiceError> {
        let not_found = || AuditServiceError::NotFound {
            stem: stem.to_string(),
        };
        if report_stem(stem) != stem {
            return Err(not_found());
        }
        self.store.fetch(stem)?.ok_or_else(not_found)
    }

    pub fn catalogue(&self) -> RuleCatalogue<'_> {
        let rules = self.engine.rules();
        RuleCatalogue {
            clauses: rules,
            findings: rules.lint(),
        }
    }
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error("{filename} contains no extractable text")]
    EmptyDocument { filename: String },
    #[error("no report stored for '{stem}'")]
    NotFound { stem: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
