//! Report artifacts built from one document's evaluation.

mod export;
mod trace;

pub use export::write_csv;
pub use trace::render_trace;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{ClauseResult, ComplianceSummary, DocumentEvaluation};
use crate::ordered::OrderedMap;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV summary: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Status counts as they appear in persisted reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_clauses: usize,
    pub compliant: usize,
    pub partial: usize,
    pub non_compliant: usize,
}

impl From<ComplianceSummary> for ReportSummary {
    fn from(summary: ComplianceSummary) -> Self {
        Self {
            total_clauses: summary.total,
            compliant: summary.compliant,
            partial: summary.partial,
            non_compliant: summary.non_compliant,
        }
    }
}

/// Persistable gap report for one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub clauses: OrderedMap<ClauseResult>,
}

impl ComplianceReport {
    pub fn new(source: impl Into<String>, evaluation: &DocumentEvaluation) -> Self {
        Self::with_timestamp(source, evaluation, Utc::now())
    }

    pub fn with_timestamp(
        source: impl Into<String>,
        evaluation: &DocumentEvaluation,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            generated_at,
            summary: evaluation.summary().into(),
            clauses: evaluation
                .clauses()
                .map(|(id, result)| (id, result.clone()))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::engine::ClauseEngine;
    use crate::rules::RuleSet;

    pub(super) const RULES: &str = r#"{
        "IMS3": {
            "archetype": "POLICY_PROCEDURE",
            "intent": "Infection control policies are documented and reviewed.",
            "evidence_blocks": {
                "policy_doc": {"signals": ["infection control policy", "document control"], "weight": 0.6, "mandatory": true},
                "review_cycle": {"signals": ["annual review"], "weight": 0.4}
            },
            "evaluation_params": {"mandatory_threshold": 0.5, "overall_compliance_threshold": 0.7}
        },
        "HRM1": {
            "archetype": "HR_GOVERNANCE",
            "intent": "Staff credentials are verified.",
            "evidence_blocks": {
                "credentials": {"signals": ["credential verification"], "weight": 1.0, "mandatory": true}
            }
        }
    }"#;

    pub(super) fn evaluation(text: &str) -> DocumentEvaluation {
        let rules = RuleSet::from_str(RULES).expect("rules parse");
        ClauseEngine::exact_only(Arc::new(rules)).evaluate_text(text)
    }

    #[test]
    fn report_summarises_and_keeps_clause_order() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let report = ComplianceReport::with_timestamp(
            "policy_manual.txt",
            &evaluation("Records follow document control."),
            at,
        );

        assert_eq!(
            report.summary,
            ReportSummary {
                total_clauses: 2,
                compliant: 0,
                partial: 1,
                non_compliant: 1,
            }
        );
        assert_eq!(report.clauses.keys().collect::<Vec<_>>(), vec!["IMS3", "HRM1"]);

        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().expect("json")).expect("valid json");
        assert_eq!(json["source"], "policy_manual.txt");
        assert_eq!(json["generated_at"], "2026-03-01T09:30:00Z");
        assert_eq!(json["summary"]["total_clauses"], 2);
        assert_eq!(json["clauses"]["IMS3"]["status"], "PARTIAL");
        assert_eq!(json["clauses"]["HRM1"]["status"], "NON_COMPLIANT");
    }

    #[test]
    fn report_reloads_from_json() {
        let report = ComplianceReport::new("manual.txt", &evaluation("credential verification"));
        let json = report.to_json_pretty().expect("json");
        let reloaded: ComplianceReport = serde_json::from_str(&json).expect("reload");
        assert_eq!(reloaded, report);
    }
}
