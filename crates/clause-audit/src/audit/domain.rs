use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::report::ComplianceReport;
use crate::rules::{LintFinding, RuleSet};

const FALLBACK_STEM: &str = "document";

/// Batch of already-extracted documents submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub documents: Vec<DocumentSubmission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub filename: String,
    pub text: String,
}

/// Analysis result returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub filename: String,
    pub report_data: ComplianceReport,
    pub json_url: String,
    pub csv_url: String,
}

/// Loaded clauses plus advisory findings, as served by the rules endpoint.
#[derive(Debug, Serialize)]
pub struct RuleCatalogue<'a> {
    pub clauses: &'a RuleSet,
    pub findings: Vec<LintFinding>,
}

/// Artifact name stem for a submitted filename.
///
/// Directory components and the extension are dropped and any character
/// outside `[A-Za-z0-9._-]` becomes `_`, so the stem is always a plain
/// file name.
pub fn report_stem(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = Path::new(base)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(base);

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned
    }
}
