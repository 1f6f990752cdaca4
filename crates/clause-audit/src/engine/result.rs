use serde::{Deserialize, Serialize};

use super::semantic::SemanticDebug;
use crate::ordered::OrderedMap;

/// Discrete compliance outcome for one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseStatus {
    Compliant,
    Partial,
    NonCompliant,
}

impl ClauseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClauseStatus::Compliant => "COMPLIANT",
            ClauseStatus::Partial => "PARTIAL",
            ClauseStatus::NonCompliant => "NON_COMPLIANT",
        }
    }
}

impl std::fmt::Display for ClauseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score breakdown retained per block for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDetail {
    pub exact_score: f64,
    pub semantic_score: f64,
    pub final_score: f64,
    pub semantic_used: bool,
    pub semantic_only: bool,
    pub mandatory: bool,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_debug: Option<SemanticDebug>,
}

/// Engine output for one clause; immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseResult {
    pub archetype: String,
    pub intent: String,
    pub status: ClauseStatus,
    pub clause_score: f64,
    pub block_scores: OrderedMap<f64>,
    pub mandatory_failures: Vec<String>,
    pub matched_evidence: OrderedMap<Vec<String>>,
    pub matched_snippets: OrderedMap<Vec<String>>,
    pub semantic_matches: OrderedMap<Vec<String>>,
    pub semantic_only_blocks: Vec<String>,
    pub block_details: OrderedMap<BlockDetail>,
    pub decision_trace: String,
}

/// Status counts across one document's clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    pub partial: usize,
    pub non_compliant: usize,
}

impl ComplianceSummary {
    pub fn record(&mut self, status: ClauseStatus) {
        self.total += 1;
        match status {
            ClauseStatus::Compliant => self.compliant += 1,
            ClauseStatus::Partial => self.partial += 1,
            ClauseStatus::NonCompliant => self.non_compliant += 1,
        }
    }
}

/// Ordered `clause_id -> ClauseResult` for a single document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DocumentEvaluation {
    clauses: OrderedMap<ClauseResult>,
}

impl DocumentEvaluation {
    pub(crate) fn new(clauses: OrderedMap<ClauseResult>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> impl Iterator<Item = (&str, &ClauseResult)> {
        self.clauses.iter()
    }

    pub fn clause(&self, id: &str) -> Option<&ClauseResult> {
        self.clauses.get(id)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn summary(&self) -> ComplianceSummary {
        let mut summary = ComplianceSummary::default();
        for result in self.clauses.values() {
            summary.record(result.status);
        }
        summary
    }
}
