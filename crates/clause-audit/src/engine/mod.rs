//! Clause compliance evaluation engine.

mod archetype;
mod block;
mod clause;
pub mod exact;
mod result;
pub mod semantic;

#[cfg(test)]
mod tests;

pub use archetype::{decide, ArchetypeInput, Decision};
pub use block::{BlockEvaluation, BlockEvaluationContext, SEMANTIC_ONLY_CAP};
pub use clause::evaluate_clause;
pub use result::{BlockDetail, ClauseResult, ClauseStatus, ComplianceSummary, DocumentEvaluation};
pub use semantic::{SemanticEnhancer, ENTAILMENT_THRESHOLD};

use std::sync::Arc;

use tracing::info;

use crate::document::DocumentView;
use crate::ordered::OrderedMap;
use crate::rules::RuleSet;

/// Round to the fixed four-decimal reporting precision.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Stateless evaluator applying a shared rule set to documents.
#[derive(Debug, Clone)]
pub struct ClauseEngine {
    rules: Arc<RuleSet>,
    semantic: SemanticEnhancer,
}

impl ClauseEngine {
    pub fn new(rules: Arc<RuleSet>, semantic: SemanticEnhancer) -> Self {
        Self { rules, semantic }
    }

    /// Engine scoring on literal evidence only.
    pub fn exact_only(rules: Arc<RuleSet>) -> Self {
        Self::new(rules, SemanticEnhancer::disabled())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn semantic(&self) -> &SemanticEnhancer {
        &self.semantic
    }

    /// Evaluate every clause in declaration order.
    pub fn evaluate(&self, document: &DocumentView) -> DocumentEvaluation {
        let results: OrderedMap<ClauseResult> = self
            .rules
            .clauses()
            .map(|clause| {
                (
                    clause.id.clone(),
                    evaluate_clause(clause, document, &self.semantic),
                )
            })
            .collect();

        let evaluation = DocumentEvaluation::new(results);
        let summary = evaluation.summary();
        info!(
            clauses = summary.total,
            compliant = summary.compliant,
            partial = summary.partial,
            non_compliant = summary.non_compliant,
            "document evaluated"
        );
        evaluation
    }

    pub fn evaluate_text(&self, raw: &str) -> DocumentEvaluation {
        self.evaluate(&DocumentView::from_raw(raw))
    }
}
