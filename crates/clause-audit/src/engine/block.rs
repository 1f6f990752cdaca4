use serde::Serialize;
use tracing::debug;

use super::exact::{extract_snippets, score_block};
use super::round4;
use super::semantic::{SemanticDebug, SemanticEnhancer};
use crate::document::DocumentView;
use crate::rules::EvidenceBlock;

/// Ceiling for blocks with no literal evidence. Sits just below the default
/// mandatory threshold so semantic evidence alone never satisfies a block.
pub const SEMANTIC_ONLY_CAP: f64 = 0.49;

/// Transient per-block result inside one clause evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockEvaluation {
    pub name: String,
    pub mandatory: bool,
    pub weight: f64,
    pub exact_score: f64,
    pub semantic_score: f64,
    pub final_score: f64,
    pub semantic_used: bool,
    pub semantic_only: bool,
    pub exact_signals: Vec<String>,
    pub snippets: Vec<String>,
    pub semantic_sentences: Vec<String>,
    pub semantic_debug: Option<SemanticDebug>,
}

impl BlockEvaluation {
    pub fn has_exact_evidence(&self) -> bool {
        self.exact_score > 0.0
    }

    pub fn has_semantic_matches(&self) -> bool {
        !self.semantic_sentences.is_empty()
    }
}

/// Shared inputs for every block of one clause.
pub struct BlockEvaluationContext<'a> {
    pub document: &'a DocumentView,
    pub intent: &'a str,
    pub mandatory_threshold: f64,
    pub semantic: &'a SemanticEnhancer,
}

impl BlockEvaluationContext<'_> {
    pub fn evaluate(&self, name: &str, block: &EvidenceBlock) -> BlockEvaluation {
        let exact = score_block(self.document.normalized_text(), &block.signals);
        let snippets = extract_snippets(self.document.sentences(), &exact.matched_signals);

        let mut evaluation = BlockEvaluation {
            name: name.to_string(),
            mandatory: block.mandatory,
            weight: block.weight,
            exact_score: exact.score,
            semantic_score: 0.0,
            final_score: exact.score,
            semantic_used: false,
            semantic_only: false,
            exact_signals: exact.matched_signals,
            snippets,
            semantic_sentences: Vec::new(),
            semantic_debug: None,
        };

        if evaluation.exact_score < self.mandatory_threshold {
            let semantic = self
                .semantic
                .score_block(self.document.sentences(), &block.signals, self.intent);

            let final_score = if evaluation.exact_score == 0.0 {
                semantic.score.min(SEMANTIC_ONLY_CAP)
            } else {
                evaluation.exact_score.max(semantic.score).min(1.0)
            };

            evaluation.semantic_score = semantic.score;
            evaluation.final_score = round4(final_score);
            evaluation.semantic_used = evaluation.final_score > evaluation.exact_score;
            evaluation.semantic_only =
                evaluation.exact_score == 0.0 && semantic.score > 0.0 && block.mandatory;
            evaluation.semantic_sentences = semantic.matched_sentences;
            evaluation.semantic_debug = semantic.debug;
        }

        debug!(
            block = name,
            exact = evaluation.exact_score,
            semantic = evaluation.semantic_score,
            final_score = evaluation.final_score,
            "evidence block scored"
        );

        evaluation
    }
}
