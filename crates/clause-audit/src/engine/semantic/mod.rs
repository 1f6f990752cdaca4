//! Semantic evidence enhancement for weak evidence blocks.
//!
//! Each signal passes two gates: a lexical pre-filter that keeps only
//! sentences sharing content vocabulary with the signal, then an entailment
//! check with the clause intent as premise and the candidate sentence as
//! hypothesis. A signal counts when its best candidate reaches the
//! entailment threshold.

mod lexical;
pub mod nli;

pub use lexical::{content_tokens, SignalFilter};
pub use nli::{
    EntailmentModel, EntailmentScorer, ExternalEntailment, LexicalEntailment, NliDistribution,
    NliError, SerializedScorer,
};

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::round4;

pub const ENTAILMENT_THRESHOLD: f64 = 0.85;

/// Diagnostics for one block's semantic pass. Never affects scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticDebug {
    pub lexical_filter_passed: bool,
    pub raw_entailment_score: f64,
    pub backend_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticOutcome {
    pub score: f64,
    pub matched_sentences: Vec<String>,
    /// `None` when there was nothing to evaluate (no signals or no sentences).
    pub debug: Option<SemanticDebug>,
}

impl SemanticOutcome {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched_sentences: Vec::new(),
            debug: None,
        }
    }

    fn unavailable(lexical_filter_passed: bool) -> Self {
        Self {
            score: 0.0,
            matched_sentences: Vec::new(),
            debug: Some(SemanticDebug {
                lexical_filter_passed,
                raw_entailment_score: 0.0,
                backend_available: false,
            }),
        }
    }
}

/// Intent-grounded entailment layer over an optional scoring backend.
#[derive(Clone)]
pub struct SemanticEnhancer {
    scorer: Option<Arc<dyn EntailmentScorer>>,
    threshold: f64,
}

impl SemanticEnhancer {
    pub fn new(scorer: Arc<dyn EntailmentScorer>) -> Self {
        Self {
            scorer: Some(scorer),
            threshold: ENTAILMENT_THRESHOLD,
        }
    }

    /// Enhancer that never contributes semantic evidence.
    pub fn disabled() -> Self {
        Self {
            scorer: None,
            threshold: ENTAILMENT_THRESHOLD,
        }
    }

    /// Override the acceptance bar; non-finite or out-of-range values are ignored.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
            self.threshold = threshold;
        }
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.scorer.is_some()
    }

    pub fn score_block(
        &self,
        sentences: &[String],
        signals: &[String],
        clause_intent: &str,
    ) -> SemanticOutcome {
        if signals.is_empty() || sentences.is_empty() {
            return SemanticOutcome::empty();
        }

        let sentence_tokens: Vec<BTreeSet<String>> =
            sentences.iter().map(|s| content_tokens(s)).collect();

        let Some(scorer) = self.scorer.as_ref() else {
            let passed = signals.iter().any(|signal| {
                let filter = SignalFilter::new(signal);
                sentences
                    .iter()
                    .zip(&sentence_tokens)
                    .any(|(sentence, tokens)| filter.admits(sentence, tokens))
            });
            return SemanticOutcome::unavailable(passed);
        };

        let mut matched_count = 0usize;
        let mut matched_sentences: Vec<String> = Vec::new();
        let mut max_raw_entailment = 0.0f64;
        let mut lexical_filter_passed = false;

        for signal in signals {
            let filter = SignalFilter::new(signal);
            let candidates: Vec<&String> = sentences
                .iter()
                .zip(&sentence_tokens)
                .filter(|(sentence, tokens)| filter.admits(sentence, tokens))
                .map(|(sentence, _)| sentence)
                .collect();

            if candidates.is_empty() {
                continue;
            }
            lexical_filter_passed = true;

            let pairs: Vec<(&str, &str)> = candidates
                .iter()
                .map(|sentence| (clause_intent, sentence.as_str()))
                .collect();

            let distributions = match scorer.score_batch(&pairs) {
                Ok(distributions) if distributions.len() == pairs.len() => distributions,
                Ok(distributions) => {
                    warn!(
                        expected = pairs.len(),
                        received = distributions.len(),
                        "entailment backend returned a short batch; semantic stage skipped"
                    );
                    return SemanticOutcome::unavailable(lexical_filter_passed);
                }
                Err(error) => {
                    warn!(%error, "entailment backend failed; semantic stage skipped");
                    return SemanticOutcome::unavailable(lexical_filter_passed);
                }
            };

            // Earliest sentence wins ties.
            let mut best_index = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (index, distribution) in distributions.iter().enumerate() {
                let probability = distribution.entailment_probability();
                if probability > best_score {
                    best_index = index;
                    best_score = probability;
                }
            }

            max_raw_entailment = max_raw_entailment.max(best_score);

            if best_score >= self.threshold {
                matched_count += 1;
                let sentence = candidates[best_index];
                if !matched_sentences.contains(sentence) {
                    matched_sentences.push(sentence.clone());
                }
            }
        }

        SemanticOutcome {
            score: round4(matched_count as f64 / signals.len() as f64),
            matched_sentences,
            debug: Some(SemanticDebug {
                lexical_filter_passed,
                raw_entailment_score: round4(max_raw_entailment),
                backend_available: true,
            }),
        }
    }
}

impl std::fmt::Debug for SemanticEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticEnhancer")
            .field("enabled", &self.is_enabled())
            .field("threshold", &self.threshold)
            .finish()
    }
}
