//! Natural-language-inference backends for the semantic evidence stage.
//!
//! The engine only needs an entailment probability for a (premise, hypothesis)
//! pair. Production deployments put a cross-encoder behind
//! [`EntailmentScorer`]; [`LexicalEntailment`] is a deterministic model-free
//! backend for local runs and tests.

use std::collections::BTreeSet;
use std::sync::Mutex;

use serde::Serialize;

use super::lexical::content_tokens;

/// Three-way NLI label distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NliDistribution {
    pub contradiction: f64,
    pub neutral: f64,
    pub entailment: f64,
}

impl NliDistribution {
    /// Softmax over raw `[contradiction, neutral, entailment]` logits.
    pub fn from_logits(logits: [f64; 3]) -> Self {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp = logits.map(|logit| (logit - max).exp());
        let sum: f64 = exp.iter().sum();
        Self {
            contradiction: exp[0] / sum,
            neutral: exp[1] / sum,
            entailment: exp[2] / sum,
        }
    }

    /// Entailment probability clamped to `[0, 1]`; non-finite values count as 0.
    pub fn entailment_probability(&self) -> f64 {
        if self.entailment.is_finite() {
            self.entailment.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NliError {
    #[error("entailment backend unavailable: {0}")]
    Unavailable(String),
    #[error("entailment inference failed: {0}")]
    Inference(String),
}

/// Stateless, thread-safe entailment scoring capability.
pub trait EntailmentScorer: Send + Sync {
    fn score(&self, premise: &str, hypothesis: &str) -> Result<NliDistribution, NliError>;

    /// Score many pairs at once; backends with batched inference override this.
    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<NliDistribution>, NliError> {
        pairs
            .iter()
            .map(|(premise, hypothesis)| self.score(premise, hypothesis))
            .collect()
    }
}

const NEGATIONS: [&str; 5] = ["not", "no", "never", "without", "none"];

/// Deterministic overlap heuristic.
///
/// Entailment mass is the share of the premise's content tokens that also
/// appear in the hypothesis. A negated hypothesis moves that mass to
/// contradiction. The remainder is neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalEntailment;

impl EntailmentScorer for LexicalEntailment {
    fn score(&self, premise: &str, hypothesis: &str) -> Result<NliDistribution, NliError> {
        let premise_tokens = content_tokens(premise);
        if premise_tokens.is_empty() {
            return Ok(NliDistribution {
                contradiction: 0.0,
                neutral: 1.0,
                entailment: 0.0,
            });
        }

        let hypothesis_tokens = content_tokens(hypothesis);
        let coverage = premise_tokens.intersection(&hypothesis_tokens).count() as f64
            / premise_tokens.len() as f64;

        let lowered = hypothesis.to_lowercase();
        let words: BTreeSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        let negated = NEGATIONS.iter().any(|negation| words.contains(negation));

        let (entailment, contradiction) = if negated {
            (0.0, coverage)
        } else {
            (coverage, 0.0)
        };

        Ok(NliDistribution {
            contradiction,
            neutral: 1.0 - entailment - contradiction,
            entailment,
        })
    }
}

type ScoreFn = Box<dyn Fn(&str, &str) -> Result<NliDistribution, NliError> + Send + Sync>;

/// Backend delegating to a caller-supplied function (embedded model, RPC client, fake).
pub struct ExternalEntailment {
    score_fn: ScoreFn,
}

impl ExternalEntailment {
    pub fn new(
        score_fn: impl Fn(&str, &str) -> Result<NliDistribution, NliError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            score_fn: Box::new(score_fn),
        }
    }

    /// Backend that only reports an entailment probability.
    pub fn from_probability(
        probability_fn: impl Fn(&str, &str) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(move |premise, hypothesis| {
            let entailment = probability_fn(premise, hypothesis);
            Ok(NliDistribution {
                contradiction: 0.0,
                neutral: 1.0 - entailment,
                entailment,
            })
        })
    }
}

impl EntailmentScorer for ExternalEntailment {
    fn score(&self, premise: &str, hypothesis: &str) -> Result<NliDistribution, NliError> {
        (self.score_fn)(premise, hypothesis)
    }
}

/// Model that needs exclusive access while inferring (shared scratch buffers).
pub trait EntailmentModel: Send {
    fn infer(&mut self, premise: &str, hypothesis: &str) -> Result<NliDistribution, NliError>;
}

/// Serializes every inference call on a single model instance.
pub struct SerializedScorer<M> {
    model: Mutex<M>,
}

impl<M: EntailmentModel> SerializedScorer<M> {
    pub fn new(model: M) -> Self {
        Self {
            model: Mutex::new(model),
        }
    }
}

impl<M: EntailmentModel> EntailmentScorer for SerializedScorer<M> {
    fn score(&self, premise: &str, hypothesis: &str) -> Result<NliDistribution, NliError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| NliError::Unavailable("model mutex poisoned".to_string()))?;
        model.infer(premise, hypothesis)
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<NliDistribution>, NliError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| NliError::Unavailable("model mutex poisoned".to_string()))?;
        pairs
            .iter()
            .map(|(premise, hypothesis)| model.infer(premise, hypothesis))
            .collect()
    }
}
