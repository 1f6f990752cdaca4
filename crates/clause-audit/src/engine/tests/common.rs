use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::engine::semantic::{ExternalEntailment, NliError, SemanticEnhancer};
use crate::engine::BlockEvaluation;
use crate::ordered::OrderedMap;
use crate::rules::{Archetype, Clause, EvaluationParams, EvidenceBlock};

pub(super) const INFECTION_INTENT: &str =
    "The hospital operates an infection control programme with committee oversight.";

pub(super) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub(super) fn block(signals: &[&str], weight: f64, mandatory: bool) -> EvidenceBlock {
    EvidenceBlock {
        signals: strings(signals),
        weight,
        mandatory,
    }
}

pub(super) fn clause(
    id: &str,
    archetype: Archetype,
    blocks: Vec<(&str, EvidenceBlock)>,
    params: EvaluationParams,
) -> Clause {
    Clause {
        id: id.to_string(),
        archetype,
        intent: INFECTION_INTENT.to_string(),
        evidence_blocks: blocks.into_iter().collect::<OrderedMap<_>>(),
        evaluation_params: params,
    }
}

/// Clause used by the end-to-end scenarios: a mandatory policy block and an
/// optional review block.
pub(super) fn policy_clause(archetype: Archetype) -> Clause {
    clause(
        "IMS3",
        archetype,
        vec![
            (
                "policy_doc",
                block(&["infection control policy", "document control"], 0.6, true),
            ),
            ("review_cycle", block(&["annual review"], 0.4, false)),
        ],
        EvaluationParams::new(0.5, 0.7, false),
    )
}

/// Fake backend: `probability` for hypotheses containing `fragment`, 0.05 otherwise.
pub(super) fn entailing(fragment: &'static str, probability: f64) -> SemanticEnhancer {
    SemanticEnhancer::new(Arc::new(ExternalEntailment::from_probability(
        move |_, hypothesis| {
            if hypothesis.to_lowercase().contains(fragment) {
                probability
            } else {
                0.05
            }
        },
    )))
}

/// Backend that entails everything and counts calls.
pub(super) fn counting_backend(probability: f64) -> (SemanticEnhancer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let enhancer = SemanticEnhancer::new(Arc::new(ExternalEntailment::from_probability(
        move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            probability
        },
    )));
    (enhancer, calls)
}

/// Backend recording every premise it is asked about.
pub(super) fn recording_backend() -> (SemanticEnhancer, Arc<Mutex<Vec<String>>>) {
    let premises = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&premises);
    let enhancer = SemanticEnhancer::new(Arc::new(ExternalEntailment::from_probability(
        move |premise, _| {
            sink.lock().expect("premise mutex").push(premise.to_string());
            0.95
        },
    )));
    (enhancer, premises)
}

pub(super) fn failing_backend() -> SemanticEnhancer {
    SemanticEnhancer::new(Arc::new(ExternalEntailment::new(|_, _| {
        Err(NliError::Unavailable("model not loaded".to_string()))
    })))
}

/// Hand-built block result for policy tests.
pub(super) fn evaluated(name: &str, mandatory: bool, exact: f64, final_score: f64) -> BlockEvaluation {
    BlockEvaluation {
        name: name.to_string(),
        mandatory,
        weight: 0.5,
        exact_score: exact,
        semantic_score: if final_score > exact { final_score } else { 0.0 },
        final_score,
        semantic_used: final_score > exact,
        semantic_only: mandatory && exact == 0.0 && final_score > 0.0,
        exact_signals: Vec::new(),
        snippets: Vec::new(),
        semantic_sentences: Vec::new(),
        semantic_debug: None,
    }
}

pub(super) fn with_semantic_sentence(mut block: BlockEvaluation, sentence: &str) -> BlockEvaluation {
    block.semantic_sentences.push(sentence.to_string());
    block
}
