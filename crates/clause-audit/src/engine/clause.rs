use tracing::{debug, debug_span};

use super::archetype::{decide, ArchetypeInput};
use super::block::{BlockEvaluation, BlockEvaluationContext};
use super::result::{BlockDetail, ClauseResult};
use super::round4;
use super::semantic::SemanticEnhancer;
use crate::document::DocumentView;
use crate::ordered::OrderedMap;
use crate::rules::Clause;

/// Score every evidence block of `clause` and resolve its status.
pub fn evaluate_clause(
    clause: &Clause,
    document: &DocumentView,
    semantic: &SemanticEnhancer,
) -> ClauseResult {
    let _span = debug_span!("clause", id = %clause.id, archetype = %clause.archetype).entered();
    let params = &clause.evaluation_params;

    let context = BlockEvaluationContext {
        document,
        intent: &clause.intent,
        mandatory_threshold: params.mandatory_threshold,
        semantic,
    };

    let mut clause_score = 0.0;
    let blocks: Vec<BlockEvaluation> = clause
        .evidence_blocks
        .iter()
        .map(|(name, block)| {
            let evaluation = context.evaluate(name, block);
            clause_score += evaluation.final_score * block.weight;
            evaluation
        })
        .collect();
    let clause_score = round4(clause_score);

    let input = ArchetypeInput::new(&blocks, clause_score, params);
    let decision = decide(&clause.archetype, &input);
    let mandatory_failures = input
        .mandatory_failures
        .iter()
        .map(|name| name.to_string())
        .collect();

    debug!(
        status = decision.status.label(),
        score = clause_score,
        "clause resolved"
    );

    ClauseResult {
        archetype: clause.archetype.label().to_string(),
        intent: clause.intent.clone(),
        status: decision.status,
        clause_score,
        block_scores: per_block(&blocks, |block| block.final_score),
        mandatory_failures,
        matched_evidence: per_block(&blocks, |block| block.exact_signals.clone()),
        matched_snippets: per_block(&blocks, |block| block.snippets.clone()),
        semantic_matches: per_block(&blocks, |block| block.semantic_sentences.clone()),
        semantic_only_blocks: blocks
            .iter()
            .filter(|block| block.semantic_only)
            .map(|block| block.name.clone())
            .collect(),
        block_details: per_block(&blocks, |block| BlockDetail {
            exact_score: block.exact_score,
            semantic_score: block.semantic_score,
            final_score: block.final_score,
            semantic_used: block.semantic_used,
            semantic_only: block.semantic_only,
            mandatory: block.mandatory,
            weight: block.weight,
            semantic_debug: block.semantic_debug.clone(),
        }),
        decision_trace: decision.trace,
    }
}

fn per_block<V>(blocks: &[BlockEvaluation], f: impl Fn(&BlockEvaluation) -> V) -> OrderedMap<V> {
    blocks
        .iter()
        .map(|block| (block.name.clone(), f(block)))
        .collect()
}
