use super::common::*;
use crate::engine::{decide, ArchetypeInput, BlockEvaluation, ClauseStatus, Decision};
use crate::rules::{Archetype, EvaluationParams};

fn params(chain_required: bool) -> EvaluationParams {
    EvaluationParams::new(0.5, 0.7, chain_required)
}

fn resolve(
    archetype: Archetype,
    blocks: &[BlockEvaluation],
    clause_score: f64,
    params: &EvaluationParams,
) -> Decision {
    decide(&archetype, &ArchetypeInput::new(blocks, clause_score, params))
}

#[test]
fn input_partitions_mandatory_blocks_by_exact_score() {
    let blocks = vec![
        evaluated("absent", true, 0.0, 0.49),
        evaluated("weak", true, 0.25, 0.25),
        evaluated("strong", true, 0.75, 0.75),
        evaluated("extra", false, 0.0, 0.0),
    ];
    let params = params(false);
    let input = ArchetypeInput::new(&blocks, 0.5, &params);

    assert_eq!(input.mandatory_names, vec!["absent", "weak", "strong"]);
    assert_eq!(input.optional_names, vec!["extra"]);
    assert_eq!(input.mandatory_failures, vec!["absent"]);
    assert_eq!(input.mandatory_weak, vec!["weak"]);
    assert_eq!(input.exact_score("missing"), 0.0);
}

#[test]
fn policy_procedure_follows_mandatory_gate_then_score() {
    let params = params(false);

    let all_missing = [evaluated("a", true, 0.0, 0.0), evaluated("b", true, 0.0, 0.0)];
    let decision = resolve(Archetype::PolicyProcedure, &all_missing, 0.0, &params);
    assert_eq!(decision.status, ClauseStatus::NonCompliant);
    assert_eq!(decision.trace, "All mandatory blocks lack exact evidence: a, b");

    let one_missing = [evaluated("a", true, 1.0, 1.0), evaluated("b", true, 0.0, 0.0)];
    let decision = resolve(Archetype::PolicyProcedure, &one_missing, 0.5, &params);
    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(decision.trace, "Mandatory blocks lack exact evidence: b");

    let present = [evaluated("a", true, 1.0, 1.0), evaluated("b", true, 0.5, 0.5)];
    let low = resolve(Archetype::PolicyProcedure, &present, 0.6, &params);
    assert_eq!(low.status, ClauseStatus::Partial);
    let high = resolve(Archetype::PolicyProcedure, &present, 0.75, &params);
    assert_eq!(high.status, ClauseStatus::Compliant);
}

#[test]
fn policy_procedure_without_mandatory_blocks_is_not_compliant() {
    let blocks = [evaluated("optional", false, 1.0, 1.0)];
    let decision = resolve(Archetype::PolicyProcedure, &blocks, 0.5, &params(false));
    assert_eq!(decision.status, ClauseStatus::NonCompliant);
}

#[test]
fn lifecycle_counts_missing_stages() {
    let params = params(false);
    let cases = [
        (vec![1.0, 1.0, 1.0], ClauseStatus::Compliant),
        (vec![1.0, 0.0, 1.0], ClauseStatus::Partial),
        (vec![0.0, 0.0, 1.0], ClauseStatus::NonCompliant),
        (vec![0.0, 0.0, 0.0], ClauseStatus::NonCompliant),
    ];

    for (scores, expected) in cases {
        let blocks: Vec<BlockEvaluation> = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| evaluated(&format!("stage{index}"), true, score, score))
            .collect();
        let decision = resolve(Archetype::LifecycleManagement, &blocks, 0.0, &params);
        assert_eq!(decision.status, expected, "{scores:?}");
    }
}

#[test]
fn lifecycle_all_weak_stages_hit_exact_evidence_safeguard() {
    let blocks = [
        evaluated("plan", true, 0.25, 0.25),
        evaluated("review", true, 0.25, 0.25),
    ];
    let decision = resolve(Archetype::LifecycleManagement, &blocks, 0.25, &params(false));

    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(decision.trace, "No mandatory block satisfied via exact evidence.");
}

#[test]
fn monitoring_indicator_is_first_declared_mandatory_block() {
    let params = params(false);

    let missing_indicator = [
        evaluated("notes", false, 0.0, 0.0),
        evaluated("indicator", true, 0.0, 0.0),
        evaluated("action", true, 1.0, 1.0),
    ];
    let decision = resolve(Archetype::MonitoringImprovement, &missing_indicator, 0.5, &params);
    assert_eq!(decision.status, ClauseStatus::NonCompliant);
    assert_eq!(
        decision.trace,
        "Indicator block 'indicator' has no exact evidence"
    );

    let missing_action = [
        evaluated("indicator", true, 1.0, 1.0),
        evaluated("action", true, 0.0, 0.0),
    ];
    let decision = resolve(Archetype::MonitoringImprovement, &missing_action, 0.5, &params);
    assert_eq!(decision.status, ClauseStatus::Partial);
}

#[test]
fn monitoring_chain_requirement_rejects_weak_links() {
    let blocks = [
        evaluated("indicator", true, 1.0, 1.0),
        evaluated("action", true, 0.25, 0.25),
    ];

    let relaxed = resolve(Archetype::MonitoringImprovement, &blocks, 0.6, &params(false));
    assert_eq!(relaxed.status, ClauseStatus::Compliant);

    let chained = resolve(Archetype::MonitoringImprovement, &blocks, 0.6, &params(true));
    assert_eq!(chained.status, ClauseStatus::Partial);
    assert_eq!(
        chained.trace,
        "Improvement chain incomplete; weak mandatory evidence: action"
    );
}

#[test]
fn monitoring_without_mandatory_blocks_is_compliant() {
    let blocks = [evaluated("notes", false, 0.0, 0.0)];
    let decision = resolve(Archetype::MonitoringImprovement, &blocks, 0.0, &params(false));
    assert_eq!(decision.status, ClauseStatus::Compliant);
}

#[test]
fn hr_governance_requires_optional_exact_evidence() {
    let params = params(false);

    let missing_optional = [
        evaluated("credentials", true, 1.0, 1.0),
        evaluated("training", false, 0.0, 0.49),
    ];
    let decision = resolve(Archetype::HrGovernance, &missing_optional, 0.75, &params);
    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(
        decision.trace,
        "Mandatory blocks satisfied but optional blocks lack exact evidence: training"
    );

    let complete = [
        evaluated("credentials", true, 1.0, 1.0),
        evaluated("training", false, 0.5, 0.5),
    ];
    let decision = resolve(Archetype::HrGovernance, &complete, 0.75, &params);
    assert_eq!(decision.status, ClauseStatus::Compliant);
}

#[test]
fn safety_controls_are_judged_on_final_scores() {
    let params = params(false);

    let lifted = [
        evaluated("hazard_register", true, 1.0, 1.0),
        evaluated("drills", true, 0.25, 0.75),
    ];
    let decision = resolve(Archetype::SafetyRiskControl, &lifted, 0.875, &params);
    assert_eq!(decision.status, ClauseStatus::Compliant);

    let below = [
        evaluated("hazard_register", true, 1.0, 1.0),
        evaluated("drills", true, 0.0, 0.49),
    ];
    let decision = resolve(Archetype::SafetyRiskControl, &below, 0.745, &params);
    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(
        decision.trace,
        "Mandatory safety controls score below 0.5: drills"
    );
}

#[test]
fn semantic_marker_appended_for_implicated_blocks() {
    let blocks = [
        evaluated("policy", true, 1.0, 1.0),
        with_semantic_sentence(
            evaluated("committee", true, 0.0, 0.49),
            "The committee meets monthly",
        ),
    ];
    let decision = resolve(Archetype::PolicyProcedure, &blocks, 0.745, &params(false));

    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(
        decision.trace,
        "Mandatory blocks lack exact evidence: committee (semantic evidence detected)"
    );
}

#[test]
fn semantic_marker_ignores_blocks_not_implicated() {
    let blocks = [
        with_semantic_sentence(
            evaluated("policy", true, 0.25, 1.0),
            "Policy is reviewed",
        ),
        evaluated("committee", true, 0.0, 0.0),
    ];
    let decision = resolve(Archetype::PolicyProcedure, &blocks, 0.5, &params(false));

    assert!(!decision.trace.contains("semantic evidence detected"));
}

#[test]
fn compliant_policy_without_strong_exact_evidence_is_downgraded() {
    let blocks = [
        evaluated("indicator", true, 0.25, 1.0),
        evaluated("action", true, 0.25, 1.0),
    ];
    let decision = resolve(Archetype::MonitoringImprovement, &blocks, 1.0, &params(false));

    assert_eq!(decision.status, ClauseStatus::Partial);
    assert_eq!(decision.trace, "No mandatory block satisfied via exact evidence.");
}

#[test]
fn unrecognized_archetype_is_non_compliant() {
    let blocks = [evaluated("policy", true, 1.0, 1.0)];
    let decision = resolve(
        Archetype::parse("QUALITY_CIRCLE"),
        &blocks,
        1.0,
        &params(false),
    );

    assert_eq!(decision.status, ClauseStatus::NonCompliant);
    assert!(decision.trace.contains("QUALITY_CIRCLE"));
}
