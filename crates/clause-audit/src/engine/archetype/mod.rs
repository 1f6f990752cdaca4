//! Archetype decision policies: per-block scores to a clause status and trace.

mod policy;

use super::block::BlockEvaluation;
use super::result::ClauseStatus;
use crate::rules::{Archetype, EvaluationParams};

const SEMANTIC_MARKER: &str = " (semantic evidence detected)";
const EXACT_EVIDENCE_SAFEGUARD: &str = "No mandatory block satisfied via exact evidence.";

/// Everything an archetype policy may consult, built once per clause.
///
/// `mandatory_failures` and `mandatory_weak` derive from exact scores only.
#[derive(Debug)]
pub struct ArchetypeInput<'a> {
    pub blocks: &'a [BlockEvaluation],
    pub mandatory_names: Vec<&'a str>,
    pub optional_names: Vec<&'a str>,
    pub mandatory_failures: Vec<&'a str>,
    pub mandatory_weak: Vec<&'a str>,
    pub clause_score: f64,
    pub params: &'a EvaluationParams,
}

impl<'a> ArchetypeInput<'a> {
    pub fn new(
        blocks: &'a [BlockEvaluation],
        clause_score: f64,
        params: &'a EvaluationParams,
    ) -> Self {
        let mut mandatory_names = Vec::new();
        let mut optional_names = Vec::new();
        let mut mandatory_failures = Vec::new();
        let mut mandatory_weak = Vec::new();

        for block in blocks {
            let name = block.name.as_str();
            if !block.mandatory {
                optional_names.push(name);
                continue;
            }
            mandatory_names.push(name);
            if block.exact_score == 0.0 {
                mandatory_failures.push(name);
            } else if block.exact_score < params.mandatory_threshold {
                mandatory_weak.push(name);
            }
        }

        Self {
            blocks,
            mandatory_names,
            optional_names,
            mandatory_failures,
            mandatory_weak,
            clause_score,
            params,
        }
    }

    pub fn block(&self, name: &str) -> Option<&'a BlockEvaluation> {
        self.blocks.iter().find(|block| block.name == name)
    }

    pub fn exact_score(&self, name: &str) -> f64 {
        self.block(name).map(|block| block.exact_score).unwrap_or(0.0)
    }

    pub fn final_score(&self, name: &str) -> f64 {
        self.block(name).map(|block| block.final_score).unwrap_or(0.0)
    }
}

/// Status and explanation produced for one clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub status: ClauseStatus,
    pub trace: String,
}

/// Policy output before clause-level safeguards are layered on.
#[derive(Debug)]
pub(crate) struct PolicyDecision {
    pub status: ClauseStatus,
    pub trace: String,
    /// Blocks the trace names as failing.
    pub implicated: Vec<String>,
}

impl PolicyDecision {
    pub fn new(status: ClauseStatus, trace: impl Into<String>) -> Self {
        Self {
            status,
            trace: trace.into(),
            implicated: Vec::new(),
        }
    }

    pub fn implicating<'n>(mut self, names: impl IntoIterator<Item = &'n str>) -> Self {
        self.implicated = names.into_iter().map(str::to_string).collect();
        self
    }
}

/// Resolve a clause through its archetype policy and the exact-evidence safeguard.
pub fn decide(archetype: &Archetype, input: &ArchetypeInput<'_>) -> Decision {
    let policy = match archetype {
        Archetype::PolicyProcedure => policy::policy_procedure(input),
        Archetype::LifecycleManagement => policy::lifecycle_management(input),
        Archetype::MonitoringImprovement => policy::monitoring_improvement(input),
        Archetype::HrGovernance => policy::hr_governance(input),
        Archetype::SafetyRiskControl => policy::safety_risk_control(input),
        Archetype::Unrecognized(raw) => policy::unrecognized(raw),
    };

    let mut trace = policy.trace;
    let semantic_detected = policy.implicated.iter().any(|name| {
        input
            .block(name)
            .map(BlockEvaluation::has_semantic_matches)
            .unwrap_or(false)
    });
    if semantic_detected {
        trace.push_str(SEMANTIC_MARKER);
    }

    if policy.status == ClauseStatus::Compliant && !exact_safeguard_holds(input) {
        return Decision {
            status: ClauseStatus::Partial,
            trace: EXACT_EVIDENCE_SAFEGUARD.to_string(),
        };
    }

    Decision {
        status: policy.status,
        trace,
    }
}

/// A clause with mandatory blocks needs at least one of them confirmed by literal text.
fn exact_safeguard_holds(input: &ArchetypeInput<'_>) -> bool {
    input.mandatory_names.is_empty()
        || input
            .mandatory_names
            .iter()
            .any(|name| input.exact_score(name) >= input.params.mandatory_threshold)
}
