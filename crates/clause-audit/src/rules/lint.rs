use serde::Serialize;

use super::domain::RuleSet;

const WEIGHT_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintKind {
    UnrecognizedArchetype,
    EmptySignals,
    WeightSum,
    NoMandatoryBlocks,
}

/// Advisory observation about a rule set; never blocks evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintFinding {
    pub clause_id: String,
    pub kind: LintKind,
    pub message: String,
}

impl RuleSet {
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();

        for clause in self.clauses() {
            let mut push = |kind, message: String| {
                findings.push(LintFinding {
                    clause_id: clause.id.clone(),
                    kind,
                    message,
                })
            };

            if !clause.archetype.is_recognized() {
                push(
                    LintKind::UnrecognizedArchetype,
                    format!(
                        "archetype '{}' is not recognized; clause will resolve NON_COMPLIANT",
                        clause.archetype
                    ),
                );
            }

            for (name, block) in clause.evidence_blocks.iter() {
                if block.signals.iter().all(|signal| signal.trim().is_empty()) {
                    push(
                        LintKind::EmptySignals,
                        format!("evidence block '{name}' has no signals and always scores 0"),
                    );
                }
            }

            let total = clause.total_weight();
            if !clause.evidence_blocks.is_empty() && (total - 1.0).abs() > WEIGHT_TOLERANCE {
                push(
                    LintKind::WeightSum,
                    format!("block weights sum to {total:.4}, not 1.0"),
                );
            }

            if clause.mandatory_blocks().next().is_none() {
                push(
                    LintKind::NoMandatoryBlocks,
                    "clause declares no mandatory evidence blocks".to_string(),
                );
            }
        }

        findings
    }
}
