//! Accreditation rule sets: clauses, evidence blocks and evaluation parameters.

mod domain;
mod lint;
mod loader;
mod params;

pub use domain::{Archetype, Clause, EvidenceBlock, RuleSet};
pub use lint::{LintFinding, LintKind};
pub use loader::RuleSetError;
pub use params::{
    EvaluationParams, DEFAULT_CHAIN_REQUIRED, DEFAULT_MANDATORY_THRESHOLD,
    DEFAULT_OVERALL_COMPLIANCE_THRESHOLD,
};
