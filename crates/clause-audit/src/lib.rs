//! Accreditation clause compliance evaluation.
//!
//! A [`rules::RuleSet`] describes clauses as weighted evidence blocks. The
//! [`engine::ClauseEngine`] scores a [`document::DocumentView`] against every
//! clause, combining literal signal matches with an optional entailment-backed
//! semantic layer, and resolves each clause through its archetype policy.

pub mod audit;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod ordered;
pub mod report;
pub mod rules;
pub mod telemetry;

pub use document::DocumentView;
pub use engine::{ClauseEngine, ClauseResult, ClauseStatus, DocumentEvaluation};
pub use rules::RuleSet;
