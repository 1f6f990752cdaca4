use clause_audit::config::{EngineConfig, SemanticBackend};
use clause_audit::engine::semantic::LexicalEntailment;
use clause_audit::engine::{ClauseEngine, SemanticEnhancer};
use clause_audit::error::AppError;
use clause_audit::RuleSet;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) report_dir: Arc<PathBuf>,
}

pub(crate) fn semantic_enhancer(config: &EngineConfig) -> SemanticEnhancer {
    match config.semantic_backend {
        SemanticBackend::Lexical => SemanticEnhancer::new(Arc::new(LexicalEntailment))
            .with_threshold(config.entailment_threshold),
        SemanticBackend::Disabled => SemanticEnhancer::disabled(),
    }
}

/// Load the rule set (honouring a CLI override) and wire the configured backend.
pub(crate) fn build_engine(
    config: &EngineConfig,
    rules_override: Option<&Path>,
) -> Result<ClauseEngine, AppError> {
    let rules_path = rules_override.unwrap_or(config.rules_path.as_path());
    let rules = RuleSet::from_path(rules_path)?;
    let semantic = semantic_enhancer(config);

    info!(
        rules = %rules_path.display(),
        clauses = rules.len(),
        semantic = semantic.is_enabled(),
        threshold = semantic.threshold(),
        "clause engine ready"
    );

    Ok(ClauseEngine::new(Arc::new(rules), semantic))
}
