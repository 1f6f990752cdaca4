use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::audit::{AuditService, ReportStore, StoreError, StoredReport};
use crate::engine::ClauseEngine;
use crate::report::ComplianceReport;
use crate::rules::RuleSet;

pub(super) const RULES: &str = r#"{
    "IMS3": {
        "archetype": "POLICY_PROCEDURE",
        "intent": "Infection control policies are documented and reviewed.",
        "evidence_blocks": {
            "policy_doc": {"signals": ["infection control policy", "document control"], "weight": 0.6, "mandatory": true},
            "review_cycle": {"signals": ["annual review"], "weight": 0.4}
        }
    },
    "PSQ1": {
        "archetype": "SAFETY_RISK_CONTROL",
        "intent": "Fire safety hazards are controlled.",
        "evidence_blocks": {
            "fire_drill": {"signals": ["fire drill"], "weight": 0.5, "mandatory": true},
            "extinguisher": {"signals": ["extinguisher inspection"], "weight": 0.5, "mandatory": true}
        }
    }
}"#;

pub(super) const MANUAL: &str = "The Infection Control Policy is held under document control. \
                                 An annual review is minuted. A fire drill was held in March.";

pub(super) fn engine() -> Arc<ClauseEngine> {
    let rules = RuleSet::from_str(RULES).expect("rules parse");
    Arc::new(ClauseEngine::exact_only(Arc::new(rules)))
}

pub(super) fn build_service() -> (AuditService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (AuditService::new(engine(), store.clone()), store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) reports: Arc<Mutex<BTreeMap<String, ComplianceReport>>>,
}

impl ReportStore for MemoryStore {
    fn save(&self, stem: &str, report: &ComplianceReport) -> Result<StoredReport, StoreError> {
        self.reports
            .lock()
            .expect("store mutex poisoned")
            .insert(stem.to_string(), report.clone());
        Ok(StoredReport::for_stem(stem))
    }

    fn fetch(&self, stem: &str) -> Result<Option<ComplianceReport>, StoreError> {
        Ok(self
            .reports
            .lock()
            .expect("store mutex poisoned")
            .get(stem)
            .cloned())
    }
}

pub(super) struct UnavailableStore;

impl ReportStore for UnavailableStore {
    fn save(&self, stem: &str, _report: &ComplianceReport) -> Result<StoredReport, StoreError> {
        Err(StoreError::Io {
            path: format!("/readonly/{stem}_report.json").into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }

    fn fetch(&self, _stem: &str) -> Result<Option<ComplianceReport>, StoreError> {
        Err(StoreError::Io {
            path: "/readonly".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Fresh directory under the system temp dir, removed when dropped.
pub(super) struct ScratchDir(pub(super) std::path::PathBuf);

impl ScratchDir {
    pub(super) fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "clause-audit-{label}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
