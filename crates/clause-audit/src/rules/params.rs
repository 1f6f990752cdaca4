use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MANDATORY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_OVERALL_COMPLIANCE_THRESHOLD: f64 = 0.7;
pub const DEFAULT_CHAIN_REQUIRED: bool = false;

/// Per-clause thresholds. Malformed or missing values fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct EvaluationParams {
    pub mandatory_threshold: f64,
    pub overall_compliance_threshold: f64,
    pub chain_required: bool,
}

impl EvaluationParams {
    pub fn new(
        mandatory_threshold: f64,
        overall_compliance_threshold: f64,
        chain_required: bool,
    ) -> Self {
        Self {
            mandatory_threshold: sanitize_threshold(
                Some(mandatory_threshold),
                DEFAULT_MANDATORY_THRESHOLD,
            ),
            overall_compliance_threshold: sanitize_threshold(
                Some(overall_compliance_threshold),
                DEFAULT_OVERALL_COMPLIANCE_THRESHOLD,
            ),
            chain_required,
        }
    }
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            mandatory_threshold: DEFAULT_MANDATORY_THRESHOLD,
            overall_compliance_threshold: DEFAULT_OVERALL_COMPLIANCE_THRESHOLD,
            chain_required: DEFAULT_CHAIN_REQUIRED,
        }
    }
}

fn sanitize_threshold(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(threshold) if threshold.is_finite() && threshold >= 0.0 => threshold,
        _ => default,
    }
}

/// Rule files may carry any JSON here; non-objects and mistyped fields
/// resolve to defaults.
impl From<Value> for EvaluationParams {
    fn from(raw: Value) -> Self {
        let Value::Object(fields) = raw else {
            return Self::default();
        };
        let number = |key: &str| fields.get(key).and_then(Value::as_f64);

        Self {
            mandatory_threshold: sanitize_threshold(
                number("mandatory_threshold"),
                DEFAULT_MANDATORY_THRESHOLD,
            ),
            overall_compliance_threshold: sanitize_threshold(
                number("overall_compliance_threshold"),
                DEFAULT_OVERALL_COMPLIANCE_THRESHOLD,
            ),
            chain_required: fields
                .get("chain_required")
                .and_then(Value::as_bool)
                .unwrap_or(DEFAULT_CHAIN_REQUIRED),
        }
    }
}
