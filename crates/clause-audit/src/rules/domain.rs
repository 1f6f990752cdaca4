use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::params::EvaluationParams;
use crate::ordered::OrderedMap;

/// Decision policy family a clause follows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Archetype {
    PolicyProcedure,
    LifecycleManagement,
    MonitoringImprovement,
    HrGovernance,
    SafetyRiskControl,
    /// Archetype name the engine has no policy for; such clauses never pass.
    Unrecognized(String),
}

impl Archetype {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "POLICY_PROCEDURE" => Self::PolicyProcedure,
            "LIFECYCLE_MANAGEMENT" => Self::LifecycleManagement,
            "MONITORING_IMPROVEMENT" => Self::MonitoringImprovement,
            "HR_GOVERNANCE" => Self::HrGovernance,
            "SAFETY_RISK_CONTROL" => Self::SafetyRiskControl,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::PolicyProcedure => "POLICY_PROCEDURE",
            Self::LifecycleManagement => "LIFECYCLE_MANAGEMENT",
            Self::MonitoringImprovement => "MONITORING_IMPROVEMENT",
            Self::HrGovernance => "HR_GOVERNANCE",
            Self::SafetyRiskControl => "SAFETY_RISK_CONTROL",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Archetype {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Archetype {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Named, weighted group of signals whose presence evidences part of a clause.
///
/// Weights are linear multipliers on the block score and are not normalized
/// across a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBlock {
    #[serde(default)]
    pub signals: Vec<String>,
    pub weight: f64,
    #[serde(default)]
    pub mandatory: bool,
}

/// One accreditation requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Populated from the rule-set key; not part of the clause body.
    #[serde(skip)]
    pub id: String,
    pub archetype: Archetype,
    #[serde(default)]
    pub intent: String,
    /// Declaration order is significant (see the monitoring indicator block).
    pub evidence_blocks: OrderedMap<EvidenceBlock>,
    #[serde(default)]
    pub evaluation_params: EvaluationParams,
}

impl Clause {
    pub fn mandatory_blocks(&self) -> impl Iterator<Item = (&str, &EvidenceBlock)> {
        self.evidence_blocks
            .iter()
            .filter(|(_, block)| block.mandatory)
    }

    pub fn total_weight(&self) -> f64 {
        self.evidence_blocks.values().map(|block| block.weight).sum()
    }
}

/// Ordered `clause_id -> Clause` mapping, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "OrderedMap<Clause>", into = "OrderedMap<Clause>")]
pub struct RuleSet {
    clauses: OrderedMap<Clause>,
}

impl RuleSet {
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: clauses
                .into_iter()
                .map(|clause| (clause.id.clone(), clause))
                .collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.values()
    }

    pub fn clause(&self, id: &str) -> Option<&Clause> {
        self.clauses.get(id)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl From<OrderedMap<Clause>> for RuleSet {
    fn from(map: OrderedMap<Clause>) -> Self {
        Self::new(map.into_iter().map(|(id, mut clause)| {
            clause.id = id;
            clause
        }))
    }
}

impl From<RuleSet> for OrderedMap<Clause> {
    fn from(rules: RuleSet) -> Self {
        rules.clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_archetype_is_preserved_verbatim() {
        let archetype: Archetype = serde_json::from_str(r#""AUDIT_TRAIL""#).expect("string");
        assert_eq!(archetype, Archetype::Unrecognized("AUDIT_TRAIL".to_string()));
        assert_eq!(archetype.label(), "AUDIT_TRAIL");
        assert!(!archetype.is_recognized());
    }

    #[test]
    fn archetype_labels_round_trip() {
        for label in [
            "POLICY_PROCEDURE",
            "LIFECYCLE_MANAGEMENT",
            "MONITORING_IMPROVEMENT",
            "HR_GOVERNANCE",
            "SAFETY_RISK_CONTROL",
        ] {
            assert_eq!(Archetype::parse(label).label(), label);
        }
    }

    #[test]
    fn rule_set_assigns_ids_from_keys() {
        let rules: RuleSet = serde_json::from_str(
            r#"{
                "IMS3": {"archetype": "POLICY_PROCEDURE", "evidence_blocks": {}},
                "CQI1": {"archetype": "MONITORING_IMPROVEMENT", "evidence_blocks": {}}
            }"#,
        )
        .expect("valid rules");

        let ids: Vec<_> = rules.clauses().map(|clause| clause.id.as_str()).collect();
        assert_eq!(ids, vec!["IMS3", "CQI1"]);
        assert_eq!(rules.clause("CQI1").map(|c| c.id.as_str()), Some("CQI1"));
    }
}
