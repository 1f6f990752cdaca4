use super::{ArchetypeInput, PolicyDecision};
use crate::engine::result::ClauseStatus;

fn list(names: &[&str]) -> String {
    names.join(", ")
}

/// Shared mandatory handling for policy-style archetypes.
///
/// An empty mandatory set is vacuously "all failing": nothing in the clause
/// can establish the requirement.
fn mandatory_gate(input: &ArchetypeInput<'_>) -> Option<PolicyDecision> {
    let failures = &input.mandatory_failures;

    if input.mandatory_names.is_empty() {
        return Some(PolicyDecision::new(
            ClauseStatus::NonCompliant,
            "No mandatory evidence blocks defined; requirement cannot be established",
        ));
    }

    if failures.len() == input.mandatory_names.len() {
        return Some(
            PolicyDecision::new(
                ClauseStatus::NonCompliant,
                format!("All mandatory blocks lack exact evidence: {}", list(failures)),
            )
            .implicating(failures.iter().copied()),
        );
    }

    if !failures.is_empty() {
        return Some(
            PolicyDecision::new(
                ClauseStatus::Partial,
                format!("Mandatory blocks lack exact evidence: {}", list(failures)),
            )
            .implicating(failures.iter().copied()),
        );
    }

    None
}

fn overall_score_check(input: &ArchetypeInput<'_>, prefix: &str) -> PolicyDecision {
    let threshold = input.params.overall_compliance_threshold;
    if input.clause_score >= threshold {
        PolicyDecision::new(
            ClauseStatus::Compliant,
            format!(
                "{prefix}; clause score {} meets threshold {threshold}",
                input.clause_score
            ),
        )
    } else {
        PolicyDecision::new(
            ClauseStatus::Partial,
            format!(
                "{prefix} but clause score {} is below threshold {threshold}",
                input.clause_score
            ),
        )
    }
}

pub(super) fn policy_procedure(input: &ArchetypeInput<'_>) -> PolicyDecision {
    if let Some(decision) = mandatory_gate(input) {
        return decision;
    }
    overall_score_check(input, "All mandatory blocks have exact evidence")
}

pub(super) fn lifecycle_management(input: &ArchetypeInput<'_>) -> PolicyDecision {
    let failures = &input.mandatory_failures;
    match failures.len() {
        0 => PolicyDecision::new(
            ClauseStatus::Compliant,
            "Every lifecycle stage has exact evidence",
        ),
        1 => PolicyDecision::new(
            ClauseStatus::Partial,
            format!("One lifecycle stage lacks exact evidence: {}", list(failures)),
        )
        .implicating(failures.iter().copied()),
        count => PolicyDecision::new(
            ClauseStatus::NonCompliant,
            format!(
                "{count} lifecycle stages lack exact evidence: {}",
                list(failures)
            ),
        )
        .implicating(failures.iter().copied()),
    }
}

/// The first mandatory block in declaration order is the indicator.
pub(super) fn monitoring_improvement(input: &ArchetypeInput<'_>) -> PolicyDecision {
    let Some(&indicator) = input.mandatory_names.first() else {
        return PolicyDecision::new(
            ClauseStatus::Compliant,
            "No mandatory monitoring blocks defined",
        );
    };

    if input.exact_score(indicator) == 0.0 {
        return PolicyDecision::new(
            ClauseStatus::NonCompliant,
            format!("Indicator block '{indicator}' has no exact evidence"),
        )
        .implicating([indicator]);
    }

    let failures = &input.mandatory_failures;
    if !failures.is_empty() {
        return PolicyDecision::new(
            ClauseStatus::Partial,
            format!(
                "Indicator '{indicator}' present but mandatory blocks lack exact evidence: {}",
                list(failures)
            ),
        )
        .implicating(failures.iter().copied());
    }

    let weak = &input.mandatory_weak;
    if input.params.chain_required && !weak.is_empty() {
        return PolicyDecision::new(
            ClauseStatus::Partial,
            format!(
                "Improvement chain incomplete; weak mandatory evidence: {}",
                list(weak)
            ),
        )
        .implicating(weak.iter().copied());
    }

    PolicyDecision::new(
        ClauseStatus::Compliant,
        format!("Indicator '{indicator}' and all mandatory blocks have exact evidence"),
    )
}

pub(super) fn hr_governance(input: &ArchetypeInput<'_>) -> PolicyDecision {
    if let Some(decision) = mandatory_gate(input) {
        return decision;
    }

    let missing_optional: Vec<&str> = input
        .optional_names
        .iter()
        .copied()
        .filter(|name| input.exact_score(name) == 0.0)
        .collect();
    if !missing_optional.is_empty() {
        return PolicyDecision::new(
            ClauseStatus::Partial,
            format!(
                "Mandatory blocks satisfied but optional blocks lack exact evidence: {}",
                list(&missing_optional)
            ),
        )
        .implicating(missing_optional);
    }

    overall_score_check(input, "All evidence blocks have exact evidence")
}

/// Judges mandatory blocks on their combined exact-plus-semantic score.
pub(super) fn safety_risk_control(input: &ArchetypeInput<'_>) -> PolicyDecision {
    let threshold = input.params.mandatory_threshold;

    if input.mandatory_names.is_empty() {
        return PolicyDecision::new(
            ClauseStatus::NonCompliant,
            "No mandatory evidence blocks defined; requirement cannot be established",
        );
    }

    let failing: Vec<&str> = input
        .mandatory_names
        .iter()
        .copied()
        .filter(|name| input.final_score(name) < threshold)
        .collect();

    if failing.len() == input.mandatory_names.len() {
        return PolicyDecision::new(
            ClauseStatus::NonCompliant,
            format!(
                "All mandatory safety controls score below {threshold}: {}",
                list(&failing)
            ),
        )
        .implicating(failing);
    }

    if !failing.is_empty() {
        return PolicyDecision::new(
            ClauseStatus::Partial,
            format!(
                "Mandatory safety controls score below {threshold}: {}",
                list(&failing)
            ),
        )
        .implicating(failing);
    }

    overall_score_check(input, "All mandatory safety controls meet threshold")
}

pub(super) fn unrecognized(raw: &str) -> PolicyDecision {
    PolicyDecision::new(
        ClauseStatus::NonCompliant,
        format!("Unrecognized archetype '{raw}'; no decision policy applies"),
    )
}
