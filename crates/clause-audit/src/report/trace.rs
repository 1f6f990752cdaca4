use std::fmt;

use crate::engine::{ClauseResult, DocumentEvaluation};

const RULE: &str = "============================================================";

struct Trace<'a> {
    source: &'a str,
    evaluation: &'a DocumentEvaluation,
}

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "  DEBUG TRACE: {}", self.source)?;
        writeln!(f, "{RULE}")?;

        for (clause_id, result) in self.evaluation.clauses() {
            writeln!(f)?;
            writeln!(f, "{clause_id}:")?;
            write_clause(f, result)?;
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")
    }
}

fn write_clause(f: &mut fmt::Formatter<'_>, result: &ClauseResult) -> fmt::Result {
    let block_scores = result
        .block_scores
        .iter()
        .map(|(name, score)| format!("{name}={score}"))
        .collect::<Vec<_>>()
        .join(", ");
    let failures = if result.mandatory_failures.is_empty() {
        "(none)".to_string()
    } else {
        result.mandatory_failures.join(", ")
    };

    writeln!(f, "  Archetype:          {}", result.archetype)?;
    writeln!(f, "  Block scores:       {block_scores}")?;
    writeln!(f, "  Mandatory failures: {failures}")?;
    writeln!(f, "  Clause score:       {}", result.clause_score)?;
    writeln!(f, "  Status:             {}", result.status)?;
    writeln!(f, "  Reason:             {}", result.decision_trace)?;

    for (block, signals) in result.matched_evidence.iter() {
        if signals.is_empty() {
            writeln!(f, "    {block}: (no matches)")?;
        } else {
            writeln!(f, "    {block}: {}", signals.join(", "))?;
        }
    }
    Ok(())
}

/// Human-readable per-clause breakdown for debugging a document's evaluation.
pub fn render_trace(source: &str, evaluation: &DocumentEvaluation) -> String {
    Trace { source, evaluation }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::evaluation;

    #[test]
    fn trace_lists_each_clause_with_reason_and_evidence() {
        let trace = render_trace("manual.txt", &evaluation("Records follow document control."));

        assert!(trace.contains("  DEBUG TRACE: manual.txt"));
        assert!(trace.contains("\nIMS3:\n  Archetype:          POLICY_PROCEDURE\n"));
        assert!(trace.contains("  Block scores:       policy_doc=0.5, review_cycle=0"));
        assert!(trace.contains("  Mandatory failures: (none)"));
        assert!(trace.contains("    policy_doc: document control"));
        assert!(trace.contains("    review_cycle: (no matches)"));
        assert!(trace.contains("  Mandatory failures: credentials"));

        let ims3 = trace.find("IMS3:").expect("IMS3 rendered");
        let hrm1 = trace.find("HRM1:").expect("HRM1 rendered");
        assert!(ims3 < hrm1);
    }
}
