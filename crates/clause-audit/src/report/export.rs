use std::io::Write;

use serde::Serialize;

use super::{ComplianceReport, ReportError};

#[derive(Serialize)]
struct SummaryRow<'a> {
    clause_id: &'a str,
    archetype: &'a str,
    status: &'static str,
    clause_score: f64,
    mandatory_failures: String,
    semantic_only_blocks: String,
    decision_trace: &'a str,
}

/// One CSV row per clause, header first. List columns are `;`-joined.
pub fn write_csv<W: Write>(report: &ComplianceReport, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (clause_id, result) in report.clauses.iter() {
        csv_writer.serialize(SummaryRow {
            clause_id,
            archetype: &result.archetype,
            status: result.status.label(),
            clause_score: result.clause_score,
            mandatory_failures: result.mandatory_failures.join(";"),
            semantic_only_blocks: result.semantic_only_blocks.join(";"),
            decision_trace: &result.decision_trace,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DocumentEvaluation;
    use crate::report::tests::evaluation;

    #[test]
    fn writes_header_and_one_row_per_clause() {
        let report =
            ComplianceReport::new("manual.txt", &evaluation("Records follow document control."));
        let mut buffer = Vec::new();
        write_csv(&report, &mut buffer).expect("csv written");

        let output = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "clause_id,archetype,status,clause_score,mandatory_failures,semantic_only_blocks,decision_trace"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("IMS3,POLICY_PROCEDURE,PARTIAL,0.3,,,"));
        assert!(lines[2].starts_with("HRM1,HR_GOVERNANCE,NON_COMPLIANT,0.0,credentials,,"));
    }

    #[test]
    fn empty_report_writes_nothing() {
        let report = ComplianceReport::new("blank.txt", &DocumentEvaluation::default());
        let mut buffer = Vec::new();
        write_csv(&report, &mut buffer).expect("csv written");
        assert!(buffer.is_empty());
    }
}
