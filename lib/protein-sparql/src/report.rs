use crate::error::HarnessError;
use crate::verify::Coverage;
use itertools::Itertools;
use std::fmt::Write;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// The outcome of one query.
#[derive(Debug)]
pub struct TestResult {
    pub query: String,
    pub outcome: Result<Coverage, HarnessError>,
    pub date: OffsetDateTime,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Renders a plain text report: one line per query, then the totals.
pub fn build_report(results: &[TestResult]) -> String {
    let width = results
        .iter()
        .map(|result| result.query.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for result in results {
        let line = match &result.outcome {
            Ok(coverage) => format!(
                "PASS {:width$}  rows={} (>= {}) accessions={} distinct={}",
                result.query,
                coverage.rows,
                coverage.expected_rows,
                coverage.accessions,
                coverage.distinct_values,
            ),
            Err(error) => format!("FAIL {:width$}  {error}", result.query),
        };
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let failed = results.iter().filter(|result| !result.passed()).collect_vec();
    let date = results
        .iter()
        .map(|result| result.date)
        .max()
        .and_then(|date| date.format(&Rfc3339).ok())
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} queries, {} passed, {} failed{}",
        results.len(),
        results.len() - failed.len(),
        failed.len(),
        if date.is_empty() {
            String::new()
        } else {
            format!(" ({date})")
        }
    );
    if !failed.is_empty() {
        let _ = writeln!(
            out,
            "failing: {}",
            failed.iter().map(|result| &result.query).join(", ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerificationError;

    fn result(query: &str, outcome: Result<Coverage, HarnessError>) -> TestResult {
        TestResult {
            query: query.to_owned(),
            outcome,
            date: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn summarizes_outcomes() {
        let report = build_report(&[
            result(
                "Q1",
                Ok(Coverage {
                    rows: 3,
                    expected_rows: 2,
                    accessions: 2,
                    distinct_values: 3,
                }),
            ),
            result(
                "Q22",
                Err(VerificationError::MissingAccessions {
                    missing: vec!["NX_P99999".to_owned()],
                }
                .into()),
            ),
        ]);
        let lines = report.lines().collect_vec();
        assert_eq!(lines[0], "PASS Q1   rows=3 (>= 2) accessions=2 distinct=3");
        assert_eq!(lines[1], "FAIL Q22  Missing accessions: NX_P99999");
        assert_eq!(
            lines[2],
            "2 queries, 1 passed, 1 failed (1970-01-01T00:00:00Z)"
        );
        assert_eq!(lines[3], "failing: Q22");
    }

    #[test]
    fn empty_run() {
        assert_eq!(build_report(&[]), "0 queries, 0 passed, 0 failed\n");
    }
}
