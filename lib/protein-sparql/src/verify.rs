//! Literal extraction and coverage assertions.

use crate::error::VerificationError;
use crate::query::QueryMetadata;
use crate::results::SolutionSet;
use oxrdf::Term;
use std::collections::HashSet;

/// Extracts the string value of `variable` from every row, in row order.
///
/// Literals yield their trimmed lexical value and IRIs their local name, so
/// `<http://nextprot.org/rdf/entry/NX_P12345>` yields `NX_P12345`. Blank nodes and unbound
/// values are skipped.
pub fn extract_literals(
    solutions: &SolutionSet,
    variable: &str,
) -> Result<Vec<String>, VerificationError> {
    let column = solutions
        .column(variable)
        .ok_or_else(|| VerificationError::UnknownVariable {
            variable: variable.to_owned(),
            available: solutions
                .variables()
                .iter()
                .map(|v| v.as_str().to_owned())
                .collect(),
        })?;
    Ok(solutions
        .rows()
        .iter()
        .filter_map(|row| row.get(column).and_then(term_value))
        .collect())
}

fn term_value(term: &Term) -> Option<String> {
    match term {
        Term::Literal(literal) => Some(literal.value().trim().to_owned()),
        Term::NamedNode(node) => Some(local_name(node.as_str()).to_owned()),
        _ => None,
    }
}

fn local_name(iri: &str) -> &str {
    iri.rfind(['#', '/', ':'])
        .map_or(iri, |position| &iri[position + 1..])
}

/// What a passing query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Number of rows returned by the store.
    pub rows: usize,
    /// Minimum number of rows required by the metadata.
    pub expected_rows: usize,
    /// Number of expected accessions, all of them found.
    pub accessions: usize,
    /// Number of distinct values extracted from the rows.
    pub distinct_values: usize,
}

/// Checks the row count, then the presence of every expected accession.
///
/// A missing accession is reported by name, all missing accessions at once.
pub fn verify(
    metadata: &QueryMetadata,
    solutions: &SolutionSet,
    variable: &str,
) -> Result<Coverage, VerificationError> {
    let literals = extract_literals(solutions, variable)?;
    verify_literals(metadata, solutions.len(), &literals)
}

/// Same as [`verify`] for an already extracted sequence of values.
pub fn verify_literals(
    metadata: &QueryMetadata,
    rows: usize,
    literals: &[String],
) -> Result<Coverage, VerificationError> {
    if rows < metadata.count() {
        return Err(VerificationError::RowCountShortfall {
            expected: metadata.count(),
            actual: rows,
        });
    }

    let found: HashSet<&str> = literals.iter().map(String::as_str).collect();
    let missing: Vec<String> = metadata
        .accessions()
        .iter()
        .filter(|ac| !found.contains(ac.trim()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(VerificationError::MissingAccessions { missing });
    }

    Ok(Coverage {
        rows,
        expected_rows: metadata.count(),
        accessions: metadata.accessions().len(),
        distinct_values: found.len(),
    })
}
