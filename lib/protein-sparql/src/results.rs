use oxrdf::{Term, Variable};
use std::sync::Arc;

/// The solutions of a SELECT query, fully read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionSet {
    variables: Arc<[Variable]>,
    rows: Vec<ResultRow>,
}

impl SolutionSet {
    pub fn new(variables: impl Into<Arc<[Variable]>>) -> Self {
        Self {
            variables: variables.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Values are aligned with [`Self::variables`]; missing trailing values
    /// are unbound.
    pub fn push(&mut self, mut values: Vec<Option<Term>>) {
        values.resize(self.variables.len(), None);
        self.rows.push(ResultRow { values });
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `variable` in the projection.
    pub fn column(&self, variable: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.as_str() == variable)
    }
}

/// One solution: the bound value of each projected variable, in projection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    values: Vec<Option<Term>>,
}

impl ResultRow {
    pub fn get(&self, column: usize) -> Option<&Term> {
        self.values.get(column).and_then(Option::as_ref)
    }

    pub fn values(&self) -> &[Option<Term>] {
        &self.values
    }
}
