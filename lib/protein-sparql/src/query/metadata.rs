use crate::error::QueryLoadError;

pub const ACCESSIONS_KEY: &str = "acs";
pub const COUNT_KEY: &str = "count";
pub const VARIABLE_KEY: &str = "var";

/// Key/value header of a query resource.
///
/// The header is the run of `#` comment lines at the top of the file. Lines shaped like
/// `#key:value` or `#key=value` become entries, other comment lines are free text.
/// `acs` (comma separated accessions) and `count` (minimum number of rows) are required.
///
/// ```
/// use protein_sparql::query::QueryMetadata;
///
/// let metadata = QueryMetadata::parse(
///     "Q1",
///     "#acs: P12345, P67890\n#count=2\nSELECT ?entry WHERE { ?entry ?p ?o }",
/// )?;
/// assert_eq!(metadata.accessions(), ["P12345", "P67890"]);
/// assert_eq!(metadata.count(), 2);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMetadata {
    entries: Vec<(String, String)>,
    accessions: Vec<String>,
    count: usize,
}

impl QueryMetadata {
    /// Parses the header of the query text `query` named `name`.
    pub fn parse(name: &str, query: &str) -> Result<Self, QueryLoadError> {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in header_lines(query) {
            let Some((key, value)) = split_entry(line) else {
                continue;
            };
            if entries.iter().any(|(k, _)| k == key) {
                return Err(QueryLoadError::malformed(
                    name,
                    format!("the key '{key}' is given more than once"),
                ));
            }
            entries.push((key.to_owned(), value.trim().to_owned()));
        }

        let lookup = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| {
                    QueryLoadError::malformed(name, format!("the key '{key}' is missing"))
                })
        };
        let accessions = parse_accessions(name, lookup(ACCESSIONS_KEY)?)?;
        let count = lookup(COUNT_KEY)?;
        let count = count.parse::<usize>().map_err(|_| {
            QueryLoadError::malformed(
                name,
                format!("'{count}' is not a valid minimum row count"),
            )
        })?;

        Ok(Self {
            entries,
            accessions,
            count,
        })
    }

    /// The accessions that must appear in the results, trimmed, in header order.
    pub fn accessions(&self) -> &[String] {
        &self.accessions
    }

    /// The minimum number of rows the query must return.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Variable to check instead of the configured one, if the header sets `var`.
    pub fn variable(&self) -> Option<&str> {
        self.get(VARIABLE_KEY)
            .map(|v| v.trim_start_matches(['?', '$']))
            .filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn tags(&self) -> Vec<&str> {
        self.get("tags")
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Raw value of a header key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Comment lines before the first line of actual query text.
fn header_lines(query: &str) -> impl Iterator<Item = &str> {
    query
        .lines()
        .map(str::trim)
        .take_while(|line| line.is_empty() || line.starts_with('#'))
        .filter_map(|line| line.strip_prefix('#'))
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let separator = line.find([':', '='])?;
    let (key, value) = (&line[..separator], &line[separator + 1..]);
    let mut chars = key.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    (valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .then_some((key, value))
}

fn parse_accessions(name: &str, value: &str) -> Result<Vec<String>, QueryLoadError> {
    value
        .split(',')
        .map(|ac| {
            let ac = ac.trim();
            if ac.is_empty() {
                Err(QueryLoadError::malformed(
                    name,
                    format!("empty accession in '{value}'"),
                ))
            } else {
                Ok(ac.to_owned())
            }
        })
        .collect()
}
