//! Explicit configuration of the harness and of the store it runs against.
//!
//! Values are plain structs built by the caller. `from_env` constructors read the
//! following variables and fall back to the defaults for anything unset:
//!
//! - `PROTEIN_SPARQL_QUERIES`: directory holding the `.sparql` files
//! - `PROTEIN_SPARQL_VARIABLE`: variable whose values are checked (default `entry`)
//! - `PROTEIN_SPARQL_ENDPOINT`: SPARQL endpoint URL
//! - `PROTEIN_SPARQL_TIMEOUT`: endpoint request timeout in seconds

use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const QUERIES_ENV: &str = "PROTEIN_SPARQL_QUERIES";
pub const VARIABLE_ENV: &str = "PROTEIN_SPARQL_VARIABLE";
pub const ENDPOINT_ENV: &str = "PROTEIN_SPARQL_ENDPOINT";
pub const TIMEOUT_ENV: &str = "PROTEIN_SPARQL_TIMEOUT";

/// Holds the configuration of a [`Harness`](crate::harness::Harness).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Directory the query resources are read from.
    pub queries_dir: PathBuf,
    /// File extension of the query resources, without the dot.
    pub extension: String,
    /// Variable whose values are compared with the expected accessions.
    pub variable: String,
}

impl HarnessConfig {
    pub const DEFAULT_EXTENSION: &'static str = "sparql";
    pub const DEFAULT_VARIABLE: &'static str = "entry";

    pub fn new(queries_dir: impl Into<PathBuf>) -> Self {
        Self {
            queries_dir: queries_dir.into(),
            extension: Self::DEFAULT_EXTENSION.to_owned(),
            variable: Self::DEFAULT_VARIABLE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builds the configuration from the environment, using `default_queries_dir` when
    /// `PROTEIN_SPARQL_QUERIES` is not set.
    pub fn from_env(default_queries_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let queries_dir = env::var_os(QUERIES_ENV)
            .map_or_else(|| default_queries_dir.into(), PathBuf::from);
        let mut config = Self::new(queries_dir);
        if let Some(variable) = non_empty_var(VARIABLE_ENV) {
            config.variable = parse_variable(VARIABLE_ENV, &variable)?;
        }
        Ok(config)
    }
}

/// Where the queries are executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// A remote SPARQL 1.1 Protocol endpoint.
    Endpoint {
        url: String,
        timeout: Option<Duration>,
    },
    /// An in-memory store loaded from RDF files.
    Files(Vec<PathBuf>),
}

impl StoreConfig {
    /// Picks the store from explicit settings. Exactly one source is accepted; with none,
    /// `default_data` is loaded into memory.
    pub fn resolve(
        endpoint: Option<String>,
        data: Vec<PathBuf>,
        timeout: Option<Duration>,
        default_data: impl FnOnce() -> Vec<PathBuf>,
    ) -> Result<Self, ConfigError> {
        match (endpoint, data.is_empty()) {
            (Some(_), false) => Err(ConfigError::ConflictingSources),
            (Some(url), true) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        name: "endpoint".to_owned(),
                        message: format!("'{url}' is not an http(s) URL"),
                    });
                }
                Ok(Self::Endpoint { url, timeout })
            }
            (None, false) => Ok(Self::Files(data)),
            (None, true) => Ok(Self::Files(default_data())),
        }
    }

    /// Reads `PROTEIN_SPARQL_ENDPOINT` and `PROTEIN_SPARQL_TIMEOUT`, falling back to
    /// `default_data` when no endpoint is set.
    pub fn from_env(default_data: impl FnOnce() -> Vec<PathBuf>) -> Result<Self, ConfigError> {
        let timeout = non_empty_var(TIMEOUT_ENV)
            .map(|value| parse_timeout(TIMEOUT_ENV, &value))
            .transpose()?;
        Self::resolve(non_empty_var(ENDPOINT_ENV), Vec::new(), timeout, default_data)
    }
}

/// Parses a timeout given in whole seconds.
pub fn parse_timeout(name: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_owned(),
            message: format!("'{value}' is not a positive number of seconds"),
        }),
    }
}

/// Parses a SPARQL variable name, with or without its `?`/`$` sigil.
pub fn parse_variable(name: &str, value: &str) -> Result<String, ConfigError> {
    let variable = value.trim().trim_start_matches(['?', '$']);
    if variable.is_empty()
        || !variable
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
    {
        return Err(ConfigError::InvalidValue {
            name: name.to_owned(),
            message: format!("'{value}' is not a SPARQL variable name"),
        });
    }
    Ok(variable.to_owned())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_and_files_conflict() {
        let result = StoreConfig::resolve(
            Some("http://localhost:7878/query".to_owned()),
            vec![PathBuf::from("data.ttl")],
            None,
            Vec::new,
        );
        assert_eq!(result, Err(ConfigError::ConflictingSources));
    }

    #[test]
    fn falls_back_to_default_data() {
        let result =
            StoreConfig::resolve(None, Vec::new(), None, || vec![PathBuf::from("sample.ttl")]);
        assert_eq!(
            result,
            Ok(StoreConfig::Files(vec![PathBuf::from("sample.ttl")]))
        );
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = StoreConfig::resolve(Some("ftp://x".to_owned()), Vec::new(), None, Vec::new);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { .. })),
            "ftp endpoint accepted"
        );
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout("t", " 30 "), Ok(Duration::from_secs(30)));
        assert!(parse_timeout("t", "0").is_err(), "zero accepted");
        assert!(parse_timeout("t", "soon").is_err(), "text accepted");
    }

    #[test]
    fn variable_accepts_sigil() {
        assert_eq!(parse_variable("v", "?ac"), Ok("ac".to_owned()));
        assert!(parse_variable("v", "a c").is_err(), "space accepted");
    }
}
