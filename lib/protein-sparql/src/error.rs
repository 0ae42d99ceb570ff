use std::error::Error;
use std::io;
use std::path::PathBuf;

/// An error raised while loading a query resource from disk.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryLoadError {
    /// No query file exists for the requested name.
    #[error("Query resource '{name}' not found at {}", path.display())]
    ResourceNotFound {
        /// The requested query name.
        name: String,
        /// The path the name was resolved to.
        path: PathBuf,
    },
    /// The query file exists but could not be read.
    #[error("Unable to read query resource {}: {error}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// The metadata header does not provide the expected keys.
    #[error("Malformed metadata in query '{name}': {message}")]
    MalformedMetadata {
        /// The query the header belongs to.
        name: String,
        /// What is wrong with the header.
        message: String,
    },
}

impl QueryLoadError {
    pub(crate) fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// An error raised by a triplestore adapter.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The data files could not be loaded into the store.
    #[error("Unable to load {}: {error}", path.display())]
    Load {
        /// The data file.
        path: PathBuf,
        #[source]
        error: Box<dyn Error + Send + Sync + 'static>,
    },
    /// The storage backing the store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] oxigraph::store::StorageError),
    /// The store failed to parse or evaluate the query.
    #[error("Query evaluation failed: {0}")]
    Evaluation(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The HTTP request to the endpoint failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("The endpoint answered {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as returned by the endpoint.
        body: String,
    },
    /// The endpoint answered with a results document that can't be parsed.
    #[error(transparent)]
    ResultsParse(#[from] sparesults::QueryResultsParseError),
    /// The endpoint answered with a results syntax that is not supported.
    #[error("Unsupported query results media type '{0}'")]
    UnsupportedMediaType(String),
    /// The query did not produce a solution sequence.
    #[error("Expected SELECT solutions but the store returned {0}")]
    UnsupportedResults(&'static str),
    /// The session was used after it has been closed.
    #[error("The session is closed")]
    Closed,
}

/// A failed assertion on the results of a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// Fewer rows came back than the metadata asks for.
    #[error("Expected at least {expected} rows but the query returned {actual}")]
    RowCountShortfall {
        /// The minimum from the `count` metadata key.
        expected: usize,
        /// The number of rows returned by the store.
        actual: usize,
    },
    /// Some expected accessions are not among the extracted literals.
    #[error("Missing accessions: {}", missing.join(", "))]
    MissingAccessions {
        /// The accessions that were not found, in metadata order.
        missing: Vec<String>,
    },
    /// The designated variable is not projected by the query.
    #[error("The query does not project ?{variable} (found: {})", available.join(", "))]
    UnknownVariable {
        /// The designated variable.
        variable: String,
        /// The variables the query does project.
        available: Vec<String>,
    },
}

/// Any error that ends a single verification case.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Load(#[from] QueryLoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

/// An error raised while building the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A setting has a value that can't be used.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// The setting (environment variable or option).
        name: String,
        /// Why it was rejected.
        message: String,
    },
    /// Both an endpoint and data files were given.
    #[error("Either an endpoint or data files must be given, not both")]
    ConflictingSources,
}
