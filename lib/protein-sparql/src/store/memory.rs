use crate::error::StoreError;
use crate::results::SolutionSet;
use crate::store::{Connection, TripleStore};
use async_trait::async_trait;
use oxigraph::io::RdfFormat;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// An embedded in-memory store.
///
/// ```
/// use protein_sparql::store::{MemoryStore, TripleStore};
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::from_turtle(
///     "<http://nextprot.org/rdf/entry/NX_P12345> a <http://nextprot.org/rdf#Entry> .",
/// )?;
/// let mut session = store.open().await?;
/// let solutions = session.select("SELECT ?entry WHERE { ?entry a ?type }").await?;
/// assert_eq!(solutions.len(), 1);
/// session.close().await?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// # }).unwrap();
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    store: Store,
    sources: Vec<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Result<Self, StoreError> {
        let store = Store::new()?;
        Ok(Self {
            store,
            sources: Vec::new(),
        })
    }

    /// Builds a store holding the triples of a Turtle document.
    pub fn from_turtle(data: &str) -> Result<Self, StoreError> {
        let store = Self::new()?;
        store
            .store
            .load_from_reader(RdfFormat::Turtle, data.as_bytes())
            .map_err(|error| StoreError::Load {
                path: PathBuf::from("<inline>"),
                error: Box::new(error),
            })?;
        Ok(store)
    }

    /// Builds a store holding the content of the given RDF files.
    pub fn from_files(paths: &[impl AsRef<Path>]) -> Result<Self, StoreError> {
        let mut store = Self::new()?;
        for path in paths {
            store.load_file(path.as_ref())?;
        }
        Ok(store)
    }

    /// Adds the content of an RDF file, the syntax being guessed from the extension.
    pub fn load_file(&mut self, path: &Path) -> Result<(), StoreError> {
        let format = path
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(RdfFormat::from_extension)
            .ok_or_else(|| StoreError::Load {
                path: path.to_owned(),
                error: format!("unable to guess the RDF syntax of {}", path.display()).into(),
            })?;
        let file = File::open(path).map_err(|error| StoreError::Load {
            path: path.to_owned(),
            error: Box::new(error),
        })?;
        self.store
            .load_from_reader(format, BufReader::new(file))
            .map_err(|error| StoreError::Load {
                path: path.to_owned(),
                error: Box::new(error),
            })?;
        tracing::info!(path = %path.display(), %format, "loaded data file");
        self.sources.push(path.to_owned());
        Ok(())
    }

    /// Number of triples in the store.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl TripleStore for MemoryStore {
    fn description(&self) -> String {
        if self.sources.is_empty() {
            "in-memory store".to_owned()
        } else {
            let files = self
                .sources
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>();
            format!("in-memory store ({})", files.join(", "))
        }
    }

    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        Ok(Box::new(MemoryConnection {
            store: self.store.clone(),
        }))
    }
}

struct MemoryConnection {
    store: Store,
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn select(&mut self, query: &str) -> Result<SolutionSet, StoreError> {
        let results = self
            .store
            .query(query)
            .map_err(|error| StoreError::Evaluation(Box::new(error)))?;
        let solutions = match results {
            QueryResults::Solutions(solutions) => solutions,
            QueryResults::Boolean(_) => return Err(StoreError::UnsupportedResults("a boolean")),
            QueryResults::Graph(_) => return Err(StoreError::UnsupportedResults("a graph")),
        };
        let mut set = SolutionSet::new(solutions.variables().to_vec());
        for solution in solutions {
            let solution = solution.map_err(|error| StoreError::Evaluation(Box::new(error)))?;
            set.push(solution.values().to_vec());
        }
        Ok(set)
    }
}
