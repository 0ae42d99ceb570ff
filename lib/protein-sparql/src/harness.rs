use crate::config::HarnessConfig;
use crate::error::{HarnessError, QueryLoadError};
use crate::query::{QueryLoader, QueryResource};
use crate::report::TestResult;
use crate::store::{Session, TripleStore};
use crate::verify::{verify, Coverage};
use time::OffsetDateTime;
use tracing::Instrument;

/// Runs annotated queries against a store and checks their results.
///
/// ```
/// use protein_sparql::config::HarnessConfig;
/// use protein_sparql::harness::Harness;
/// use protein_sparql::store::{MemoryStore, TripleStore};
///
/// # tokio_test::block_on(async {
/// let dir = std::env::temp_dir().join("protein-sparql-doc");
/// std::fs::create_dir_all(&dir)?;
/// std::fs::write(
///     dir.join("Q1.sparql"),
///     "#acs:NX_P12345\n#count:1\nSELECT ?entry WHERE { ?entry a ?type }",
/// )?;
///
/// let store = MemoryStore::from_turtle(
///     "<http://nextprot.org/rdf/entry/NX_P12345> a <http://nextprot.org/rdf#Entry> .",
/// )?;
/// let harness = Harness::new(HarnessConfig::new(&dir));
/// let mut session = store.open().await?;
/// let coverage = harness.check(&mut session, "Q1").await?;
/// session.close().await?;
/// assert_eq!(coverage.rows, 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
    loader: QueryLoader,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        let loader = QueryLoader::new(&config.queries_dir, &config.extension);
        Self { config, loader }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn loader(&self) -> &QueryLoader {
        &self.loader
    }

    /// Loads the query `name`.
    pub fn load(&self, name: &str) -> Result<QueryResource, QueryLoadError> {
        self.loader.load(name)
    }

    /// Loads the query `name`, evaluates it in `session` and checks its results.
    pub async fn check(&self, session: &mut Session, name: &str) -> Result<Coverage, HarnessError> {
        let query = self.load(name)?;
        self.check_resource(session, &query).await
    }

    /// Evaluates an already loaded query in `session` and checks its results.
    pub async fn check_resource(
        &self,
        session: &mut Session,
        query: &QueryResource,
    ) -> Result<Coverage, HarnessError> {
        let variable = query
            .metadata
            .variable()
            .unwrap_or(self.config.variable.as_str());
        let span = tracing::info_span!("check", query = %query.name, session = session.id());
        async {
            let solutions = session.select(&query.text).await?;
            let coverage = verify(&query.metadata, &solutions, variable)?;
            tracing::info!(
                rows = coverage.rows,
                expected_rows = coverage.expected_rows,
                accessions = coverage.accessions,
                "query passed"
            );
            Ok::<_, HarnessError>(coverage)
        }
        .instrument(span)
        .await
    }

    /// Runs every query of `names` one after the other, each in its own session.
    pub async fn run(&self, store: &dyn TripleStore, names: &[String]) -> Vec<TestResult> {
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let outcome = self.check_on(store, name).await;
            if let Err(error) = &outcome {
                tracing::warn!(query = %name, %error, "query failed");
            }
            results.push(TestResult {
                query: name.clone(),
                outcome,
                date: OffsetDateTime::now_utc(),
            });
        }
        results
    }

    /// Runs all the queries of the configured directory.
    pub async fn run_all(&self, store: &dyn TripleStore) -> Result<Vec<TestResult>, QueryLoadError> {
        let names = self.loader.names()?;
        tracing::info!(queries = names.len(), dir = %self.loader.dir().display(), "running queries");
        Ok(self.run(store, &names).await)
    }

    /// Checks the query `name` in a session of its own.
    ///
    /// A failed check is reported even if closing the session fails afterwards.
    pub async fn check_on(
        &self,
        store: &dyn TripleStore,
        name: &str,
    ) -> Result<Coverage, HarnessError> {
        let mut session = store.open().await?;
        let outcome = self.check(&mut session, name).await;
        let closed = session.close().await;
        let coverage = outcome?;
        closed?;
        Ok(coverage)
    }
}
