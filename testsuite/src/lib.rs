//! neXtProt use-case queries checked against a reference dataset.
//!
//! The corpus lives in `queries/` and the dataset it is written against in `data/`.
//! Both can be swapped through the `PROTEIN_SPARQL_*` environment variables, for
//! instance to run the corpus against a live endpoint.

use anyhow::{Context, Result};
use protein_sparql::config::{HarnessConfig, StoreConfig};
use protein_sparql::harness::Harness;
use protein_sparql::store;
use std::path::{Path, PathBuf};

/// The bundled query corpus.
pub fn queries_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("queries")
}

/// The bundled reference dataset.
pub fn sample_data() -> Vec<PathBuf> {
    vec![Path::new(env!("CARGO_MANIFEST_DIR")).join("data/nextprot-sample.ttl")]
}

/// Runs the query `name` in a fresh session and fails if its results are not covered.
pub async fn check_query(name: &str) -> Result<()> {
    let harness = Harness::new(HarnessConfig::from_env(queries_dir())?);
    let store = store::from_config(&StoreConfig::from_env(sample_data)?)?;

    let coverage = harness
        .check_on(store.as_ref(), name)
        .await
        .with_context(|| format!("query {name} failed"))?;
    tracing::debug!(query = name, ?coverage, "query covered");
    Ok(())
}
