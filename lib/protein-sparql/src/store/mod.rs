//! Access to the triplestore under test.
//!
//! The harness only needs two things from a store: opening a [`Session`] and running a
//! SELECT query in it. [`MemoryStore`] answers from an embedded in-memory dataset,
//! [`HttpStore`] forwards queries to a SPARQL 1.1 Protocol endpoint.

mod http;
mod memory;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::results::SolutionSet;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

pub use http::HttpStore;
pub use memory::MemoryStore;

/// A store that sessions can be opened on.
#[async_trait]
pub trait TripleStore: Send + Sync {
    /// Human readable description used in logs and reports.
    fn description(&self) -> String;

    /// Opens a connection to the store.
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError>;

    /// Opens a session owned by the caller.
    async fn open(&self) -> Result<Session, StoreError> {
        let connection = self.connect().await?;
        Ok(Session::new(connection))
    }
}

/// A connection opened by [`TripleStore::connect`].
#[async_trait]
pub trait Connection: Send {
    /// Evaluates a SELECT query and reads all its solutions.
    async fn select(&mut self, query: &str) -> Result<SolutionSet, StoreError>;

    /// Releases the connection.
    async fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

static SESSION_IDS: AtomicU64 = AtomicU64::new(1);

/// An exclusively owned session on a [`TripleStore`].
///
/// Sessions are closed with [`Session::close`]. A session dropped without being closed is
/// released without reporting errors.
pub struct Session {
    id: u64,
    connection: Option<Box<dyn Connection>>,
}

impl Session {
    pub fn new(connection: Box<dyn Connection>) -> Self {
        let id = SESSION_IDS.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(session = id, "session opened");
        Self {
            id,
            connection: Some(connection),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Runs a SELECT query in this session.
    pub async fn select(&mut self, query: &str) -> Result<SolutionSet, StoreError> {
        let connection = self.connection.as_mut().ok_or(StoreError::Closed)?;
        let solutions = connection.select(query).await?;
        tracing::debug!(session = self.id, rows = solutions.len(), "query evaluated");
        Ok(solutions)
    }

    /// Closes the session. Closing twice is a no-op.
    pub async fn close(&mut self) -> Result<(), StoreError> {
        if let Some(mut connection) = self.connection.take() {
            connection.close().await?;
            tracing::debug!(session = self.id, "session closed");
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.connection.is_some() {
            tracing::debug!(session = self.id, "session dropped without being closed");
        }
    }
}

/// Builds the store described by `config`.
pub fn from_config(config: &StoreConfig) -> Result<Box<dyn TripleStore>, StoreError> {
    let store: Box<dyn TripleStore> = match config {
        StoreConfig::Endpoint { url, timeout } => Box::new(HttpStore::new(url, *timeout)?),
        StoreConfig::Files(files) => Box::new(MemoryStore::from_files(files.as_slice())?),
    };
    tracing::info!(store = store.description(), "using triplestore");
    Ok(store)
}
