#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

pub mod config;
pub mod error;
pub mod harness;
pub mod query;
pub mod report;
pub mod results;
pub mod store;
pub mod verify;

pub use config::{HarnessConfig, StoreConfig};
pub use error::{ConfigError, HarnessError, QueryLoadError, StoreError, VerificationError};
pub use harness::Harness;
pub use query::{QueryLoader, QueryMetadata, QueryResource};
pub use report::{build_report, TestResult};
pub use results::{ResultRow, SolutionSet};
pub use store::{Connection, HttpStore, MemoryStore, Session, TripleStore};
pub use verify::{extract_literals, verify, Coverage};
