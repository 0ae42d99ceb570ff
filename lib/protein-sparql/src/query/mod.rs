//! Query resources: SPARQL text annotated with the results it is expected to produce.
//!
//! A resource file starts with a metadata header made of comment lines:
//!
//! ```sparql
//! #id:NXQ_00001
//! #title:Proteins that are phosphorylated and located in the cytoplasm
//! #acs:NX_P12345,NX_P67890
//! #count:2
//! PREFIX : <http://nextprot.org/rdf#>
//! SELECT DISTINCT ?entry WHERE { ... }
//! ```
//!
//! See [`QueryMetadata`] for the header grammar.

mod loader;
mod metadata;

pub use loader::QueryLoader;
pub use metadata::{QueryMetadata, ACCESSIONS_KEY, COUNT_KEY, VARIABLE_KEY};

/// A loaded query: its name, its full text and its parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResource {
    pub name: String,
    pub text: String,
    pub metadata: QueryMetadata,
}
