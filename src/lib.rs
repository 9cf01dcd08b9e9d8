//! Turn Wikidata SPARQL results into display documents.
//!
//! The caller classifies an entity, looks up the field registry for its type
//! and hands the raw `{head, results}` JSON to [`reduce`]:
//!
//! ```
//! use wikidata_display::{EntityType, SparqlResults, format_entity};
//!
//! let raw = r#"{
//!   "head": {"vars": ["name", "description", "genreLabel"]},
//!   "results": {"bindings": [
//!     {"name": {"type": "literal", "value": "Dune"},
//!      "description": {"type": "literal", "value": "novel by Frank Herbert"},
//!      "genreLabel": {"type": "literal", "value": "science fiction"}}
//!   ]}
//! }"#;
//! let results = SparqlResults::from_json_str(raw).unwrap();
//! let document = format_entity(EntityType::Book, &results).unwrap();
//! assert_eq!(document.title, "Dune");
//! assert_eq!(document.entry("Genre").unwrap()[0].value, "science fiction");
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod registry;
pub mod sparql;
pub mod transform;

pub use config::{AppConfig, CliArgs, Command};
pub use entity::{EntityId, EntityType, classify_instance_results};
pub use error::{DisplayError, ErrorCode, Result};
pub use logging::{LoggingConfig, init_logging};
pub use reducer::{DisplayDocument, EntryItem, format_entity, reduce};
pub use registry::{FieldRegistryEntry, FieldSpec, ValueTransform, registry_for};
pub use sparql::{QueryTemplates, SparqlResults, read_sparql};

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Read SPARQL results from a file, or from stdin when `path` is `None`
pub fn load_results(path: Option<&Path>) -> Result<SparqlResults> {
    match path {
        Some(path) => SparqlResults::from_reader(BufReader::new(File::open(path)?)),
        None => SparqlResults::from_reader(io::stdin().lock()),
    }
}

/// Bundled templates, overridden from `dir` when given
pub fn load_templates(dir: Option<&Path>) -> Result<QueryTemplates> {
    let templates = QueryTemplates::bundled();
    match dir {
        Some(dir) => templates.with_overrides_from_dir(dir),
        None => Ok(templates),
    }
}
