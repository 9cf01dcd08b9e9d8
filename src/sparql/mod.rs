//! SPARQL result handling
//!
//! - JSON results model that keeps each row's field order
//! - Typed access to individual binding rows
//! - Query templates with `$0` substitution

pub mod query_template;
pub mod results;
pub mod typed_binding;

pub use query_template::{QueryTemplates, read_sparql};
pub use results::{BindingCell, RawBinding, ResultsBody, ResultsHead, SparqlResults, TermKind};
pub use typed_binding::{BindingError, TypedBinding};
