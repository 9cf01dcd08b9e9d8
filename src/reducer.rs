//! Binding reducer.
//!
//! Folds the rows of a SPARQL result into a [`DisplayDocument`]. Multi-valued
//! properties arrive as several rows that repeat every other field, so the
//! reducer groups values by display label and drops repeats.
//!
//! Label order follows the first row (top to bottom, left to right) in which
//! each field appears; values keep the order of the rows they came from.

use crate::entity::EntityType;
use crate::error::{DisplayError, Result};
use crate::registry::{FieldRegistryEntry, registry_for};
use crate::sparql::{SparqlResults, TypedBinding};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variable holding the subject's display name
pub const TITLE_VAR: &str = "name";
/// Variable holding the subject's short description
pub const SUBTITLE_VAR: &str = "description";

/// One displayed value, optionally linked to the entity it names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl EntryItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            link: None,
        }
    }

    pub fn linked(value: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            link: Some(link.into()),
        }
    }
}

/// Normalized output handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDocument {
    pub title: String,
    pub subtitle: String,
    pub entries: IndexMap<String, Vec<EntryItem>>,
}

impl DisplayDocument {
    pub fn entry(&self, label: &str) -> Option<&[EntryItem]> {
        self.entries.get(label).map(Vec::as_slice)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Append `item` under `label` unless an equal item is already there.
    /// Returns whether the item was kept.
    fn push_unique(&mut self, label: &str, item: EntryItem) -> bool {
        let items = self.entries.entry(label.to_string()).or_default();
        if items.contains(&item) {
            return false;
        }
        items.push(item);
        true
    }
}

/// Reduce raw results into a display document using `registry`.
///
/// Fields missing from the registry are ignored. Fails when there are no
/// rows or the first row has no title or subtitle.
pub fn reduce(results: &SparqlResults, registry: &FieldRegistryEntry) -> Result<DisplayDocument> {
    let span = tracing::debug_span!(
        "reduce_bindings",
        entity_type = %registry.entity_type,
        rows = results.bindings().len()
    );
    let _enter = span.enter();

    let first = results
        .bindings()
        .first()
        .ok_or_else(|| DisplayError::malformed("response contains no bindings"))?;
    let first = TypedBinding::new(first);
    let title = first.get_value(TITLE_VAR).map_err(|e| {
        DisplayError::malformed(format!("first binding has no title: {e}"))
    })?;
    let subtitle = first.get_value(SUBTITLE_VAR).map_err(|e| {
        DisplayError::malformed(format!("first binding has no subtitle: {e}"))
    })?;

    let mut document = DisplayDocument {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        entries: IndexMap::new(),
    };

    let mut kept = 0usize;
    let mut duplicates = 0usize;
    for row in results.bindings() {
        let binding = TypedBinding::new(row);
        for field in binding.fields() {
            let Some(spec) = registry.field(field) else {
                continue;
            };
            let Some(raw) = binding.get_value_opt(field) else {
                continue;
            };

            let value = spec.transform.apply(raw, field);
            let link = spec
                .link
                .and_then(|link_field| binding.get_value_opt(link_field))
                .map(str::to_string);

            if document.push_unique(spec.label, EntryItem { value, link }) {
                kept += 1;
            } else {
                duplicates += 1;
            }
        }
    }

    tracing::debug!(
        labels = document.entries.len(),
        kept,
        duplicates,
        "reduced bindings"
    );
    Ok(document)
}

/// Look up the registry for `entity_type` and reduce `results` with it
pub fn format_entity(entity_type: EntityType, results: &SparqlResults) -> Result<DisplayDocument> {
    reduce(results, registry_for(entity_type))
}
