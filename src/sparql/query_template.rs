// =============================================================================
// SPARQL Query Templates
// =============================================================================
// Named `.sparql` templates whose `$0` placeholder receives an item id

use crate::error::{DisplayError, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Placeholder replaced by [`QueryTemplates::render`]
pub const PLACEHOLDER: &str = "$0";

const TEMPLATE_EXTENSION: &str = "sparql";

const BUNDLED: &[(&str, &str)] = &[
    ("get_instance", include_str!("../../queries/get_instance.sparql")),
    ("country", include_str!("../../queries/country.sparql")),
    ("landmark", include_str!("../../queries/landmark.sparql")),
    ("person", include_str!("../../queries/person.sparql")),
    ("book", include_str!("../../queries/book.sparql")),
];

/// Set of query templates keyed by name
#[derive(Debug, Clone, Default)]
pub struct QueryTemplates {
    templates: IndexMap<String, String>,
}

impl QueryTemplates {
    /// Templates compiled into the crate
    pub fn bundled() -> Self {
        let templates = BUNDLED
            .iter()
            .map(|(name, body)| ((*name).to_string(), (*body).to_string()))
            .collect();
        Self { templates }
    }

    /// Load every `*.sparql` file in `dir` on top of the current set.
    /// A file named like a bundled template replaces it.
    pub fn with_overrides_from_dir(mut self, dir: &Path) -> Result<Self> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_template = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));
            if !is_template || !path.is_file() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let body = fs::read_to_string(&path)?;
            tracing::debug!(template = name, path = %path.display(), "loaded query template");
            self.templates.insert(name.to_string(), body);
        }
        Ok(self)
    }

    pub fn insert(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.templates.insert(name.into(), body.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Render `name` with every `$0` replaced by `value`
    pub fn render(&self, name: &str, value: &str) -> Result<String> {
        let body = self
            .get(name)
            .ok_or_else(|| DisplayError::TemplateNotFound(name.to_string()))?;
        Ok(body.replace(PLACEHOLDER, value))
    }
}

/// Render one of the bundled templates
pub fn read_sparql(name: &str, value: &str) -> Result<String> {
    QueryTemplates::bundled().render(name, value)
}
