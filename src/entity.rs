//! Wikidata entity identification and entity-type classification.
//!
//! Classification is a pure lookup: the caller fetches the "instance of"
//! labels for an item (see the `get_instance` query template) and hands the
//! results here. Types without a field registry come back as
//! [`DisplayError::UnsupportedEntityType`].

use crate::error::{DisplayError, Result};
use crate::sparql::{SparqlResults, TypedBinding};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

static ENTITY_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Q[0-9]+").expect("entity id pattern is valid"));

/// Variable holding the instance label in `get_instance` results
pub const INSTANCE_LABEL_VAR: &str = "label";

/// A Wikidata item id such as `Q42`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Pull the first `Q<digits>` out of an entity URI or page URL
    pub fn from_uri(uri: &str) -> Result<Self> {
        ENTITY_ID_PATTERN
            .find(uri)
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| DisplayError::InvalidEntityUri(uri.to_string()))
    }

    /// Accept a bare item id such as `Q42`
    pub fn parse(id: &str) -> Result<Self> {
        let id = id.trim();
        match ENTITY_ID_PATTERN.find(id) {
            Some(m) if m.start() == 0 && m.end() == id.len() => Ok(Self(id.to_string())),
            _ => Err(DisplayError::InvalidEntityId(id.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical concept URI
    pub fn entity_uri(&self) -> String {
        format!("http://www.wikidata.org/entity/{}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entity types that have a field registry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntityType {
    Person,
    Book,
    Country,
    Landmark,
}

impl EntityType {
    /// Map an English "instance of" label onto a supported type
    pub fn from_instance_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_lowercase();
        let entity_type = match normalized.as_str() {
            "human" | "person" | "fictional human" => EntityType::Person,
            "book" | "novel" | "literary work" | "written work" | "version, edition or translation"
            | "book series" | "novella" => EntityType::Book,
            "country" | "sovereign state" | "state" | "island nation" | "unitary state"
            | "federal state" => EntityType::Country,
            "landmark" | "tourist attraction" | "monument" | "tower" | "building" | "bridge"
            | "castle" | "museum" | "statue" | "archaeological site" | "world heritage site"
            | "observation tower" | "lattice tower" => EntityType::Landmark,
            _ => return Err(DisplayError::UnsupportedEntityType(label.to_string())),
        };
        Ok(entity_type)
    }

    /// Name of the query template that fetches this type's fields
    pub fn query_template(&self) -> &'static str {
        (*self).into()
    }
}

/// Classify an item from its `get_instance` results.
///
/// Rows are checked in order and the first supported label wins.
pub fn classify_instance_results(results: &SparqlResults) -> Result<EntityType> {
    let mut seen = Vec::new();
    for row in results.bindings() {
        let Some(label) = TypedBinding::new(row).get_value_opt(INSTANCE_LABEL_VAR) else {
            continue;
        };
        match EntityType::from_instance_label(label) {
            Ok(entity_type) => {
                tracing::debug!(%entity_type, label, "classified entity");
                return Ok(entity_type);
            }
            Err(_) => seen.push(label),
        }
    }

    let reason = if seen.is_empty() {
        "no instance labels in response".to_string()
    } else {
        seen.join(", ")
    };
    Err(DisplayError::UnsupportedEntityType(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::{BindingCell, RawBinding};
    use assert_matches::assert_matches;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn instance_results(labels: &[&str]) -> SparqlResults {
        let bindings = labels
            .iter()
            .map(|label| {
                let mut row = RawBinding::new();
                row.insert(
                    INSTANCE_LABEL_VAR.to_string(),
                    BindingCell::literal(*label).with_lang("en"),
                );
                row
            })
            .collect();
        SparqlResults::new(vec![INSTANCE_LABEL_VAR.to_string()], bindings)
    }

    #[test]
    fn test_entity_id_from_page_url() {
        let id = EntityId::from_uri("https://www.wikidata.org/wiki/Q43361").unwrap();
        assert_eq!(id.as_str(), "Q43361");
        assert_eq!(id.entity_uri(), "http://www.wikidata.org/entity/Q43361");
    }

    #[test]
    fn test_entity_id_from_entity_uri() {
        let id = EntityId::from_uri("http://www.wikidata.org/entity/Q41513").unwrap();
        assert_eq!(id.to_string(), "Q41513");
    }

    #[test]
    fn test_entity_id_rejects_uri_without_item() {
        assert_matches!(
            EntityId::from_uri("https://www.wikidata.org/wiki/Property:P31"),
            Err(DisplayError::InvalidEntityUri(_))
        );
    }

    #[test]
    fn test_entity_id_parse_bare_id() {
        assert_eq!(EntityId::parse("Q43361").unwrap().as_str(), "Q43361");
        assert_eq!(EntityId::parse(" Q1 ").unwrap().as_str(), "Q1");
        assert_matches!(EntityId::parse("P31"), Err(DisplayError::InvalidEntityId(_)));
        assert_matches!(EntityId::parse("Q42x"), Err(DisplayError::InvalidEntityId(_)));
        assert_matches!(
            EntityId::parse("https://www.wikidata.org/wiki/Q42"),
            Err(DisplayError::InvalidEntityId(_))
        );
    }

    #[test]
    fn test_entity_type_round_trips_through_strings() {
        for entity_type in EntityType::iter() {
            let name = entity_type.to_string();
            assert_eq!(EntityType::from_str(&name).unwrap(), entity_type);
            assert_eq!(entity_type.query_template(), name);
        }
        assert_eq!(EntityType::from_str("Country").unwrap(), EntityType::Country);
        assert!(EntityType::from_str("painting").is_err());
    }

    #[test]
    fn test_from_instance_label() {
        assert_eq!(EntityType::from_instance_label("human").unwrap(), EntityType::Person);
        assert_eq!(EntityType::from_instance_label("Literary Work").unwrap(), EntityType::Book);
        assert_eq!(
            EntityType::from_instance_label("sovereign state").unwrap(),
            EntityType::Country
        );
        assert_eq!(
            EntityType::from_instance_label("tourist attraction").unwrap(),
            EntityType::Landmark
        );
        assert_matches!(
            EntityType::from_instance_label("Wikimedia disambiguation page"),
            Err(DisplayError::UnsupportedEntityType(label)) if label == "Wikimedia disambiguation page"
        );
    }

    #[test]
    fn test_classify_first_supported_label_wins() {
        let results = instance_results(&["fictional character", "human", "book"]);
        assert_eq!(classify_instance_results(&results).unwrap(), EntityType::Person);
    }

    #[test]
    fn test_classify_unsupported_lists_labels() {
        let results = instance_results(&["painting", "work of art"]);
        assert_matches!(
            classify_instance_results(&results),
            Err(DisplayError::UnsupportedEntityType(reason)) if reason == "painting, work of art"
        );
    }

    #[test]
    fn test_classify_empty_results() {
        let results = instance_results(&[]);
        assert_matches!(
            classify_instance_results(&results),
            Err(DisplayError::UnsupportedEntityType(_))
        );
    }
}
