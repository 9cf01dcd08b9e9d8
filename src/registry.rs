//! Field formatter registry.
//!
//! One static table per [`EntityType`] says which result fields are shown,
//! under which label, which field carries the link for a label, and how the
//! raw value is formatted. A link can only be declared on a [`FieldSpec`], so
//! every linked field is also a labelled one.

use crate::entity::EntityType;
use crate::error::{DisplayError, Result};
use crate::transform::{format_area, format_date, group_thousands};
use std::collections::HashSet;
use std::fmt;

/// Formatting applied to a raw field value before display
#[derive(Clone, Copy)]
pub enum ValueTransform {
    /// Show the raw value
    Identity,
    /// Truncated integer with thousands separators
    Grouped,
    /// [`ValueTransform::Grouped`] followed by the area unit
    Area,
    /// `"Month D, YYYY"`
    Date,
    /// Caller-supplied formatter; `None` keeps the raw value
    Custom(fn(&str, &str) -> Option<String>),
}

impl ValueTransform {
    /// Format `raw` from `field`. Values the transform cannot read are
    /// returned unchanged.
    pub fn apply(&self, raw: &str, field: &str) -> String {
        let formatted = match self {
            ValueTransform::Identity => return raw.to_string(),
            ValueTransform::Grouped => group_thousands(raw),
            ValueTransform::Area => format_area(raw),
            ValueTransform::Date => format_date(raw),
            ValueTransform::Custom(format) => format(raw, field),
        };
        formatted.unwrap_or_else(|| {
            tracing::debug!(field, raw, transform = ?self, "value passed through unformatted");
            raw.to_string()
        })
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTransform::Identity => f.write_str("Identity"),
            ValueTransform::Grouped => f.write_str("Grouped"),
            ValueTransform::Area => f.write_str("Area"),
            ValueTransform::Date => f.write_str("Date"),
            ValueTransform::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// How one result field is displayed
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Result variable the value is read from
    pub source: &'static str,
    /// Display label the value is grouped under
    pub label: &'static str,
    /// Result variable holding the URI to attach to the value
    pub link: Option<&'static str>,
    pub transform: ValueTransform,
}

impl FieldSpec {
    pub const fn new(source: &'static str, label: &'static str) -> Self {
        Self {
            source,
            label,
            link: None,
            transform: ValueTransform::Identity,
        }
    }

    pub const fn linked(mut self, link: &'static str) -> Self {
        self.link = Some(link);
        self
    }

    pub const fn transform(mut self, transform: ValueTransform) -> Self {
        self.transform = transform;
        self
    }
}

/// Display configuration for one entity type
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistryEntry {
    pub entity_type: EntityType,
    pub fields: &'static [FieldSpec],
}

impl FieldRegistryEntry {
    pub fn field(&self, source: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.source == source)
    }

    pub fn label_of(&self, source: &str) -> Option<&'static str> {
        self.field(source).map(|spec| spec.label)
    }

    pub fn link_field_of(&self, source: &str) -> Option<&'static str> {
        self.field(source).and_then(|spec| spec.link)
    }

    pub fn transform_of(&self, source: &str) -> Option<ValueTransform> {
        self.field(source).map(|spec| spec.transform)
    }

    /// Source fields and labels must each be unique within the table.
    pub fn validate(&self) -> Result<()> {
        let mut sources = HashSet::new();
        let mut labels = HashSet::new();
        for spec in self.fields {
            if !sources.insert(spec.source) {
                return Err(self.invalid(format!("field '{}' declared twice", spec.source)));
            }
            if !labels.insert(spec.label) {
                return Err(self.invalid(format!("label '{}' declared twice", spec.label)));
            }
            if spec.link == Some(spec.source) {
                return Err(self.invalid(format!("field '{}' links to itself", spec.source)));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> DisplayError {
        DisplayError::InvalidRegistry {
            entity: self.entity_type.to_string(),
            reason,
        }
    }
}

// =============================================================================
// REGISTRY TABLES
// =============================================================================

pub static COUNTRY: FieldRegistryEntry = FieldRegistryEntry {
    entity_type: EntityType::Country,
    fields: &[
        FieldSpec::new("population", "Population").transform(ValueTransform::Grouped),
        FieldSpec::new("continentLabel", "Continent"),
        FieldSpec::new("capitalLabel", "Capital"),
        FieldSpec::new("areaKmSquared", "Area").transform(ValueTransform::Area),
        FieldSpec::new("headOfGovLabel", "Head of Government").linked("headOfGov"),
        FieldSpec::new("headOfStateLabel", "Head of State").linked("headOfState"),
    ],
};

pub static LANDMARK: FieldRegistryEntry = FieldRegistryEntry {
    entity_type: EntityType::Landmark,
    fields: &[
        FieldSpec::new("territoryLocationLabel", "Territory"),
        FieldSpec::new("countryLocationLabel", "Country").linked("countryLocation"),
        FieldSpec::new("inception", "Creation Date").transform(ValueTransform::Date),
    ],
};

pub static PERSON: FieldRegistryEntry = FieldRegistryEntry {
    entity_type: EntityType::Person,
    fields: &[
        FieldSpec::new("birthDate", "Born").transform(ValueTransform::Date),
        FieldSpec::new("deathDate", "Died").transform(ValueTransform::Date),
        FieldSpec::new("spouseLabel", "Spouse").linked("spouse"),
        FieldSpec::new("nationalityLabel", "Nationality").linked("nationality"),
        FieldSpec::new("occupationLabel", "Occupation"),
    ],
};

pub static BOOK: FieldRegistryEntry = FieldRegistryEntry {
    entity_type: EntityType::Book,
    fields: &[
        FieldSpec::new("authorLabel", "Author").linked("author"),
        FieldSpec::new("genreLabel", "Genre"),
        FieldSpec::new("published", "Published").transform(ValueTransform::Date),
    ],
};

/// Registry entry for an entity type
pub fn registry_for(entity_type: EntityType) -> &'static FieldRegistryEntry {
    match entity_type {
        EntityType::Country => &COUNTRY,
        EntityType::Landmark => &LANDMARK,
        EntityType::Person => &PERSON,
        EntityType::Book => &BOOK,
    }
}

impl EntityType {
    pub fn registry(self) -> &'static FieldRegistryEntry {
        registry_for(self)
    }
}
