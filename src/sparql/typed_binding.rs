// =============================================================================
// Typed Binding Access
// =============================================================================
// Read values out of one SPARQL results row

use super::results::{BindingCell, RawBinding};
use thiserror::Error;

/// Errors that can occur when reading a binding row
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    #[error("Variable '{0}' not found in bindings")]
    NotFound(String),

    #[error("Variable '{0}' is unbound")]
    Unbound(String),
}

/// Typed accessor over a single [`RawBinding`]
#[derive(Debug, Clone, Copy)]
pub struct TypedBinding<'a> {
    row: &'a RawBinding,
}

impl<'a> TypedBinding<'a> {
    pub fn new(row: &'a RawBinding) -> Self {
        Self { row }
    }

    /// Get the raw cell for a variable
    pub fn get_cell(&self, var: &str) -> Result<&'a BindingCell, BindingError> {
        self.row
            .get(var)
            .ok_or_else(|| BindingError::NotFound(var.to_string()))
    }

    /// Get the cell's lexical value, failing when it is missing or empty
    pub fn get_value(&self, var: &str) -> Result<&'a str, BindingError> {
        let cell = self.get_cell(var)?;
        if cell.value.is_empty() {
            return Err(BindingError::Unbound(var.to_string()));
        }
        Ok(&cell.value)
    }

    /// Lexical value of a bound, non-empty cell
    pub fn get_value_opt(&self, var: &str) -> Option<&'a str> {
        self.row
            .get(var)
            .map(|cell| cell.value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Field names in the order the row lists them
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.row.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_row() -> RawBinding {
        let mut row = RawBinding::new();
        row.insert(
            "iri".to_string(),
            BindingCell::uri("http://example.org/test"),
        );
        row.insert(
            "literal".to_string(),
            BindingCell::literal("test value").with_lang("en"),
        );
        row.insert("empty".to_string(), BindingCell::literal(""));
        row
    }

    #[test]
    fn test_get_value() {
        let row = create_test_row();
        let typed = TypedBinding::new(&row);

        assert_eq!(typed.get_value("iri").unwrap(), "http://example.org/test");
        assert_eq!(typed.get_cell("literal").unwrap().lang.as_deref(), Some("en"));
    }

    #[test]
    fn test_missing_variable() {
        let row = create_test_row();
        let typed = TypedBinding::new(&row);

        assert!(matches!(typed.get_value("missing"), Err(BindingError::NotFound(_))));
        assert_eq!(typed.get_value_opt("missing"), None);
    }

    #[test]
    fn test_empty_value_is_unbound() {
        let row = create_test_row();
        let typed = TypedBinding::new(&row);

        assert!(matches!(typed.get_value("empty"), Err(BindingError::Unbound(_))));
        assert_eq!(typed.get_value_opt("empty"), None);
    }

    #[test]
    fn test_fields_keep_row_order() {
        let row = create_test_row();
        let typed = TypedBinding::new(&row);

        assert_eq!(typed.fields().collect::<Vec<_>>(), vec!["iri", "literal", "empty"]);
    }
}
