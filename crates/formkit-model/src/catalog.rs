//! Ordered, validated option collections.
//!
//! A [`Catalog`] is built in one step from a full option list and is never
//! patched afterwards. Lookups by value go through an index rebuilt on every
//! construction. When the same value appears more than once, the index points
//! at the last occurrence.

use std::collections::HashMap;

use crate::error::{ModelError, Result};
use crate::option::SelectOption;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    options: Vec<SelectOption>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate and index an option list.
    ///
    /// Every option must carry a non-blank `value`. On failure nothing is
    /// built, so callers holding a previous catalog keep it intact.
    pub fn new(options: Vec<SelectOption>) -> Result<Self> {
        let mut index = HashMap::with_capacity(options.len());
        for (position, option) in options.iter().enumerate() {
            if option.value.trim().is_empty() {
                return Err(ModelError::InvalidCatalog {
                    index: position,
                    reason: "value must not be empty".to_string(),
                });
            }
            index.insert(option.value.clone(), position);
        }
        Ok(Self { options, index })
    }

    /// Decode a JSON array of options and validate it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let options: Vec<SelectOption> = serde_json::from_str(raw)?;
        Self::new(options)
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Find the option registered for `value`.
    pub fn lookup(&self, value: &str) -> Option<&SelectOption> {
        self.index.get(value).map(|&position| &self.options[position])
    }

    /// Position of the option registered for `value`.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Red", "r", "R"),
            SelectOption::new("Blue", "b", "B"),
        ]
    }

    #[test]
    fn lookup_by_value() {
        let catalog = Catalog::new(colors()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("b").map(|o| o.title.as_str()), Some("Blue"));
        assert!(catalog.lookup("g").is_none());
        assert!(catalog.contains("r"));
    }

    #[test]
    fn rejects_blank_value() {
        let mut options = colors();
        options.push(SelectOption::new("Green", "  ", "G"));
        let err = Catalog::new(options).unwrap_err();
        assert!(matches!(err, ModelError::InvalidCatalog { index: 2, .. }));
    }

    #[test]
    fn duplicate_values_resolve_to_last_entry() {
        let catalog = Catalog::new(vec![
            SelectOption::new("Red", "r", "R"),
            SelectOption::new("Crimson", "r", "C"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position("r"), Some(1));
        assert_eq!(
            catalog.lookup("r").map(|o| o.title.as_str()),
            Some("Crimson")
        );
    }

    #[test]
    fn from_json_reports_schema_errors() {
        let catalog = Catalog::from_json(r#"[{"title":"Red","value":"r","chip":"R"}]"#).unwrap();
        assert_eq!(catalog.options()[0].title, "Red");

        let err = Catalog::from_json(r#"[{"title":"Red"}]"#).unwrap_err();
        assert!(matches!(err, ModelError::CatalogParse(_)));
    }
}
