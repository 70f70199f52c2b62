//! Selection state for the single and tagged variants.
//!
//! The two variants share one engine and differ only in which mutations they
//! accept, so the state is a single enum rather than two widget types.

use std::collections::BTreeSet;
use std::fmt;

use formkit_model::{Catalog, FormValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TypeaheadError};

/// Which selection variant an engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// At most one chosen option.
    #[default]
    Single,
    /// An unordered set of chosen option values.
    Tagged,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Tagged => f.write_str("tagged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single { current: Option<String> },
    Tagged { tagged: BTreeSet<String> },
}

impl Selection {
    pub fn new(kind: SelectionKind) -> Self {
        match kind {
            SelectionKind::Single => Self::Single { current: None },
            SelectionKind::Tagged => Self::Tagged {
                tagged: BTreeSet::new(),
            },
        }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Self::Single { .. } => SelectionKind::Single,
            Self::Tagged { .. } => SelectionKind::Tagged,
        }
    }

    /// The chosen value in single mode.
    pub fn current(&self) -> Option<&str> {
        match self {
            Self::Single { current } => current.as_deref(),
            Self::Tagged { .. } => None,
        }
    }

    /// The tag set in tagged mode.
    pub fn tagged(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Single { .. } => None,
            Self::Tagged { tagged } => Some(tagged),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single { current } => current.as_deref() == Some(value),
            Self::Tagged { tagged } => tagged.contains(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single { current } => current.is_none(),
            Self::Tagged { tagged } => tagged.is_empty(),
        }
    }

    /// Canonical value for the form boundary.
    pub fn form_value(&self) -> FormValue {
        match self {
            Self::Single { current } => FormValue::Text(current.clone().unwrap_or_default()),
            Self::Tagged { tagged } => FormValue::Tags(tagged.clone()),
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            Self::Single { current } => *current = None,
            Self::Tagged { tagged } => tagged.clear(),
        }
    }

    /// Drop every chosen value the catalog no longer offers.
    ///
    /// Returns how many values were dropped.
    pub(crate) fn retain_known(&mut self, catalog: &Catalog) -> usize {
        match self {
            Self::Single { current } => match current {
                Some(value) if !catalog.contains(value) => {
                    *current = None;
                    1
                }
                _ => 0,
            },
            Self::Tagged { tagged } => {
                let before = tagged.len();
                tagged.retain(|value| catalog.contains(value));
                before - tagged.len()
            }
        }
    }
}

/// A validated bulk tag assignment.
///
/// Built from loose input (a JSON array or a list of strings) and rejected
/// with [`TypeaheadError::InvalidSelection`] unless it is a proper set of
/// non-empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection(BTreeSet<String>);

impl TagSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Accept a list of values. Duplicates make the list an improper set.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for value in values {
            let value = value.into();
            if value.is_empty() {
                return Err(invalid("tag values must not be empty"));
            }
            if set.contains(&value) {
                return Err(invalid(format!("duplicate tag value '{value}'")));
            }
            set.insert(value);
        }
        Ok(Self(set))
    }

    /// Parse a serialized tag set: a JSON array of strings.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(raw)
            .map_err(|err| invalid(format!("not valid JSON: {err}")))?;
        let Value::Array(items) = parsed else {
            return Err(invalid("expected a JSON array"));
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(value) => values.push(value),
                other => return Err(invalid(format!("expected a string, found {other}"))),
            }
        }
        Self::from_values(values)
    }

    pub fn values(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeSet<String> {
        self.0
    }
}

fn invalid(reason: impl Into<String>) -> TypeaheadError {
    TypeaheadError::InvalidSelection {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use formkit_model::SelectOption;

    use super::*;

    #[test]
    fn single_form_value_defaults_to_empty_text() {
        let selection = Selection::new(SelectionKind::Single);
        assert_eq!(selection.form_value(), FormValue::text(""));
        assert!(selection.is_empty());
    }

    #[test]
    fn parse_accepts_string_array() {
        let tags = TagSelection::parse(r#"["r","b"]"#).unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.values().contains("r"));
    }

    #[test]
    fn parse_rejects_improper_sets() {
        for raw in [r#""r""#, r#"{"r":1}"#, r#"["r",1]"#, r#"["r","r"]"#, r#"[""]"#, "not json"] {
            let err = TagSelection::parse(raw).unwrap_err();
            assert!(
                matches!(err, TypeaheadError::InvalidSelection { .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn retain_known_drops_orphans() {
        let catalog = Catalog::new(vec![SelectOption::new("Red", "r", "R")]).unwrap();

        let mut tagged = Selection::Tagged {
            tagged: ["r", "b"].into_iter().map(String::from).collect(),
        };
        assert_eq!(tagged.retain_known(&catalog), 1);
        assert!(tagged.contains("r"));
        assert!(!tagged.contains("b"));

        let mut single = Selection::Single {
            current: Some("b".to_string()),
        };
        assert_eq!(single.retain_known(&catalog), 1);
        assert_eq!(single.current(), None);
    }
}
