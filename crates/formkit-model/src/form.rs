//! The boundary between widgets and the enclosing form.
//!
//! Widgets never talk to a form directly. They expose a [`FormValue`] through
//! the [`FormControl`] contract and push every change into a [`FormBoundary`]
//! sink supplied by the host.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A value a widget contributes to form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FormValue {
    /// Plain text, e.g. a selected option value or an input's contents.
    Text(String),
    /// An unordered set of option values.
    ///
    /// Encoded as a JSON array. The encoding happens to be sorted, but
    /// consumers must compare tag sets with [`FormValue::same_tags`] and never
    /// rely on element order.
    Tags(BTreeSet<String>),
    /// Several named entries submitted together (dual-handle range).
    Entries(Vec<(String, String)>),
}

impl Default for FormValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn tags<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags(values.into_iter().map(Into::into).collect())
    }

    /// True for an empty text value or an empty tag set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Tags(tags) => tags.is_empty(),
            Self::Entries(entries) => entries.is_empty(),
        }
    }

    /// Wire form handed to the form boundary.
    pub fn encode(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Tags(tags) => {
                Value::Array(tags.iter().cloned().map(Value::String).collect()).to_string()
            }
            Self::Entries(entries) => {
                let mut map = Map::new();
                for (name, value) in entries {
                    map.insert(name.clone(), Value::String(value.clone()));
                }
                Value::Object(map).to_string()
            }
        }
    }

    /// Compare two encoded tag arrays as sets.
    ///
    /// Returns `false` when either side is not a JSON array of strings.
    pub fn same_tags(left: &str, right: &str) -> bool {
        match (decode_tag_set(left), decode_tag_set(right)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

fn decode_tag_set(raw: &str) -> Option<BTreeSet<String>> {
    serde_json::from_str::<Vec<String>>(raw)
        .ok()
        .map(|values| values.into_iter().collect())
}

/// Receives every value a widget synchronizes.
pub trait FormBoundary {
    /// Called after every mutation that may change the submitted value.
    fn set_form_value(&mut self, value: &FormValue);

    /// Called when the invalid flag derived from the error slot changes.
    fn set_validity(&mut self, _invalid: bool) {}
}

/// A boundary that keeps every pushed value, for hosts that poll and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingBoundary {
    pub values: Vec<FormValue>,
    pub invalid: bool,
}

impl RecordingBoundary {
    pub fn last(&self) -> Option<&FormValue> {
        self.values.last()
    }
}

impl FormBoundary for RecordingBoundary {
    fn set_form_value(&mut self, value: &FormValue) {
        self.values.push(value.clone());
    }

    fn set_validity(&mut self, invalid: bool) {
        self.invalid = invalid;
    }
}

/// Lets the host keep a handle on a boundary it lent to a widget.
impl<B: FormBoundary> FormBoundary for Rc<RefCell<B>> {
    fn set_form_value(&mut self, value: &FormValue) {
        self.borrow_mut().set_form_value(value);
    }

    fn set_validity(&mut self, invalid: bool) {
        self.borrow_mut().set_validity(invalid);
    }
}

/// Error slot written by an external validation layer.
///
/// Nothing inside a widget clears it; only an explicit `set(None)` (or an
/// empty message) does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDisplay {
    message: Option<String>,
}

impl ErrorDisplay {
    /// Replace the message. Empty text counts as no message.
    pub fn set(&mut self, message: Option<String>) {
        self.message = message.filter(|text| !text.is_empty());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_invalid(&self) -> bool {
        self.message.is_some()
    }
}

/// Placeholder, name and label text. Passed through to the view untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub placeholder: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
}

/// Contract every widget shares with the form boundary.
pub trait FormControl {
    /// Field name used on submission.
    fn name(&self) -> Option<&str>;

    /// The value the widget currently contributes.
    fn form_value(&self) -> FormValue;

    fn error(&self) -> &ErrorDisplay;

    fn set_error(&mut self, message: Option<String>);

    fn is_invalid(&self) -> bool {
        self.error().is_invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_encode_as_json_array() {
        let value = FormValue::tags(["r", "b"]);
        insta::assert_snapshot!(value.encode(), @r#"["b","r"]"#);
    }

    #[test]
    fn entries_encode_as_json_object() {
        let value = FormValue::Entries(vec![
            ("low".to_string(), "2".to_string()),
            ("high".to_string(), "4".to_string()),
        ]);
        insta::assert_snapshot!(value.encode(), @r#"{"high":"4","low":"2"}"#);
    }

    #[test]
    fn same_tags_ignores_order() {
        assert!(FormValue::same_tags(r#"["a","b"]"#, r#"["b","a"]"#));
        assert!(!FormValue::same_tags(r#"["a"]"#, r#"["a","b"]"#));
        assert!(!FormValue::same_tags("a", r#"["a"]"#));
    }

    #[test]
    fn empty_error_message_clears() {
        let mut error = ErrorDisplay::default();
        error.set(Some("required".to_string()));
        assert!(error.is_invalid());
        assert_eq!(error.message(), Some("required"));

        error.set(Some(String::new()));
        assert!(!error.is_invalid());
        assert_eq!(error.message(), None);
    }

    #[test]
    fn default_value_is_empty_text() {
        assert_eq!(FormValue::default(), FormValue::text(""));
        assert!(FormValue::default().is_empty());
        assert_eq!(FormValue::default().encode(), "");
    }
}
