//! Selectable option definitions.

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A single selectable entry offered by a typeahead widget.
///
/// Options are immutable once ingested into a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label shown in the result list.
    pub title: String,
    /// Canonical identifier, submitted with the form.
    pub value: String,
    /// Compact label used when the option is shown as a tag.
    #[serde(default)]
    pub chip: String,
    /// Inactive options still match and tag, but render ghosted.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl SelectOption {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        chip: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            chip: chip.into(),
            active: true,
        }
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Label for tag display, falling back to the title when no chip is set.
    pub fn chip_label(&self) -> &str {
        if self.chip.is_empty() {
            &self.title
        } else {
            &self.chip
        }
    }
}
