//! Result capping and the render list handed to views.

use formkit_model::SelectOption;
use serde::Serialize;

/// Placeholder text for views to show when nothing matches.
pub const NO_RESULTS_LABEL: &str = "No results found...";

/// Keep the first `max` ranked entries.
pub fn limit<T>(mut ranked: Vec<T>, max: usize) -> Vec<T> {
    ranked.truncate(max);
    ranked
}

/// Capped, ranked options for the current query. Never stored by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderList {
    pub items: Vec<SelectOption>,
}

impl RenderList {
    pub fn from_ranked(ranked: Vec<&SelectOption>, max: usize) -> Self {
        Self {
            items: limit(ranked, max).into_iter().cloned().collect(),
        }
    }

    /// True when views should show [`NO_RESULTS_LABEL`] instead of items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|option| option.title.as_str()).collect()
    }
}
