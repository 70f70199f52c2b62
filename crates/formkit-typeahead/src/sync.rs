//! Form value synchronization.

use formkit_model::{FormBoundary, FormValue};

/// Holds the last value pushed to the form boundary.
///
/// The engine calls [`FormSync::push`] at the end of every selection mutation,
/// so [`FormSync::value`] always equals the selection's canonical value.
#[derive(Default)]
pub struct FormSync {
    value: FormValue,
    invalid: bool,
    boundary: Option<Box<dyn FormBoundary>>,
}

impl FormSync {
    /// Start from a known value, with no boundary attached yet.
    pub fn new(value: FormValue) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Attach a boundary and bring it up to date.
    pub fn attach(&mut self, mut boundary: Box<dyn FormBoundary>) {
        boundary.set_form_value(&self.value);
        boundary.set_validity(self.invalid);
        self.boundary = Some(boundary);
    }

    pub fn push(&mut self, value: FormValue) {
        tracing::debug!(value = %value.encode(), "form value synchronized");
        if let Some(boundary) = self.boundary.as_mut() {
            boundary.set_form_value(&value);
        }
        self.value = value;
    }

    /// Forward the invalid flag when it changes.
    pub fn push_validity(&mut self, invalid: bool) {
        if self.invalid == invalid {
            return;
        }
        self.invalid = invalid;
        if let Some(boundary) = self.boundary.as_mut() {
            boundary.set_validity(invalid);
        }
    }

    pub fn value(&self) -> &FormValue {
        &self.value
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }
}

impl std::fmt::Debug for FormSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSync")
            .field("value", &self.value)
            .field("invalid", &self.invalid)
            .field("has_boundary", &self.boundary.is_some())
            .finish()
    }
}
