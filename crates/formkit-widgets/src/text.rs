use formkit_model::{ErrorDisplay, FormControl, FormValue, Presentation};

/// Single-line input or multi-line text area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFieldKind {
    #[default]
    Input,
    TextArea,
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    kind: TextFieldKind,
    value: String,
    error: ErrorDisplay,
    pub presentation: Presentation,
}

impl TextField {
    pub fn input() -> Self {
        Self::default()
    }

    pub fn text_area() -> Self {
        Self {
            kind: TextFieldKind::TextArea,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> TextFieldKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the contents, from user typing or the host.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        tracing::trace!(kind = ?self.kind, len = self.value.len(), "text field updated");
    }
}

impl FormControl for TextField {
    fn name(&self) -> Option<&str> {
        self.presentation.name.as_deref()
    }

    fn form_value(&self) -> FormValue {
        FormValue::text(self.value.clone())
    }

    fn error(&self) -> &ErrorDisplay {
        &self.error
    }

    fn set_error(&mut self, message: Option<String>) {
        self.error.set(message);
    }
}
