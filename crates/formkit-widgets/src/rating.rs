use formkit_model::{ErrorDisplay, FormControl, FormValue, Presentation};

use crate::error::{Result, WidgetError};

/// Star rating on a 1 to 5 scale.
#[derive(Debug, Clone, Default)]
pub struct Rating {
    value: Option<u8>,
    error: ErrorDisplay,
    pub presentation: Presentation,
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn set_value(&mut self, value: u8) -> Result<()> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(WidgetError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

impl FormControl for Rating {
    fn name(&self) -> Option<&str> {
        self.presentation.name.as_deref()
    }

    fn form_value(&self) -> FormValue {
        FormValue::Text(self.value.map(|v| v.to_string()).unwrap_or_default())
    }

    fn error(&self) -> &ErrorDisplay {
        &self.error
    }

    fn set_error(&mut self, message: Option<String>) {
        self.error.set(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scale_values() {
        let mut rating = Rating::new();
        assert_eq!(rating.form_value(), FormValue::text(""));
        rating.set_value(4).unwrap();
        assert_eq!(rating.value(), Some(4));
        assert_eq!(rating.form_value(), FormValue::text("4"));
    }

    #[test]
    fn rejects_out_of_scale() {
        let mut rating = Rating::new();
        rating.set_value(3).unwrap();
        assert_eq!(
            rating.set_value(6),
            Err(WidgetError::OutOfRange {
                value: 6,
                min: 1,
                max: 5
            })
        );
        assert!(rating.set_value(0).is_err());
        assert_eq!(rating.value(), Some(3));
    }
}
