use formkit_model::{ErrorDisplay, FormControl, FormValue, Presentation};

use crate::error::{Result, WidgetError};

/// Dual-handle range on a 1 to 5 scale.
///
/// Handles may be dragged past each other; the control swaps them so that
/// `low <= high` always holds.
#[derive(Debug, Clone)]
pub struct RangeControl {
    low: u8,
    high: u8,
    pub low_name: String,
    pub high_name: String,
    error: ErrorDisplay,
    pub presentation: Presentation,
}

impl Default for RangeControl {
    fn default() -> Self {
        Self {
            low: Self::MIN,
            high: Self::MAX,
            low_name: "low".to_string(),
            high_name: "high".to_string(),
            error: ErrorDisplay::default(),
            presentation: Presentation::default(),
        }
    }
}

impl RangeControl {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> (u8, u8) {
        (self.low, self.high)
    }

    /// Move both handles.
    pub fn set(&mut self, low: u8, high: u8) -> Result<()> {
        check(low)?;
        check(high)?;
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        self.low = low;
        self.high = high;
        Ok(())
    }

    pub fn set_low(&mut self, low: u8) -> Result<()> {
        self.set(low, self.high)
    }

    pub fn set_high(&mut self, high: u8) -> Result<()> {
        self.set(self.low, high)
    }

    /// Label shown beside the slider, e.g. `2 - 4`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.low, self.high)
    }
}

fn check(value: u8) -> Result<()> {
    if (RangeControl::MIN..=RangeControl::MAX).contains(&value) {
        Ok(())
    } else {
        Err(WidgetError::OutOfRange {
            value,
            min: RangeControl::MIN,
            max: RangeControl::MAX,
        })
    }
}

impl FormControl for RangeControl {
    fn name(&self) -> Option<&str> {
        self.presentation.name.as_deref()
    }

    fn form_value(&self) -> FormValue {
        FormValue::Entries(vec![
            (self.low_name.clone(), self.low.to_string()),
            (self.high_name.clone(), self.high.to_string()),
        ])
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
    fn defaults_to_full_scale() {
        let range = RangeControl::new();
        assert_eq!(range.bounds(), (1, 5));
        assert_eq!(range.label(), "1 - 5");
    }

    #[test]
    fn crossed_handles_are_swapped() {
        let mut range = RangeControl::new();
        range.set(2, 4).unwrap();
        range.set_low(5).unwrap();
        assert_eq!(range.bounds(), (4, 5));
    }

    #[test]
    fn submits_two_named_entries() {
        let mut range = RangeControl::new();
        range.low_name = "min_stars".to_string();
        range.high_name = "max_stars".to_string();
        range.set(2, 3).unwrap();
        assert_eq!(
            range.form_value(),
            FormValue::Entries(vec![
                ("min_stars".to_string(), "2".to_string()),
                ("max_stars".to_string(), "3".to_string()),
            ])
        );
    }

    #[test]
    fn rejects_out_of_scale_without_moving() {
        let mut range = RangeControl::new();
        assert!(range.set(0, 3).is_err());
        assert_eq!(range.bounds(), (1, 5));
    }
}
