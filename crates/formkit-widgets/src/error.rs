//! Error types for widget value updates.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    /// A numeric value outside the widget's scale.
    #[error("value {value} is outside {min}..={max}")]
    OutOfRange { value: u8, min: u8, max: u8 },
}

pub type Result<T> = std::result::Result<T, WidgetError>;
