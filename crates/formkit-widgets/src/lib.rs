//! State holders for the plain form widgets.
//!
//! These widgets carry no logic beyond the [`FormControl`] contract: a value,
//! an error slot and pass-through presentation text.

#![deny(unsafe_code)]

pub mod error;
pub mod range;
pub mod rating;
pub mod text;

pub use error::{Result, WidgetError};
pub use formkit_model::FormControl;
pub use range::RangeControl;
pub use rating::Rating;
pub use text::{TextField, TextFieldKind};
