pub mod catalog;
pub mod error;
pub mod form;
pub mod option;

pub use catalog::Catalog;
pub use error::{ModelError, Result};
pub use form::{
    ErrorDisplay, FormBoundary, FormControl, FormValue, Presentation, RecordingBoundary,
};
pub use option::SelectOption;
