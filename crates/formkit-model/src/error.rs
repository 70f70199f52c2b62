use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// An option entry failed validation.
    #[error("invalid catalog entry at index {index}: {reason}")]
    InvalidCatalog { index: usize, reason: String },

    /// The serialized option list could not be decoded.
    #[error("failed to parse option list: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
