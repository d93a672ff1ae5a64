//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No product carries the given slug.
    #[error("No product with slug: {0}")]
    SlugNotFound(String),

    /// Unrecognised sort key.
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    /// Unrecognised currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Product input failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// Shorthand for a validation failure.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CatalogError::ValidationError(msg.into())
    }

    /// Check if this error means the product does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ProductNotFound(_) | CatalogError::SlugNotFound(_)
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
