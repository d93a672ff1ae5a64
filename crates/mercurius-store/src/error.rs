//! Store error types.

use mercurius_auth::AuthError;
use mercurius_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when reading or mutating the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the given id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Two documents share an id.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Another product already carries this slug.
    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    /// Reading or writing the snapshot file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catalog rule violated.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Authentication or authorization failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A writer panicked while holding the lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound(what.into())
    }

    /// Check if this error means the requested document does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::NotFound(_) => true,
            StoreError::Catalog(e) => e.is_not_found(),
            StoreError::Auth(AuthError::UserNotFound(_)) => true,
            _ => false,
        }
    }

    /// Check if this error is a rejected sign-in or missing permission.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, StoreError::Auth(e) if e.is_auth_failure() || e.is_permission_error())
    }
}
