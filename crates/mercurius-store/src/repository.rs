//! Storage seams for products and users.
//!
//! Services take a `&R` handle instead of reaching for a shared global
//! connection, so tests and tools can swap the backing store.

use crate::StoreError;
use mercurius_auth::User;
use mercurius_catalog::{Product, ProductId, UserId};
use std::collections::HashSet;

/// Product documents.
pub trait ProductRepository {
    /// Every product, newest first. Products without a creation time come last.
    fn list(&self) -> Result<Vec<Product>, StoreError>;

    fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// Store a new product. Fails with [`StoreError::DuplicateSlug`] when a
    /// non-empty slug is already taken.
    fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// Overwrite the product with the same id.
    fn replace(&self, product: Product) -> Result<Product, StoreError>;

    /// Remove and return a product, `None` if it did not exist.
    fn remove(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// All non-empty slugs in use, optionally ignoring one product.
    fn slugs(&self, excluding: Option<&ProductId>) -> Result<HashSet<String>, StoreError>;
}

/// User accounts.
pub trait UserRepository {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Store a new user. Username and email must both be unused.
    fn insert_user(&self, user: User) -> Result<User, StoreError>;

    fn replace_user(&self, user: User) -> Result<User, StoreError>;
}
