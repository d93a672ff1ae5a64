//! In-memory store backing both repositories.

use crate::repository::{ProductRepository, UserRepository};
use crate::snapshot::Snapshot;
use crate::StoreError;
use mercurius_auth::{AuthError, User};
use mercurius_catalog::{Product, ProductId, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Products and users held in memory.
///
/// Load and save through [`Snapshot`] to persist between runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, enforcing the same rules as [`insert`](ProductRepository::insert)
    /// and [`insert_user`](UserRepository::insert_user).
    pub fn try_from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let store = Self::new();
        for product in snapshot.products {
            store.insert(product)?;
        }
        for user in snapshot.users {
            if read(&store.users)?.contains_key(&user.id) {
                return Err(StoreError::DuplicateId(user.id.to_string()));
            }
            store.insert_user(user)?;
        }
        Ok(store)
    }

    /// Copy the current contents out, products newest first and users by name.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let products = self.list()?;
        let mut users: Vec<User> = read(&self.users)?.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(Snapshot { products, users })
    }

    pub fn product_count(&self) -> Result<usize, StoreError> {
        Ok(read(&self.products)?.len())
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::Poisoned)
}

fn slug_taken(products: &HashMap<ProductId, Product>, slug: &str, owner: &ProductId) -> bool {
    !slug.is_empty() && products.values().any(|p| p.slug == slug && &p.id != owner)
}

impl ProductRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = read(&self.products)?.values().cloned().collect();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(products)
    }

    fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(read(&self.products)?.get(id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        if slug.is_empty() {
            return Ok(None);
        }
        Ok(read(&self.products)?
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = write(&self.products)?;
        if products.contains_key(&product.id) {
            return Err(StoreError::DuplicateId(product.id.to_string()));
        }
        if slug_taken(&products, &product.slug, &product.id) {
            return Err(StoreError::DuplicateSlug(product.slug));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    fn replace(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = write(&self.products)?;
        if !products.contains_key(&product.id) {
            return Err(StoreError::not_found(product.id.to_string()));
        }
        if slug_taken(&products, &product.slug, &product.id) {
            return Err(StoreError::DuplicateSlug(product.slug));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    fn remove(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(write(&self.products)?.remove(id))
    }

    fn slugs(&self, excluding: Option<&ProductId>) -> Result<HashSet<String>, StoreError> {
        Ok(read(&self.products)?
            .values()
            .filter(|p| p.has_slug() && Some(&p.id) != excluding)
            .map(|p| p.slug.clone())
            .collect())
    }
}

impl UserRepository for MemoryStore {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?.get(id).cloned())
    }

    fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = write(&self.users)?;
        if let Some(existing) = users
            .values()
            .find(|u| u.username == user.username || u.email == user.email)
        {
            let taken = if existing.username == user.username {
                &user.username
            } else {
                &user.email
            };
            return Err(AuthError::UserAlreadyExists(taken.clone()).into());
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn replace_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = write(&self.users)?;
        if !users.contains_key(&user.id) {
            return Err(AuthError::UserNotFound(user.id.to_string()).into());
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn product(name: &str, days: i64) -> Product {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Product::builder(name, 100.0, "Sala")
            .created_at(base + Duration::days(days))
            .build()
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryStore::new();
        store.insert(product("Velho", 0)).unwrap();
        store.insert(product("Novo", 5)).unwrap();
        store.insert(Product::builder("Sem data", 1.0, "Sala").build()).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Novo", "Velho", "Sem data"]);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let store = MemoryStore::new();
        store.insert(product("Mesa", 0)).unwrap();
        let err = store.insert(product("Mesa", 1)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "mesa"));
    }

    #[test]
    fn test_empty_slugs_may_repeat() {
        let store = MemoryStore::new();
        for name in ["A", "B"] {
            store
                .insert(Product::builder(name, 1.0, "X").slug("").build())
                .unwrap();
        }
        assert_eq!(store.product_count().unwrap(), 2);
        assert!(store.slugs(None).unwrap().is_empty());
        assert!(store.find_by_slug("").unwrap().is_none());
    }

    #[test]
    fn test_slugs_excluding() {
        let store = MemoryStore::new();
        let mesa = store.insert(product("Mesa", 0)).unwrap();
        store.insert(product("Cadeira", 0)).unwrap();
        let slugs = store.slugs(Some(&mesa.id)).unwrap();
        assert!(slugs.contains("cadeira"));
        assert!(!slugs.contains("mesa"));
    }

    #[test]
    fn test_replace_missing_product() {
        let store = MemoryStore::new();
        let err = store.replace(product("Fantasma", 0)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_snapshot_with_duplicate_slug_rejected() {
        let snapshot = Snapshot {
            products: vec![product("Mesa", 0), product("Mesa", 1)],
            users: Vec::new(),
        };
        let err = MemoryStore::try_from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "mesa"));
    }

    #[test]
    fn test_snapshot_with_duplicate_id_rejected() {
        let first = Product::builder("Mesa", 1.0, "Sala").id("a").build();
        let second = Product::builder("Cadeira", 1.0, "Sala").id("a").build();
        let snapshot = Snapshot {
            products: vec![first, second, product("Rack", 0)],
            users: Vec::new(),
        };
        let err = MemoryStore::try_from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_snapshot_round_trip_keeps_everything() {
        let store = MemoryStore::new();
        store.insert(product("Mesa", 0)).unwrap();
        store
            .insert(Product::builder("Sem slug", 1.0, "Sala").slug("").build())
            .unwrap();
        store
            .insert(Product::builder("Outro", 1.0, "Sala").slug("").build())
            .unwrap();

        let reloaded = MemoryStore::try_from_snapshot(store.snapshot().unwrap()).unwrap();
        assert_eq!(reloaded.product_count().unwrap(), 3);
    }
}
