//! JSON snapshot of the whole store.

use crate::StoreError;
use mercurius_auth::User;
use mercurius_catalog::Product;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialized store contents: `{"products": [...], "users": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Snapshot {
    /// Read a snapshot file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no data file yet, starting empty");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            products = snapshot.products.len(),
            users = snapshot.users.len(),
            "loaded data file"
        );
        Ok(snapshot)
    }

    /// Write the snapshot, replacing the file through a temporary sibling.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), "saved data file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::load(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.products.is_empty());
        assert!(snapshot.users.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("mercurius.json");
        let snapshot = Snapshot {
            products: vec![Product::builder("Sofá", 1000.0, "Sala").discount(10.0).build()],
            users: Vec::new(),
        };
        snapshot.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.products, snapshot.products);
    }

    #[test]
    fn test_reads_legacy_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{"products":[{"_id":"65f0c0ffee","name":"Mesa","price":250,"category":"Sala","sold":false}]}"#,
        )
        .unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.products.len(), 1);
        assert!(!loaded.products[0].has_slug());
        assert!(loaded.users.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Snapshot::load(&path), Err(StoreError::Serialization(_))));
    }
}
