//! Storage and services for Mercurius.
//!
//! Repositories are traits taken by reference, so every service runs the
//! same against the in-memory store used by tests and the JSON-backed store
//! used by the CLI.
//!
//! # Example
//!
//! ```rust
//! use mercurius_store::prelude::*;
//! use mercurius_catalog::prelude::*;
//!
//! let store = MemoryStore::new();
//! store.insert(Product::builder("Mesa", 250.0, "Sala").build())?;
//!
//! let service = ProductService::new(&store);
//! let mesa = service.by_slug("mesa")?;
//! assert_eq!(mesa.final_price(), 250.0);
//! # Ok::<(), StoreError>(())
//! ```

mod error;
mod memory;
mod repository;
mod service;
mod snapshot;
mod users;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::{ProductRepository, UserRepository};
pub use service::{
    BackfillReport, Dashboard, ImportReport, ProductAdmin, ProductService, RELATED_LIMIT,
};
pub use snapshot::Snapshot;
pub use users::{AdminSetup, UserService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AdminSetup, BackfillReport, Dashboard, ImportReport, MemoryStore, ProductAdmin,
        ProductRepository, ProductService, Snapshot, StoreError, UserRepository, UserService,
    };
}
