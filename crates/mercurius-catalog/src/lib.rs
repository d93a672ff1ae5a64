//! Catalog domain types and logic for Mercurius.
//!
//! This crate holds the pure core of the storefront:
//!
//! - **Catalog**: products, validated inputs and patches, category totals
//! - **Slugs**: URL-safe names with uniqueness resolution
//! - **Pricing**: percentage discounts and price breakdowns
//! - **View**: category/sold filtering and the six catalog sort orders
//!
//! # Example
//!
//! ```rust
//! use mercurius_catalog::prelude::*;
//!
//! let sofa = Product::builder("Sofá Retrátil", 1000.0, "Sala")
//!     .discount(20.0)
//!     .build();
//! assert_eq!(sofa.slug, "sofa-retratil");
//! assert_eq!(sofa.final_price(), 800.0);
//!
//! let filter = CatalogFilter::new()
//!     .with_category(CategoryFilter::only("Sala"))
//!     .with_sort(SortOrder::PriceAsc);
//! let view = apply(&[sofa], &filter);
//! assert_eq!(view.len(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod slug;

pub mod catalog;
pub mod view;

pub use catalog::{Product, ProductInput, ProductPatch};
pub use error::CatalogError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        category_totals, CategoryTotal, InventoryStats, Product, ProductBuilder, ProductInput,
        ProductPatch,
    };

    // Slugs and pricing
    pub use crate::pricing::{final_price, PriceBreakdown};
    pub use crate::slug::{assign_unique_slug, normalize, slug_for};

    // View
    pub use crate::view::{apply, categories, related, CatalogFilter, CategoryFilter, SortOrder};
}
