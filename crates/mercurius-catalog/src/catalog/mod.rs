//! Product catalog module.
//!
//! Contains the product document, validated inputs for admin edits, and
//! per-category totals for the dashboard.

mod category;
mod product;

pub use category::{category_totals, CategoryTotal, InventoryStats};
pub use product::{Product, ProductBuilder, ProductInput, ProductPatch};
