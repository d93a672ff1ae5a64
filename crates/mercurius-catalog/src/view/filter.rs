//! Catalog filter configuration.

use crate::catalog::Product;
use crate::view::SortOrder;
use serde::{Deserialize, Serialize};

/// Which categories a catalog view shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only products whose category equals this name exactly.
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    /// Build from an optional request parameter; absent or blank means all.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(name) if !name.is_empty() => CategoryFilter::Only(name.to_string()),
            _ => CategoryFilter::All,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

/// Filter and sort settings for a catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    pub sort: SortOrder,
    /// When false, sold products are hidden.
    pub show_sold: bool,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            sort: SortOrder::Newest,
            show_sold: true,
        }
    }
}

impl CatalogFilter {
    /// Storefront defaults: every category, newest first, sold items shown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_show_sold(mut self, show_sold: bool) -> Self {
        self.show_sold = show_sold;
        self
    }

    /// Check whether a product survives both filter steps.
    pub fn admits(&self, product: &Product) -> bool {
        self.category.matches(product) && (self.show_sold || !product.sold)
    }
}
