//! Category grouping for the admin dashboard.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count and unsold value of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Number of products in the category, sold or not.
    pub count: usize,
    /// Sum of final prices of the products still for sale.
    pub value: f64,
}

impl CategoryTotal {
    pub fn value_money(&self, currency: Currency) -> Money {
        Money::new(self.value, currency)
    }
}

/// Group products by category, sorted by category name.
pub fn category_totals(products: &[Product]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, CategoryTotal> = BTreeMap::new();

    for product in products {
        let entry = groups
            .entry(product.category.as_str())
            .or_insert_with(|| CategoryTotal {
                category: product.category.clone(),
                count: 0,
                value: 0.0,
            });
        entry.count += 1;
        if product.is_available() {
            entry.value += product.final_price();
        }
    }

    groups.into_values().collect()
}

/// Headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub sold: usize,
}

impl InventoryStats {
    pub fn from_products(products: &[Product]) -> Self {
        let sold = products.iter().filter(|p| p.sold).count();
        Self {
            total: products.len(),
            available: products.len() - sold,
            sold,
        }
    }
}
