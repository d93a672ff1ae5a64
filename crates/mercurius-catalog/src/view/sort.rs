//! Catalog sort orders.

use crate::catalog::Product;
use crate::view::collate::compare_names;
use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Final price, low to high.
    PriceAsc,
    /// Final price, high to low.
    PriceDesc,
    /// Name A-Z.
    NameAsc,
    /// Name Z-A.
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
    ];

    /// Query-string key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
            SortOrder::NameAsc => "Name: A-Z",
            SortOrder::NameDesc => "Name: Z-A",
        }
    }

    /// Compare two products under this order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Newest => b.created_millis().cmp(&a.created_millis()),
            SortOrder::Oldest => a.created_millis().cmp(&b.created_millis()),
            SortOrder::PriceAsc => a.final_price().total_cmp(&b.final_price()),
            SortOrder::PriceDesc => b.final_price().total_cmp(&a.final_price()),
            SortOrder::NameAsc => compare_names(&a.name, &b.name),
            SortOrder::NameDesc => compare_names(&b.name, &a.name),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    /// Accepts the query-string keys plus the storefront's older
    /// Portuguese keys (`recentes`, `menor-preco`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" | "recentes" => Ok(SortOrder::Newest),
            "oldest" | "antigos" => Ok(SortOrder::Oldest),
            "price-asc" | "menor-preco" => Ok(SortOrder::PriceAsc),
            "price-desc" | "maior-preco" => Ok(SortOrder::PriceDesc),
            "name-asc" | "nome-az" => Ok(SortOrder::NameAsc),
            "name-desc" | "nome-za" => Ok(SortOrder::NameDesc),
            other => Err(CatalogError::UnknownSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
