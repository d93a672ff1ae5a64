//! Catalog views.
//!
//! Derives the filtered, ordered product list shown on the storefront.
//! The source slice is never mutated; each call returns a fresh sequence.

mod collate;
mod filter;
mod sort;

pub use collate::compare_names;
pub use filter::{CatalogFilter, CategoryFilter};
pub use sort::SortOrder;

use crate::catalog::Product;
use std::collections::BTreeSet;

/// Borrowing variant of [`apply`].
pub fn select<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    let mut view: Vec<&Product> = products.iter().filter(|p| filter.admits(p)).collect();
    // `sort_by` is stable, so equal keys keep their repository order.
    view.sort_by(|a, b| filter.sort.compare(a, b));

    tracing::debug!(
        total = products.len(),
        shown = view.len(),
        sort = %filter.sort,
        "catalog view derived"
    );
    view
}

/// Filter by category and sold state, then sort.
pub fn apply(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
    select(products, filter).into_iter().cloned().collect()
}

/// Distinct category names, sorted, for the category picker.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Up to `limit` other products from the same category, in input order.
pub fn related<'a>(products: &'a [Product], product: &Product, limit: usize) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn catalog() -> Vec<Product> {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        vec![
            Product::builder("Sofá", 1000.0, "Sala")
                .discount(20.0)
                .created_at(base)
                .build(),
            Product::builder("Rack", 300.0, "Sala")
                .sold(true)
                .created_at(base + Duration::days(2))
                .build(),
            Product::builder("Fogão", 500.0, "Cozinha")
                .created_at(base + Duration::days(1))
                .build(),
            Product::builder("Armário", 900.0, "Cozinha").build(),
        ]
    }

    fn names(view: &[Product]) -> Vec<&str> {
        view.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_defaults_sort_newest_and_show_everything() {
        let view = apply(&catalog(), &CatalogFilter::new());
        assert_eq!(names(&view), ["Rack", "Fogão", "Sofá", "Armário"]);
    }

    #[test]
    fn test_oldest_puts_missing_timestamp_first() {
        let view = apply(&catalog(), &CatalogFilter::new().with_sort(SortOrder::Oldest));
        assert_eq!(names(&view), ["Armário", "Sofá", "Fogão", "Rack"]);
    }

    #[test]
    fn test_category_and_sold_filters() {
        let filter = CatalogFilter::new()
            .with_category(CategoryFilter::only("Sala"))
            .with_show_sold(false);
        let view = apply(&catalog(), &filter);
        assert_eq!(names(&view), ["Sofá"]);
    }

    #[test]
    fn test_price_sorts_use_final_price() {
        let view = apply(&catalog(), &CatalogFilter::new().with_sort(SortOrder::PriceAsc));
        assert_eq!(names(&view), ["Rack", "Fogão", "Sofá", "Armário"]);

        let view = apply(&catalog(), &CatalogFilter::new().with_sort(SortOrder::PriceDesc));
        assert_eq!(names(&view), ["Armário", "Sofá", "Fogão", "Rack"]);
    }

    #[test]
    fn test_name_sorts() {
        let products = vec![
            Product::builder("B", 100.0, "X").build(),
            Product::builder("A", 50.0, "X").build(),
        ];
        let view = apply(&products, &CatalogFilter::new().with_sort(SortOrder::NameAsc));
        assert_eq!(names(&view), ["A", "B"]);

        let view = apply(&catalog(), &CatalogFilter::new().with_sort(SortOrder::NameDesc));
        assert_eq!(names(&view), ["Sofá", "Rack", "Fogão", "Armário"]);
    }

    #[test]
    fn test_hide_sold() {
        let products = vec![
            Product::builder("Vendido", 10.0, "X").sold(true).build(),
            Product::builder("Disponível", 10.0, "X").build(),
        ];
        let view = apply(&products, &CatalogFilter::new().with_show_sold(false));
        assert_eq!(names(&view), ["Disponível"]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let products = vec![
            Product::builder("Primeiro", 10.0, "X").build(),
            Product::builder("Segundo", 10.0, "X").build(),
            Product::builder("Terceiro", 10.0, "X").build(),
        ];
        let view = apply(&products, &CatalogFilter::new().with_sort(SortOrder::PriceAsc));
        assert_eq!(names(&view), ["Primeiro", "Segundo", "Terceiro"]);
    }

    #[test]
    fn test_source_is_untouched() {
        let products = catalog();
        let before = products.clone();
        let _ = apply(&products, &CatalogFilter::new().with_sort(SortOrder::NameAsc));
        assert_eq!(products, before);
    }

    #[test]
    fn test_categories() {
        assert_eq!(categories(&catalog()), ["Cozinha", "Sala"]);
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_related() {
        let products = catalog();
        let related = related(&products, &products[0], 3);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Rack");

        let none = super::related(&products, &products[0], 0);
        assert!(none.is_empty());
    }
}
