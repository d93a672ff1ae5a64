//! Browse the catalog.

use anyhow::Result;
use mercurius_catalog::prelude::*;
use mercurius_store::{ProductService, RELATED_LIMIT};
use serde::Serialize;

use super::{CatalogArgs, ShowArgs};
use crate::context::Context;
use crate::output::{format_price, status_badge};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let filter = CatalogFilter::new()
        .with_category(CategoryFilter::from_param(args.category.as_deref()))
        .with_sort(args.sort.parse()?)
        .with_show_sold(!args.hide_sold);

    let store = ctx.open_store()?;
    let products = ProductService::new(&store).catalog(&filter)?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    let title = match &filter.category {
        CategoryFilter::All => "Catalog".to_string(),
        CategoryFilter::Only(category) => format!("Catalog: {}", category),
    };
    ctx.output
        .header(&format!("{} ({}, {})", title, filter.sort.display_name(), products.len()));

    if products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [28, 32, 14, 28];
    ctx.output.table_row(&["SLUG", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in &products {
        let price = if product.sold {
            status_badge(true)
        } else {
            format_price(product, ctx.currency())
        };
        ctx.output.table_row(
            &[
                product.slug.as_str(),
                product.name.as_str(),
                product.category.as_str(),
                price.as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct Detail<'a> {
    product: &'a Product,
    final_price: f64,
    related: &'a [Product],
}

/// Run the show command.
pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let (product, related) = ProductService::new(&store).related(&args.slug, RELATED_LIMIT)?;

    if ctx.output.is_json() {
        ctx.output.json(&Detail {
            product: &product,
            final_price: product.final_price(),
            related: &related,
        });
        return Ok(());
    }

    let currency = ctx.currency();
    let breakdown = product.price_breakdown();

    ctx.output.header(&product.name);
    ctx.output.kv("Id", product.id.as_str());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Status", &status_badge(product.sold));
    ctx.output.kv("Price", &format_price(&product, currency));
    if breakdown.has_discount() {
        ctx.output
            .kv("You save", &Money::new(breakdown.savings(), currency).display());
    }
    if let Some(condition) = &product.condition {
        ctx.output.kv("Condition", condition);
    }
    if let Some(dimensions) = &product.dimensions {
        ctx.output.kv("Dimensions", dimensions);
    }
    if !product.description.is_empty() {
        ctx.output.kv("Description", &product.description);
    }
    for image in &product.images {
        ctx.output.list_item(image);
    }

    if !related.is_empty() {
        ctx.output.header("Related");
        for item in &related {
            ctx.output.list_item(&format!(
                "{} ({}) {}",
                item.name,
                item.slug,
                format_price(item, currency)
            ));
        }
    }

    Ok(())
}
