//! Create, edit and remove products.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use mercurius_catalog::prelude::*;
use mercurius_store::{MemoryStore, ProductAdmin, ProductService, StoreError};

use super::{ProductArgs, ProductCommand, ProductFields};
use crate::context::Context;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let (product, verb) = match args.command {
        ProductCommand::Add {
            name,
            price,
            category,
            sold,
            fields,
        } => {
            let input = ProductInput {
                name,
                price,
                discount: fields.discount,
                description: fields.description.unwrap_or_default(),
                category,
                images: fields.images,
                sold,
                condition: fields.condition,
                dimensions: fields.dimensions,
            };
            input.validate()?;
            let session = ctx.admin_session(&store)?;
            (ProductAdmin::new(&store, &session)?.create(input)?, "Created")
        }
        ProductCommand::Edit {
            product,
            name,
            price,
            category,
            fields,
            clear_condition,
            clear_dimensions,
        } => {
            let target = resolve(&store, &product)?;
            let mut patch = patch_from(name, price, category, fields);
            if clear_condition {
                patch.condition = Some(String::new());
            }
            if clear_dimensions {
                patch.dimensions = Some(String::new());
            }
            if patch.is_empty() {
                bail!("Nothing to change. Pass at least one field to update.");
            }
            patch.validate()?;
            let session = ctx.admin_session(&store)?;
            let updated = ProductAdmin::new(&store, &session)?.patch(&target.id, patch)?;
            (updated, "Updated")
        }
        ProductCommand::Sold { product, undo } => {
            let target = resolve(&store, &product)?;
            let session = ctx.admin_session(&store)?;
            let updated = ProductAdmin::new(&store, &session)?.set_sold(&target.id, !undo)?;
            (updated, if undo { "Back on sale" } else { "Marked as sold" })
        }
        ProductCommand::Import { file, replace, yes } => {
            return import(&store, ctx, &file, replace, yes);
        }
        ProductCommand::Delete { product, yes } => {
            let target = resolve(&store, &product)?;
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete \"{}\" ({})?", target.name, target.slug))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cancelled");
                    return Ok(());
                }
            }
            let session = ctx.admin_session(&store)?;
            let removed = ProductAdmin::new(&store, &session)?.delete(&target.id)?;
            (removed, "Deleted")
        }
    };

    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.success(&format!("{} \"{}\"", verb, product.name));
    ctx.output.kv("Id", product.id.as_str());
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv(
        "Price",
        &product.price_breakdown().final_money(ctx.currency()).display(),
    );
    Ok(())
}

fn import(store: &MemoryStore, ctx: &Context, file: &Path, replace: bool, yes: bool) -> Result<()> {
    let inputs = read_inputs(file)?;

    if replace && !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Replace all {} products with {} from {}?",
                store.product_count()?,
                inputs.len(),
                file.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let session = ctx.admin_session(store)?;
    let report = ProductAdmin::new(store, &session)?.import(inputs, replace)?;
    ctx.save_store(store)?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    if report.removed > 0 {
        ctx.output.info(&format!("Removed {} products", report.removed));
    }
    ctx.output
        .success(&format!("Imported {} products", report.imported.len()));
    for product in &report.imported {
        ctx.output.kv(&product.slug, &product.name);
    }
    Ok(())
}

/// Product inputs from a JSON file.
fn read_inputs(file: &Path) -> Result<Vec<ProductInput>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse product list: {}", file.display()))
}

/// Find a product by id, falling back to its slug.
fn resolve(store: &MemoryStore, key: &str) -> Result<Product, StoreError> {
    let service = ProductService::new(store);
    match service.get(&ProductId::new(key)) {
        Err(e) if e.is_not_found() => service.by_slug(key),
        other => other,
    }
}

fn patch_from(
    name: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    fields: ProductFields,
) -> ProductPatch {
    ProductPatch {
        name,
        price,
        discount: fields.discount,
        description: fields.description,
        category,
        images: (!fields.images.is_empty()).then_some(fields.images),
        sold: None,
        condition: fields.condition,
        dimensions: fields.dimensions,
    }
}
