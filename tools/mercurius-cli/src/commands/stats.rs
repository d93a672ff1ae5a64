//! Dashboard numbers.

use anyhow::Result;
use mercurius_store::ProductService;

use crate::context::Context;

/// Run the stats command.
pub fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let dashboard = ProductService::new(&store).dashboard()?;

    if ctx.output.is_json() {
        ctx.output.json(&dashboard);
        return Ok(());
    }

    let currency = ctx.currency();
    ctx.output.header("Inventory");
    ctx.output.kv("Total", &dashboard.stats.total.to_string());
    ctx.output.kv("Available", &dashboard.stats.available.to_string());
    ctx.output.kv("Sold", &dashboard.stats.sold.to_string());

    if dashboard.categories.is_empty() {
        return Ok(());
    }

    ctx.output.header("By category");
    let widths = [20, 8, 18];
    ctx.output.table_row(&["CATEGORY", "ITEMS", "UNSOLD VALUE"], &widths);
    for total in &dashboard.categories {
        let count = total.count.to_string();
        let value = total.value_money(currency).display();
        ctx.output.table_row(
            &[total.category.as_str(), count.as_str(), value.as_str()],
            &widths,
        );
    }

    Ok(())
}
