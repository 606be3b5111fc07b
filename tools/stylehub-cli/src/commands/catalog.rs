//! List catalog products.

use anyhow::Result;
use stylehub_commerce::prelude::*;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::price_label;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = InMemoryCatalog::seed();
    let products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| !args.featured || p.is_featured)
        .filter(|p| {
            args.category
                .as_deref()
                .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("StyleHub Catalog");
    if products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [4, 30, 26];
    ctx.output.table_row(&["ID", "NAME", "PRICE"], &widths);
    for product in &products {
        let mut name = product.name.clone();
        if !product.in_stock {
            name.push_str(" (sold out)");
        }
        let price = price_label(product.price, product.original_price);
        ctx.output
            .table_row(&[product.id.as_str(), &name, &price], &widths);
        ctx.output.kv("sizes", &product.sizes.join(", "));
        ctx.output.kv("colors", &product.colors.join(", "));
    }

    Ok(())
}
