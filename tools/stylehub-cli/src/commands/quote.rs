//! Price a cart without checking out.

use anyhow::Result;
use serde::Serialize;
use stylehub_commerce::prelude::*;

use super::{build_cart, QuoteArgs};
use crate::context::Context;

#[derive(Serialize)]
struct Quote<'a> {
    items: &'a [CartLineItem],
    item_count: i64,
    totals: OrderTotals,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = InMemoryCatalog::seed();
    let cart = build_cart(&catalog, &args.items)?;
    let totals = compute_totals(cart.total(), &ctx.config.pricing)?;

    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            items: cart.items(),
            item_count: cart.item_count(),
            totals,
        });
        return Ok(());
    }

    ctx.output.header("Order Summary");
    print_items(ctx, &cart);
    print_totals(ctx, &totals);

    if let Some(remaining) = totals.amount_until_free_shipping {
        ctx.output.info("");
        ctx.output
            .info(&format!("Add {} more for free shipping!", remaining));
    }

    Ok(())
}

/// Print each line item with its line total.
pub fn print_items(ctx: &Context, cart: &CartStore) {
    for item in cart.items() {
        let line_total = item
            .line_total()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.output.list_item(&format!(
            "{} ({} / {}) x{}  {}",
            item.product.name, item.selected_size, item.selected_color, item.quantity, line_total
        ));
    }
}

/// Print subtotal, shipping, tax and both totals.
pub fn print_totals(ctx: &Context, totals: &OrderTotals) {
    ctx.output.info("");
    ctx.output.kv("Subtotal", &totals.subtotal.to_string());
    let shipping = if totals.has_free_shipping() {
        "Free".to_string()
    } else {
        totals.shipping.to_string()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &totals.tax.to_string());
    ctx.output.kv("Total", &totals.final_total.to_string());
    ctx.output.kv("Total (INR)", &totals.final_total_inr.to_string());
}
