//! Run a checkout against the mock gateway.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Local;
use dialoguer::Select;
use indicatif::ProgressBar;
use stylehub_commerce::prelude::*;

use super::{build_cart, CheckoutArgs};
use crate::commands::quote::{print_items, print_totals};
use crate::context::Context;
use crate::output::state_badge;

const READY_POLL: Duration = Duration::from_millis(50);

/// Asks on the terminal, pausing the spinner while the menu is up.
struct TerminalPrompt {
    spinner: ProgressBar,
}

#[async_trait]
impl DecisionPrompt for TerminalPrompt {
    async fn decide(&self, request: &PaymentRequest) -> PaymentDecision {
        let spinner = self.spinner.clone();
        let request = request.clone();
        let choice = tokio::task::spawn_blocking(move || {
            spinner.suspend(|| {
                println!();
                println!("  {} - {}", request.merchant_name, request.description);
                println!("  Order {}", request.order_id);
                println!("  {} <{}>", request.customer_name, request.customer_email);
                Select::new()
                    .with_prompt(format!("Pay {}", request.amount))
                    .items(&["Simulate success", "Simulate failure", "Cancel"])
                    .default(0)
                    .interact_opt()
            })
        })
        .await;

        match choice {
            Ok(Ok(Some(0))) => PaymentDecision::SimulateSuccess,
            Ok(Ok(Some(1))) => PaymentDecision::SimulateFailure,
            _ => PaymentDecision::Cancel,
        }
    }
}

fn shipping_info(args: &CheckoutArgs, ctx: &Context) -> ShippingInfo {
    ShippingInfo {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        address: args.address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        zip_code: args.zip_code.clone(),
        country: args
            .country
            .clone()
            .unwrap_or_else(|| ctx.config.store.default_country.clone()),
    }
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let catalog = InMemoryCatalog::seed();
    let mut cart = build_cart(&catalog, &args.items)?;
    let shipping = shipping_info(&args, ctx);

    let gateway = MockGateway::new(ctx.config.gateway.clone());
    let session = CheckoutSession::new(gateway, ctx.config.clone());
    let totals = session.quote(&cart)?;

    ctx.output.header("Checkout");
    print_items(ctx, &cart);
    print_totals(ctx, &totals);
    ctx.output.info("");

    let spinner = ctx.output.spinner("Loading payment system...");
    while !session.gateway().is_ready() {
        tokio::time::sleep(READY_POLL).await;
    }
    spinner.set_message("Processing payment...");

    let result = match args.outcome {
        Some(decision) => {
            let prompt = FixedDecision(decision);
            session.submit_checkout(&mut cart, &shipping, &prompt).await
        }
        None => {
            let prompt = TerminalPrompt {
                spinner: spinner.clone(),
            };
            session.submit_checkout(&mut cart, &shipping, &prompt).await
        }
    };
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            if ctx.output.is_json() {
                ctx.output.json(&receipt);
                return Ok(());
            }
            ctx.output.success("Order placed successfully!");
            ctx.output.kv("Order ID", receipt.order_id.as_str());
            ctx.output.kv("Payment ID", receipt.payment_id.as_str());
            ctx.output.kv("Amount paid", &receipt.amount_inr.to_string());
            ctx.output.kv("Placed", &Local::now().format("%Y-%m-%d %H:%M").to_string());
            ctx.output.kv("Ship to", &receipt.shipping_info.multi_line().replace('\n', ", "));
            Ok(())
        }
        Err(e) => {
            ctx.output.debug(&format!("{e}"));
            ctx.output.kv("Payment", &state_badge(session.state()));
            if e.is_retryable() && !matches!(e, CheckoutError::Validation(_)) {
                ctx.output.info("Your cart has been kept. You can try again.");
            }
            Err(anyhow!(e.user_message()))
        }
    }
}
