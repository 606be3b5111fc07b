//! Configuration management commands.

use anyhow::{bail, Result};

use stylehub_commerce::config::CommerceConfig;

use super::{ConfigArgs, ConfigCommand, ConfigFormat};
use crate::config::{generate_default_config, save};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, format } => init_config(force, format, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_shipping_threshold",
        &pricing.free_shipping_threshold().to_string(),
    );
    ctx.output.kv("flat_shipping", &pricing.flat_shipping().to_string());
    ctx.output.kv(
        "tax_rate",
        &format!("{:.2}%", pricing.tax_rate_bps as f64 / 100.0),
    );
    ctx.output.kv("usd_to_inr_rate", &pricing.usd_to_inr_rate.to_string());

    let gateway = &ctx.config.gateway;
    ctx.output.info("");
    ctx.output.info("[gateway]");
    ctx.output.kv("warmup_ms", &gateway.warmup_ms.to_string());
    ctx.output.kv("order_delay_ms", &gateway.order_delay_ms.to_string());
    ctx.output.kv("success_delay_ms", &gateway.success_delay_ms.to_string());
    ctx.output.kv("failure_delay_ms", &gateway.failure_delay_ms.to_string());
    ctx.output.kv("cancel_delay_ms", &gateway.cancel_delay_ms.to_string());
    ctx.output.kv("verify_delay_ms", &gateway.verify_delay_ms.to_string());
    if let Some(timeout) = gateway.decision_timeout_ms {
        ctx.output.kv("decision_timeout_ms", &timeout.to_string());
    }

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("merchant_name", &store.merchant_name);
    ctx.output.kv("purchase_description", &store.purchase_description);
    ctx.output.kv("default_country", &store.default_country);

    Ok(())
}

async fn init_config(force: bool, format: ConfigFormat, ctx: &Context) -> Result<()> {
    let config_path = match format {
        ConfigFormat::Toml => ctx.cwd.join("stylehub.toml"),
        ConfigFormat::Json => ctx.cwd.join("stylehub.json"),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    match format {
        ConfigFormat::Toml => std::fs::write(&config_path, generate_default_config())?,
        ConfigFormat::Json => save(&CommerceConfig::default(), &config_path)?,
    }
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let Some(path) = &ctx.config_path else {
        ctx.output
            .warn("No config file found. Run `stylehub config init` to create one.");
        return Ok(());
    };

    ctx.output.kv("file", &path.display().to_string());
    let config = &ctx.config;
    let mut warnings: Vec<String> = Vec::new();

    if config.pricing.tax_rate_bps == 0 {
        warnings.push("pricing.tax_rate_bps is 0; orders will not be taxed".to_string());
    }
    if config.pricing.free_shipping_threshold_cents == 0 {
        warnings.push("pricing.free_shipping_threshold_cents is 0; every order ships free".to_string());
    }
    if config.store.merchant_name.trim().is_empty() {
        warnings.push("store.merchant_name is empty".to_string());
    }
    if config.gateway.decision_timeout_ms == Some(0) {
        warnings.push("gateway.decision_timeout_ms is 0; every payment will be cancelled".to_string());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
