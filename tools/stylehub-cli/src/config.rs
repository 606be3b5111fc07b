//! Config file loading for the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use stylehub_commerce::config::CommerceConfig;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["stylehub.toml", ".stylehub.toml", "stylehub.json"];

/// Load config from a TOML or JSON file.
pub fn load(path: &Path) -> Result<CommerceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if is_json(path) {
        return CommerceConfig::from_json(&content)
            .with_context(|| format!("Invalid JSON config: {}", path.display()));
    }

    let config: CommerceConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Save config to a file, choosing the format from its extension.
pub fn save(config: &CommerceConfig, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a commented default stylehub.toml.
pub fn generate_default_config() -> String {
    let defaults = CommerceConfig::default();
    format!(
        r#"# StyleHub storefront configuration

[pricing]
# Orders at or above this subtotal ship free (cents)
free_shipping_threshold_cents = {threshold}
flat_shipping_cents = {shipping}
# Tax rate in basis points (800 = 8%)
tax_rate_bps = {tax}
usd_to_inr_rate = {rate:.1}

[gateway]
# Simulated gateway timings (milliseconds)
warmup_ms = {warmup}
order_delay_ms = {order}
success_delay_ms = {success}
failure_delay_ms = {failure}
cancel_delay_ms = {cancel}
verify_delay_ms = {verify}
# Treat an unanswered payment prompt as cancelled after this long
# decision_timeout_ms = 300000

[store]
merchant_name = "{merchant}"
purchase_description = "{description}"
default_country = "{country}"
"#,
        threshold = defaults.pricing.free_shipping_threshold_cents,
        shipping = defaults.pricing.flat_shipping_cents,
        tax = defaults.pricing.tax_rate_bps,
        rate = defaults.pricing.usd_to_inr_rate,
        warmup = defaults.gateway.warmup_ms,
        order = defaults.gateway.order_delay_ms,
        success = defaults.gateway.success_delay_ms,
        failure = defaults.gateway.failure_delay_ms,
        cancel = defaults.gateway.cancel_delay_ms,
        verify = defaults.gateway.verify_delay_ms,
        merchant = defaults.store.merchant_name,
        description = defaults.store.purchase_description,
        country = defaults.store.default_country,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: CommerceConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CommerceConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: CommerceConfig = toml::from_str("[pricing]\ntax_rate_bps = 500\n").unwrap();
        assert_eq!(parsed.pricing.tax_rate_bps, 500);
        assert_eq!(parsed.pricing.flat_shipping_cents, 599);
        assert_eq!(parsed.store.merchant_name, "StyleHub");
    }

    #[test]
    fn test_load_json_validates() {
        let dir = std::env::temp_dir().join(format!("stylehub-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stylehub.json");

        std::fs::write(&path, r#"{"pricing": {"tax_rate_bps": 500}}"#).unwrap();
        let config = load(&path).unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 500);

        std::fs::write(&path, r#"{"pricing": {"usd_to_inr_rate": 0.0}}"#).unwrap();
        assert!(load(&path).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
