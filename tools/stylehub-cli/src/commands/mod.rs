//! CLI command implementations.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod quote;

use std::str::FromStr;

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use stylehub_commerce::prelude::*;

/// One `--item` argument: `ID:SIZE:COLOR[:QTY]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (id, size, color, quantity) = match parts.as_slice() {
            [id, size, color] => (*id, *size, *color, 1),
            [id, size, color, qty] => {
                let qty = qty
                    .parse::<i64>()
                    .map_err(|_| format!("invalid quantity '{qty}'"))?;
                (*id, *size, *color, qty)
            }
            _ => return Err(format!("expected ID:SIZE:COLOR[:QTY], got '{s}'")),
        };
        if id.is_empty() || size.is_empty() || color.is_empty() {
            return Err(format!("expected ID:SIZE:COLOR[:QTY], got '{s}'"));
        }
        Ok(Self {
            product_id: ProductId::new(id),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        })
    }
}

/// Fill a cart from `--item` arguments, checking each against the catalog.
pub fn build_cart(catalog: &impl Catalog, items: &[ItemSpec]) -> Result<CartStore> {
    let mut cart = CartStore::new();
    for item in items {
        let product = catalog.require(&item.product_id)?;
        if !product.in_stock {
            bail!("{} is out of stock", product.name);
        }
        if !product.has_size(&item.size) {
            bail!(
                "{} is not available in size {} (sizes: {})",
                product.name,
                item.size,
                product.sizes.join(", ")
            );
        }
        if !product.has_color(&item.color) {
            bail!(
                "{} is not available in {} (colors: {})",
                product.name,
                item.color,
                product.colors.join(", ")
            );
        }
        cart.add_item(product, item.size.as_str(), item.color.as_str(), item.quantity)?;
    }
    Ok(cart)
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show featured products.
    #[arg(long)]
    pub featured: bool,

    /// Only show products in this category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Cart item as ID:SIZE:COLOR[:QTY]. Repeat for more items.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Cart item as ID:SIZE:COLOR[:QTY]. Repeat for more items.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    #[arg(long, default_value = "")]
    pub zip_code: String,

    /// Defaults to the store's configured country.
    #[arg(long)]
    pub country: Option<String>,

    /// Resolve the payment prompt without asking: success, failure or cancel.
    #[arg(long)]
    pub outcome: Option<PaymentDecision>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format to write.
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// Validate the config file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_spec_parsing() {
        let item: ItemSpec = "1:M:Black".parse().unwrap();
        assert_eq!(item.product_id, ProductId::new("1"));
        assert_eq!(item.quantity, 1);

        let item: ItemSpec = "2:32:Light Blue:3".parse().unwrap();
        assert_eq!(item.color, "Light Blue");
        assert_eq!(item.quantity, 3);

        assert!("1:M".parse::<ItemSpec>().is_err());
        assert!("1:M:Black:two".parse::<ItemSpec>().is_err());
        assert!(":M:Black".parse::<ItemSpec>().is_err());
    }

    #[test]
    fn test_build_cart_checks_variants() {
        let catalog = InMemoryCatalog::seed();
        let items = vec!["1:M:Black:2".parse().unwrap(), "7:S:Navy".parse().unwrap()];
        let cart = build_cart(&catalog, &items).unwrap();
        assert_eq!(cart.item_count(), 3);

        let bad_size = vec!["1:XXL:Black".parse().unwrap()];
        assert!(build_cart(&catalog, &bad_size).is_err());

        let unknown = vec!["99:M:Black".parse().unwrap()];
        let err = build_cart(&catalog, &unknown).unwrap_err();
        assert_eq!(err.to_string(), "Product not found: 99");

        let zero = vec!["1:M:Black:0".parse().unwrap()];
        assert!(build_cart(&catalog, &zero).is_err());
    }
}
