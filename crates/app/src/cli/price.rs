use std::{io, path::PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::Money;
use till::{
    cart::Cart,
    discounts::DiscountPercent,
    fixtures::Catalog,
    pricing::{DeliveryFee, PriceBreakdown},
    tax::TaxRate,
};

use crate::cli::parse_scan;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Items to scan, BARCODE or BARCODE:QTY
    #[arg(required = true)]
    scans: Vec<String>,

    /// Fixture catalog set name
    #[arg(long, default_value = "clothing")]
    catalog: String,

    /// Fixture directory
    #[arg(long, default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// Discount in percent points
    #[arg(long, default_value = "0")]
    discount_percent: Decimal,

    /// Delivery fee in minor units; zero prints as FREE
    #[arg(long, default_value_t = 0)]
    delivery_fee: i64,

    /// Tax in percent points, applied to the undiscounted subtotal
    #[arg(long, default_value = "0")]
    tax_percent: Decimal,
}

pub(crate) fn run(args: PriceArgs) -> Result<(), String> {
    let catalog = Catalog::from_set_in(&args.fixtures_dir, &args.catalog)
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let mut cart = Cart::new(catalog.currency());

    for scan in &args.scans {
        let (barcode, quantity) = parse_scan(scan)?;

        let variant = catalog
            .variant_by_barcode(&barcode)
            .map_err(|error| format!("failed to find variant: {error}"))?;

        let stored = cart
            .add(variant, quantity)
            .map_err(|error| format!("failed to add {barcode} to the cart: {error}"))?;

        if stored < quantity {
            println!("{}: only {stored} in stock", variant.name());
        }
    }

    let discount = DiscountPercent::new(args.discount_percent)
        .map_err(|error| format!("invalid discount: {error}"))?;

    let fee = DeliveryFee::new(Money::from_minor(args.delivery_fee, catalog.currency()))
        .map_err(|error| format!("invalid delivery fee: {error}"))?;

    let tax =
        TaxRate::new(args.tax_percent).map_err(|error| format!("invalid tax rate: {error}"))?;

    let breakdown = PriceBreakdown::compute(&cart, discount, fee, tax)
        .map_err(|error| format!("failed to price the cart: {error}"))?;

    breakdown
        .write_to(io::stdout().lock(), &cart)
        .map_err(|error| format!("failed to render the breakdown: {error}"))?;

    Ok(())
}
