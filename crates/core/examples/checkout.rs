//! Priced Cart Breakdown Example
//!
//! Scans a few variants from the bundled clothing catalog into a cart and
//! prints the priced breakdown for a 20% discount, a flat delivery fee and
//! a 5% tax on the undiscounted subtotal. The zero stock ankle socks show
//! how a scan is clamped to the stock on hand.

use std::io;

use anyhow::Result;
use rust_decimal::Decimal;
use rusty_money::Money;

use till::{
    cart::Cart,
    discounts::DiscountPercent,
    fixtures::Catalog,
    pricing::{DeliveryFee, PriceBreakdown},
    tax::TaxRate,
    variants::Barcode,
};

/// Priced Cart Breakdown Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let catalog =
        Catalog::from_set_in(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"), "clothing")?;

    let mut cart = Cart::new(catalog.currency());

    for (barcode, quantity) in [
        ("8901000000011", 2),
        ("8901000000028", 1),
        ("8901000000073", 1),
    ] {
        let variant = catalog.variant_by_barcode(&Barcode::new(barcode))?;
        let stored = cart.add(variant, quantity)?;

        if stored < quantity {
            println!("{}: only {stored} in stock", variant.name());
        }
    }

    let discount = DiscountPercent::new(Decimal::from(20))?;
    let fee = DeliveryFee::new(Money::from_minor(1500, catalog.currency()))?;
    let tax = TaxRate::new(Decimal::from(5))?;

    let breakdown = PriceBreakdown::compute(&cart, discount, fee, tax)?;

    let stdout = io::stdout();
    let handle = stdout.lock();

    breakdown.write_to(handle, &cart)?;

    Ok(())
}
