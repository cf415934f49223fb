use std::io;

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::Money;
use till::{
    draft::{CustomerDetails, DEFAULT_PHONE_PREFIX, PaymentMethod},
    pricing::{DeliveryFee, PriceBreakdown},
    tax::TaxRate,
    variants::Barcode,
};
use till_app::{
    backend::BackendConfig, context::AppContext, domain::orders::assembly::OrderAssembly,
};

use crate::cli::parse_scan;

#[derive(Debug, Args)]
pub(crate) struct SubmitArgs {
    /// Items to scan, BARCODE or BARCODE:QTY
    #[arg(required = true)]
    scans: Vec<String>,

    /// Storefront backend base URL
    #[arg(long, env = "TILL_BACKEND_URL")]
    backend_url: String,

    /// Payment method: card, upi, netbanking, wallet or cash-on-delivery
    #[arg(long)]
    payment: PaymentMethod,

    /// Customer name; requires --customer-phone
    #[arg(long)]
    customer_name: Option<String>,

    /// Customer phone; requires --customer-name
    #[arg(long)]
    customer_phone: Option<String>,

    /// Country code prefix applied to bare phone numbers
    #[arg(long, default_value = DEFAULT_PHONE_PREFIX)]
    phone_prefix: String,

    /// Loyalty card barcode to resolve a discount for
    #[arg(long)]
    loyalty: Option<String>,

    /// Delivery fee in minor units for the preview breakdown
    #[arg(long, default_value_t = 0)]
    delivery_fee: i64,

    /// Tax in percent points for the preview breakdown
    #[arg(long, default_value = "0")]
    tax_percent: Decimal,
}

pub(crate) async fn run(args: SubmitArgs) -> Result<(), String> {
    let ctx = AppContext::from_config(BackendConfig {
        base_url: args.backend_url.clone(),
    });

    let mut scanned = Vec::new();

    for scan in &args.scans {
        let (barcode, quantity) = parse_scan(scan)?;

        let variant = ctx
            .variants
            .variant_by_barcode(&barcode)
            .await
            .map_err(|error| format!("failed to look up {barcode}: {error}"))?;

        scanned.push((variant, quantity));
    }

    let Some((first, _)) = scanned.first() else {
        return Err("no items scanned".to_string());
    };

    let currency = first.price().currency();

    let mut assembly = OrderAssembly::new(currency, ctx.loyalty.clone(), ctx.orders.clone());

    for (variant, quantity) in &scanned {
        let stored = assembly
            .draft_mut()
            .cart_mut()
            .add(variant, *quantity)
            .map_err(|error| format!("failed to add {} to the cart: {error}", variant.name()))?;

        if stored < *quantity {
            println!("{}: only {stored} in stock", variant.name());
        }
    }

    let customer = CustomerDetails::from_parts(
        args.customer_name.clone(),
        args.customer_phone.clone(),
        &args.phone_prefix,
    )
    .map_err(|error| format!("invalid customer details: {error}"))?;

    assembly.draft_mut().set_customer(customer);
    assembly.draft_mut().set_payment_method(args.payment);

    if let Some(loyalty) = &args.loyalty {
        let percent = assembly
            .apply_loyalty(Barcode::new(loyalty))
            .await
            .map_err(|error| format!("failed to resolve loyalty discount: {error}"))?;

        println!("loyalty discount: {percent}");
    }

    let fee = DeliveryFee::new(Money::from_minor(args.delivery_fee, currency))
        .map_err(|error| format!("invalid delivery fee: {error}"))?;

    let tax =
        TaxRate::new(args.tax_percent).map_err(|error| format!("invalid tax rate: {error}"))?;

    let draft = assembly.draft();

    let breakdown = PriceBreakdown::compute(draft.cart(), draft.discount_percent(), fee, tax)
        .map_err(|error| format!("failed to price the draft: {error}"))?;

    breakdown
        .write_to(io::stdout().lock(), draft.cart())
        .map_err(|error| format!("failed to render the breakdown: {error}"))?;

    let created = assembly
        .submit()
        .await
        .map_err(|error| format!("failed to submit the order: {error}"))?;

    println!("order_id: {}", created.id);
    println!("amount: {}", created.amount);
    println!("payment_status: {}", created.payment_status);
    println!("order_status: {}", created.order_status);

    // The list comes back from the backend, never from a local insert
    let orders = ctx
        .orders
        .orders()
        .await
        .map_err(|error| format!("failed to fetch the order list: {error}"))?;

    println!("\norders:");

    for order in orders {
        println!(
            "{}  {}  {}  {}",
            order.id, order.amount, order.order_status, order.created_at
        );
    }

    Ok(())
}
