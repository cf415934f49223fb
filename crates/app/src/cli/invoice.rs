use std::io;

use clap::Args;
use till::invoice::InvoiceTaxMode;
use till_app::{backend::BackendConfig, context::AppContext, domain::orders::models::OrderId};

#[derive(Debug, Args)]
pub(crate) struct InvoiceArgs {
    /// Backend-assigned order id
    order_id: String,

    /// Storefront backend base URL
    #[arg(long, env = "TILL_BACKEND_URL")]
    backend_url: String,

    /// Tax display mode: first-line or per-line
    #[arg(long, default_value_t = InvoiceTaxMode::default())]
    tax_mode: InvoiceTaxMode,
}

pub(crate) async fn run(args: InvoiceArgs) -> Result<(), String> {
    let ctx = AppContext::from_config(BackendConfig {
        base_url: args.backend_url.clone(),
    });

    let order = ctx
        .orders
        .order(&OrderId::new(&args.order_id))
        .await
        .map_err(|error| format!("failed to fetch order {}: {error}", args.order_id))?;

    println!("payment: {} ({})", order.payment_method, order.payment_status);
    println!("status: {}", order.order_status);
    println!("placed: {}", order.created_at);

    let invoice = order.into_invoice();

    invoice
        .write_to(io::stdout().lock(), args.tax_mode)
        .map_err(|error| format!("failed to render the invoice: {error}"))?;

    Ok(())
}
