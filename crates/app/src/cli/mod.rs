use clap::{Parser, Subcommand};
use till::variants::Barcode;

mod invoice;
mod price;
mod submit;

#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Price(price::PriceArgs),
    Submit(submit::SubmitArgs),
    Invoice(invoice::InvoiceArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Price(args) => price::run(args),
            Commands::Submit(args) => submit::run(args).await,
            Commands::Invoice(args) => invoice::run(args).await,
        }
    }
}

/// Parse a scan argument of the form `BARCODE` or `BARCODE:QTY`.
fn parse_scan(scan: &str) -> Result<(Barcode, u32), String> {
    match scan.split_once(':') {
        Some((barcode, quantity)) => {
            let quantity = quantity
                .parse::<u32>()
                .map_err(|error| format!("invalid quantity in scan {scan}: {error}"))?;

            Ok((Barcode::new(barcode), quantity))
        }
        None => Ok((Barcode::new(scan), 1)),
    }
}
