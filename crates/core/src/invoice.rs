//! Invoices
//!
//! Read side rendering of a fetched order. The backend's charged total is
//! authoritative and is never recomputed away; subtotal and tax are
//! re-derived from the purchased lines purely for display.

use std::{fmt, io, str::FromStr};

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::builder::Builder;
use thiserror::Error;

use crate::{
    render::{self, SummaryLine},
    tax::{TaxError, TaxRate, TaxRates, compute_tax},
    validation::ValidationError,
};

/// Errors that can occur when rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// A line total overflowed the minor unit range.
    #[error("line total for {0:?} overflows")]
    AmountOverflow(String),

    /// Errors bubbled up from tax recomputation.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error while writing the invoice.
    #[error("IO error")]
    IO,
}

/// How tax is re-derived from the purchased lines for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceTaxMode {
    /// Apply the first line's tax rate to the whole subtotal.
    ///
    /// This mirrors how the charged totals were computed at checkout, so
    /// recomputed and charged figures agree on uniform-rate orders.
    #[default]
    FirstLine,

    /// Tax each line at its own rate and sum the results.
    PerLineWeighted,
}

impl InvoiceTaxMode {
    /// The flag name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstLine => "first-line",
            Self::PerLineWeighted => "per-line",
        }
    }
}

impl fmt::Display for InvoiceTaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceTaxMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-line" => Ok(Self::FirstLine),
            "per-line" => Ok(Self::PerLineWeighted),
            other => Err(ValidationError::UnknownTaxMode(other.to_string())),
        }
    }
}

/// One purchased line on an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine<'a> {
    name: String,
    quantity: u32,
    price_at_purchase: Money<'a, Currency>,
    tax_rate: Option<TaxRate>,
}

impl<'a> InvoiceLine<'a> {
    /// Create an invoice line.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        price_at_purchase: Money<'a, Currency>,
        tax_rate: Option<TaxRate>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            price_at_purchase,
            tax_rate,
        }
    }

    /// The purchased variant's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units purchased.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The unit price locked in at purchase time.
    #[must_use]
    pub fn price_at_purchase(&self) -> Money<'a, Currency> {
        self.price_at_purchase
    }

    /// The line's tax rate, if it was taxed.
    #[must_use]
    pub fn tax_rate(&self) -> Option<TaxRate> {
        self.tax_rate
    }

    /// The line total (purchase price times quantity).
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError::AmountOverflow`] if the total cannot be
    /// represented in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, InvoiceError> {
        let total_minor = self
            .price_at_purchase
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| InvoiceError::AmountOverflow(self.name.clone()))?;

        Ok(Money::from_minor(total_minor, self.price_at_purchase.currency()))
    }
}

/// An invoice for a fetched order.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice<'a> {
    reference: String,
    lines: Vec<InvoiceLine<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> Invoice<'a> {
    /// Create an invoice from an order's reference, lines and charged
    /// total.
    #[must_use]
    pub fn new(
        reference: impl Into<String>,
        lines: Vec<InvoiceLine<'a>>,
        total: Money<'a, Currency>,
    ) -> Self {
        Self {
            reference: reference.into(),
            lines,
            total,
        }
    }

    /// The order reference this invoice was raised for.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The purchased lines.
    #[must_use]
    pub fn lines(&self) -> &[InvoiceLine<'a>] {
        &self.lines
    }

    /// The charged total. Authoritative, never recomputed.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Re-derive the subtotal from the purchased lines.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a line total overflows or money
    /// arithmetic fails.
    pub fn recomputed_subtotal(&self) -> Result<Money<'a, Currency>, InvoiceError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.total.currency()), |acc, line| {
                Ok(acc.add(line.line_total()?)?)
            })
    }

    /// Re-derive the tax from the purchased lines.
    ///
    /// In [`InvoiceTaxMode::FirstLine`] an untaxed or absent first line
    /// yields zero tax.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a line total overflows or the tax
    /// cannot be computed.
    pub fn recomputed_tax(&self, mode: InvoiceTaxMode) -> Result<Money<'a, Currency>, InvoiceError> {
        if self.lines.is_empty() {
            return Ok(Money::from_minor(0, self.total.currency()));
        }

        match mode {
            InvoiceTaxMode::FirstLine => {
                let Some(rate) = self.lines.first().and_then(InvoiceLine::tax_rate) else {
                    return Ok(Money::from_minor(0, self.total.currency()));
                };

                let subtotal = self.recomputed_subtotal()?;

                Ok(compute_tax(&[subtotal], TaxRates::Flat(rate))?)
            }
            InvoiceTaxMode::PerLineWeighted => {
                let amounts = self
                    .lines
                    .iter()
                    .map(InvoiceLine::line_total)
                    .collect::<Result<Vec<_>, _>>()?;

                let rates: Vec<Option<TaxRate>> =
                    self.lines.iter().map(InvoiceLine::tax_rate).collect();

                Ok(compute_tax(&amounts, TaxRates::PerLine(&rates))?)
            }
        }
    }

    /// Render the invoice as a printable table.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError::IO`] if the output cannot be written, or
    /// any recomputation error.
    pub fn write_to(&self, mut out: impl io::Write, mode: InvoiceTaxMode) -> Result<(), InvoiceError> {
        writeln!(out, "\nInvoice for order {}", self.reference).map_err(|_err| InvoiceError::IO)?;

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total", "Tax"]);

        for line in &self.lines {
            builder.push_record([
                line.name().to_string(),
                line.quantity().to_string(),
                format!("{}", line.price_at_purchase()),
                format!("{}", line.line_total()?),
                line.tax_rate()
                    .map_or_else(|| "-".to_string(), |rate| rate.to_string()),
            ]);
        }

        render::write_table(&mut out, builder, 1..4).map_err(|_err| InvoiceError::IO)?;

        let summary = [
            SummaryLine::new(" Subtotal:", format!("{}  ", self.recomputed_subtotal()?)),
            SummaryLine::new(
                format!(" Tax ({mode}):"),
                format!("{}  ", self.recomputed_tax(mode)?),
            ),
            SummaryLine::new(
                " \x1b[1mTotal:\x1b[0m",
                format!("\x1b[1m{}  \x1b[0m", self.total),
            ),
        ];

        render::write_summary(&mut out, &summary).map_err(|_err| InvoiceError::IO)
    }
}
