//! Pricing
//!
//! The checkout price breakdown: subtotal, discount, delivery fee and tax
//! combined into the total a customer pays. Tax applies to the undiscounted
//! subtotal, and every intermediate amount is kept so displays never have
//! to re-derive one.

use std::{fmt, io};

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::builder::Builder;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    discounts::{DiscountError, DiscountPercent, discount_amount},
    render::{self, SummaryLine},
    tax::{TaxError, TaxRate, TaxRates, compute_tax},
};

/// Errors that can occur when computing a price breakdown.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The delivery fee was negative.
    #[error("delivery fee cannot be negative")]
    NegativeDeliveryFee,

    /// Errors bubbled up from cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Errors bubbled up from discount calculation.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Errors bubbled up from tax calculation.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error while rendering the breakdown.
    #[error("IO error")]
    IO,
}

/// Delivery fee charged on an order.
///
/// A zero fee displays as `FREE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryFee<'a>(Money<'a, Currency>);

impl<'a> DeliveryFee<'a> {
    /// Create a delivery fee.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError::NegativeDeliveryFee`] if the fee is
    /// negative.
    pub fn new(amount: Money<'a, Currency>) -> Result<Self, PricingError> {
        if amount.to_minor_units() < 0 {
            return Err(PricingError::NegativeDeliveryFee);
        }

        Ok(Self(amount))
    }

    /// Free delivery in the given currency.
    #[must_use]
    pub fn free(currency: &'static Currency) -> Self {
        Self(Money::from_minor(0, currency))
    }

    /// The fee amount.
    #[must_use]
    pub fn amount(&self) -> Money<'a, Currency> {
        self.0
    }

    /// Whether delivery is free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.0.to_minor_units() == 0
    }
}

impl fmt::Display for DeliveryFee<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            f.write_str("FREE")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The price breakdown for a cart at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown<'a> {
    subtotal: Money<'a, Currency>,
    discount_percent: DiscountPercent,
    discount_amount: Money<'a, Currency>,
    delivery_fee: DeliveryFee<'a>,
    tax_rate: TaxRate,
    tax_amount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PriceBreakdown<'a> {
    /// Compute the breakdown for a cart.
    ///
    /// An empty cart yields a zero subtotal, so the total is just the
    /// delivery fee.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a cart total overflows, a percentage
    /// cannot be applied, or money arithmetic fails.
    pub fn compute(
        cart: &Cart<'a>,
        discount_percent: DiscountPercent,
        delivery_fee: DeliveryFee<'a>,
        tax_rate: TaxRate,
    ) -> Result<Self, PricingError> {
        let subtotal = cart.subtotal()?;
        let discount = discount_amount(subtotal, discount_percent)?;
        let tax = compute_tax(&[subtotal], TaxRates::Flat(tax_rate))?;
        let total = compute_total(subtotal, discount, delivery_fee.amount(), tax)?;

        Ok(Self {
            subtotal,
            discount_percent,
            discount_amount: discount,
            delivery_fee,
            tax_rate,
            tax_amount: tax,
            total,
        })
    }

    /// Sum of all line totals before adjustments.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// The discount applied to the subtotal.
    #[must_use]
    pub fn discount_percent(&self) -> DiscountPercent {
        self.discount_percent
    }

    /// The discount in money terms.
    #[must_use]
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        self.discount_amount
    }

    /// The delivery fee.
    #[must_use]
    pub fn delivery_fee(&self) -> DeliveryFee<'a> {
        self.delivery_fee
    }

    /// The tax rate applied to the subtotal.
    #[must_use]
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The tax in money terms.
    #[must_use]
    pub fn tax_amount(&self) -> Money<'a, Currency> {
        self.tax_amount
    }

    /// The total the customer pays.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Render the cart lines and this breakdown as a till display table.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError::IO`] if the output cannot be written, or
    /// a cart error if a line total overflows.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), PricingError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for line in cart.iter() {
            builder.push_record([
                line.variant().name().to_string(),
                line.quantity().to_string(),
                format!("{}", line.variant().price()),
                format!("{}", line.line_total()?),
            ]);
        }

        render::write_table(&mut out, builder, 1..4).map_err(|_err| PricingError::IO)?;

        let summary = [
            SummaryLine::new(" Subtotal:", format!("{}  ", self.subtotal)),
            SummaryLine::new(
                format!(" Discount ({}):", self.discount_percent),
                format!("-{}  ", self.discount_amount),
            ),
            SummaryLine::new(" Delivery:", format!("{}  ", self.delivery_fee)),
            SummaryLine::new(
                format!(" Tax ({}):", self.tax_rate),
                format!("{}  ", self.tax_amount),
            ),
            SummaryLine::new(
                " \x1b[1mTotal:\x1b[0m",
                format!("\x1b[1m{}  \x1b[0m", self.total),
            ),
        ];

        render::write_summary(&mut out, &summary).map_err(|_err| PricingError::IO)
    }
}

/// Combine the four breakdown components into the final total.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the currencies differ or arithmetic fails.
pub fn compute_total<'a>(
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    tax: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, MoneyError> {
    subtotal.sub(discount)?.add(delivery_fee)?.add(tax)
}

#[cfg(test)]
mod tests {
    use rust_decimal::{Decimal, prelude::FromPrimitive};
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use crate::variants::{Barcode, Variant, VariantId};

    use super::*;

    fn scenario_cart() -> Result<Cart<'static>, CartError> {
        let tee_shirt = test_variant("VAR-TSHIRT", 14500, 10);
        let jeans = test_variant("VAR-JEANS", 18000, 5);

        let mut cart = Cart::new(INR);
        cart.add(&tee_shirt, 2)?;
        cart.add(&jeans, 1)?;

        Ok(cart)
    }

    fn test_variant(id: &str, price_minor: i64, stock: u32) -> Variant<'static> {
        Variant::new(
            VariantId::new(id),
            Barcode::new(format!("bc-{id}")),
            id.to_string(),
            Money::from_minor(price_minor, INR),
            stock,
        )
        .unwrap_or_else(|err| panic!("valid variant: {err}"))
    }

    fn points(value: i64) -> Decimal {
        Decimal::from_i64(value).unwrap_or(Decimal::ZERO)
    }

    #[test]
    fn breakdown_combines_discount_fee_and_tax() -> TestResult {
        let cart = scenario_cart()?;

        let breakdown = PriceBreakdown::compute(
            &cart,
            DiscountPercent::new(points(20))?,
            DeliveryFee::new(Money::from_minor(1500, INR))?,
            TaxRate::zero(),
        )?;

        assert_eq!(breakdown.subtotal(), Money::from_minor(47000, INR));
        assert_eq!(breakdown.discount_amount(), Money::from_minor(9400, INR));
        assert_eq!(breakdown.tax_amount(), Money::from_minor(0, INR));
        assert_eq!(breakdown.total(), Money::from_minor(39100, INR));

        Ok(())
    }

    #[test]
    fn tax_applies_to_the_undiscounted_subtotal() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add(&test_variant("VAR-KURTA", 24000, 8), 1)?;

        let breakdown = PriceBreakdown::compute(
            &cart,
            DiscountPercent::zero(),
            DeliveryFee::new(Money::from_minor(1500, INR))?,
            TaxRate::new(points(13))?,
        )?;

        assert_eq!(breakdown.tax_amount(), Money::from_minor(3120, INR));
        assert_eq!(breakdown.total(), Money::from_minor(28620, INR));

        Ok(())
    }

    #[test]
    fn empty_cart_total_is_the_delivery_fee() -> TestResult {
        let cart = Cart::new(INR);

        let breakdown = PriceBreakdown::compute(
            &cart,
            DiscountPercent::new(points(20))?,
            DeliveryFee::new(Money::from_minor(1500, INR))?,
            TaxRate::new(points(13))?,
        )?;

        assert_eq!(breakdown.subtotal(), Money::from_minor(0, INR));
        assert_eq!(breakdown.discount_amount(), Money::from_minor(0, INR));
        assert_eq!(breakdown.tax_amount(), Money::from_minor(0, INR));
        assert_eq!(breakdown.total(), Money::from_minor(1500, INR));

        Ok(())
    }

    #[test]
    fn full_discount_still_charges_fee_and_tax() -> TestResult {
        let cart = scenario_cart()?;

        let breakdown = PriceBreakdown::compute(
            &cart,
            DiscountPercent::new(points(100))?,
            DeliveryFee::new(Money::from_minor(1500, INR))?,
            TaxRate::new(points(13))?,
        )?;

        // 47000 - 47000 + 1500 + 6110
        assert_eq!(breakdown.total(), Money::from_minor(7610, INR));

        Ok(())
    }

    #[test]
    fn negative_delivery_fee_is_rejected() {
        let result = DeliveryFee::new(Money::from_minor(-1, INR));

        assert!(matches!(result, Err(PricingError::NegativeDeliveryFee)));
    }

    #[test]
    fn zero_fee_displays_as_free() -> TestResult {
        let free = DeliveryFee::free(INR);
        let paid = DeliveryFee::new(Money::from_minor(1500, INR))?;

        assert!(free.is_free());
        assert_eq!(free.to_string(), "FREE");
        assert!(!paid.is_free());
        assert_ne!(paid.to_string(), "FREE");

        Ok(())
    }

    #[test]
    fn compute_total_follows_the_breakdown_formula() -> TestResult {
        let total = compute_total(
            Money::from_minor(47000, INR),
            Money::from_minor(9400, INR),
            Money::from_minor(1500, INR),
            Money::from_minor(0, INR),
        )?;

        assert_eq!(total, Money::from_minor(39100, INR));

        Ok(())
    }

    #[test]
    fn compute_total_errors_on_currency_mismatch() {
        let result = compute_total(
            Money::from_minor(47000, INR),
            Money::from_minor(9400, USD),
            Money::from_minor(1500, INR),
            Money::from_minor(0, INR),
        );

        assert!(matches!(result, Err(MoneyError::CurrencyMismatch { .. })));
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let cart = scenario_cart()?;

        let breakdown = PriceBreakdown::compute(
            &cart,
            DiscountPercent::new(points(20))?,
            DeliveryFee::free(INR),
            TaxRate::zero(),
        )?;

        let mut out = Vec::new();
        breakdown.write_to(&mut out, &cart)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("VAR-TSHIRT"));
        assert!(output.contains("VAR-JEANS"));
        assert!(output.contains("Subtotal:"));
        assert!(output.contains("Discount"));
        assert!(output.contains("FREE"));
        assert!(output.contains("Total:"));

        Ok(())
    }
}
