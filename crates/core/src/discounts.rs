//! Discounts
//!
//! Cart level percentage discounts. A discount is expressed in percent
//! points (`20` for 20% off), validated on construction, and applied with
//! exact decimal arithmetic: the only rounding happens once, when the
//! discount amount lands back in minor units.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Discount calculation could not be safely converted.
    #[error("discount conversion overflowed or was not representable")]
    Conversion,
}

/// A validated cart level discount in percent points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountPercent(Percentage);

impl DiscountPercent {
    /// Create a discount from percent points.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::PercentOutOfRange`] if `points` is not
    /// within `0..=100`.
    pub fn new(points: Decimal) -> Result<Self, ValidationError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(ValidationError::PercentOutOfRange(points));
        }

        Ok(Self(Percentage::from(points / Decimal::ONE_HUNDRED)))
    }

    /// A zero discount.
    #[must_use]
    pub fn zero() -> Self {
        Self(Percentage::from(Decimal::ZERO))
    }

    /// The discount in percent points.
    #[must_use]
    pub fn points(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// The discount as a decimal fraction.
    pub(crate) fn fraction(&self) -> Decimal {
        self.0 * Decimal::ONE
    }

    /// Whether this discount leaves prices unchanged.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fraction() == Decimal::ZERO
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.points())
    }
}

/// Calculate the discount amount on a subtotal.
///
/// # Errors
///
/// Returns a [`DiscountError::Conversion`] if the amount cannot be
/// represented in minor units.
pub fn discount_amount<'a>(
    subtotal: Money<'a, Currency>,
    percent: DiscountPercent,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = percent_of_minor(percent.fraction(), subtotal.to_minor_units())
        .ok_or(DiscountError::Conversion)?;

    Ok(Money::from_minor(minor, subtotal.currency()))
}

/// Apply a decimal fraction to a minor unit amount, rounding half away
/// from zero.
pub(crate) fn percent_of_minor(fraction: Decimal, minor: i64) -> Option<i64> {
    let minor = Decimal::from_i64(minor)?;
    let applied = fraction.checked_mul(minor)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
