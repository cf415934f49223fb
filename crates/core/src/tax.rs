//! Tax
//!
//! GST style percentage tax. A flat rate can be applied to a whole amount,
//! or per line rates can be weighted across individual line totals; both
//! paths round once, when the tax lands back in minor units.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{discounts::percent_of_minor, validation::ValidationError};

/// Errors specific to tax calculations.
#[derive(Debug, Error, PartialEq)]
pub enum TaxError {
    /// No amounts were provided, so currency could not be determined.
    #[error("no amounts provided; cannot determine currency for tax")]
    NoAmounts,

    /// The number of per line rates differs from the number of amounts.
    #[error("{rates} per line rates supplied for {amounts} amounts")]
    RateCountMismatch {
        /// Number of rates supplied.
        rates: usize,
        /// Number of amounts supplied.
        amounts: usize,
    },

    /// Tax calculation could not be safely converted.
    #[error("tax conversion overflowed or was not representable")]
    Conversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A validated tax rate in percent points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Create a tax rate from percent points.
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

    /// A zero tax rate.
    #[must_use]
    pub fn zero() -> Self {
        Self(Percentage::from(Decimal::ZERO))
    }

    /// The rate in percent points.
    #[must_use]
    pub fn points(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// The rate as a decimal fraction.
    pub(crate) fn fraction(&self) -> Decimal {
        self.0 * Decimal::ONE
    }

    /// Whether this rate charges no tax.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fraction() == Decimal::ZERO
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.points())
    }
}

/// How tax rates are supplied to [`compute_tax`].
#[derive(Debug, Clone, Copy)]
pub enum TaxRates<'r> {
    /// One flat rate applied to the sum of all amounts.
    Flat(TaxRate),

    /// One optional rate per amount; `None` marks an untaxed line.
    PerLine(&'r [Option<TaxRate>]),
}

/// Calculate the tax owed on a set of amounts.
///
/// With [`TaxRates::Flat`] the rate applies to the sum of all amounts.
/// With [`TaxRates::PerLine`] each amount is taxed at its own rate and the
/// per line taxes are summed.
///
/// # Errors
///
/// - [`TaxError::NoAmounts`]: `amounts` was empty, so the currency could
///   not be determined.
/// - [`TaxError::RateCountMismatch`]: per line rates did not line up with
///   the amounts.
/// - [`TaxError::Conversion`]: a tax amount could not be represented in
///   minor units.
/// - [`TaxError::Money`]: wrapped money arithmetic or currency mismatch
///   error.
pub fn compute_tax<'a>(
    amounts: &[Money<'a, Currency>],
    rates: TaxRates<'_>,
) -> Result<Money<'a, Currency>, TaxError> {
    let first = amounts.first().ok_or(TaxError::NoAmounts)?;
    let currency = first.currency();

    match rates {
        TaxRates::Flat(rate) => {
            let total = amounts
                .iter()
                .try_fold(Money::from_minor(0, currency), |acc, amount| {
                    acc.add(*amount)
                })?;

            let minor = percent_of_minor(rate.fraction(), total.to_minor_units())
                .ok_or(TaxError::Conversion)?;

            Ok(Money::from_minor(minor, currency))
        }
        TaxRates::PerLine(rates) => {
            if rates.len() != amounts.len() {
                return Err(TaxError::RateCountMismatch {
                    rates: rates.len(),
                    amounts: amounts.len(),
                });
            }

            amounts.iter().zip(rates).try_fold(
                Money::from_minor(0, currency),
                |acc, (amount, rate)| {
                    let Some(rate) = rate else {
                        return Ok(acc);
                    };

                    let minor = percent_of_minor(rate.fraction(), amount.to_minor_units())
                        .ok_or(TaxError::Conversion)?;

                    Ok(acc.add(Money::from_minor(minor, amount.currency()))?)
                },
            )
        }
    }
}
