//! Cart
//!
//! The line item store for a checkout session. Lines are keyed by variant
//! id and hold a snapshot of the variant taken when it was scanned, so a
//! later price or stock change at the backend never rewrites a cart.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::variants::{Variant, VariantId};

/// Errors related to cart mutations or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A variant's currency differs from the cart currency (variant, variant currency, cart currency).
    #[error("variant {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(VariantId, &'static str, &'static str),

    /// No line exists for the given variant.
    #[error("no cart line for variant {0}")]
    LineNotFound(VariantId),

    /// The requested quantity exceeds the variant's available stock.
    #[error("requested quantity for variant {variant} exceeds available stock of {limit}")]
    StockExceeded {
        /// The variant whose stock ran out.
        variant: VariantId,
        /// The stock limit held in the line's snapshot.
        limit: u32,
    },

    /// A line total overflowed the minor unit range.
    #[error("line total for variant {0} overflows")]
    AmountOverflow(VariantId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One cart line: a variant snapshot and the units of it being bought.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    variant: Variant<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// The variant snapshot taken when the line was added.
    #[must_use]
    pub fn variant(&self) -> &Variant<'a> {
        &self.variant
    }

    /// Units of the variant in the cart.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The line total (unit price times quantity).
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::AmountOverflow`] if the total cannot be
    /// represented in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, CartError> {
        let total_minor = self
            .variant
            .price()
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| CartError::AmountOverflow(self.variant.id().clone()))?;

        Ok(Money::from_minor(total_minor, self.variant.price().currency()))
    }
}

/// The line item store for a checkout session.
///
/// Lines keep insertion order, so totals fold in a stable order no matter
/// how quantities change later.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: SmallVec<[CartLine<'a>; 10]>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Add units of a variant, merging with any existing line for it.
    ///
    /// The stored quantity clamps to the variant's stock; the quantity
    /// actually in the cart after the add is returned. Adding a variant
    /// with zero stock stores nothing and returns zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the variant is priced
    /// in a different currency from the cart.
    pub fn add(&mut self, variant: &Variant<'a>, quantity: u32) -> Result<u32, CartError> {
        let variant_currency = variant.price().currency();

        if variant_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                variant.id().clone(),
                variant_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.line_mut(variant.id()) {
            line.quantity = line
                .quantity
                .saturating_add(quantity)
                .min(line.variant.stock());

            return Ok(line.quantity);
        }

        let quantity = quantity.min(variant.stock());

        if quantity == 0 {
            return Ok(0);
        }

        self.lines.push(CartLine {
            variant: variant.clone(),
            quantity,
        });

        Ok(quantity)
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero removes the line. A quantity above the variant's stock is
    /// rejected and the line is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] if no line exists for the
    /// variant, or a [`CartError::StockExceeded`] carrying the stock limit
    /// if `quantity` is above it.
    pub fn set_quantity(&mut self, id: &VariantId, quantity: u32) -> Result<(), CartError> {
        let Some(line) = self.lines.iter_mut().find(|line| line.variant.id() == id) else {
            return Err(CartError::LineNotFound(id.clone()));
        };

        if quantity == 0 {
            self.lines.retain(|line| line.variant.id() != id);
            return Ok(());
        }

        if quantity > line.variant.stock() {
            return Err(CartError::StockExceeded {
                variant: id.clone(),
                limit: line.variant.stock(),
            });
        }

        line.quantity = quantity;

        Ok(())
    }

    /// Remove the line for a variant. Removing an absent line is a no-op.
    pub fn remove(&mut self, id: &VariantId) {
        self.lines.retain(|line| line.variant.id() != id);
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the line for a variant.
    #[must_use]
    pub fn line(&self, id: &VariantId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.variant.id() == id)
    }

    fn line_mut(&mut self, id: &VariantId) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| line.variant.id() == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The currency all lines are priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Calculate the subtotal across all lines.
    ///
    /// An empty cart has a zero subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line total overflows or money
    /// arithmetic fails.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.line_total()?)?)
            })
    }
}
