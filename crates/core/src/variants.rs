//! Variants
//!
//! Product variants as scanned at the till. A variant is the sellable unit
//! (one size and colour of a product) identified by a barcode, carrying the
//! unit price and stock level observed when it was looked up.

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::validation::ValidationError;

/// Identifier of a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantId(String);

impl VariantId {
    /// Create a new variant id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Barcode printed on a variant's label or a loyalty card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Barcode(String);

impl Barcode {
    /// Create a new barcode.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The barcode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sellable product variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    id: VariantId,
    barcode: Barcode,
    name: String,
    price: Money<'a, Currency>,
    stock: u32,
}

impl<'a> Variant<'a> {
    /// Create a new variant.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::NegativePrice`] if the unit price is
    /// negative.
    pub fn new(
        id: VariantId,
        barcode: Barcode,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        stock: u32,
    ) -> Result<Self, ValidationError> {
        if price.to_minor_units() < 0 {
            return Err(ValidationError::NegativePrice(id.to_string()));
        }

        Ok(Self {
            id,
            barcode,
            name: name.into(),
            price,
            stock,
        })
    }

    /// The variant's id.
    #[must_use]
    pub fn id(&self) -> &VariantId {
        &self.id
    }

    /// The variant's barcode.
    #[must_use]
    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    /// The variant's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit price.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Units available to sell.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock
    }
}
