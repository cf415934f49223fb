//! Validation
//!
//! Shared validation errors for checkout input. Constructors across the
//! crate return these instead of accepting malformed values, so a held
//! value is always in range.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when checkout input fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A percentage was outside the `0..=100` range.
    #[error("percentage {0} is outside the range 0 to 100")]
    PercentOutOfRange(Decimal),

    /// A variant was supplied with a negative unit price.
    #[error("variant {0} has a negative unit price")]
    NegativePrice(String),

    /// Customer name and phone were not provided together.
    #[error("customer name and phone must be provided together")]
    CustomerFieldsUnpaired,

    /// The customer name was empty after trimming.
    #[error("customer name cannot be empty")]
    EmptyCustomerName,

    /// The phone number was empty or contained non-digit characters.
    #[error("{0:?} is not a valid phone number")]
    InvalidPhone(String),

    /// An order cannot be submitted with an empty cart.
    #[error("cannot submit an order with an empty cart")]
    EmptyCart,

    /// An order cannot be submitted without a payment method.
    #[error("no payment method selected")]
    PaymentMethodMissing,

    /// The payment method string did not match any accepted method.
    #[error("unknown payment method {0:?}")]
    UnknownPaymentMethod(String),

    /// The invoice tax mode string did not match any known mode.
    #[error("unknown invoice tax mode {0:?}")]
    UnknownTaxMode(String),
}
