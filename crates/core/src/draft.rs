//! Order drafts
//!
//! An order draft collects everything checkout gathers before submission:
//! the cart, optional customer details, a payment method and any applied
//! loyalty discount. A draft validates into a [`ValidatedDraft`], which is
//! the only doorway to submission, so nothing leaves the till half-formed.

use std::{fmt, str::FromStr};

use rusty_money::iso::Currency;

use crate::{
    cart::{Cart, CartLine},
    discounts::DiscountPercent,
    validation::ValidationError,
    variants::Barcode,
};

/// Default dialling prefix applied to phone numbers without one.
pub const DEFAULT_PHONE_PREFIX: &str = "+91";

/// Payment methods accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// Unified payments interface.
    Upi,
    /// Netbanking transfer.
    Netbanking,
    /// Prepaid wallet.
    Wallet,
    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// All accepted methods, in display order.
    pub const ALL: [Self; 5] = [
        Self::Card,
        Self::Upi,
        Self::Netbanking,
        Self::Wallet,
        Self::CashOnDelivery,
    ];

    /// The wire name of this method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::Netbanking => "netbanking",
            Self::Wallet => "wallet",
            Self::CashOnDelivery => "cash-on-delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPaymentMethod(s.to_string()))
    }
}

/// A normalized phone number with dialling prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize a raw phone number.
    ///
    /// Separator characters are stripped, and a number without a leading
    /// `+` gets the given dialling prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::InvalidPhone`] if the number is empty
    /// or contains anything besides digits and separators.
    pub fn normalize(raw: &str, prefix: &str) -> Result<Self, ValidationError> {
        let cleaned: String = raw
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')' | '.'))
            .collect();

        let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }

        if cleaned.starts_with('+') {
            Ok(Self(cleaned))
        } else {
            Ok(Self(format!("{prefix}{cleaned}")))
        }
    }

    /// The normalized number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer contact details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    name: String,
    phone: PhoneNumber,
}

impl CustomerDetails {
    /// Create customer details from a name and a raw phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::EmptyCustomerName`] if the name trims
    /// to nothing, or a [`ValidationError::InvalidPhone`] if the phone
    /// number fails to normalize.
    pub fn new(
        name: impl Into<String>,
        phone: &str,
        phone_prefix: &str,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyCustomerName);
        }

        Ok(Self {
            name: name.to_string(),
            phone: PhoneNumber::normalize(phone, phone_prefix)?,
        })
    }

    /// Build details from optional name and phone fields.
    ///
    /// Name and phone travel as a pair: both present builds details, both
    /// absent builds none.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::CustomerFieldsUnpaired`] if exactly one
    /// of the two fields is present, or any error from [`Self::new`].
    pub fn from_parts(
        name: Option<String>,
        phone: Option<String>,
        phone_prefix: &str,
    ) -> Result<Option<Self>, ValidationError> {
        match (name, phone) {
            (None, None) => Ok(None),
            (Some(name), Some(phone)) => Ok(Some(Self::new(name, &phone, phone_prefix)?)),
            _ => Err(ValidationError::CustomerFieldsUnpaired),
        }
    }

    /// The customer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The customer's normalized phone number.
    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }
}

/// A loyalty discount resolved for a card barcode.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedLoyalty {
    barcode: Barcode,
    percent: DiscountPercent,
}

impl AppliedLoyalty {
    /// Record a resolved loyalty discount.
    #[must_use]
    pub fn new(barcode: Barcode, percent: DiscountPercent) -> Self {
        Self { barcode, percent }
    }

    /// The loyalty card barcode.
    #[must_use]
    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    /// The resolved discount.
    #[must_use]
    pub fn percent(&self) -> DiscountPercent {
        self.percent
    }
}

/// Everything gathered at checkout before submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft<'a> {
    cart: Cart<'a>,
    customer: Option<CustomerDetails>,
    payment_method: Option<PaymentMethod>,
    loyalty: Option<AppliedLoyalty>,
}

impl<'a> OrderDraft<'a> {
    /// Create an empty draft in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            customer: None,
            payment_method: None,
            loyalty: None,
        }
    }

    /// The draft's cart.
    #[must_use]
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Mutable access to the draft's cart.
    pub fn cart_mut(&mut self) -> &mut Cart<'a> {
        &mut self.cart
    }

    /// Set or clear the customer details.
    pub fn set_customer(&mut self, customer: Option<CustomerDetails>) {
        self.customer = customer;
    }

    /// The customer details, if any.
    #[must_use]
    pub fn customer(&self) -> Option<&CustomerDetails> {
        self.customer.as_ref()
    }

    /// Select the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// The selected payment method, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Attach a resolved loyalty discount, replacing any previous one.
    pub fn apply_loyalty(&mut self, loyalty: AppliedLoyalty) {
        self.loyalty = Some(loyalty);
    }

    /// The applied loyalty discount, if any.
    #[must_use]
    pub fn loyalty(&self) -> Option<&AppliedLoyalty> {
        self.loyalty.as_ref()
    }

    /// The discount in force for pricing.
    ///
    /// Zero until a loyalty discount has been resolved; a failed loyalty
    /// lookup never changes the value already here.
    #[must_use]
    pub fn discount_percent(&self) -> DiscountPercent {
        self.loyalty
            .as_ref()
            .map_or_else(DiscountPercent::zero, AppliedLoyalty::percent)
    }

    /// Validate the draft for submission.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::EmptyCart`] if the cart has no lines,
    /// or a [`ValidationError::PaymentMethodMissing`] if no method has been
    /// selected.
    pub fn validate(&self) -> Result<ValidatedDraft<'_, 'a>, ValidationError> {
        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let Some(payment_method) = self.payment_method else {
            return Err(ValidationError::PaymentMethodMissing);
        };

        Ok(ValidatedDraft {
            draft: self,
            payment_method,
        })
    }

    /// Reset the draft after a successful submission.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.customer = None;
        self.payment_method = None;
        self.loyalty = None;
    }
}

/// A draft that passed submission validation.
///
/// Holds a borrowed view of the draft, so the draft itself stays exactly
/// as it was if submission later fails.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedDraft<'d, 'a> {
    draft: &'d OrderDraft<'a>,
    payment_method: PaymentMethod,
}

impl<'d, 'a> ValidatedDraft<'d, 'a> {
    /// Iterate over the validated cart lines.
    pub fn lines(&self) -> impl Iterator<Item = &'d CartLine<'a>> {
        self.draft.cart.iter()
    }

    /// The selected payment method.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Customer details, if provided.
    #[must_use]
    pub fn customer(&self) -> Option<&'d CustomerDetails> {
        self.draft.customer.as_ref()
    }

    /// The applied loyalty discount, if any.
    #[must_use]
    pub fn loyalty(&self) -> Option<&'d AppliedLoyalty> {
        self.draft.loyalty.as_ref()
    }
}
