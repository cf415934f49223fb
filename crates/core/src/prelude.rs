//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    discounts::{DiscountError, DiscountPercent, discount_amount},
    draft::{
        AppliedLoyalty, CustomerDetails, OrderDraft, PaymentMethod, PhoneNumber, ValidatedDraft,
    },
    fixtures::{Catalog, CatalogError},
    invoice::{Invoice, InvoiceError, InvoiceLine, InvoiceTaxMode},
    pricing::{DeliveryFee, PriceBreakdown, PricingError, compute_total},
    tax::{TaxError, TaxRate, TaxRates, compute_tax},
    validation::ValidationError,
    variants::{Barcode, Variant, VariantId},
};
