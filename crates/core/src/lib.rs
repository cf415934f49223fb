//! Till
//!
//! Till is a checkout engine for a clothing storefront: carts, percentage
//! discounts, delivery fees, taxes and invoices, priced in exact minor
//! units of a single currency.

pub mod cart;
pub mod discounts;
pub mod draft;
pub mod fixtures;
pub mod invoice;
pub mod prelude;
pub mod pricing;
mod render;
pub mod tax;
pub mod validation;
pub mod variants;
