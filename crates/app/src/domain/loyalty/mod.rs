//! Loyalty

pub mod errors;
mod service;

pub use errors::LoyaltyServiceError;
pub use service::*;
