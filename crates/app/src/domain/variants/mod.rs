//! Variants

pub mod errors;
mod service;

pub use errors::VariantsServiceError;
pub use service::*;
