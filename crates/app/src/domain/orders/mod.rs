//! Orders

pub mod assembly;
pub mod errors;
pub mod models;
mod service;

pub use errors::{AssemblyError, OrdersServiceError};
pub use service::*;
