//! Till Domain Concerns

pub mod loyalty;
pub mod orders;
pub mod variants;
