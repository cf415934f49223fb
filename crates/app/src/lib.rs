//! Shared application domain and backend client modules.

pub mod backend;
pub mod context;
pub mod domain;
