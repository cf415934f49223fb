//! Variants service errors.

use thiserror::Error;
use till::variants::Barcode;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum VariantsServiceError {
    #[error("variant not found")]
    NotFound,

    #[error("variant {0} has a negative price")]
    NegativePrice(Barcode),

    #[error("variant priced in unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for VariantsServiceError {
    fn from(error: BackendError) -> Self {
        if matches!(error, BackendError::NotFound) {
            return Self::NotFound;
        }

        Self::Backend(error)
    }
}
