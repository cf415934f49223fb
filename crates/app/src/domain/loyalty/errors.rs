//! Loyalty service errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum LoyaltyServiceError {
    #[error("no loyalty discount for that barcode")]
    NotFound,

    #[error("backend returned a discount outside 0..=100: {0}")]
    InvalidPercent(Decimal),

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for LoyaltyServiceError {
    fn from(error: BackendError) -> Self {
        if matches!(error, BackendError::NotFound) {
            return Self::NotFound;
        }

        Self::Backend(error)
    }
}
