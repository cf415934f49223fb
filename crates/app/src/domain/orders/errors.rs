//! Orders service and assembly errors.

use thiserror::Error;
use till::validation::ValidationError;

use crate::{backend::BackendError, domain::loyalty::LoyaltyServiceError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order {0} is priced in an unknown currency: {1}")]
    UnknownCurrency(String, String),

    #[error("order {0} carries a tax rate outside 0..=100")]
    InvalidTaxRate(String),

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for OrdersServiceError {
    fn from(error: BackendError) -> Self {
        if matches!(error, BackendError::NotFound) {
            return Self::NotFound;
        }

        Self::Backend(error)
    }
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The draft failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A previous submission has not finished.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Loyalty resolution failed; the draft's discount is unchanged.
    #[error("loyalty resolution failed")]
    Loyalty(#[from] LoyaltyServiceError),

    /// Submission failed; the draft is intact for retry.
    #[error("order submission failed")]
    Orders(#[from] OrdersServiceError),
}
