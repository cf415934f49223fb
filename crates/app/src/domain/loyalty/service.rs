//! Loyalty service.
//!
//! Resolves a loyalty card barcode to a discount percentage. Resolution is
//! a single request-response: a failure surfaces as an error and is never
//! read as a zero discount.

use async_trait::async_trait;
use mockall::automock;
use till::{discounts::DiscountPercent, variants::Barcode};

use crate::{backend::BackendClient, domain::loyalty::errors::LoyaltyServiceError};

#[derive(Debug, Clone)]
pub struct HttpLoyaltyService {
    backend: BackendClient,
}

impl HttpLoyaltyService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl LoyaltyService for HttpLoyaltyService {
    #[tracing::instrument(
        name = "loyalty.service.resolve_discount",
        skip(self),
        fields(barcode = %barcode),
        err
    )]
    async fn resolve_discount(
        &self,
        barcode: &Barcode,
    ) -> Result<DiscountPercent, LoyaltyServiceError> {
        let record = self.backend.loyalty_discount(barcode.as_str()).await?;

        DiscountPercent::new(record.discount_percent)
            .map_err(|_err| LoyaltyServiceError::InvalidPercent(record.discount_percent))
    }
}

#[automock]
#[async_trait]
pub trait LoyaltyService: Send + Sync {
    /// Resolve the discount percentage attached to a loyalty barcode.
    async fn resolve_discount(
        &self,
        barcode: &Barcode,
    ) -> Result<DiscountPercent, LoyaltyServiceError>;
}
