//! Variants service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::{Money, iso};
use till::variants::{Barcode, Variant, VariantId};

use crate::{
    backend::{BackendClient, VariantRecord},
    domain::variants::errors::VariantsServiceError,
};

#[derive(Debug, Clone)]
pub struct HttpVariantsService {
    backend: BackendClient,
}

impl HttpVariantsService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl VariantsService for HttpVariantsService {
    #[tracing::instrument(
        name = "variants.service.variant_by_barcode",
        skip(self),
        fields(barcode = %barcode),
        err
    )]
    async fn variant_by_barcode(
        &self,
        barcode: &Barcode,
    ) -> Result<Variant<'static>, VariantsServiceError> {
        let record = self.backend.variant_by_barcode(barcode.as_str()).await?;

        variant_from_record(record)
    }
}

#[automock]
#[async_trait]
pub trait VariantsService: Send + Sync {
    /// Look up a purchasable variant by its barcode.
    async fn variant_by_barcode(
        &self,
        barcode: &Barcode,
    ) -> Result<Variant<'static>, VariantsServiceError>;
}

/// Validate a wire record into a core variant.
fn variant_from_record(record: VariantRecord) -> Result<Variant<'static>, VariantsServiceError> {
    let currency = iso::find(&record.currency)
        .ok_or_else(|| VariantsServiceError::UnknownCurrency(record.currency.clone()))?;

    let barcode = Barcode::new(record.barcode);

    Variant::new(
        VariantId::new(record.id),
        barcode.clone(),
        record.name,
        Money::from_minor(record.price_minor, currency),
        record.stock,
    )
    .map_err(|_err| VariantsServiceError::NegativePrice(barcode))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    fn tee_shirt_record() -> VariantRecord {
        VariantRecord {
            id: "VAR-TSHIRT".to_string(),
            barcode: "8901000000011".to_string(),
            name: "Graphic Tee Shirt".to_string(),
            price_minor: 14500,
            currency: "INR".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn record_converts_to_core_variant() -> TestResult {
        let variant = variant_from_record(tee_shirt_record())?;

        assert_eq!(variant.id(), &VariantId::new("VAR-TSHIRT"));
        assert_eq!(variant.barcode(), &Barcode::new("8901000000011"));
        assert_eq!(variant.price(), &Money::from_minor(14500, INR));
        assert_eq!(variant.stock(), 10);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let record = VariantRecord {
            currency: "ZZZ".to_string(),
            ..tee_shirt_record()
        };

        let result = variant_from_record(record);

        assert!(matches!(
            result,
            Err(VariantsServiceError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let record = VariantRecord {
            price_minor: -14500,
            ..tee_shirt_record()
        };

        let result = variant_from_record(record);

        assert!(matches!(result, Err(VariantsServiceError::NegativePrice(_))));
    }

    #[test]
    fn backend_not_found_maps_to_not_found() {
        let error = VariantsServiceError::from(crate::backend::BackendError::NotFound);

        assert!(matches!(error, VariantsServiceError::NotFound));
    }
}
