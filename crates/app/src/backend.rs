//! Storefront backend HTTP client.

use jiff::Timestamp;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for connecting to the storefront backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base address, e.g. `"http://localhost:5000"`.
    pub base_url: String,
}

/// HTTP client for the storefront backend API.
///
/// Every call returns the raw wire record; conversion into domain types
/// and boundary validation happen in the service layer.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch the variant carrying `barcode`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for a 404, and an error on HTTP
    /// failure or an unexpected response body.
    pub async fn variant_by_barcode(&self, barcode: &str) -> Result<VariantRecord, BackendError> {
        let url = format!("{}/api/variants/barcode/{barcode}", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "variant request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch the loyalty discount for a loyalty card `barcode`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for a 404, and an error on HTTP
    /// failure or an unexpected response body.
    pub async fn loyalty_discount(
        &self,
        barcode: &str,
    ) -> Result<LoyaltyDiscountRecord, BackendError> {
        let url = format!("{}/api/loyalty/{barcode}/discount", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "loyalty request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Submit a new order.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn create_order(
        &self,
        order: &OrderRequestRecord,
    ) -> Result<CreatedOrderRecord, BackendError> {
        let url = format!("{}/api/orders", self.config.base_url);

        let response = self.http.post(&url).json(order).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "order submission failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch one order by its backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for a 404, and an error on HTTP
    /// failure or an unexpected response body.
    pub async fn order(&self, id: &str) -> Result<OrderRecord, BackendError> {
        let url = format!("{}/api/orders/{id}", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "order fetch failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch the order list, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn orders(&self) -> Result<Vec<OrderSummaryRecord>, BackendError> {
        let url = format!("{}/api/orders", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "order list fetch failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// Variant Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: String,
    pub barcode: String,
    pub name: String,
    pub price_minor: i64,
    pub currency: String,
    pub stock: u32,
}

/// Loyalty Discount Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyDiscountRecord {
    pub discount_percent: Decimal,
}

/// Order Item Request Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequestRecord {
    pub barcode: String,
    pub quantity: u32,
}

/// Customer Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub name: String,
    pub phone: String,
}

/// Order Request Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestRecord {
    pub draft_id: String,
    pub items: Vec<OrderItemRequestRecord>,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_barcode: Option<String>,
}

/// Created Order Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderRecord {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_status: String,
    pub order_status: String,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRecord {
    pub name: String,
    pub quantity: u32,
    pub price_minor: i64,
    pub tax_percent: Option<Decimal>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub items: Vec<OrderItemRecord>,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: Timestamp,
}

/// Order Summary Record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryRecord {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: Timestamp,
}

/// Errors that can occur when communicating with the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 404 for the requested resource.
    #[error("resource not found")]
    NotFound,

    /// The backend returned a non-2xx response or unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
