//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    backend::{BackendClient, OrderRequestRecord},
    domain::orders::{
        errors::OrdersServiceError,
        models::{CreatedOrder, FetchedOrder, NewOrder, OrderId, OrderSummary},
    },
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    backend: BackendClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(
        name = "orders.service.submit_order",
        skip(self, order),
        fields(draft_id = %order.draft_id, line_count = order.lines.len()),
        err
    )]
    async fn submit_order(&self, order: NewOrder) -> Result<CreatedOrder, OrdersServiceError> {
        let request = OrderRequestRecord::from(&order);

        let record = self.backend.create_order(&request).await?;

        let created = CreatedOrder::try_from(record)?;

        info!(order_id = %created.id, "order created");

        Ok(created)
    }

    #[tracing::instrument(name = "orders.service.order", skip(self), fields(order_id = %id), err)]
    async fn order(&self, id: &OrderId) -> Result<FetchedOrder, OrdersServiceError> {
        let record = self.backend.order(id.as_str()).await?;

        FetchedOrder::try_from(record)
    }

    #[tracing::instrument(name = "orders.service.orders", skip(self), err)]
    async fn orders(&self) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let records = self.backend.orders().await?;

        records.into_iter().map(OrderSummary::try_from).collect()
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit a new order to the backend.
    async fn submit_order(&self, order: NewOrder) -> Result<CreatedOrder, OrdersServiceError>;

    /// Fetch a single order.
    async fn order(&self, id: &OrderId) -> Result<FetchedOrder, OrdersServiceError>;

    /// Fetch the order list.
    async fn orders(&self) -> Result<Vec<OrderSummary>, OrdersServiceError>;
}
