//! App Context

use std::sync::Arc;

use crate::{
    backend::{BackendClient, BackendConfig},
    domain::{
        loyalty::{HttpLoyaltyService, LoyaltyService},
        orders::{HttpOrdersService, OrdersService},
        variants::{HttpVariantsService, VariantsService},
    },
};

/// The application's service handles, shared by every command.
#[derive(Clone)]
pub struct AppContext {
    pub variants: Arc<dyn VariantsService>,
    pub loyalty: Arc<dyn LoyaltyService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from backend configuration.
    #[must_use]
    pub fn from_config(config: BackendConfig) -> Self {
        let backend = BackendClient::new(config);

        Self {
            variants: Arc::new(HttpVariantsService::new(backend.clone())),
            loyalty: Arc::new(HttpLoyaltyService::new(backend.clone())),
            orders: Arc::new(HttpOrdersService::new(backend)),
        }
    }
}
