//! Order assembly.
//!
//! The state machine over one order draft: build lines, resolve a loyalty
//! discount, validate, submit, retry. Validation runs before any network
//! call, and a failed submission leaves the draft exactly as it was so the
//! user can retry without rebuilding anything.

use std::sync::Arc;

use rusty_money::iso::Currency;
use till::{
    discounts::DiscountPercent,
    draft::{AppliedLoyalty, OrderDraft},
    variants::Barcode,
};
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    loyalty::LoyaltyService,
    orders::{
        errors::AssemblyError,
        models::{CreatedOrder, NewOrder},
        service::OrdersService,
    },
};

/// Where an assembly sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    /// No draft activity yet.
    Empty,
    /// The draft is under construction.
    Building,
    /// A submission is in flight; further submits are refused.
    Submitting,
    /// The last submission succeeded and the draft was reset.
    Succeeded,
    /// The last submission failed; the draft is intact for retry.
    Failed,
}

/// One order draft and the services that turn it into a placed order.
pub struct OrderAssembly {
    draft: OrderDraft<'static>,
    draft_id: Uuid,
    phase: AssemblyPhase,
    loyalty: Arc<dyn LoyaltyService>,
    orders: Arc<dyn OrdersService>,
}

impl OrderAssembly {
    /// Start a fresh assembly in the given currency.
    #[must_use]
    pub fn new(
        currency: &'static Currency,
        loyalty: Arc<dyn LoyaltyService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            draft: OrderDraft::new(currency),
            draft_id: Uuid::now_v7(),
            phase: AssemblyPhase::Empty,
            loyalty,
            orders,
        }
    }

    /// The draft being assembled.
    #[must_use]
    pub fn draft(&self) -> &OrderDraft<'static> {
        &self.draft
    }

    /// Mutable access to the draft. Marks the assembly as building.
    pub fn draft_mut(&mut self) -> &mut OrderDraft<'static> {
        self.phase = AssemblyPhase::Building;

        &mut self.draft
    }

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> AssemblyPhase {
        self.phase
    }

    /// The client-generated id for the draft, sent with the submission.
    #[must_use]
    pub fn draft_id(&self) -> Uuid {
        self.draft_id
    }

    /// Resolve a loyalty barcode and apply its discount to the draft.
    ///
    /// The draft's discount only changes when resolution succeeds; a
    /// failure leaves whatever was applied before.
    ///
    /// # Errors
    ///
    /// Returns an [`AssemblyError::Loyalty`] if resolution fails.
    pub async fn apply_loyalty(
        &mut self,
        barcode: Barcode,
    ) -> Result<DiscountPercent, AssemblyError> {
        let percent = self.loyalty.resolve_discount(&barcode).await?;

        self.draft.apply_loyalty(AppliedLoyalty::new(barcode, percent));
        self.phase = AssemblyPhase::Building;

        Ok(percent)
    }

    /// Validate the draft and submit it as an order.
    ///
    /// On success the draft is reset and a fresh draft id is generated.
    /// On failure the draft is untouched and a later call retries.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::SubmissionInFlight`] while a submission is
    ///   outstanding; nothing is sent.
    /// - [`AssemblyError::Validation`] if the draft is incomplete; nothing
    ///   is sent.
    /// - [`AssemblyError::Orders`] if the backend rejects or the transport
    ///   fails; the draft is preserved.
    pub async fn submit(&mut self) -> Result<CreatedOrder, AssemblyError> {
        if self.phase == AssemblyPhase::Submitting {
            return Err(AssemblyError::SubmissionInFlight);
        }

        let validated = self.draft.validate()?;
        let order = NewOrder::from_validated(self.draft_id, &validated);

        self.phase = AssemblyPhase::Submitting;

        match self.orders.submit_order(order).await {
            Ok(created) => {
                self.draft.reset();
                self.draft_id = Uuid::now_v7();
                self.phase = AssemblyPhase::Succeeded;

                info!(order_id = %created.id, "order submitted");

                Ok(created)
            }
            Err(error) => {
                self.phase = AssemblyPhase::Failed;

                Err(AssemblyError::Orders(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;
    use till::{
        draft::PaymentMethod,
        validation::ValidationError,
        variants::{Variant, VariantId},
    };

    use crate::{
        backend::BackendError,
        domain::{
            loyalty::{LoyaltyServiceError, MockLoyaltyService},
            orders::{models::OrderId, service::MockOrdersService},
        },
    };

    use super::*;

    fn tee_shirt() -> Variant<'static> {
        Variant::new(
            VariantId::new("VAR-TSHIRT"),
            Barcode::new("8901000000011"),
            "Graphic Tee Shirt".to_string(),
            Money::from_minor(14500, INR),
            10,
        )
        .expect("valid variant")
    }

    fn created_order() -> CreatedOrder {
        CreatedOrder {
            id: OrderId::new("ord-1027"),
            amount: Money::from_minor(39100, INR),
            payment_status: "paid".to_string(),
            order_status: "confirmed".to_string(),
        }
    }

    fn twenty_percent() -> DiscountPercent {
        DiscountPercent::new(Decimal::from(20)).expect("valid percent")
    }

    fn assembly(orders: MockOrdersService, loyalty: MockLoyaltyService) -> OrderAssembly {
        OrderAssembly::new(INR, Arc::new(loyalty), Arc::new(orders))
    }

    fn build_valid_draft(assembly: &mut OrderAssembly) -> TestResult {
        assembly.draft_mut().cart_mut().add(&tee_shirt(), 2)?;
        assembly.draft_mut().set_payment_method(PaymentMethod::Upi);

        Ok(())
    }

    #[tokio::test]
    async fn empty_draft_is_rejected_before_any_network_call() {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().times(0);

        let mut assembly = assembly(orders, MockLoyaltyService::new());

        let result = assembly.submit().await;

        assert!(matches!(
            result,
            Err(AssemblyError::Validation(ValidationError::EmptyCart))
        ));
        assert_eq!(assembly.phase(), AssemblyPhase::Empty);
    }

    #[tokio::test]
    async fn missing_payment_method_is_rejected_before_any_network_call() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().times(0);

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        assembly.draft_mut().cart_mut().add(&tee_shirt(), 1)?;

        let result = assembly.submit().await;

        assert!(matches!(
            result,
            Err(AssemblyError::Validation(
                ValidationError::PaymentMethodMissing
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_preserves_the_draft() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().times(1).returning(|_order| {
            Err(crate::domain::orders::errors::OrdersServiceError::Backend(
                BackendError::UnexpectedResponse("payment gateway unavailable".to_string()),
            ))
        });

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        build_valid_draft(&mut assembly)?;

        let snapshot = assembly.draft().clone();

        let result = assembly.submit().await;

        assert!(matches!(result, Err(AssemblyError::Orders(_))));
        assert_eq!(assembly.draft(), &snapshot, "draft must survive a failure");
        assert_eq!(assembly.phase(), AssemblyPhase::Failed);

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_can_be_retried() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().times(1).returning(|_order| {
            Err(crate::domain::orders::errors::OrdersServiceError::Backend(
                BackendError::UnexpectedResponse("payment gateway unavailable".to_string()),
            ))
        });
        orders
            .expect_submit_order()
            .times(1)
            .returning(|_order| Ok(created_order()));

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        build_valid_draft(&mut assembly)?;

        assert!(assembly.submit().await.is_err());

        let created = assembly.submit().await?;

        assert_eq!(created.id, OrderId::new("ord-1027"));
        assert_eq!(assembly.phase(), AssemblyPhase::Succeeded);

        Ok(())
    }

    #[tokio::test]
    async fn successful_submission_resets_the_draft() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders
            .expect_submit_order()
            .times(1)
            .returning(|_order| Ok(created_order()));

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        build_valid_draft(&mut assembly)?;

        let draft_id_before = assembly.draft_id();

        let created = assembly.submit().await?;

        assert_eq!(created.amount, Money::from_minor(39100, INR));
        assert!(assembly.draft().cart().is_empty());
        assert_eq!(assembly.draft().payment_method(), None);
        assert_eq!(assembly.phase(), AssemblyPhase::Succeeded);
        assert_ne!(
            assembly.draft_id(),
            draft_id_before,
            "a new draft id should be generated"
        );

        Ok(())
    }

    #[tokio::test]
    async fn submission_in_flight_is_refused() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().times(0);

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        build_valid_draft(&mut assembly)?;
        assembly.phase = AssemblyPhase::Submitting;

        let result = assembly.submit().await;

        assert!(matches!(result, Err(AssemblyError::SubmissionInFlight)));

        Ok(())
    }

    #[tokio::test]
    async fn submitted_order_snapshots_the_draft() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders
            .expect_submit_order()
            .times(1)
            .withf(|order| {
                order.payment_method == PaymentMethod::Upi
                    && order.lines.len() == 1
                    && order
                        .lines
                        .first()
                        .is_some_and(|line| line.quantity == 2)
            })
            .returning(|_order| Ok(created_order()));

        let mut assembly = assembly(orders, MockLoyaltyService::new());
        build_valid_draft(&mut assembly)?;

        assembly.submit().await?;

        Ok(())
    }

    #[tokio::test]
    async fn loyalty_success_applies_the_discount() -> TestResult {
        let mut loyalty = MockLoyaltyService::new();
        loyalty
            .expect_resolve_discount()
            .withf(|barcode| barcode.as_str() == "LOYAL-001")
            .times(1)
            .returning(|_barcode| Ok(twenty_percent()));

        let mut assembly = assembly(MockOrdersService::new(), loyalty);

        let percent = assembly.apply_loyalty(Barcode::new("LOYAL-001")).await?;

        assert_eq!(percent, twenty_percent());
        assert_eq!(assembly.draft().discount_percent(), percent);

        Ok(())
    }

    #[tokio::test]
    async fn loyalty_failure_leaves_the_prior_discount() -> TestResult {
        let mut loyalty = MockLoyaltyService::new();
        loyalty
            .expect_resolve_discount()
            .times(1)
            .returning(|_barcode| Ok(twenty_percent()));
        loyalty
            .expect_resolve_discount()
            .times(1)
            .returning(|_barcode| Err(LoyaltyServiceError::NotFound));

        let mut assembly = assembly(MockOrdersService::new(), loyalty);

        let applied = assembly.apply_loyalty(Barcode::new("LOYAL-001")).await?;

        let result = assembly.apply_loyalty(Barcode::new("LOYAL-BAD")).await;

        assert!(matches!(
            result,
            Err(AssemblyError::Loyalty(LoyaltyServiceError::NotFound))
        ));
        assert_eq!(
            assembly.draft().discount_percent(),
            applied,
            "failed resolution must not change the applied discount"
        );

        Ok(())
    }

    #[tokio::test]
    async fn building_the_draft_moves_the_phase_forward() -> TestResult {
        let mut assembly = assembly(MockOrdersService::new(), MockLoyaltyService::new());

        assert_eq!(assembly.phase(), AssemblyPhase::Empty);

        assembly.draft_mut().cart_mut().add(&tee_shirt(), 1)?;

        assert_eq!(assembly.phase(), AssemblyPhase::Building);

        Ok(())
    }
}
