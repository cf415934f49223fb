//! Order Models

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso};
use till::{
    draft::{CustomerDetails, PaymentMethod, ValidatedDraft},
    invoice::{Invoice, InvoiceLine},
    tax::TaxRate,
    variants::Barcode,
};
use uuid::Uuid;

use crate::{
    backend::{
        CreatedOrderRecord, CustomerRecord, OrderItemRequestRecord, OrderRecord,
        OrderRequestRecord, OrderSummaryRecord,
    },
    domain::orders::errors::OrdersServiceError,
};

/// Backend-assigned order id. Round-trips the wire unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub barcode: Barcode,
    pub quantity: u32,
}

/// An order ready to submit, snapshotted from a validated draft.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub draft_id: Uuid,
    pub lines: Vec<NewOrderLine>,
    pub payment_method: PaymentMethod,
    pub customer: Option<CustomerDetails>,
    pub loyalty_barcode: Option<Barcode>,
}

impl NewOrder {
    /// Snapshot a validated draft into a submittable order.
    #[must_use]
    pub fn from_validated(draft_id: Uuid, validated: &ValidatedDraft<'_, '_>) -> Self {
        Self {
            draft_id,
            lines: validated
                .lines()
                .map(|line| NewOrderLine {
                    barcode: line.variant().barcode().clone(),
                    quantity: line.quantity(),
                })
                .collect(),
            payment_method: validated.payment_method(),
            customer: validated.customer().cloned(),
            loyalty_barcode: validated.loyalty().map(|loyalty| loyalty.barcode().clone()),
        }
    }
}

impl From<&NewOrder> for OrderRequestRecord {
    fn from(order: &NewOrder) -> Self {
        Self {
            draft_id: order.draft_id.to_string(),
            items: order
                .lines
                .iter()
                .map(|line| OrderItemRequestRecord {
                    barcode: line.barcode.to_string(),
                    quantity: line.quantity,
                })
                .collect(),
            payment_method: order.payment_method.to_string(),
            customer: order.customer.as_ref().map(|customer| CustomerRecord {
                name: customer.name().to_string(),
                phone: customer.phone().to_string(),
            }),
            loyalty_barcode: order.loyalty_barcode.as_ref().map(ToString::to_string),
        }
    }
}

/// The backend's acknowledgement of a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub id: OrderId,
    pub amount: Money<'static, iso::Currency>,
    pub payment_status: String,
    pub order_status: String,
}

impl TryFrom<CreatedOrderRecord> for CreatedOrder {
    type Error = OrdersServiceError;

    fn try_from(record: CreatedOrderRecord) -> Result<Self, Self::Error> {
        let currency = iso::find(&record.currency).ok_or_else(|| {
            OrdersServiceError::UnknownCurrency(record.id.clone(), record.currency.clone())
        })?;

        Ok(Self {
            id: OrderId::new(record.id),
            amount: Money::from_minor(record.amount_minor, currency),
            payment_status: record.payment_status,
            order_status: record.order_status,
        })
    }
}

/// A fully fetched order, lines priced as purchased.
///
/// `amount` is the backend's authoritative charge; the lines are display
/// data and never override it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedOrder {
    pub id: OrderId,
    pub lines: Vec<InvoiceLine<'static>>,
    pub amount: Money<'static, iso::Currency>,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: Timestamp,
}

impl FetchedOrder {
    /// Raise an invoice for this order.
    #[must_use]
    pub fn into_invoice(self) -> Invoice<'static> {
        Invoice::new(self.id.to_string(), self.lines, self.amount)
    }
}

impl TryFrom<OrderRecord> for FetchedOrder {
    type Error = OrdersServiceError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let currency = iso::find(&record.currency).ok_or_else(|| {
            OrdersServiceError::UnknownCurrency(record.id.clone(), record.currency.clone())
        })?;

        let mut lines = Vec::with_capacity(record.items.len());

        for item in record.items {
            let tax_rate = item
                .tax_percent
                .map(TaxRate::new)
                .transpose()
                .map_err(|_err| OrdersServiceError::InvalidTaxRate(record.id.clone()))?;

            lines.push(InvoiceLine::new(
                item.name,
                item.quantity,
                Money::from_minor(item.price_minor, currency),
                tax_rate,
            ));
        }

        Ok(Self {
            id: OrderId::new(record.id),
            lines,
            amount: Money::from_minor(record.amount_minor, currency),
            payment_method: record.payment_method,
            payment_status: record.payment_status,
            order_status: record.order_status,
            created_at: record.created_at,
        })
    }
}

/// One row of the order list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub amount: Money<'static, iso::Currency>,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: Timestamp,
}

impl TryFrom<OrderSummaryRecord> for OrderSummary {
    type Error = OrdersServiceError;

    fn try_from(record: OrderSummaryRecord) -> Result<Self, Self::Error> {
        let currency = iso::find(&record.currency).ok_or_else(|| {
            OrdersServiceError::UnknownCurrency(record.id.clone(), record.currency.clone())
        })?;

        Ok(Self {
            id: OrderId::new(record.id),
            amount: Money::from_minor(record.amount_minor, currency),
            payment_status: record.payment_status,
            order_status: record.order_status,
            created_at: record.created_at,
        })
    }
}
