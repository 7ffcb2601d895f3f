//! Order aggregate: items, running total and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, CustomerId};
use super::item::{Item, ItemId};
use super::money::Money;
use super::receipt::TransactionId;
use crate::error::OrderError;

/// Unique identifier for an Order (format `ORD-XXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generates a new random OrderId.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("ORD-{}", hex[..8].to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order lifecycle states.
///
/// pending -> confirmed -> processing -> shipped -> delivered, with
/// cancellation possible before shipment. Items may only be mutated while
/// the order is not in a terminal or in-transit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// True for states after which item mutation is forbidden.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Shipped | Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    /// Parses one of the six status names; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

/// An aggregate of items for one customer.
///
/// Maintains `total_amount` incrementally on every add/remove so that it
/// always equals the sum of `line_total()` over the current items;
/// `calculate_total` re-derives the same value from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<Item>,
    total_amount: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    payment_method: Option<String>,
    transaction_id: Option<TransactionId>,
}

impl Order {
    /// Creates a pending order with no items for the given customer.
    pub fn new(customer: &Customer) -> Self {
        let order = Self {
            id: OrderId::generate(),
            customer_id: customer.id(),
            items: Vec::new(),
            total_amount: Money::ZERO,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            payment_method: None,
            transaction_id: None,
        };
        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            customer_name = %customer.name,
            "order created"
        );
        order
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        let old_status = self.status;
        self.status = status;
        tracing::info!(
            order_id = %self.id,
            %old_status,
            new_status = %status,
            "order status updated"
        );
    }

    /// Adds an item and increments the running total by its line total.
    ///
    /// Fails if the order is in a terminal state or the item has no stock.
    pub fn add_item(&mut self, item: Item) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            tracing::error!(
                order_id = %self.id,
                order_status = %self.status,
                item_id = %item.id(),
                "cannot add item to completed/cancelled order"
            );
            return Err(OrderError::Terminal(self.status));
        }
        if !item.in_stock() {
            return Err(OrderError::OutOfStock(item.id().clone()));
        }

        let item_total = item.line_total();
        self.total_amount += item_total;
        tracing::info!(
            order_id = %self.id,
            item_id = %item.id(),
            item_name = %item.name,
            quantity = item.quantity(),
            item_total = %item_total,
            order_total = %self.total_amount,
            "item added to order"
        );
        self.items.push(item);
        Ok(())
    }

    /// Removes the first item matching by identity, decrementing the total.
    ///
    /// Returns whether a match was found; a no-op if absent.
    pub fn remove_item(&mut self, item_id: &ItemId) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id() == item_id) else {
            tracing::warn!(
                order_id = %self.id,
                item_id = %item_id,
                "item not found in order for removal"
            );
            return false;
        };
        let item = self.items.remove(pos);
        let item_total = item.line_total();
        self.total_amount -= item_total;
        tracing::info!(
            order_id = %self.id,
            item_id = %item_id,
            item_name = %item.name,
            item_total = %item_total,
            order_total = %self.total_amount,
            "item removed from order"
        );
        true
    }

    /// Recomputes the total from scratch over the current items.
    ///
    /// Used to detect or repair drift after bulk modifications.
    pub fn calculate_total(&mut self) -> Money {
        self.total_amount = self.items.iter().map(Item::line_total).sum();
        self.total_amount
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a successful payment: confirms the order and pins the
    /// transaction id and payment method variant that settled it.
    pub fn confirm_payment(&mut self, transaction_id: TransactionId, payment_method: &str) {
        self.set_status(OrderStatus::Confirmed);
        self.transaction_id = Some(transaction_id);
        self.payment_method = Some(payment_method.to_string());
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Order {}: {} items, Total: ${}",
            self.id,
            self.items.len(),
            self.total_amount
        )
    }
}
