//! Catalog item domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{Discount, Money};
use crate::error::ItemError;

/// Unique identifier for an Item (format `ITEM-XXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a new random ItemId.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("ITEM-{}", hex[..8].to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced, stocked catalog line with an optional discount.
///
/// Field ranges are enforced by the setters at assignment time, never at use
/// time: price > 0, discount in [0, 1], quantity > 0 (default 1). Stock is
/// non-negative by type. Identity (`id`) is immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    pub name: String,
    price: Money,
    stock: u32,
    discount: Discount,
    quantity: u32,
}

impl Item {
    /// Creates a new item with default values.
    ///
    /// Price, stock and discount start at zero and are set through their
    /// validating setters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            price: Money::ZERO,
            stock: 0,
            discount: Discount::ZERO,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Sets the price. Must be strictly positive.
    pub fn set_price(&mut self, value: Decimal) -> Result<(), ItemError> {
        if value <= Decimal::ZERO {
            return Err(ItemError::NonPositivePrice);
        }
        self.price = Money::new(value);
        Ok(())
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn set_stock(&mut self, value: u32) {
        self.stock = value;
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// Sets the discount rate. Must be within [0, 1].
    pub fn set_discount(&mut self, rate: Decimal) -> Result<(), ItemError> {
        self.discount = Discount::new(rate)?;
        Ok(())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the per-order quantity. Must be strictly positive.
    pub fn set_quantity(&mut self, value: u32) -> Result<(), ItemError> {
        if value == 0 {
            return Err(ItemError::NonPositiveQuantity);
        }
        self.quantity = value;
        Ok(())
    }

    /// The amount this line contributes to an order total:
    /// `quantity x price x (1 - discount)`.
    pub fn line_total(&self) -> Money {
        Money::new(
            Decimal::from(self.quantity) * self.price.amount() * self.discount.multiplier(),
        )
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn in_discount(&self) -> bool {
        self.discount.is_active()
    }
}
