//! Domain models for the checkout payment core.

pub mod customer;
pub mod item;
pub mod money;
pub mod order;
pub mod receipt;

pub use customer::{
    Customer, CustomerId, FraudStatus, TransactionRecord, TransactionStatus, WalletTransaction,
};
pub use item::{Item, ItemId};
pub use money::{Discount, Money};
pub use order::{Order, OrderId, OrderStatus};
pub use receipt::{Receipt, ReceiptDetails, TransactionId};
