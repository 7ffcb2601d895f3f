//! # Checkout Types
//!
//! Domain types and port traits for the checkout payment core.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the system:
//! - `domain/` - Pure domain types (Money, Item, Order, Customer, Receipt)
//! - `ports/` - Trait definitions that payment variants and wallets implement
//! - `dto/` - Data Transfer Objects for configuration boundaries
//! - `error/` - The closed error taxonomy

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Customer, CustomerId, Discount, FraudStatus, Item, ItemId, Money, Order, OrderId, OrderStatus,
    Receipt, ReceiptDetails, TransactionId, TransactionRecord, TransactionStatus,
    WalletTransaction,
};
pub use dto::PaymentConfig;
pub use error::{CheckoutError, ItemError, OrderError, PaymentError, ValidationError};
pub use ports::{Balance, CashBalance, PaymentKind, PaymentMethod};
