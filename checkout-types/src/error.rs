//! Error types for the checkout payment core.
//!
//! One closed enum per failure kind. No error is swallowed inside the core;
//! the processor may add order context to execution failures but never
//! changes the error kind.

use crate::domain::{ItemId, OrderId, OrderStatus};

/// A configuration or format violation on a payment method field, or the
/// factory rejecting an unsupported type.
///
/// Every variant carries a specific, user-displayable reason so callers can
/// discriminate failure causes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cardholder should follow format: Prefix Firstname Lastname")]
    CardholderFormat,

    #[error("Card holder is empty")]
    MissingCardholder,

    #[error("Card number has a non-digit or length is invalid")]
    CardNumberFormat,

    #[error("Expiration date format is invalid")]
    ExpirationFormat,

    #[error("Expiration date is in the past")]
    CardExpired,

    #[error("CVV has a non-digit or length is invalid")]
    CvvFormat,

    #[error("Balance cannot be negative")]
    NegativeBalance,

    #[error("Deposit amount must be positive")]
    NonPositiveDeposit,

    #[error("Email format is invalid")]
    EmailFormat,

    #[error("Password is not strong")]
    WeakPassword,

    #[error("Wallet address is required")]
    MissingWalletAddress,

    #[error("Network is required")]
    MissingNetwork,

    #[error("Invalid wallet address format")]
    WalletAddressFormat,

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("Unsupported payment type: {0}")]
    UnsupportedPaymentType(String),

    #[error("Payment method not recognized: {0}")]
    UnknownPaymentMethod(String),
}

/// An execution-time failure with valid configuration.
///
/// Raised by `PaymentMethod::execute`; the processor re-wraps it with the
/// order id for traceability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Account not verified")]
    NotVerified,

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Payment failed for order {order_id}: {source}")]
    Order {
        order_id: OrderId,
        source: Box<PaymentError>,
    },
}

impl PaymentError {
    /// Wraps an execution failure with the order it was raised for.
    pub fn for_order(self, order_id: OrderId) -> Self {
        Self::Order {
            order_id,
            source: Box::new(self),
        }
    }
}

/// A business-rule violation at the Order/Customer boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Customer mismatch: order belongs to a different customer")]
    CustomerMismatch,

    #[error("Order list is empty")]
    Empty,

    #[error("Order is {0}!")]
    NotPending(OrderStatus),

    #[error("Cannot modify completed/cancelled orders")]
    Terminal(OrderStatus),

    #[error("Item {0} has 0 items in stock")]
    OutOfStock(ItemId),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

/// A malformed Item field, rejected at assignment time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("Price should be positive")]
    NonPositivePrice,

    #[error("Quantity should be positive")]
    NonPositiveQuantity,

    #[error("Discount should be in range [0, 1]")]
    DiscountOutOfRange,
}

/// Aggregate error for callers of the processor and customer operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Item(#[from] ItemError),
}
