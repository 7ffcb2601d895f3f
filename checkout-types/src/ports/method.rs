//! The polymorphic payment-method contract.

use serde::{Deserialize, Serialize};

use crate::domain::{Money, Receipt, TransactionId};
use crate::error::{PaymentError, ValidationError};

/// The closed set of supported payment-method variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentKind {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "PayPal")]
    PayPal,
    #[serde(rename = "Crypto")]
    Crypto,
}

impl PaymentKind {
    /// Human-readable label used on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PayPal => "PayPal",
            Self::Crypto => "Crypto",
        }
    }

    /// Variant name recorded on a paid order.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::CreditCard => "CreditCard",
            Self::PayPal => "Paypal",
            Self::Crypto => "Crypto",
        }
    }
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One configured charge against a payment method's own balance and
/// verification state.
///
/// `validate` either returns successfully or fails with a typed validation
/// error naming the offending field; there is no boolean "maybe" path.
/// Instances represent a single charge owned by one call path and are not
/// meant for concurrent use.
pub trait PaymentMethod: Send + std::fmt::Debug {
    /// Which variant this is.
    fn kind(&self) -> PaymentKind;

    /// Charge identifier, generated at construction.
    fn transaction_id(&self) -> TransactionId;

    /// Free-form execution status ("Success", "Failed", "completed", ...),
    /// empty until `execute` runs.
    fn status(&self) -> &str;

    /// Checks the configured fields. Every recognized failure carries a
    /// distinguishing reason.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Executes the charge, mutating the variant's balance state, and
    /// returns a receipt. A failing execute leaves the balance untouched.
    fn execute(&mut self, amount: Money) -> Result<Receipt, PaymentError>;

    /// Builds the receipt describing a charge of `amount` in the current
    /// execution state.
    fn receipt(&self, amount: Money) -> Receipt;
}
