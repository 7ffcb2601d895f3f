//! Receipts returned by payment execution.
//!
//! The serialized field names (`TransactionID`, `PaymentMethod`, `Amount`,
//! `Fee`, `Timestamp`, `Transaction status` and the per-variant identifying
//! field) are part of the external contract and consumed by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use crate::ports::PaymentKind;

/// Unique identifier for a charge, generated when a payment method is
/// constructed. Displays as `TX-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TX-{}", self.0)
    }
}

/// The record describing a completed (or failed) charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "TransactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: PaymentKind,
    #[serde(flatten)]
    pub details: ReceiptDetails,
    #[serde(rename = "Amount")]
    pub amount: Money,
    /// Network fee, present for crypto charges only.
    #[serde(rename = "Fee", skip_serializing_if = "Option::is_none", default)]
    pub fee: Option<Money>,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Transaction status")]
    pub status: String,
}

/// The variant-specific identifying field of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReceiptDetails {
    Card {
        /// All but the last 4 digits replaced by `*`.
        #[serde(rename = "CardNumber")]
        card_number: String,
        #[serde(rename = "CardHolder")]
        card_holder: String,
    },
    PayPal {
        #[serde(rename = "EmailAddress")]
        email_address: String,
    },
    Crypto {
        #[serde(rename = "WalletAddress")]
        wallet_address: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_id_display_prefix() {
        let id = TransactionId::new();
        assert!(id.to_string().starts_with("TX-"));
    }

    #[test]
    fn test_receipt_serializes_contract_field_names() {
        let receipt = Receipt {
            transaction_id: TransactionId::new(),
            payment_method: PaymentKind::Crypto,
            details: ReceiptDetails::Crypto {
                wallet_address: format!("0x{}", "1".repeat(40)),
            },
            amount: Money::new(dec!(100.0)),
            fee: Some(Money::new(dec!(1.0))),
            timestamp: Utc::now(),
            status: "completed".to_string(),
        };

        let value = serde_json::to_value(&receipt).unwrap();
        for key in [
            "TransactionID",
            "PaymentMethod",
            "WalletAddress",
            "Amount",
            "Fee",
            "Timestamp",
            "Transaction status",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
        assert_eq!(value["PaymentMethod"], "Crypto");
    }

    #[test]
    fn test_fee_omitted_when_absent() {
        let receipt = Receipt {
            transaction_id: TransactionId::new(),
            payment_method: PaymentKind::PayPal,
            details: ReceiptDetails::PayPal {
                email_address: "buyer@example.com".to_string(),
            },
            amount: Money::new(dec!(10.0)),
            fee: None,
            timestamp: Utc::now(),
            status: "Success".to_string(),
        };

        let value = serde_json::to_value(&receipt).unwrap();
        assert!(value.get("Fee").is_none());
        assert_eq!(value["EmailAddress"], "buyer@example.com");
        assert_eq!(value["PaymentMethod"], "PayPal");
    }
}
