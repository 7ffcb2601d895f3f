//! Concrete payment-method variants.

use chrono::{DateTime, Utc};

use checkout_types::TransactionId;

pub mod credit_card;
pub mod crypto;
pub mod paypal;

pub use credit_card::CreditCardPayment;
pub use crypto::{CryptoPayment, Network};
pub use paypal::PaypalPayment;

/// Charge metadata common to every variant: transaction id and timestamp
/// assigned at construction, execution status set by `execute`.
#[derive(Debug, Clone)]
pub(crate) struct ChargeMeta {
    pub transaction_id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

impl ChargeMeta {
    pub fn new() -> Self {
        Self {
            transaction_id: TransactionId::new(),
            timestamp: Utc::now(),
            status: String::new(),
        }
    }
}

/// Masks all digits except the last 4 with `*`, preserving any non-digit
/// separators in position.
pub fn mask_card_number(card_number: &str) -> String {
    let digit_count = card_number.chars().filter(char::is_ascii_digit).count();
    let keep_from = digit_count.saturating_sub(4);
    let mut digit_index = 0;
    card_number
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                let masked = if digit_index < keep_from { '*' } else { c };
                digit_index += 1;
                masked
            } else {
                c
            }
        })
        .collect()
}
