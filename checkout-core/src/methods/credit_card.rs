//! Credit card payment variant.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use rust_decimal::Decimal;

use checkout_types::{
    Money, PaymentError, PaymentKind, PaymentMethod, Receipt, ReceiptDetails, TransactionId,
    ValidationError,
};

use super::{mask_card_number, ChargeMeta};

static EXPIRATION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}$").expect("valid expiration regex"));

/// A configured credit-card charge.
///
/// Fields are validated on assignment; `validate` re-checks the full
/// configuration so an instance built piecemeal cannot execute half-set.
#[derive(Debug, Clone)]
pub struct CreditCardPayment {
    meta: ChargeMeta,
    cardholder: String,
    cardnumber: String,
    expirationdate: String,
    cvv: String,
    balance: Money,
}

impl Default for CreditCardPayment {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditCardPayment {
    /// Creates a bare, unconfigured instance.
    pub fn new() -> Self {
        Self {
            meta: ChargeMeta::new(),
            cardholder: String::new(),
            cardnumber: String::new(),
            expirationdate: String::new(),
            cvv: String::new(),
            balance: Money::ZERO,
        }
    }

    pub fn cardholder(&self) -> &str {
        &self.cardholder
    }

    /// Sets the cardholder name: exactly "Prefix Firstname Lastname", three
    /// non-empty space-separated tokens.
    pub fn set_cardholder(&mut self, value: &str) -> Result<(), ValidationError> {
        let parts: Vec<&str> = value.split(' ').collect();
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(ValidationError::CardholderFormat);
        }
        self.cardholder = value.to_string();
        Ok(())
    }

    pub fn cardnumber(&self) -> &str {
        &self.cardnumber
    }

    /// Sets the card number: exactly 16 digits, no separators.
    pub fn set_cardnumber(&mut self, value: &str) -> Result<(), ValidationError> {
        if !check_cardnumber(value) {
            return Err(ValidationError::CardNumberFormat);
        }
        self.cardnumber = value.to_string();
        Ok(())
    }

    pub fn expirationdate(&self) -> &str {
        &self.expirationdate
    }

    /// Sets the expiration date: "MM-YY", numeric, not in the past. A card
    /// is valid through the end of its expiration month.
    pub fn set_expirationdate(&mut self, value: &str) -> Result<(), ValidationError> {
        if !EXPIRATION_FORMAT.is_match(value) {
            return Err(ValidationError::ExpirationFormat);
        }
        if !check_expiration_not_past(value)? {
            return Err(ValidationError::CardExpired);
        }
        self.expirationdate = value.to_string();
        Ok(())
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Sets the CVV: 3 or 4 digits.
    pub fn set_cvv(&mut self, value: &str) -> Result<(), ValidationError> {
        if !check_cvv(value) {
            return Err(ValidationError::CvvFormat);
        }
        self.cvv = value.to_string();
        Ok(())
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Sets the available balance. Must not be negative.
    pub fn set_balance(&mut self, value: Decimal) -> Result<(), ValidationError> {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeBalance);
        }
        self.balance = Money::new(value);
        Ok(())
    }

    /// Adds funds to the card balance. The amount must be positive.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveDeposit);
        }
        self.balance += Money::new(amount);
        Ok(())
    }
}

impl PaymentMethod for CreditCardPayment {
    fn kind(&self) -> PaymentKind {
        PaymentKind::CreditCard
    }

    fn transaction_id(&self) -> TransactionId {
        self.meta.transaction_id
    }

    fn status(&self) -> &str {
        &self.meta.status
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.cardholder.is_empty() {
            return Err(ValidationError::MissingCardholder);
        }
        if !check_cardnumber(&self.cardnumber) {
            return Err(ValidationError::CardNumberFormat);
        }
        if !EXPIRATION_FORMAT.is_match(&self.expirationdate) {
            return Err(ValidationError::ExpirationFormat);
        }
        if !check_expiration_not_past(&self.expirationdate)? {
            return Err(ValidationError::CardExpired);
        }
        if !check_cvv(&self.cvv) {
            return Err(ValidationError::CvvFormat);
        }
        Ok(())
    }

    fn execute(&mut self, amount: Money) -> Result<Receipt, PaymentError> {
        if amount > self.balance {
            self.meta.status = "Failed".to_string();
            tracing::warn!(
                transaction_id = %self.meta.transaction_id,
                %amount,
                balance = %self.balance,
                "credit card charge declined"
            );
            return Err(PaymentError::InsufficientBalance);
        }
        self.meta.status = "Success".to_string();
        self.balance -= amount;
        tracing::info!(
            transaction_id = %self.meta.transaction_id,
            %amount,
            "credit card charge executed"
        );
        Ok(self.receipt(amount))
    }

    fn receipt(&self, amount: Money) -> Receipt {
        Receipt {
            transaction_id: self.meta.transaction_id,
            payment_method: PaymentKind::CreditCard,
            details: ReceiptDetails::Card {
                card_number: mask_card_number(&self.cardnumber),
                card_holder: self.cardholder.clone(),
            },
            amount,
            fee: None,
            timestamp: self.meta.timestamp,
            status: self.meta.status.clone(),
        }
    }
}

fn check_cardnumber(value: &str) -> bool {
    value.len() == 16 && value.chars().all(|c| c.is_ascii_digit())
}

fn check_cvv(value: &str) -> bool {
    (value.len() == 3 || value.len() == 4) && value.chars().all(|c| c.is_ascii_digit())
}

/// Returns whether "MM-YY" is the current month or later. The format check
/// has already run, but parse failures still surface as format errors.
fn check_expiration_not_past(value: &str) -> Result<bool, ValidationError> {
    let (month, year) = value
        .split_once('-')
        .ok_or(ValidationError::ExpirationFormat)?;
    let month: u32 = month
        .parse()
        .map_err(|_| ValidationError::ExpirationFormat)?;
    let year: i32 = year
        .parse()
        .map_err(|_| ValidationError::ExpirationFormat)?;
    let full_year = 2000 + year;

    let now = Utc::now();
    Ok(now.year() < full_year || (now.year() == full_year && now.month() <= month))
}
