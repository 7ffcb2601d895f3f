//! PayPal payment variant.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use checkout_types::{
    Money, PaymentError, PaymentKind, PaymentMethod, Receipt, ReceiptDetails, TransactionId,
    ValidationError,
};

use super::ChargeMeta;

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// A configured PayPal charge: account email, password token and
/// verification state.
#[derive(Debug, Clone)]
pub struct PaypalPayment {
    meta: ChargeMeta,
    emailaddress: String,
    passwordtoken: String,
    verified: bool,
    balance: Money,
}

impl Default for PaypalPayment {
    fn default() -> Self {
        Self::new()
    }
}

impl PaypalPayment {
    /// Creates a bare, unconfigured instance (unverified, zero balance).
    pub fn new() -> Self {
        Self {
            meta: ChargeMeta::new(),
            emailaddress: String::new(),
            passwordtoken: String::new(),
            verified: false,
            balance: Money::ZERO,
        }
    }

    pub fn emailaddress(&self) -> &str {
        &self.emailaddress
    }

    /// Sets the account email. Must match local@domain.tld.
    pub fn set_emailaddress(&mut self, value: &str) -> Result<(), ValidationError> {
        if !EMAIL_FORMAT.is_match(value) {
            return Err(ValidationError::EmailFormat);
        }
        self.emailaddress = value.to_string();
        Ok(())
    }

    /// Sets the password token: at least 8 characters with at least one
    /// letter and one digit.
    pub fn set_passwordtoken(&mut self, value: &str) -> Result<(), ValidationError> {
        if !check_password(value) {
            return Err(ValidationError::WeakPassword);
        }
        self.passwordtoken = value.to_string();
        Ok(())
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn set_verified(&mut self, value: bool) {
        self.verified = value;
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
}

impl PaymentMethod for PaypalPayment {
    fn kind(&self) -> PaymentKind {
        PaymentKind::PayPal
    }

    fn transaction_id(&self) -> TransactionId {
        self.meta.transaction_id
    }

    fn status(&self) -> &str {
        &self.meta.status
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !EMAIL_FORMAT.is_match(&self.emailaddress) {
            return Err(ValidationError::EmailFormat);
        }
        if !check_password(&self.passwordtoken) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }

    fn execute(&mut self, amount: Money) -> Result<Receipt, PaymentError> {
        if !self.verified {
            self.meta.status = "Failed".to_string();
            tracing::warn!(
                transaction_id = %self.meta.transaction_id,
                "paypal charge refused: account not verified"
            );
            return Err(PaymentError::NotVerified);
        }
        if amount > self.balance {
            self.meta.status = "Failed".to_string();
            tracing::warn!(
                transaction_id = %self.meta.transaction_id,
                %amount,
                balance = %self.balance,
                "paypal charge declined"
            );
            return Err(PaymentError::InsufficientBalance);
        }
        self.meta.status = "Success".to_string();
        self.balance -= amount;
        tracing::info!(
            transaction_id = %self.meta.transaction_id,
            %amount,
            "paypal charge executed"
        );
        Ok(self.receipt(amount))
    }

    fn receipt(&self, amount: Money) -> Receipt {
        Receipt {
            transaction_id: self.meta.transaction_id,
            payment_method: PaymentKind::PayPal,
            details: ReceiptDetails::PayPal {
                email_address: self.emailaddress.clone(),
            },
            amount,
            fee: None,
            timestamp: self.meta.timestamp,
            status: self.meta.status.clone(),
        }
    }
}

fn check_password(value: &str) -> bool {
    value.len() >= 8
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn configured_paypal() -> PaypalPayment {
        let mut paypal = PaypalPayment::new();
        paypal.set_emailaddress("buyer@example.com").unwrap();
        paypal.set_passwordtoken("s3curepass").unwrap();
        paypal.set_verified(true);
        paypal.set_balance(dec!(1000.0)).unwrap();
        paypal
    }

    #[test]
    fn test_email_format() {
        let mut paypal = PaypalPayment::new();
        for bad in ["plainaddress", "user@", "@domain.com", "user@domain", "a@b.c"] {
            assert!(
                matches!(
                    paypal.set_emailaddress(bad),
                    Err(ValidationError::EmailFormat)
                ),
                "accepted bad email {bad:?}"
            );
        }
        paypal.set_emailaddress("first.last+tag@sub.domain.co").unwrap();
    }

    #[test]
    fn test_password_strength() {
        let mut paypal = PaypalPayment::new();
        for bad in ["short1", "allletters", "12345678"] {
            assert!(
                matches!(
                    paypal.set_passwordtoken(bad),
                    Err(ValidationError::WeakPassword)
                ),
                "accepted weak password {bad:?}"
            );
        }
        paypal.set_passwordtoken("abcdefg1").unwrap();
    }

    #[test]
    fn test_validate_checks_all_fields() {
        let paypal = PaypalPayment::new();
        assert!(matches!(
            paypal.validate(),
            Err(ValidationError::EmailFormat)
        ));

        let mut paypal = PaypalPayment::new();
        paypal.set_emailaddress("buyer@example.com").unwrap();
        assert!(matches!(
            paypal.validate(),
            Err(ValidationError::WeakPassword)
        ));

        assert!(configured_paypal().validate().is_ok());
    }

    #[test]
    fn test_unverified_account_fails_before_balance_check() {
        let mut paypal = configured_paypal();
        paypal.set_verified(false);

        // amount well within balance: the verification check must fire first
        let result = paypal.execute(Money::new(dec!(10.0)));
        assert!(matches!(result, Err(PaymentError::NotVerified)));
        assert_eq!(paypal.balance(), Money::new(dec!(1000.0)));
        assert_eq!(paypal.status(), "Failed");

        // and it also fires for amounts above balance
        let result = paypal.execute(Money::new(dec!(5000.0)));
        assert!(matches!(result, Err(PaymentError::NotVerified)));
    }

    #[test]
    fn test_insufficient_balance() {
        let mut paypal = configured_paypal();
        let result = paypal.execute(Money::new(dec!(1000.01)));
        assert!(matches!(result, Err(PaymentError::InsufficientBalance)));
        assert_eq!(paypal.balance(), Money::new(dec!(1000.0)));
    }

    #[test]
    fn test_execute_debits_and_builds_receipt() {
        let mut paypal = configured_paypal();
        let receipt = paypal.execute(Money::new(dec!(100.0))).unwrap();

        assert_eq!(paypal.balance(), Money::new(dec!(900.0)));
        assert_eq!(receipt.payment_method, PaymentKind::PayPal);
        assert_eq!(receipt.status, "Success");
        assert_eq!(
            receipt.details,
            ReceiptDetails::PayPal {
                email_address: "buyer@example.com".to_string()
            }
        );
    }
}
