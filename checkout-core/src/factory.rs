//! Payment method factory.

use checkout_types::{PaymentConfig, PaymentMethod, ValidationError};

use crate::methods::{CreditCardPayment, CryptoPayment, PaypalPayment};

/// Constructs named payment-method variants from keyword configuration.
///
/// This is the single choke point guaranteeing no uninitialized or invalid
/// payment method escapes into the rest of the system: every instance it
/// returns has passed `validate()`.
pub struct PaymentFactory;

impl PaymentFactory {
    /// Supported type identifiers, matched case-sensitively.
    pub const SUPPORTED_TYPES: [&'static str; 3] = ["credit_card", "paypal", "crypto"];

    /// Creates a configured, pre-validated payment method.
    ///
    /// Only the configuration keys relevant to the requested variant are
    /// applied; the rest are ignored. Validation errors from configuration
    /// or the final `validate()` call propagate verbatim.
    pub fn create(
        payment_type: &str,
        config: &PaymentConfig,
    ) -> Result<Box<dyn PaymentMethod>, ValidationError> {
        let method: Box<dyn PaymentMethod> = match payment_type {
            "credit_card" => Box::new(Self::configure_credit_card(config)?),
            "paypal" => Box::new(Self::configure_paypal(config)?),
            "crypto" => Box::new(Self::configure_crypto(config)?),
            other => {
                tracing::warn!(payment_type = other, "unsupported payment type requested");
                return Err(ValidationError::UnsupportedPaymentType(other.to_string()));
            }
        };
        method.validate()?;
        tracing::info!(
            payment_type,
            transaction_id = %method.transaction_id(),
            "payment method created"
        );
        Ok(method)
    }

    fn configure_credit_card(config: &PaymentConfig) -> Result<CreditCardPayment, ValidationError> {
        let mut payment = CreditCardPayment::new();
        if let Some(cardholder) = &config.cardholder {
            payment.set_cardholder(cardholder)?;
        }
        if let Some(cardnumber) = &config.cardnumber {
            payment.set_cardnumber(cardnumber)?;
        }
        if let Some(expirationdate) = &config.expirationdate {
            payment.set_expirationdate(expirationdate)?;
        }
        if let Some(cvv) = &config.cvv {
            payment.set_cvv(cvv)?;
        }
        if let Some(balance) = config.balance {
            payment.set_balance(balance)?;
        }
        Ok(payment)
    }

    fn configure_paypal(config: &PaymentConfig) -> Result<PaypalPayment, ValidationError> {
        let mut payment = PaypalPayment::new();
        if let Some(emailaddress) = &config.emailaddress {
            payment.set_emailaddress(emailaddress)?;
        }
        if let Some(passwordtoken) = &config.passwordtoken {
            payment.set_passwordtoken(passwordtoken)?;
        }
        if let Some(verified) = config.verified {
            payment.set_verified(verified);
        }
        if let Some(balance) = config.balance {
            payment.set_balance(balance)?;
        }
        Ok(payment)
    }

    fn configure_crypto(config: &PaymentConfig) -> Result<CryptoPayment, ValidationError> {
        let mut payment = CryptoPayment::new();
        if let Some(wallet_address) = &config.wallet_address {
            payment.set_wallet_address(wallet_address);
        }
        if let Some(network) = &config.network {
            payment.set_network(network)?;
        }
        if let Some(balance) = config.balance {
            payment.set_balance(balance)?;
        }
        Ok(payment)
    }
}
