//! Data Transfer Objects for configuration boundaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named configuration for `PaymentFactory::create`.
///
/// One bag of optional fields covers all three variants; the factory applies
/// only the keys relevant to the requested variant and ignores the rest
/// (unknown JSON keys are likewise ignored on deserialization).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    // Credit card
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cardholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cardnumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expirationdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cvv: Option<String>,

    // PayPal
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emailaddress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub passwordtoken: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verified: Option<bool>,

    // Crypto
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub network: Option<String>,

    /// Starting balance, shared by all variants.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub balance: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_json_keys_are_ignored() {
        let config: PaymentConfig = serde_json::from_str(
            r#"{"emailaddress": "a@b.com", "verified": true, "colour": "blue"}"#,
        )
        .unwrap();
        assert_eq!(config.emailaddress.as_deref(), Some("a@b.com"));
        assert_eq!(config.verified, Some(true));
        assert!(config.cardnumber.is_none());
    }
}
