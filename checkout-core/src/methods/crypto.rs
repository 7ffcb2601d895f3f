//! Cryptocurrency payment variant.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use checkout_types::{
    Money, PaymentError, PaymentKind, PaymentMethod, Receipt, ReceiptDetails, TransactionId,
    ValidationError,
};

use super::ChargeMeta;

/// Network fee applied to every executed charge: 1% of the amount.
const FEE_RATE: Decimal = dec!(0.01);

// Legacy: 1... , Segwit: 3... (25-34 chars), Bech32: bc1... (42-62 chars)
static BITCOIN_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$|^bc1[a-z0-9]{39,59}$")
        .expect("valid bitcoin address regex")
});

// 0x followed by 40 hex characters
static ETHEREUM_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid ethereum address regex"));

/// The closed set of supported crypto networks.
///
/// Parsed case-insensitively from a handful of aliases; anything else is
/// rejected, never silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Bitcoin,
    Ethereum,
}

impl Network {
    fn address_pattern(&self) -> &'static Regex {
        match self {
            Self::Bitcoin => &BITCOIN_ADDRESS,
            Self::Ethereum => &ETHEREUM_ADDRESS,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitcoin => write!(f, "bitcoin"),
            Self::Ethereum => write!(f, "ethereum"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" | "testnet" => Ok(Self::Bitcoin),
            "ethereum" | "eth" => Ok(Self::Ethereum),
            _ => Err(ValidationError::UnsupportedNetwork(s.to_string())),
        }
    }
}

/// A configured crypto charge: wallet address, network and balance.
#[derive(Debug, Clone)]
pub struct CryptoPayment {
    meta: ChargeMeta,
    wallet_address: Option<String>,
    network: Option<Network>,
    balance: Money,
}

impl Default for CryptoPayment {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoPayment {
    /// Creates a bare, unconfigured instance.
    pub fn new() -> Self {
        Self {
            meta: ChargeMeta::new(),
            wallet_address: None,
            network: None,
            balance: Money::ZERO,
        }
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    /// Sets the wallet address. Format checks run in `validate`, once the
    /// network is known.
    pub fn set_wallet_address(&mut self, value: &str) {
        self.wallet_address = Some(value.to_string());
    }

    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// Sets the network from an identifier or alias ("bitcoin"/"BTC",
    /// "ethereum"/"ETH", case-insensitive).
    pub fn set_network(&mut self, value: &str) -> Result<(), ValidationError> {
        self.network = Some(value.parse()?);
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

    /// The network fee for a charge of `amount`: 1%.
    pub fn estimate_fee(amount: Money) -> Money {
        Money::new(amount.amount() * FEE_RATE)
    }
}

impl PaymentMethod for CryptoPayment {
    fn kind(&self) -> PaymentKind {
        PaymentKind::Crypto
    }

    fn transaction_id(&self) -> TransactionId {
        self.meta.transaction_id
    }

    fn status(&self) -> &str {
        &self.meta.status
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let Some(address) = self.wallet_address.as_deref() else {
            return Err(ValidationError::MissingWalletAddress);
        };
        let Some(network) = self.network else {
            return Err(ValidationError::MissingNetwork);
        };
        if !network.address_pattern().is_match(address) {
            return Err(ValidationError::WalletAddressFormat);
        }
        Ok(())
    }

    /// Executes the charge: validate amount, check funds, debit, report.
    /// The fee is included in the funds check, so a successful charge never
    /// overdraws the wallet.
    fn execute(&mut self, amount: Money) -> Result<Receipt, PaymentError> {
        if !amount.is_positive() {
            return Err(PaymentError::NonPositiveAmount);
        }
        let fee = Self::estimate_fee(amount);
        if amount + fee > self.balance {
            self.meta.status = "failed".to_string();
            tracing::warn!(
                transaction_id = %self.meta.transaction_id,
                %amount,
                %fee,
                balance = %self.balance,
                "crypto charge declined"
            );
            return Err(PaymentError::InsufficientBalance);
        }
        self.balance -= amount + fee;
        self.meta.status = "completed".to_string();
        tracing::info!(
            transaction_id = %self.meta.transaction_id,
            %amount,
            %fee,
            "crypto charge executed"
        );
        Ok(self.receipt(amount))
    }

    fn receipt(&self, amount: Money) -> Receipt {
        Receipt {
            transaction_id: self.meta.transaction_id,
            payment_method: PaymentKind::Crypto,
            details: ReceiptDetails::Crypto {
                wallet_address: self.wallet_address.clone().unwrap_or_default(),
            },
            amount,
            fee: Some(Self::estimate_fee(amount)),
            timestamp: self.meta.timestamp,
            status: self.meta.status.clone(),
        }
    }
}
