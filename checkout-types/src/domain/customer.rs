//! Customer aggregate: wallets, saved methods and the transaction log.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use super::receipt::{Receipt, TransactionId};
use crate::error::{CheckoutError, PaymentError, ValidationError};
use crate::ports::{Balance, CashBalance};

/// Unique identifier for a Customer. Displays as `USR-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random CustomerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "USR-{}", self.0)
    }
}

/// Outcome of a wallet payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A wallet payment attempt, success or failure.
///
/// `initiate_payment` appends exactly one of these per attempt that reaches
/// the wallet, so failed attempts are always recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: TransactionId,
    pub method: String,
    pub amount: Money,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WalletTransaction {
    fn failed(method: &str, amount: Money, error: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            method: method.to_string(),
            amount,
            status: TransactionStatus::Failed,
            error: Some(error.into()),
            created_at: Utc::now(),
        }
    }

    fn success(method: &str, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            method: method.to_string(),
            amount,
            status: TransactionStatus::Success,
            error: None,
            created_at: Utc::now(),
        }
    }
}

/// One entry of a customer's append-only transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionRecord {
    Wallet(WalletTransaction),
    Receipt(Receipt),
}

/// Fraud review state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudStatus {
    #[default]
    Clear,
    UnderReview,
}

/// Everything that must change atomically under the per-customer lock:
/// the wallet map, the saved method identifiers and the transaction log.
#[derive(Default)]
struct Ledger {
    wallets: HashMap<String, Box<dyn Balance>>,
    saved_methods: Vec<String>,
    history: Vec<TransactionRecord>,
    failed_attempts: u32,
}

/// An account holding saved payment-method identifiers, wallet balances and
/// an append-only transaction log.
///
/// Wallet and history access is serialized by a per-customer mutex, so
/// concurrent callers on the same customer are safe; callers on different
/// customers do not contend. History entries appear in the order their
/// originating calls completed and are never reordered or truncated.
pub struct Customer {
    id: CustomerId,
    pub name: String,
    pub email: String,
    is_active: bool,
    fraud_status: FraudStatus,
    ledger: Mutex<Ledger>,
}

impl Customer {
    /// Creates an active customer with empty collections.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            is_active: true,
            fraud_status: FraudStatus::Clear,
            ledger: Mutex::new(Ledger::default()),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Flips the account inactive. Customers are never deleted by the core.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn fraud_status(&self) -> FraudStatus {
        self.fraud_status
    }

    pub fn set_fraud_status(&mut self, status: FraudStatus) {
        self.fraud_status = status;
    }

    /// Number of failed wallet payment attempts recorded so far.
    pub fn failed_attempts(&self) -> u32 {
        self.lock_ledger().failed_attempts
    }

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Saves a payment-method identifier for future use. Duplicates are
    /// ignored.
    pub fn save_payment_method(&self, method: impl Into<String>) {
        let method = method.into();
        let mut ledger = self.lock_ledger();
        if !ledger.saved_methods.contains(&method) {
            ledger.saved_methods.push(method);
        }
    }

    pub fn saved_payment_methods(&self) -> Vec<String> {
        self.lock_ledger().saved_methods.clone()
    }

    pub fn has_payment_method(&self, method: &str) -> bool {
        self.lock_ledger().saved_methods.iter().any(|m| m == method)
    }

    /// Attaches a wallet for the given payment-method identifier.
    pub fn add_wallet(&self, method: impl Into<String>, wallet: Box<dyn Balance>) {
        self.lock_ledger().wallets.insert(method.into(), wallet);
    }

    /// Attaches a plain-number wallet for the given method identifier.
    pub fn add_cash_wallet(&self, method: impl Into<String>, amount: Decimal) {
        self.add_wallet(method, Box::new(CashBalance::new(Money::new(amount))));
    }

    /// The sum of all wallet balances.
    pub fn view_balance(&self) -> Money {
        self.lock_ledger()
            .wallets
            .values()
            .map(|wallet| wallet.balance())
            .sum()
    }

    /// Attempts to pay `amount` from the wallet saved under `method` and
    /// records the result.
    ///
    /// Fails fast (without recording) when the method was never saved or the
    /// amount is not positive. Once the attempt reaches the wallet, exactly
    /// one record is appended to the history: a deduction failure is absorbed
    /// into a failed record rather than propagated, so payment attempts are
    /// always recorded.
    pub fn initiate_payment(
        &self,
        amount: Money,
        method: &str,
    ) -> Result<WalletTransaction, CheckoutError> {
        let mut ledger = self.lock_ledger();
        if !ledger.saved_methods.iter().any(|m| m == method) {
            return Err(ValidationError::UnknownPaymentMethod(method.to_string()).into());
        }

        let Some(wallet) = ledger.wallets.get_mut(method) else {
            let record =
                WalletTransaction::failed(method, amount, "no wallet configured for method");
            tracing::warn!(
                customer_id = %self.id,
                %method,
                "payment attempt without a configured wallet"
            );
            ledger.failed_attempts += 1;
            ledger.history.push(TransactionRecord::Wallet(record.clone()));
            return Ok(record);
        };

        if !amount.is_positive() {
            return Err(PaymentError::NonPositiveAmount.into());
        }

        let record = match wallet.deduct(amount) {
            Ok(()) => WalletTransaction::success(method, amount),
            Err(err) => {
                tracing::warn!(
                    customer_id = %self.id,
                    %method,
                    %amount,
                    error = %err,
                    "wallet deduction failed"
                );
                ledger.failed_attempts += 1;
                WalletTransaction::failed(method, amount, err.to_string())
            }
        };
        tracing::info!(
            customer_id = %self.id,
            transaction_id = %record.id,
            %method,
            %amount,
            status = %record.status,
            "wallet payment recorded"
        );
        ledger.history.push(TransactionRecord::Wallet(record.clone()));
        Ok(record)
    }

    /// Appends a record to the transaction history.
    pub fn add_transaction(&self, record: TransactionRecord) {
        self.lock_ledger().history.push(record);
    }

    /// A defensive copy of the transaction history, in chronological order.
    pub fn transaction_history(&self) -> Vec<TransactionRecord> {
        self.lock_ledger().history.clone()
    }
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("is_active", &self.is_active)
            .field("fraud_status", &self.fraud_status)
            .finish_non_exhaustive()
    }
}
