//! The wallet balance interface.
//!
//! A customer's wallet map holds trait objects behind this interface, so a
//! plain number and a richer wallet service adapter look the same to the
//! customer bookkeeping.

use crate::domain::Money;
use crate::error::PaymentError;

/// A per-method balance held by a customer.
pub trait Balance: Send {
    /// Current funds in the wallet.
    fn balance(&self) -> Money;

    /// Removes `amount` from the wallet, failing without a partial debit
    /// when funds are insufficient.
    fn deduct(&mut self, amount: Money) -> Result<(), PaymentError>;
}

/// The trivial adapter: a bare number as a wallet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashBalance(Money);

impl CashBalance {
    pub fn new(amount: Money) -> Self {
        Self(amount)
    }
}

impl Balance for CashBalance {
    fn balance(&self) -> Money {
        self.0
    }

    fn deduct(&mut self, amount: Money) -> Result<(), PaymentError> {
        if amount > self.0 {
            return Err(PaymentError::InsufficientBalance);
        }
        self.0 -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cash_balance_deducts() {
        let mut wallet = CashBalance::new(Money::new(dec!(50.0)));
        wallet.deduct(Money::new(dec!(20.0))).unwrap();
        assert_eq!(wallet.balance(), Money::new(dec!(30.0)));
    }

    #[test]
    fn test_cash_balance_rejects_overdraft() {
        let mut wallet = CashBalance::new(Money::new(dec!(10.0)));
        let result = wallet.deduct(Money::new(dec!(10.01)));
        assert!(matches!(result, Err(PaymentError::InsufficientBalance)));
        assert_eq!(wallet.balance(), Money::new(dec!(10.0)));
    }
}
