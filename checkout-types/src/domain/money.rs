//! Monetary value objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::ItemError;

/// A monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal` to keep financial
/// arithmetic exact and to give amounts a distinct type at API boundaries.
/// `Money` itself carries no sign restriction; balances and prices enforce
/// their own range rules at assignment time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A discount rate in the closed range [0, 1].
///
/// `0` means no discount, `1` means 100% off. The range is enforced at
/// construction, never at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discount(Decimal);

impl Discount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(rate: Decimal) -> Result<Self, ItemError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(ItemError::DiscountOutOfRange);
        }
        Ok(Self(rate))
    }

    pub fn rate(&self) -> Decimal {
        self.0
    }

    /// The factor a price is multiplied by once the discount is applied.
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}
