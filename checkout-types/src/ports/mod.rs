//! Port traits (interfaces the payment variants and wallets implement).
//!
//! The factory and processor depend on these traits, not on concrete
//! implementations.

mod method;
mod wallet;

pub use method::{PaymentKind, PaymentMethod};
pub use wallet::{Balance, CashBalance};
