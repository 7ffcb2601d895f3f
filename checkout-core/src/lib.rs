//! # Checkout Core
//!
//! Payment-method variants, the factory that constructs and gates them, and
//! the processor facade for the checkout payment core.
//!
//! ## Architecture
//!
//! - `methods/` - Concrete `PaymentMethod` variants (credit card, PayPal,
//!   crypto), each owning its own validation rules and balance state
//! - `factory` - The single choke point constructing pre-validated variants
//! - `processor` - The facade enforcing order/customer consistency before
//!   money moves

pub mod factory;
pub mod methods;
pub mod processor;


pub use factory::PaymentFactory;
pub use methods::{CreditCardPayment, CryptoPayment, Network, PaypalPayment};
pub use processor::PaymentProcessor;
