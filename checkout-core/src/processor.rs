//! Payment processing facade.

use checkout_types::{
    CheckoutError, Customer, Order, OrderError, OrderStatus, PaymentMethod, Receipt,
    TransactionRecord,
};

/// Orchestrates a payment for an order: guards, validates, executes and
/// records the outcome on both the order and the customer.
///
/// Charges exactly once per successful call; any guard or execution failure
/// leaves the order and the customer history untouched.
pub struct PaymentProcessor;

impl PaymentProcessor {
    /// Charges `order.total_amount()` to `method` on behalf of `customer`.
    ///
    /// Guard order: the order must belong to the customer, must not be
    /// empty, and must be pending. The method is then re-validated before
    /// any charge is attempted. Execution failures come back wrapped with
    /// the order id.
    ///
    /// On success the order is confirmed with the method's transaction id
    /// and a copy of the receipt is appended to the customer's history.
    pub fn process_payment(
        customer: &Customer,
        order: &mut Order,
        method: &mut dyn PaymentMethod,
    ) -> Result<Receipt, CheckoutError> {
        if order.customer_id() != customer.id() {
            tracing::warn!(
                order_id = %order.id(),
                order_customer = %order.customer_id(),
                customer_id = %customer.id(),
                "payment rejected: order belongs to a different customer"
            );
            return Err(OrderError::CustomerMismatch.into());
        }
        if order.is_empty() {
            return Err(OrderError::Empty.into());
        }
        if order.status() != OrderStatus::Pending {
            return Err(OrderError::NotPending(order.status()).into());
        }

        method.validate()?;

        let amount = order.total_amount();
        let receipt = method
            .execute(amount)
            .map_err(|err| err.for_order(order.id().clone()))?;

        order.confirm_payment(receipt.transaction_id, method.kind().variant_name());
        customer.add_transaction(TransactionRecord::Receipt(receipt.clone()));
        tracing::info!(
            order_id = %order.id(),
            customer_id = %customer.id(),
            transaction_id = %receipt.transaction_id,
            payment_method = method.kind().label(),
            %amount,
            "payment processed"
        );
        Ok(receipt)
    }
}
