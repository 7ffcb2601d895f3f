//! End-to-end checkout flows: factory-built methods paying real orders.

use rust_decimal_macros::dec;

use checkout_core::{PaymentFactory, PaymentProcessor};
use checkout_types::{
    CheckoutError, Customer, Item, Money, Order, OrderError, OrderStatus, PaymentConfig,
    PaymentError, PaymentKind, ReceiptDetails, TransactionRecord, ValidationError,
};

fn item(name: &str, price: rust_decimal::Decimal, stock: u32) -> Item {
    let mut item = Item::new(name);
    item.set_price(price).unwrap();
    item.set_stock(stock);
    item
}

fn credit_card_config(balance: rust_decimal::Decimal) -> PaymentConfig {
    PaymentConfig {
        cardholder: Some("Mr John Doe".to_string()),
        cardnumber: Some("1234567812345678".to_string()),
        expirationdate: Some("12-99".to_string()),
        cvv: Some("123".to_string()),
        balance: Some(balance),
        ..PaymentConfig::default()
    }
}

#[test]
fn credit_card_pays_discounted_order() {
    let customer = Customer::new("Alice", "alice@example.com");
    let mut order = Order::new(&customer);

    let mut laptop = item("Laptop", dec!(1200.0), 5);
    laptop.set_discount(dec!(0.1)).unwrap();
    order.add_item(laptop).unwrap();

    let mut cable = item("Cable", dec!(30.0), 50);
    cable.set_quantity(2).unwrap();
    order.add_item(cable).unwrap();

    assert_eq!(order.total_amount(), Money::new(dec!(1140.0)));

    let mut method = PaymentFactory::create("credit_card", &credit_card_config(dec!(2000.0)))
        .unwrap();
    let receipt =
        PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap();

    assert_eq!(receipt.amount, Money::new(dec!(1140.0)));
    assert_eq!(receipt.payment_method, PaymentKind::CreditCard);
    assert_eq!(receipt.status, "Success");
    match &receipt.details {
        ReceiptDetails::Card { card_number, .. } => assert_eq!(card_number, "************5678"),
        other => panic!("unexpected receipt details: {other:?}"),
    }

    assert_eq!(order.status(), OrderStatus::Confirmed);
    assert_eq!(order.payment_method(), Some("CreditCard"));
    assert_eq!(order.transaction_id(), Some(receipt.transaction_id));
    assert_eq!(
        customer.transaction_history(),
        vec![TransactionRecord::Receipt(receipt)]
    );
}

#[test]
fn credit_card_with_insufficient_funds_fails_and_names_the_order() {
    let customer = Customer::new("Alice", "alice@example.com");
    let mut order = Order::new(&customer);
    order.add_item(item("Laptop", dec!(500.0), 5)).unwrap();
    let order_id = order.id().clone();

    let mut method = PaymentFactory::create("credit_card", &credit_card_config(dec!(100.0)))
        .unwrap();
    let err =
        PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap_err();

    match err {
        CheckoutError::Payment(PaymentError::Order { order_id: id, source }) => {
            assert_eq!(id, order_id);
            assert_eq!(*source, PaymentError::InsufficientBalance);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(order.status(), OrderStatus::Pending);
    assert!(customer.transaction_history().is_empty());
    // a failed order can be retried with a funded method
    let mut retry = PaymentFactory::create("credit_card", &credit_card_config(dec!(500.0)))
        .unwrap();
    PaymentProcessor::process_payment(&customer, &mut order, retry.as_mut()).unwrap();
    assert_eq!(order.status(), OrderStatus::Confirmed);
}

#[test]
fn unverified_paypal_account_cannot_pay() {
    let customer = Customer::new("Bob", "bob@example.com");
    let mut order = Order::new(&customer);
    order.add_item(item("Book", dec!(20.0), 3)).unwrap();

    let config = PaymentConfig {
        emailaddress: Some("bob@example.com".to_string()),
        passwordtoken: Some("s3curepass".to_string()),
        verified: Some(false),
        balance: Some(dec!(1000.0)),
        ..PaymentConfig::default()
    };
    let mut method = PaymentFactory::create("paypal", &config).unwrap();
    let err =
        PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap_err();

    assert!(err.to_string().contains("Account not verified"));
    assert_eq!(order.status(), OrderStatus::Pending);
}

#[test]
fn crypto_charge_debits_amount_plus_network_fee() {
    let customer = Customer::new("Carol", "carol@example.com");
    let mut order = Order::new(&customer);
    order.add_item(item("Gadget", dec!(100.0), 1)).unwrap();

    let wallet_address = format!("0x{}", "a".repeat(40));
    let config = PaymentConfig {
        wallet_address: Some(wallet_address.clone()),
        network: Some("ETH".to_string()),
        balance: Some(dec!(500.0)),
        ..PaymentConfig::default()
    };
    let mut method = PaymentFactory::create("crypto", &config).unwrap();
    let receipt =
        PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap();

    assert_eq!(receipt.amount, Money::new(dec!(100.0)));
    assert_eq!(receipt.fee, Some(Money::new(dec!(1.0))));
    assert_eq!(receipt.status, "completed");
    assert_eq!(
        receipt.details,
        ReceiptDetails::Crypto { wallet_address }
    );
    assert_eq!(order.payment_method(), Some("Crypto"));

    let json = serde_json::to_value(&receipt).unwrap();
    let fee: rust_decimal::Decimal = json["Fee"].as_str().unwrap().parse().unwrap();
    assert_eq!(fee, dec!(1.0));
    assert_eq!(json["PaymentMethod"], "Crypto");
}

#[test]
fn factory_rejects_incomplete_configuration_before_any_charge() {
    let config = PaymentConfig {
        emailaddress: Some("not-an-email".to_string()),
        passwordtoken: Some("s3curepass".to_string()),
        ..PaymentConfig::default()
    };
    let err = PaymentFactory::create("paypal", &config).unwrap_err();
    assert_eq!(err, ValidationError::EmailFormat);

    let err = PaymentFactory::create("bank_transfer", &PaymentConfig::default()).unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedPaymentType(_)));
}

#[test]
fn config_parsed_from_json_tolerates_unknown_keys() {
    let config: PaymentConfig = serde_json::from_str(
        r#"{
            "cardholder": "Mr John Doe",
            "cardnumber": "1234567812345678",
            "expirationdate": "12-99",
            "cvv": "123",
            "balance": 300.0,
            "loyalty_tier": "gold"
        }"#,
    )
    .unwrap();

    let method = PaymentFactory::create("credit_card", &config).unwrap();
    assert_eq!(method.kind(), PaymentKind::CreditCard);
}

#[test]
fn wallet_payments_and_order_receipts_share_one_history() {
    let customer = Customer::new("Dave", "dave@example.com");
    customer.save_payment_method("paypal");
    customer.add_cash_wallet("paypal", dec!(50.0));

    customer
        .initiate_payment(Money::new(dec!(20.0)), "paypal")
        .unwrap();

    let mut order = Order::new(&customer);
    order.add_item(item("Pen", dec!(5.0), 10)).unwrap();
    let config = PaymentConfig {
        emailaddress: Some("dave@example.com".to_string()),
        passwordtoken: Some("s3curepass".to_string()),
        verified: Some(true),
        balance: Some(dec!(100.0)),
        ..PaymentConfig::default()
    };
    let mut method = PaymentFactory::create("paypal", &config).unwrap();
    PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap();

    let history = customer.transaction_history();
    assert_eq!(history.len(), 2);
    assert!(matches!(history[0], TransactionRecord::Wallet(_)));
    assert!(matches!(history[1], TransactionRecord::Receipt(_)));
    assert_eq!(customer.view_balance(), Money::new(dec!(30.0)));
}

#[test]
fn cancelled_order_cannot_be_paid_or_modified() {
    let customer = Customer::new("Eve", "eve@example.com");
    let mut order = Order::new(&customer);
    order.add_item(item("Mug", dec!(12.0), 4)).unwrap();
    order.set_status(OrderStatus::Cancelled);

    let mut method = PaymentFactory::create("credit_card", &credit_card_config(dec!(100.0)))
        .unwrap();
    let err =
        PaymentProcessor::process_payment(&customer, &mut order, method.as_mut()).unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Order(OrderError::NotPending(OrderStatus::Cancelled))
    ));

    let result = order.add_item(item("Coaster", dec!(3.0), 4));
    assert!(matches!(
        result,
        Err(OrderError::Terminal(OrderStatus::Cancelled))
    ));
}
