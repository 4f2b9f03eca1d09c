use storefront_api::models::{PaymentMethod, PaymentStatus};

// The payment enums are part of the wire contract; the variant spellings
// below are what clients send and receive.
#[test]
fn payment_method_wire_format() {
    assert_eq!(
        serde_json::to_string(&PaymentMethod::Cod).unwrap(),
        "\"COD\""
    );
    assert_eq!(
        serde_json::to_string(&PaymentMethod::Card).unwrap(),
        "\"Card\""
    );
    assert_eq!(
        serde_json::to_string(&PaymentMethod::Wallet).unwrap(),
        "\"Wallet\""
    );

    let parsed: PaymentMethod = serde_json::from_str("\"COD\"").unwrap();
    assert_eq!(parsed, PaymentMethod::Cod);

    assert!(serde_json::from_str::<PaymentMethod>("\"Cheque\"").is_err());
}

#[test]
fn payment_status_wire_format() {
    assert_eq!(
        serde_json::to_string(&PaymentStatus::Pending).unwrap(),
        "\"Pending\""
    );
    let parsed: PaymentStatus = serde_json::from_str("\"Failed\"").unwrap();
    assert_eq!(parsed, PaymentStatus::Failed);
}
