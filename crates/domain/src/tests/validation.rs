// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{
    sanitize_text, validate_amount, validate_amount_value, validate_card_number, validate_name,
    validate_phone, validate_vehicle_number,
};

#[test]
fn test_card_number_valid() {
    assert_eq!(validate_card_number("1234").unwrap(), 1234);
    assert_eq!(validate_card_number("123456789012").unwrap(), 123_456_789_012);
    assert_eq!(validate_card_number("  54321 ").unwrap(), 54321);
}

#[test]
fn test_card_number_too_short() {
    assert!(matches!(
        validate_card_number("12"),
        Err(DomainError::InvalidCardNumber(_))
    ));
}

#[test]
fn test_card_number_too_long() {
    assert!(matches!(
        validate_card_number("12345678901234"),
        Err(DomainError::InvalidCardNumber(_))
    ));
}

#[test]
fn test_card_number_rejects_non_digits() {
    assert!(matches!(
        validate_card_number("12a45"),
        Err(DomainError::InvalidCardNumber(_))
    ));
}

#[test]
fn test_vehicle_number_valid() {
    assert_eq!(validate_vehicle_number("1234567").unwrap(), 1_234_567);
    assert_eq!(validate_vehicle_number("12345678").unwrap(), 12_345_678);
}

#[test]
fn test_vehicle_number_wrong_length() {
    assert!(validate_vehicle_number("123456").is_err());
    assert!(validate_vehicle_number("123456789").is_err());
}

#[test]
fn test_name_valid() {
    assert_eq!(validate_name("עומרי בן גיגי").unwrap(), "עומרי בן גיגי");
    assert_eq!(validate_name("John Smith-Doe").unwrap(), "John Smith-Doe");
}

#[test]
fn test_name_too_short() {
    assert!(matches!(
        validate_name("א"),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_name_rejects_markup() {
    assert_eq!(
        validate_name("<script>alert(1)</script>"),
        Err(DomainError::ForbiddenCharacters {
            field: String::from("name")
        })
    );
    assert_eq!(
        validate_name("דוד & כהן"),
        Err(DomainError::ForbiddenCharacters {
            field: String::from("name")
        })
    );
}

#[test]
fn test_name_rejects_digits() {
    assert!(matches!(
        validate_name("דוד 123"),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_phone_valid() {
    assert_eq!(validate_phone("0501234567").unwrap(), "0501234567");
    assert_eq!(validate_phone("050-1234567").unwrap(), "0501234567");
    assert_eq!(validate_phone("03-1234567").unwrap(), "031234567");
}

#[test]
fn test_phone_invalid() {
    // No leading zero
    assert!(validate_phone("501234567").is_err());
    // Invalid prefix group
    assert!(validate_phone("0601234567").is_err());
    // Too short
    assert!(validate_phone("05012345").is_err());
    // Letters
    assert!(validate_phone("05O1234567").is_err());
    // Multiple hyphens
    assert!(validate_phone("050-123-4567").is_err());
}

#[test]
fn test_amount_valid() {
    assert_eq!(validate_amount("1").unwrap(), 1);
    assert_eq!(validate_amount("50").unwrap(), 50);
    assert_eq!(validate_amount("10000").unwrap(), 10_000);
}

#[test]
fn test_amount_out_of_range() {
    assert_eq!(
        validate_amount("0"),
        Err(DomainError::AmountOutOfRange { amount: 0 })
    );
    assert_eq!(
        validate_amount("10001"),
        Err(DomainError::AmountOutOfRange { amount: 10_001 })
    );
}

#[test]
fn test_amount_rejects_non_numeric() {
    assert!(matches!(
        validate_amount("fifty"),
        Err(DomainError::InvalidAmount(_))
    ));
    assert!(matches!(
        validate_amount("-5"),
        Err(DomainError::InvalidAmount(_))
    ));
}

#[test]
fn test_amount_value_bounds() {
    assert!(validate_amount_value(1).is_ok());
    assert!(validate_amount_value(10_000).is_ok());
    assert!(validate_amount_value(0).is_err());
    assert!(validate_amount_value(10_001).is_err());
}

#[test]
fn test_sanitize_strips_script_tags() {
    assert_eq!(sanitize_text("<script>alert(1)</script>דוד"), "alert(1)דוד");
    assert_eq!(sanitize_text("דוד <b>כהן</b>"), "דוד כהן");
}

#[test]
fn test_sanitize_drops_markup_chars() {
    assert_eq!(sanitize_text("a & b \"c\" 'd'"), "a  b c d");
}

#[test]
fn test_sanitize_plain_text_unchanged() {
    assert_eq!(sanitize_text("עומרי בן גיגי"), "עומרי בן גיגי");
}
