// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Minimum liter amount a card may carry.
pub const AMOUNT_MIN: u32 = 1;
/// Maximum liter amount a card may carry.
pub const AMOUNT_MAX: u32 = 10_000;

/// Characters rejected in free-text fields (markup injection guard).
const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Validates a card number.
///
/// A card number is 4 to 12 ASCII digits, parsed as an integer.
///
/// # Arguments
///
/// * `raw` - The raw card number string
///
/// # Returns
///
/// * `Ok(u64)` with the parsed number if valid
/// * `Err(DomainError::InvalidCardNumber)` otherwise
///
/// # Errors
///
/// Returns an error if the value is not 4-12 digits or does not parse.
pub fn validate_card_number(raw: &str) -> Result<u64, DomainError> {
    let trimmed: &str = raw.trim();
    if !(4..=12).contains(&trimmed.len()) {
        return Err(DomainError::InvalidCardNumber(format!(
            "must be 4-12 digits, got '{trimmed}'"
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidCardNumber(format!(
            "must contain only digits, got '{trimmed}'"
        )));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidCardNumber(format!("cannot parse '{trimmed}'")))
}

/// Validates a vehicle number (the card identifier used in the
/// unit-operations context).
///
/// A vehicle number is exactly 7 or 8 ASCII digits.
///
/// # Errors
///
/// Returns an error if the value is not 7-8 digits.
pub fn validate_vehicle_number(raw: &str) -> Result<u64, DomainError> {
    let trimmed: &str = raw.trim();
    if !(7..=8).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidVehicleNumber(format!(
            "must be 7-8 digits, got '{trimmed}'"
        )));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidVehicleNumber(format!("cannot parse '{trimmed}'")))
}

/// Validates a holder name.
///
/// Names are 2-50 characters from the locale alphabets (Hebrew or
/// Latin) plus space and hyphen. Markup-significant characters fail
/// with `ForbiddenCharacters` rather than the generic format error.
///
/// # Returns
///
/// The trimmed name on success.
///
/// # Errors
///
/// Returns `DomainError::ForbiddenCharacters` if the name contains
/// markup characters, or `DomainError::InvalidName` for any other
/// format violation.
pub fn validate_name(raw: &str) -> Result<String, DomainError> {
    let trimmed: &str = raw.trim();

    if trimmed.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return Err(DomainError::ForbiddenCharacters {
            field: String::from("name"),
        });
    }

    let length: usize = trimmed.chars().count();
    if !(2..=50).contains(&length) {
        return Err(DomainError::InvalidName(String::from(
            "name must be 2-50 characters",
        )));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
    {
        return Err(DomainError::InvalidName(String::from(
            "name may contain only letters, spaces, and hyphens",
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates a local phone number.
///
/// Accepts a leading 0, a valid prefix digit, 7 trailing digits, and
/// at most one hyphen anywhere in the body. The normalized digit
/// string is returned.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the value does not match
/// the local phone pattern.
pub fn validate_phone(raw: &str) -> Result<String, DomainError> {
    let trimmed: &str = raw.trim();

    let hyphens: usize = trimmed.chars().filter(|c| *c == '-').count();
    if hyphens > 1 {
        return Err(DomainError::InvalidPhone(format!(
            "too many hyphens in '{trimmed}'"
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(DomainError::InvalidPhone(format!(
            "non-digit characters in '{trimmed}'"
        )));
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if !(9..=10).contains(&digits.len()) {
        return Err(DomainError::InvalidPhone(format!(
            "expected 9-10 digits, got {}",
            digits.len()
        )));
    }
    if !digits.starts_with('0') {
        return Err(DomainError::InvalidPhone(String::from(
            "phone must start with 0",
        )));
    }

    // Rule: the prefix digit after the leading 0 must be a valid
    // area/carrier group.
    let prefix: char = digits.chars().nth(1).unwrap_or('0');
    if !matches!(prefix, '2' | '3' | '4' | '5' | '7' | '8' | '9') {
        return Err(DomainError::InvalidPhone(format!(
            "invalid prefix '0{prefix}'"
        )));
    }

    Ok(digits)
}

/// Validates a liter amount given as a raw string.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the value is not a plain
/// integer, or `DomainError::AmountOutOfRange` if it falls outside
/// [`AMOUNT_MIN`], [`AMOUNT_MAX`].
pub fn validate_amount(raw: &str) -> Result<u32, DomainError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidAmount(format!(
            "must contain only digits, got '{trimmed}'"
        )));
    }
    let value: u64 = trimmed
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidAmount(format!("cannot parse '{trimmed}'")))?;
    let amount: u32 =
        u32::try_from(value).map_err(|_| DomainError::AmountOutOfRange { amount: value })?;
    validate_amount_value(amount)?;
    Ok(amount)
}

/// Validates an already-parsed liter amount.
///
/// Used by the lifecycle engine to re-check bounds for programmatic
/// callers that bypass string validation.
///
/// # Errors
///
/// Returns `DomainError::AmountOutOfRange` if the amount falls
/// outside the permitted range.
pub const fn validate_amount_value(amount: u32) -> Result<(), DomainError> {
    if amount < AMOUNT_MIN || amount > AMOUNT_MAX {
        return Err(DomainError::AmountOutOfRange {
            amount: amount as u64,
        });
    }
    Ok(())
}

/// Strips HTML/script-like content from a free-text value.
///
/// Applied unconditionally to every free-text field before storage,
/// independent of field validation. Tag spans are removed entirely and
/// any remaining markup-significant characters are dropped.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    let mut out: String = String::with_capacity(raw.len());
    let mut in_tag: bool = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            '&' | '"' | '\'' => {}
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}
