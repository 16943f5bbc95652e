// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Card number is malformed or out of range.
    InvalidCardNumber(String),
    /// Vehicle number is malformed (unit-operations context).
    InvalidVehicleNumber(String),
    /// Holder name is malformed.
    InvalidName(String),
    /// A free-text field contains markup-significant characters.
    ForbiddenCharacters {
        /// The field in which the characters were found.
        field: String,
    },
    /// Phone number does not match the local phone pattern.
    InvalidPhone(String),
    /// Amount is not a plain integer.
    InvalidAmount(String),
    /// Amount is outside the permitted liter range.
    AmountOutOfRange {
        /// The rejected amount.
        amount: u64,
    },
    /// Fuel type is not a member of the fixed set.
    InvalidFuelType(String),
    /// Unit code is not a member of the fixed set.
    InvalidUnitCode(String),
    /// Card status string is not recognized.
    InvalidStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCardNumber(msg) => write!(f, "Invalid card number: {msg}"),
            Self::InvalidVehicleNumber(msg) => write!(f, "Invalid vehicle number: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::ForbiddenCharacters { field } => {
                write!(f, "Field '{field}' contains forbidden characters")
            }
            Self::InvalidPhone(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            Self::AmountOutOfRange { amount } => {
                write!(f, "Amount {amount} is outside the permitted liter range")
            }
            Self::InvalidFuelType(msg) => write!(f, "Invalid fuel type: '{msg}'"),
            Self::InvalidUnitCode(msg) => write!(f, "Invalid unit code: '{msg}'"),
            Self::InvalidStatus(msg) => write!(f, "Invalid card status: '{msg}'"),
        }
    }
}

impl std::error::Error for DomainError {}
