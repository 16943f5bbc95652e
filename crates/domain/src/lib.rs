// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod card;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use card::{Card, SYSTEM_HOLDER, UnitRecord};
pub use error::DomainError;
pub use types::{CardStatus, FuelType, UnitCode};
pub use validation::{
    AMOUNT_MAX, AMOUNT_MIN, sanitize_text, validate_amount, validate_amount_value,
    validate_card_number, validate_name, validate_phone, validate_vehicle_number,
};
