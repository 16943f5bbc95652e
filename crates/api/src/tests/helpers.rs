// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fuelcard::{Command, Ledger, apply};
use fuelcard_domain::{FuelType, UnitCode};
use fuelcard_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};

pub const ADMIN_SECRET: &str = "admin-secret";
pub const UNIT_SECRET: &str = "unit-secret";

/// Builds a persistence adapter seeded with HQ and two unit
/// credentials.
pub fn create_test_persistence() -> Persistence {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("in-memory database should initialize");
    persistence
        .create_unit("מפקדה", "מפקדה", ADMIN_SECRET, true)
        .expect("HQ credential should insert");
    persistence
        .create_unit("651", "גדוד 651", UNIT_SECRET, false)
        .expect("unit 651 credential should insert");
    persistence
        .create_unit("652", "גדוד 652", UNIT_SECRET, false)
        .expect("unit 652 credential should insert");
    persistence
}

pub fn admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("מפקדה"),
        Role::Admin,
        UnitCode::parse("מפקדה").expect("HQ label is a valid unit code"),
    )
}

pub fn unit_actor(code: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from(code),
        Role::Unit,
        UnitCode::parse(code).expect("known unit code"),
    )
}

/// Builds a ledger with one card assigned to the given unit.
pub fn ledger_with_card(card_number: u64, unit: &str) -> Ledger {
    let command: Command = Command::NewCard {
        card_number,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 50,
        fuel_type: FuelType::Diesel,
        unit_code: Some(UnitCode::parse(unit).expect("known unit code")),
        from_voice: false,
    };
    apply(&Ledger::new(), command, &admin_actor().to_chain_actor())
        .expect("issuance should succeed on an empty ledger")
        .new_ledger
}
