// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use fuelcard::{Command, Ledger, apply};
use fuelcard_chain::Actor;
use fuelcard_domain::{Card, FuelType, UnitCode};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

/// Builds a freshly issued card through the lifecycle engine so the
/// document carries a real chain.
pub fn create_test_card(card_number: u64) -> Card {
    let actor: Actor = Actor::new(String::from("admin-1"), String::from("admin"));
    let command: Command = Command::NewCard {
        card_number,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 50,
        fuel_type: FuelType::Gasoline,
        unit_code: Some(UnitCode::parse("651").expect("651 is a known unit code")),
        from_voice: false,
    };
    apply(&Ledger::new(), command, &actor)
        .expect("issuance should succeed on an empty ledger")
        .card
}
