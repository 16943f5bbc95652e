// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Ledger, TransitionResult, apply};
use fuelcard_chain::Actor;
use fuelcard_domain::FuelType;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_new_card_command(card_number: u64) -> Command {
    Command::NewCard {
        card_number,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 50,
        fuel_type: FuelType::Gasoline,
        unit_code: None,
        from_voice: false,
    }
}

/// Builds a ledger holding a single freshly issued card.
pub fn create_issued_ledger(card_number: u64) -> Ledger {
    let ledger: Ledger = Ledger::new();
    let actor: Actor = create_test_actor();
    let transition: TransitionResult =
        apply(&ledger, create_new_card_command(card_number), &actor)
            .expect("issuance should succeed on an empty ledger");
    transition.new_ledger
}

/// Builds a ledger where the card also carries a unit sub-ledger
/// record.
pub fn create_unit_issued_ledger(card_number: u64) -> Ledger {
    let ledger: Ledger = create_issued_ledger(card_number);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UnitIssue {
        card_number,
        holder_name: String::from("משה לוי"),
        holder_id: String::from("1234567"),
        fuel_amount: 40,
    };
    let transition: TransitionResult =
        apply(&ledger, command, &actor).expect("unit issuance should succeed");
    transition.new_ledger
}
