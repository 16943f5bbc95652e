// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_new_card_command, create_test_actor};
use crate::{Command, Ledger, TransitionResult, apply};
use fuelcard_chain::Actor;
use fuelcard_domain::{Card, CardStatus};

/// Every accepted mutation appends exactly one chain entry.
#[test]
fn test_chain_grows_by_one_per_accepted_command() {
    let actor: Actor = create_test_actor();
    let mut ledger: Ledger = Ledger::new();

    let commands: Vec<Command> = vec![
        create_new_card_command(123),
        Command::UpdateCard {
            card_number: 123,
            amount: 30,
        },
        Command::UnitIssue {
            card_number: 123,
            holder_name: String::from("משה לוי"),
            holder_id: String::from("1234567"),
            fuel_amount: 20,
        },
        Command::UnitUpdate {
            card_number: 123,
            holder_name: String::from("משה לוי"),
            holder_id: String::from("1234567"),
            fuel_amount: 10,
        },
        Command::UnitCredit { card_number: 123 },
        Command::ReturnCard { card_number: 123 },
    ];

    for (index, command) in commands.into_iter().enumerate() {
        let transition: TransitionResult = apply(&ledger, command, &actor).unwrap();
        assert_eq!(transition.card.chain.len(), index + 1);
        ledger = transition.new_ledger;
    }
}

#[test]
fn test_full_lifecycle_ends_returned_with_complete_chain() {
    let actor: Actor = create_test_actor();
    let mut ledger: Ledger = Ledger::new();

    ledger = apply(&ledger, create_new_card_command(555), &actor)
        .unwrap()
        .new_ledger;
    ledger = apply(
        &ledger,
        Command::UpdateCard {
            card_number: 555,
            amount: 70,
        },
        &actor,
    )
    .unwrap()
    .new_ledger;
    let transition: TransitionResult =
        apply(&ledger, Command::ReturnCard { card_number: 555 }, &actor).unwrap();

    let card: &Card = &transition.card;
    assert_eq!(card.status, CardStatus::Returned);
    assert_eq!(card.amount, 70);
    assert_eq!(card.chain.len(), 3);

    // Chain entries carry the status the card held after each step.
    let statuses: Vec<&str> = card
        .chain
        .entries()
        .iter()
        .map(|entry| entry.status.as_str())
        .collect();
    assert_eq!(statuses, vec!["new", "updated", "returned"]);
}

#[test]
fn test_ledger_tracks_multiple_independent_cards() {
    let actor: Actor = create_test_actor();
    let mut ledger: Ledger = Ledger::new();

    ledger = apply(&ledger, create_new_card_command(100), &actor)
        .unwrap()
        .new_ledger;
    ledger = apply(&ledger, create_new_card_command(200), &actor)
        .unwrap()
        .new_ledger;
    ledger = apply(&ledger, Command::ReturnCard { card_number: 100 }, &actor)
        .unwrap()
        .new_ledger;

    assert_eq!(ledger.cards.len(), 2);
    assert_eq!(ledger.find_card(100).unwrap().status, CardStatus::Returned);
    assert_eq!(ledger.find_card(200).unwrap().status, CardStatus::New);
}
