// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_issued_ledger, create_new_card_command, create_test_actor, create_unit_issued_ledger,
};
use crate::{Command, CoreError, Ledger, TransitionResult, apply};
use fuelcard_chain::{Actor, ChainAction};
use fuelcard_domain::{Card, CardStatus, SYSTEM_HOLDER, UnitRecord};

#[test]
fn test_new_card_creates_card_with_seeded_chain() {
    let ledger: Ledger = Ledger::new();
    let actor: Actor = create_test_actor();

    let result: Result<TransitionResult, CoreError> =
        apply(&ledger, create_new_card_command(123), &actor);

    assert!(result.is_ok());
    let transition: TransitionResult = result.unwrap();
    assert_eq!(transition.new_ledger.cards.len(), 1);
    let card: &Card = &transition.card;
    assert_eq!(card.card_number, 123);
    assert_eq!(card.status, CardStatus::New);
    assert_eq!(card.current_holder, SYSTEM_HOLDER);
    assert_eq!(card.chain.len(), 1);
    assert_eq!(card.chain.last().unwrap().action, ChainAction::InitialIssue);
    assert_eq!(card.chain.last().unwrap().amount, Some(50));
}

#[test]
fn test_new_card_rejects_duplicate_number() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();

    let result: Result<TransitionResult, CoreError> =
        apply(&ledger, create_new_card_command(123), &actor);

    assert!(matches!(result, Err(CoreError::CardAlreadyExists(123))));
}

#[test]
fn test_new_card_rejects_amount_out_of_range() {
    let ledger: Ledger = Ledger::new();
    let actor: Actor = create_test_actor();
    let command: Command = Command::NewCard {
        card_number: 123,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 10_001,
        fuel_type: fuelcard_domain::FuelType::Diesel,
        unit_code: None,
        from_voice: false,
    };

    let result: Result<TransitionResult, CoreError> = apply(&ledger, command, &actor);

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_update_card_overwrites_amount_and_appends_entry() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UpdateCard {
        card_number: 123,
        amount: 30,
    };

    let transition: TransitionResult = apply(&ledger, command, &actor).unwrap();

    assert_eq!(transition.card.amount, 30);
    assert_eq!(transition.card.status, CardStatus::Updated);
    assert_eq!(transition.card.chain.len(), 2);
    assert_eq!(
        transition.card.chain.last().unwrap().action,
        ChainAction::QuantityUpdate
    );
}

#[test]
fn test_update_card_unknown_number_is_rejected() {
    let ledger: Ledger = Ledger::new();
    let actor: Actor = create_test_actor();
    let command: Command = Command::UpdateCard {
        card_number: 999,
        amount: 30,
    };

    let result: Result<TransitionResult, CoreError> = apply(&ledger, command, &actor);

    assert!(matches!(result, Err(CoreError::CardNotFound(999))));
}

#[test]
fn test_return_card_preserves_amount() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();

    let transition: TransitionResult =
        apply(&ledger, Command::ReturnCard { card_number: 123 }, &actor).unwrap();

    assert_eq!(transition.card.status, CardStatus::Returned);
    assert_eq!(transition.card.amount, 50);
    assert!(transition.card.credit_date.is_some());
    assert_eq!(
        transition.card.chain.last().unwrap().action,
        ChainAction::CardReturn
    );
}

#[test]
fn test_returned_card_rejects_further_updates() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let returned: TransitionResult =
        apply(&ledger, Command::ReturnCard { card_number: 123 }, &actor).unwrap();

    let command: Command = Command::UpdateCard {
        card_number: 123,
        amount: 20,
    };
    let result: Result<TransitionResult, CoreError> =
        apply(&returned.new_ledger, command, &actor);

    assert!(matches!(result, Err(CoreError::CardFinalized(123))));
}

#[test]
fn test_returned_card_rejects_second_return() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let returned: TransitionResult =
        apply(&ledger, Command::ReturnCard { card_number: 123 }, &actor).unwrap();

    let result: Result<TransitionResult, CoreError> = apply(
        &returned.new_ledger,
        Command::ReturnCard { card_number: 123 },
        &actor,
    );

    assert!(matches!(result, Err(CoreError::CardFinalized(123))));
}

#[test]
fn test_unit_issue_attaches_unit_record() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UnitIssue {
        card_number: 123,
        holder_name: String::from("משה לוי"),
        holder_id: String::from("1234567"),
        fuel_amount: 40,
    };

    let transition: TransitionResult = apply(&ledger, command, &actor).unwrap();

    let record: &UnitRecord = transition.card.unit_record.as_ref().unwrap();
    assert_eq!(record.holder_name.as_deref(), Some("משה לוי"));
    assert_eq!(record.holder_id.as_deref(), Some("1234567"));
    assert_eq!(record.remaining_fuel, 40);
    assert!(record.credit_date.is_none());
    assert_eq!(
        transition.card.chain.last().unwrap().action,
        ChainAction::UnitIssue
    );
}

#[test]
fn test_unit_update_without_record_is_rejected() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UnitUpdate {
        card_number: 123,
        holder_name: String::from("משה לוי"),
        holder_id: String::from("1234567"),
        fuel_amount: 25,
    };

    let result: Result<TransitionResult, CoreError> = apply(&ledger, command, &actor);

    assert!(matches!(result, Err(CoreError::UnitDataMissing(123))));
}

#[test]
fn test_unit_update_overwrites_holder_and_fuel() {
    let ledger: Ledger = create_unit_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UnitUpdate {
        card_number: 123,
        holder_name: String::from("יוסי פרץ"),
        holder_id: String::from("7654321"),
        fuel_amount: 15,
    };

    let transition: TransitionResult = apply(&ledger, command, &actor).unwrap();

    let record: &UnitRecord = transition.card.unit_record.as_ref().unwrap();
    assert_eq!(record.holder_name.as_deref(), Some("יוסי פרץ"));
    assert_eq!(record.remaining_fuel, 15);
}

#[test]
fn test_unit_credit_clears_holder_and_zeroes_fuel() {
    let ledger: Ledger = create_unit_issued_ledger(123);
    let actor: Actor = create_test_actor();

    let transition: TransitionResult =
        apply(&ledger, Command::UnitCredit { card_number: 123 }, &actor).unwrap();

    let record: &UnitRecord = transition.card.unit_record.as_ref().unwrap();
    assert!(record.holder_name.is_none());
    assert!(record.holder_id.is_none());
    assert_eq!(record.remaining_fuel, 0);
    assert!(record.credit_date.is_some());
    assert_eq!(
        transition.card.chain.last().unwrap().action,
        ChainAction::UnitCredit
    );
}

#[test]
fn test_unit_operations_rejected_on_returned_card() {
    let ledger: Ledger = create_unit_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let returned: TransitionResult =
        apply(&ledger, Command::ReturnCard { card_number: 123 }, &actor).unwrap();

    let result: Result<TransitionResult, CoreError> = apply(
        &returned.new_ledger,
        Command::UnitCredit { card_number: 123 },
        &actor,
    );

    assert!(matches!(result, Err(CoreError::CardFinalized(123))));
}

#[test]
fn test_apply_does_not_mutate_input_ledger() {
    let ledger: Ledger = create_issued_ledger(123);
    let actor: Actor = create_test_actor();
    let command: Command = Command::UpdateCard {
        card_number: 123,
        amount: 30,
    };

    let _transition: TransitionResult = apply(&ledger, command, &actor).unwrap();

    let original: &Card = ledger.find_card(123).unwrap();
    assert_eq!(original.amount, 50);
    assert_eq!(original.status, CardStatus::New);
    assert_eq!(original.chain.len(), 1);
}
