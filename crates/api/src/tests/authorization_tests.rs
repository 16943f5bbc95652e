// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fuelcard::{Command, Ledger};
use fuelcard_domain::FuelType;

use crate::auth::{AuthorizationService, Role};
use crate::capabilities::{Operation, compute_global_capabilities, role_allows};
use crate::error::AuthError;
use crate::tests::helpers::{admin_actor, ledger_with_card, unit_actor};

#[test]
fn test_admin_may_issue_cards() {
    let ledger: Ledger = Ledger::new();
    let command: Command = Command::NewCard {
        card_number: 123,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 50,
        fuel_type: FuelType::Gasoline,
        unit_code: None,
        from_voice: false,
    };

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_command(&admin_actor(), &command, &ledger);

    assert!(result.is_ok());
}

#[test]
fn test_unit_may_not_issue_cards() {
    let ledger: Ledger = Ledger::new();
    let command: Command = Command::NewCard {
        card_number: 123,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 50,
        fuel_type: FuelType::Gasoline,
        unit_code: None,
        from_voice: false,
    };

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_command(&unit_actor("651"), &command, &ledger);

    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_unit_may_not_update_or_return_cards() {
    let ledger: Ledger = ledger_with_card(123, "651");

    let update: Command = Command::UpdateCard {
        card_number: 123,
        amount: 30,
    };
    let ret: Command = Command::ReturnCard { card_number: 123 };

    assert!(matches!(
        AuthorizationService::authorize_command(&unit_actor("651"), &update, &ledger),
        Err(AuthError::Unauthorized { .. })
    ));
    assert!(matches!(
        AuthorizationService::authorize_command(&unit_actor("651"), &ret, &ledger),
        Err(AuthError::Unauthorized { .. })
    ));
}

#[test]
fn test_unit_may_run_unit_operations_on_own_card() {
    let ledger: Ledger = ledger_with_card(123, "651");
    let command: Command = Command::UnitIssue {
        card_number: 123,
        holder_name: String::from("משה לוי"),
        holder_id: String::from("1234567"),
        fuel_amount: 40,
    };

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_command(&unit_actor("651"), &command, &ledger);

    assert!(result.is_ok());
}

#[test]
fn test_unit_may_not_touch_another_units_card() {
    let ledger: Ledger = ledger_with_card(123, "652");
    let command: Command = Command::UnitIssue {
        card_number: 123,
        holder_name: String::from("משה לוי"),
        holder_id: String::from("1234567"),
        fuel_amount: 40,
    };

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_command(&unit_actor("651"), &command, &ledger);

    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_admin_may_run_unit_operations_on_any_card() {
    let ledger: Ledger = ledger_with_card(123, "652");
    let command: Command = Command::UnitCredit { card_number: 123 };

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_command(&admin_actor(), &command, &ledger);

    assert!(result.is_ok());
}

#[test]
fn test_view_scoped_to_own_unit() {
    let ledger: Ledger = ledger_with_card(123, "652");
    let card = ledger.find_card(123).unwrap();

    assert!(AuthorizationService::authorize_view(&admin_actor(), card).is_ok());
    assert!(AuthorizationService::authorize_view(&unit_actor("652"), card).is_ok());
    assert!(AuthorizationService::authorize_view(&unit_actor("651"), card).is_err());
}

#[test]
fn test_capability_matrix_matches_enforcement() {
    assert!(role_allows(Role::Admin, Operation::IssueCard));
    assert!(!role_allows(Role::Unit, Operation::IssueCard));
    assert!(role_allows(Role::Unit, Operation::UnitCredit));
    assert!(!role_allows(Role::Unit, Operation::ViewAllUnits));
}

#[test]
fn test_global_capabilities_for_unit_role() {
    let capabilities = compute_global_capabilities(Role::Unit);

    assert!(!capabilities.can_issue_card.is_allowed());
    assert!(!capabilities.can_update_card.is_allowed());
    assert!(!capabilities.can_return_card.is_allowed());
    assert!(capabilities.can_unit_issue.is_allowed());
    assert!(capabilities.can_unit_update.is_allowed());
    assert!(capabilities.can_unit_credit.is_allowed());
    assert!(!capabilities.can_view_all_units.is_allowed());
}
