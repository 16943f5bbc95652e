// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Card, CardStatus, DomainError, FuelType, SYSTEM_HOLDER, UnitCode, UnitRecord};
use fuelcard_chain::CardChain;
use std::str::FromStr;

#[test]
fn test_card_status_round_trip() {
    for status in [
        CardStatus::New,
        CardStatus::Updated,
        CardStatus::Returned,
        CardStatus::Transferred,
        CardStatus::Active,
        CardStatus::Empty,
        CardStatus::FinalReturn,
    ] {
        let parsed: CardStatus = CardStatus::from_str(status.as_str()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_card_status_unknown_string_fails() {
    let result = CardStatus::from_str("destroyed");
    assert_eq!(
        result,
        Err(DomainError::InvalidStatus(String::from("destroyed")))
    );
}

#[test]
fn test_terminal_statuses() {
    assert!(CardStatus::Returned.is_finalized());
    assert!(CardStatus::FinalReturn.is_finalized());
    assert!(!CardStatus::New.is_finalized());
    assert!(!CardStatus::Updated.is_finalized());
    assert!(!CardStatus::Active.is_finalized());
    assert!(!CardStatus::Empty.is_finalized());
    assert!(!CardStatus::Transferred.is_finalized());
}

#[test]
fn test_fuel_type_parses_domain_labels() {
    assert_eq!(FuelType::parse("בנזין").unwrap(), FuelType::Gasoline);
    assert_eq!(FuelType::parse("סולר").unwrap(), FuelType::Diesel);
    assert_eq!(
        FuelType::parse("סולר חקלאי").unwrap(),
        FuelType::MarkedDiesel
    );
    assert_eq!(FuelType::parse(" גז ").unwrap(), FuelType::Gas);
    assert_eq!(FuelType::parse("חשמלי").unwrap(), FuelType::Electric);
    assert_eq!(FuelType::parse("היברידי").unwrap(), FuelType::Hybrid);
}

#[test]
fn test_fuel_type_rejects_unknown_label() {
    assert!(matches!(
        FuelType::parse("קרוסין"),
        Err(DomainError::InvalidFuelType(_))
    ));
}

#[test]
fn test_unit_code_accepts_known_codes() {
    for code in UnitCode::KNOWN_CODES {
        let unit: UnitCode = UnitCode::parse(code).unwrap();
        assert_eq!(unit.as_str(), code);
        assert!(!unit.is_hq());
    }
}

#[test]
fn test_unit_code_hq_sentinel() {
    let hq: UnitCode = UnitCode::parse(UnitCode::HQ_CODE).unwrap();
    assert!(hq.is_hq());
}

#[test]
fn test_unit_code_rejects_unknown() {
    assert!(matches!(
        UnitCode::parse("999"),
        Err(DomainError::InvalidUnitCode(_))
    ));
}

#[test]
fn test_card_belongs_to_unit() {
    let card: Card = Card {
        id: None,
        card_number: 12345,
        holder_name: String::from("דוד כהן"),
        holder_phone: String::from("0501234567"),
        amount: 100,
        fuel_type: FuelType::Diesel,
        unit_code: Some(UnitCode::parse("651").unwrap()),
        status: CardStatus::New,
        issue_date: String::from("2026-01-01T00:00:00Z"),
        credit_date: None,
        touched_at: String::from("2026-01-01T00:00:00Z"),
        current_holder: String::from(SYSTEM_HOLDER),
        chain: CardChain::new(),
        unit_record: None,
    };

    assert!(card.belongs_to(&UnitCode::parse("651").unwrap()));
    assert!(!card.belongs_to(&UnitCode::parse("652").unwrap()));
}

#[test]
fn test_unit_record_clears_to_zero() {
    let record: UnitRecord = UnitRecord {
        holder_name: None,
        holder_id: None,
        remaining_fuel: 0,
        issue_date: String::from("2026-01-01T00:00:00Z"),
        credit_date: Some(String::from("2026-02-01T00:00:00Z")),
    };
    assert_eq!(record.remaining_fuel, 0);
    assert!(record.holder_name.is_none());
}
