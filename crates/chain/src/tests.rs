// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::{Actor, CardChain, ChainAction, ChainEntry};

#[test]
fn test_actor_creation() {
    let actor: Actor = Actor::new(String::from("651"), String::from("unit"));
    assert_eq!(actor.id, "651");
    assert_eq!(actor.actor_type, "unit");
}

#[test]
fn test_chain_entry_records_fields() {
    let entry: ChainEntry = ChainEntry::new(
        ChainAction::InitialIssue,
        Some(50),
        String::from("new"),
        Some(String::from("admin")),
    );
    assert_eq!(entry.action, ChainAction::InitialIssue);
    assert_eq!(entry.amount, Some(50));
    assert_eq!(entry.status, "new");
    assert_eq!(entry.actor.as_deref(), Some("admin"));
    assert!(!entry.date.is_empty());
}

#[test]
fn test_chain_is_append_only() {
    let mut chain: CardChain = CardChain::new();
    assert!(chain.is_empty());

    chain.push(ChainEntry::new(
        ChainAction::InitialIssue,
        Some(100),
        String::from("new"),
        None,
    ));
    chain.push(ChainEntry::new(
        ChainAction::QuantityUpdate,
        Some(30),
        String::from("updated"),
        None,
    ));

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.entries()[0].action, ChainAction::InitialIssue);
    assert_eq!(chain.last().unwrap().action, ChainAction::QuantityUpdate);
}

#[test]
fn test_chain_serialization_is_transparent() {
    let mut chain: CardChain = CardChain::new();
    chain.push(ChainEntry::new(
        ChainAction::CardReturn,
        None,
        String::from("returned"),
        Some(String::from("admin")),
    ));

    let json: String = serde_json::to_string(&chain).unwrap();
    assert!(json.starts_with('['));
    assert!(json.contains("card_return"));

    let parsed: CardChain = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, chain);
}

#[test]
fn test_action_round_trips_as_str() {
    for action in [
        ChainAction::InitialIssue,
        ChainAction::QuantityUpdate,
        ChainAction::CardReturn,
        ChainAction::UnitIssue,
        ChainAction::UnitUpdate,
        ChainAction::UnitCredit,
    ] {
        assert!(!action.as_str().is_empty());
    }
}
