// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fuelcard_domain::{Card, UnitCode};

/// The in-memory card collection.
///
/// The ledger is the one shared mutable resource of the system. It is
/// mutated only through [`crate::apply`], which returns a fresh ledger
/// rather than mutating in place, so callers can defer the commit
/// until a remote write has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    /// All known cards.
    pub cards: Vec<Card>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a ledger from a fetched card collection.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Looks up a card by number.
    #[must_use]
    pub fn find_card(&self, card_number: u64) -> Option<&Card> {
        self.cards.iter().find(|c| c.card_number == card_number)
    }

    /// Returns whether a card number is already present.
    #[must_use]
    pub fn has_card(&self, card_number: u64) -> bool {
        self.find_card(card_number).is_some()
    }

    /// Returns the cards belonging to a unit.
    #[must_use]
    pub fn cards_for_unit(&self, unit: &UnitCode) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.belongs_to(unit)).collect()
    }

    /// Records the store-assigned identifier on a card after its
    /// first successful write.
    pub fn set_card_id(&mut self, card_number: u64, id: i64) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.card_number == card_number) {
            card.id = Some(id);
        }
    }

    /// Returns a copy of this ledger with one card replaced.
    ///
    /// The replacement is matched by card number.
    #[must_use]
    pub(crate) fn with_replaced(&self, replacement: Card) -> Self {
        let cards: Vec<Card> = self
            .cards
            .iter()
            .map(|c| {
                if c.card_number == replacement.card_number {
                    replacement.clone()
                } else {
                    c.clone()
                }
            })
            .collect();
        Self { cards }
    }

    /// Returns a copy of this ledger with one card appended.
    #[must_use]
    pub(crate) fn with_added(&self, card: Card) -> Self {
        let mut cards: Vec<Card> = self.cards.clone();
        cards.push(card);
        Self { cards }
    }
}

/// The result of applying a command to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The ledger after the mutation.
    pub new_ledger: Ledger,
    /// The affected card after the mutation.
    pub card: Card,
}
