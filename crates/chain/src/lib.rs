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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a card mutation:
/// an HQ administrator, a unit member, or the system itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor (login or unit code).
    pub id: String,
    /// The type of actor (e.g., "admin", "unit", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The kinds of lifecycle events a card chain records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainAction {
    /// Initial issuance of the card.
    #[serde(rename = "initial_issue")]
    InitialIssue,
    /// Allotment quantity update.
    #[serde(rename = "quantity_update")]
    QuantityUpdate,
    /// Return of the card to the issuing system.
    #[serde(rename = "card_return")]
    CardReturn,
    /// A unit drew against the card.
    #[serde(rename = "unit_issue")]
    UnitIssue,
    /// Unit holder or remaining-fuel data changed.
    #[serde(rename = "unit_update")]
    UnitUpdate,
    /// The unit sub-ledger was credited and cleared.
    #[serde(rename = "unit_credit")]
    UnitCredit,
}

impl ChainAction {
    /// Returns the string representation of this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InitialIssue => "initial_issue",
            Self::QuantityUpdate => "quantity_update",
            Self::CardReturn => "card_return",
            Self::UnitIssue => "unit_issue",
            Self::UnitUpdate => "unit_update",
            Self::UnitCredit => "unit_credit",
        }
    }
}

impl std::fmt::Display for ChainAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in a card's audit chain.
///
/// Entries are immutable once created. The `status` field records the
/// card status string in effect after the event was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// The lifecycle event this entry records.
    pub action: ChainAction,
    /// The liter amount involved, if the event carried one.
    pub amount: Option<u32>,
    /// When the event occurred (ISO 8601).
    pub date: String,
    /// The card status after the event.
    pub status: String,
    /// The actor that initiated the event, if known.
    pub actor: Option<String>,
}

impl ChainEntry {
    /// Creates a new entry timestamped at the current instant.
    ///
    /// # Arguments
    ///
    /// * `action` - The lifecycle event being recorded
    /// * `amount` - The liter amount involved, if any
    /// * `status` - The card status string after the event
    /// * `actor` - The initiating actor's identifier, if known
    #[must_use]
    pub fn new(
        action: ChainAction,
        amount: Option<u32>,
        status: String,
        actor: Option<String>,
    ) -> Self {
        Self {
            action,
            amount,
            date: now_iso8601(),
            status,
            actor,
        }
    }
}

/// The append-only audit trail embedded in each card.
///
/// The chain is the sole audit record for a card. It exposes no
/// truncation or reordering API: entries can only be appended, so
/// chain length is monotonically non-decreasing by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CardChain {
    entries: Vec<ChainEntry>,
}

impl CardChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry to the chain.
    pub fn push(&mut self, entry: ChainEntry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the chain has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    /// Returns the entries in chronological order.
    #[must_use]
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }
}

/// Returns the current UTC instant as an ISO 8601 string.
///
/// Falls back to a plain unix timestamp if formatting fails, so a
/// timestamp is always produced.
#[must_use]
pub fn now_iso8601() -> String {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    now.format(&Iso8601::DEFAULT)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
