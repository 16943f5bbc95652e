// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CardStatus, FuelType, UnitCode};
use fuelcard_chain::CardChain;
use serde::{Deserialize, Serialize};

/// The custody sentinel for cards held by the issuing system itself.
pub const SYSTEM_HOLDER: &str = "מערכת";

/// The unit sub-ledger layered on a card once a unit has drawn
/// against it.
///
/// The sub-ledger has its own issue/credit lifecycle, independent of
/// the card's primary status. Crediting clears the holder fields and
/// resets `remaining_fuel` to exactly zero; the record itself is kept
/// so the unit dates stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// The drawing unit member's name. Cleared on credit.
    pub holder_name: Option<String>,
    /// The drawing holder's identifier (personal or vehicle number).
    /// Cleared on credit.
    pub holder_id: Option<String>,
    /// Liters still available to the unit. Never negative; `u32` by
    /// construction.
    pub remaining_fuel: u32,
    /// When the unit drew against the card (ISO 8601).
    pub issue_date: String,
    /// When the unit sub-ledger was credited, if it has been.
    pub credit_date: Option<String>,
}

/// A fuel allotment record identified by a unique card number.
///
/// The card is the central entity of the ledger. Its embedded `chain`
/// is the sole audit trail: every accepted mutation appends exactly
/// one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Opaque store-assigned identifier. `None` before the first save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The unique card number. Immutable through normal flow.
    pub card_number: u64,
    /// Holder contact name captured at issuance.
    pub holder_name: String,
    /// Holder phone captured at issuance (normalized digits).
    pub holder_phone: String,
    /// Liters currently allocated.
    pub amount: u32,
    /// The card's fuel type.
    pub fuel_type: FuelType,
    /// The owning battalion, or `None` for admin-only cards.
    pub unit_code: Option<UnitCode>,
    /// The lifecycle status.
    pub status: CardStatus,
    /// When the card was issued (ISO 8601).
    pub issue_date: String,
    /// When the card was returned, if it has been.
    pub credit_date: Option<String>,
    /// Last-touched timestamp (ISO 8601).
    pub touched_at: String,
    /// Current custody. Defaults to the system sentinel.
    pub current_holder: String,
    /// The append-only audit chain.
    pub chain: CardChain,
    /// The unit sub-ledger, present once a unit has drawn.
    pub unit_record: Option<UnitRecord>,
}

impl Card {
    /// Returns whether this card belongs to the given unit.
    #[must_use]
    pub fn belongs_to(&self, unit: &UnitCode) -> bool {
        self.unit_code.as_ref() == Some(unit)
    }
}
