// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fuelcard_domain::{FuelType, UnitCode};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request card mutations. They are
/// produced either by the transcript parser or directly from form
/// submissions, and consumed exhaustively by [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Issue a new card.
    NewCard {
        /// The unique card number.
        card_number: u64,
        /// Holder contact name.
        holder_name: String,
        /// Holder phone (normalized digits).
        holder_phone: String,
        /// Initial liter allotment.
        amount: u32,
        /// The card's fuel type.
        fuel_type: FuelType,
        /// The owning battalion. `None` means unassigned; voice
        /// commands defer unit selection to a follow-up prompt.
        unit_code: Option<UnitCode>,
        /// Whether this command came from a voice transcript.
        from_voice: bool,
    },
    /// Overwrite a card's liter allotment.
    UpdateCard {
        /// The card number.
        card_number: u64,
        /// The new liter allotment.
        amount: u32,
    },
    /// Return a card to the issuing system.
    ReturnCard {
        /// The card number.
        card_number: u64,
    },
    /// Record a unit drawing against a card.
    UnitIssue {
        /// The card number.
        card_number: u64,
        /// The drawing unit member's name.
        holder_name: String,
        /// The drawing holder's identifier (personal or vehicle number).
        holder_id: String,
        /// Liters made available to the unit.
        fuel_amount: u32,
    },
    /// Overwrite a card's unit sub-ledger.
    UnitUpdate {
        /// The card number.
        card_number: u64,
        /// The drawing unit member's name.
        holder_name: String,
        /// The drawing holder's identifier.
        holder_id: String,
        /// Liters still available to the unit.
        fuel_amount: u32,
    },
    /// Credit and clear a card's unit sub-ledger.
    ///
    /// The caller must have completed the human confirmation step
    /// (physical verification the card is empty) before issuing this.
    UnitCredit {
        /// The card number.
        card_number: u64,
    },
}

impl Command {
    /// Returns the card number this command targets.
    #[must_use]
    pub const fn card_number(&self) -> u64 {
        match self {
            Self::NewCard { card_number, .. }
            | Self::UpdateCard { card_number, .. }
            | Self::ReturnCard { card_number }
            | Self::UnitIssue { card_number, .. }
            | Self::UnitUpdate { card_number, .. }
            | Self::UnitCredit { card_number } => *card_number,
        }
    }

    /// Returns whether this is a unit sub-ledger command.
    #[must_use]
    pub const fn is_unit_command(&self) -> bool {
        matches!(
            self,
            Self::UnitIssue { .. } | Self::UnitUpdate { .. } | Self::UnitCredit { .. }
        )
    }
}
