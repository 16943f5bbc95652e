// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a card.
///
/// The status governs which operations a card still accepts: once a
/// card reaches `Returned` or `FinalReturn` no further mutation is
/// permitted, primary or unit-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardStatus {
    /// Freshly issued, never updated.
    #[default]
    New,
    /// Allotment quantity has been changed at least once.
    Updated,
    /// Credited back to the issuing system. Terminal.
    Returned,
    /// Custody moved to another holder.
    Transferred,
    /// In active use by a unit.
    Active,
    /// Allotment fully consumed.
    Empty,
    /// Administratively closed. Terminal.
    FinalReturn,
}

impl FromStr for CardStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "updated" => Ok(Self::Updated),
            "returned" => Ok(Self::Returned),
            "transferred" => Ok(Self::Transferred),
            "active" => Ok(Self::Active),
            "empty" => Ok(Self::Empty),
            "final_return" => Ok(Self::FinalReturn),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CardStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Updated => "updated",
            Self::Returned => "returned",
            Self::Transferred => "transferred",
            Self::Active => "active",
            Self::Empty => "empty",
            Self::FinalReturn => "final_return",
        }
    }

    /// Returns whether this status is terminal.
    ///
    /// A card in a terminal status accepts no further mutation of any
    /// kind, including unit-level operations.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self, Self::Returned | Self::FinalReturn)
    }
}

/// Represents a fuel type.
///
/// The set is fixed; labels are the Hebrew domain strings that appear
/// on the physical cards and in voice transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    /// Gasoline ("בנזין").
    #[serde(rename = "בנזין")]
    Gasoline,
    /// Transport diesel ("סולר").
    #[serde(rename = "סולר")]
    Diesel,
    /// Marked agricultural diesel ("סולר חקלאי").
    #[serde(rename = "סולר חקלאי")]
    MarkedDiesel,
    /// Gas ("גז").
    #[serde(rename = "גז")]
    Gas,
    /// Electric charging ("חשמלי").
    #[serde(rename = "חשמלי")]
    Electric,
    /// Hybrid ("היברידי").
    #[serde(rename = "היברידי")]
    Hybrid,
}

impl FuelType {
    /// Parses a fuel type from its domain label.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not a member of the fixed set.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim() {
            "בנזין" => Ok(Self::Gasoline),
            "סולר" => Ok(Self::Diesel),
            "סולר חקלאי" => Ok(Self::MarkedDiesel),
            "גז" => Ok(Self::Gas),
            "חשמלי" => Ok(Self::Electric),
            "היברידי" => Ok(Self::Hybrid),
            other => Err(DomainError::InvalidFuelType(other.to_string())),
        }
    }

    /// Returns the domain label for this fuel type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "בנזין",
            Self::Diesel => "סולר",
            Self::MarkedDiesel => "סולר חקלאי",
            Self::Gas => "גז",
            Self::Electric => "חשמלי",
            Self::Hybrid => "היברידי",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a battalion (gadud) code.
///
/// Unit codes come from a fixed organizational set plus a
/// distinguished HQ sentinel used by administrator credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitCode {
    code: String,
}

impl UnitCode {
    /// The HQ sentinel code. Credentials bound to it carry the
    /// administrator role and unrestricted unit scope.
    pub const HQ_CODE: &'static str = "מפקדה";

    /// The battalion codes known to the system.
    pub const KNOWN_CODES: [&'static str; 5] = ["650", "651", "652", "653", "655"];

    /// Parses a unit code against the fixed set.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is neither a known battalion code
    /// nor the HQ sentinel.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed: &str = s.trim();
        if trimmed == Self::HQ_CODE || Self::KNOWN_CODES.contains(&trimmed) {
            Ok(Self {
                code: trimmed.to_string(),
            })
        } else {
            Err(DomainError::InvalidUnitCode(trimmed.to_string()))
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Returns whether this is the HQ sentinel.
    #[must_use]
    pub fn is_hq(&self) -> bool {
        self.code == Self::HQ_CODE
    }
}

impl std::fmt::Display for UnitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}
