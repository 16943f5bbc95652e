// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fuelcard_domain::DomainError;

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No card exists with the given number.
    CardNotFound(u64),
    /// A card with the given number already exists.
    CardAlreadyExists(u64),
    /// The card has been returned or finalized; no further mutation
    /// is permitted.
    CardFinalized(u64),
    /// A unit sub-ledger operation targeted a card that has no unit
    /// sub-ledger.
    UnitDataMissing(u64),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::CardNotFound(n) => write!(f, "Card {n} not found"),
            Self::CardAlreadyExists(n) => write!(f, "Card {n} already exists"),
            Self::CardFinalized(n) => {
                write!(f, "Card {n} has been returned and accepts no further changes")
            }
            Self::UnitDataMissing(n) => write!(f, "Card {n} has no unit sub-ledger"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Errors that can occur while parsing a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No keyword pattern matched the transcript.
    UnrecognizedCommand,
    /// A keyword matched but too few fields could be extracted.
    InsufficientDetails,
    /// A specific required field could not be located.
    MissingField(&'static str),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCommand => write!(f, "Transcript did not match any known command"),
            Self::InsufficientDetails => {
                write!(f, "Transcript matched a command but is missing details")
            }
            Self::MissingField(field) => write!(f, "Could not extract field '{field}'"),
        }
    }
}

impl std::error::Error for ParseError {}
