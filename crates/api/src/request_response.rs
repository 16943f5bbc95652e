// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests carry raw strings; handlers validate and translate them
//! into domain types before anything touches the lifecycle engine.

use serde::{Deserialize, Serialize};

use fuelcard_domain::Card;

/// A capability flag, serialized as a plain boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// Global capabilities for an authenticated actor.
///
/// Advisory only: the presentation layer uses these to gate controls,
/// but every handler re-checks authorization itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    pub can_issue_card: Capability,
    pub can_update_card: Capability,
    pub can_return_card: Capability,
    pub can_unit_issue: Capability,
    pub can_unit_update: Capability,
    pub can_unit_credit: Capability,
    pub can_view_all_units: Capability,
}

/// Capabilities for one card instance, given its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCapabilities {
    pub can_update: Capability,
    pub can_return: Capability,
    pub can_unit_issue: Capability,
    pub can_unit_update: Capability,
    pub can_unit_credit: Capability,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// The unit code, or the HQ label for administrators.
    pub unit_code: String,
    /// The unit's shared secret.
    pub secret: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub unit_code: String,
    pub display_name: String,
    pub is_admin: bool,
    pub expires_at: String,
}

/// Identity response for an authenticated session.
#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub unit_code: String,
    pub display_name: String,
    pub is_admin: bool,
    pub capabilities: GlobalCapabilities,
}

/// Free-text transcript execution request (voice or typed).
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

/// Structured card issuance request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCardRequest {
    pub card_number: String,
    pub holder_name: String,
    pub holder_phone: String,
    pub amount: String,
    pub fuel_type: String,
    pub unit_code: Option<String>,
}

/// Structured quantity update request.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCardRequest {
    pub card_number: String,
    pub amount: String,
}

/// Structured card return request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnCardRequest {
    pub card_number: String,
}

/// Structured unit issuance request.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitIssueRequest {
    pub card_number: String,
    pub holder_name: String,
    pub holder_id: String,
    pub fuel_amount: String,
}

/// Structured unit update request.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitUpdateRequest {
    pub card_number: String,
    pub holder_name: String,
    pub holder_id: String,
    pub fuel_amount: String,
}

/// Structured unit credit request.
///
/// Crediting zeroes the remaining fuel, so it must be explicitly
/// confirmed.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitCreditRequest {
    pub card_number: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// Request to create a unit credential (administrators only).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnitRequest {
    pub unit_code: String,
    pub display_name: String,
    pub secret: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Response for unit credential creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUnitResponse {
    pub unit_id: i64,
    pub unit_code: String,
}

/// Response carrying the affected card after a command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub card: Card,
    pub message: String,
}

/// Response for a single-card lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CardResponse {
    pub card: Card,
    pub capabilities: CardCapabilities,
}

/// Response listing the cards visible to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ListCardsResponse {
    pub cards: Vec<Card>,
}
