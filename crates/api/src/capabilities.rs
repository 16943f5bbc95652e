// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! The authorization matrix lives here as one declarative table; both
//! the advisory capability structs and the enforcing
//! `AuthorizationService` read from it, so the two can never drift
//! apart.

use crate::auth::Role;
use crate::request_response::{Capability, CardCapabilities, GlobalCapabilities};
use fuelcard_domain::Card;

/// The operations covered by the authorization matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    IssueCard,
    UpdateCard,
    ReturnCard,
    UnitIssue,
    UnitUpdate,
    UnitCredit,
    ViewAllUnits,
}

impl Operation {
    /// Returns the operation name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IssueCard => "issue_card",
            Self::UpdateCard => "update_card",
            Self::ReturnCard => "return_card",
            Self::UnitIssue => "unit_issue",
            Self::UnitUpdate => "unit_update",
            Self::UnitCredit => "unit_credit",
            Self::ViewAllUnits => "view_all_units",
        }
    }
}

/// One row of the authorization matrix.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityRule {
    /// The operation this rule covers.
    pub operation: Operation,
    /// Whether administrators may perform it.
    pub admin: bool,
    /// Whether unit actors may perform it on cards of their own unit.
    pub unit: bool,
}

/// The authorization matrix.
///
/// Card-level operations are administrator-only; unit sub-ledger
/// operations are open to the owning unit as well.
pub const CAPABILITY_MATRIX: &[CapabilityRule] = &[
    CapabilityRule {
        operation: Operation::IssueCard,
        admin: true,
        unit: false,
    },
    CapabilityRule {
        operation: Operation::UpdateCard,
        admin: true,
        unit: false,
    },
    CapabilityRule {
        operation: Operation::ReturnCard,
        admin: true,
        unit: false,
    },
    CapabilityRule {
        operation: Operation::UnitIssue,
        admin: true,
        unit: true,
    },
    CapabilityRule {
        operation: Operation::UnitUpdate,
        admin: true,
        unit: true,
    },
    CapabilityRule {
        operation: Operation::UnitCredit,
        admin: true,
        unit: true,
    },
    CapabilityRule {
        operation: Operation::ViewAllUnits,
        admin: true,
        unit: false,
    },
];

/// Looks up whether a role may perform an operation.
///
/// Own-unit scoping for unit actors is enforced separately by the
/// authorization service; this answers only the role dimension.
#[must_use]
pub fn role_allows(role: Role, operation: Operation) -> bool {
    CAPABILITY_MATRIX
        .iter()
        .find(|rule| rule.operation == operation)
        .is_some_and(|rule| match role {
            Role::Admin => rule.admin,
            Role::Unit => rule.unit,
        })
}

/// Computes global capabilities for a role.
#[must_use]
pub fn compute_global_capabilities(role: Role) -> GlobalCapabilities {
    GlobalCapabilities {
        can_issue_card: Capability::from_bool(role_allows(role, Operation::IssueCard)),
        can_update_card: Capability::from_bool(role_allows(role, Operation::UpdateCard)),
        can_return_card: Capability::from_bool(role_allows(role, Operation::ReturnCard)),
        can_unit_issue: Capability::from_bool(role_allows(role, Operation::UnitIssue)),
        can_unit_update: Capability::from_bool(role_allows(role, Operation::UnitUpdate)),
        can_unit_credit: Capability::from_bool(role_allows(role, Operation::UnitCredit)),
        can_view_all_units: Capability::from_bool(role_allows(role, Operation::ViewAllUnits)),
    }
}

/// Computes capabilities for one card instance.
///
/// A finalized card is read-only whatever the role; unit operations
/// additionally require an existing unit record for update and credit.
#[must_use]
pub fn compute_card_capabilities(role: Role, card: &Card) -> CardCapabilities {
    if card.status.is_finalized() {
        return CardCapabilities {
            can_update: Capability::Denied,
            can_return: Capability::Denied,
            can_unit_issue: Capability::Denied,
            can_unit_update: Capability::Denied,
            can_unit_credit: Capability::Denied,
        };
    }

    let has_unit_record: bool = card.unit_record.is_some();
    CardCapabilities {
        can_update: Capability::from_bool(role_allows(role, Operation::UpdateCard)),
        can_return: Capability::from_bool(role_allows(role, Operation::ReturnCard)),
        can_unit_issue: Capability::from_bool(role_allows(role, Operation::UnitIssue)),
        can_unit_update: Capability::from_bool(
            role_allows(role, Operation::UnitUpdate) && has_unit_record,
        ),
        can_unit_credit: Capability::from_bool(
            role_allows(role, Operation::UnitCredit) && has_unit_record,
        ),
    }
}
