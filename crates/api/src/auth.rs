// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};
use tracing::info;

use fuelcard::{Command, Ledger};
use fuelcard_chain::Actor;
use fuelcard_domain::{Card, UnitCode};
use fuelcard_persistence::{Persistence, PersistenceError, SessionData, UnitData, verify_unit_secret};

use crate::capabilities::{Operation, role_allows};
use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: HQ credentials with full authority over the ledger.
    ///
    /// Admins may issue, update, and return cards, perform unit
    /// sub-ledger operations on any card, and view every unit.
    Admin,
    /// Unit role: a battalion acting on its own cards.
    ///
    /// Unit actors may perform unit sub-ledger operations on cards
    /// assigned to their unit and view only those cards.
    Unit,
}

/// An authenticated actor with an associated role and unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor (the unit code).
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The unit this actor belongs to.
    pub unit_code: UnitCode,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role, unit_code: UnitCode) -> Self {
        Self {
            id,
            role,
            unit_code,
        }
    }

    /// Converts this authenticated actor into a chain actor for
    /// attribution on card chain entries.
    #[must_use]
    pub fn to_chain_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Unit => String::from("unit"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authorization service enforcing the capability matrix.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks whether an actor may execute a command against the
    /// current ledger.
    ///
    /// Role permissions come from the capability matrix; unit actors
    /// are additionally scoped to cards assigned to their own unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the role may not perform the operation or
    /// if a unit actor targets another unit's card.
    pub fn authorize_command(
        actor: &AuthenticatedActor,
        command: &Command,
        ledger: &Ledger,
    ) -> Result<(), AuthError> {
        let operation: Operation = operation_for(command);

        if !role_allows(actor.role, operation) {
            return Err(AuthError::Unauthorized {
                action: String::from(operation.name()),
                required_role: String::from("Admin"),
            });
        }

        // Unit actors act only on their own unit's cards. A missing
        // card falls through so the engine reports it uniformly.
        if actor.role == Role::Unit {
            if let Some(card) = ledger.find_card(command.card_number()) {
                if !card.belongs_to(&actor.unit_code) {
                    return Err(AuthError::Unauthorized {
                        action: String::from(operation.name()),
                        required_role: String::from("owning unit"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Checks whether an actor may view a card.
    ///
    /// # Errors
    ///
    /// Returns an error if a unit actor targets another unit's card.
    pub fn authorize_view(actor: &AuthenticatedActor, card: &Card) -> Result<(), AuthError> {
        if actor.role == Role::Admin || card.belongs_to(&actor.unit_code) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("view_card"),
            required_role: String::from("owning unit"),
        })
    }
}

/// Maps a command to its matrix operation.
const fn operation_for(command: &Command) -> Operation {
    match command {
        Command::NewCard { .. } => Operation::IssueCard,
        Command::UpdateCard { .. } => Operation::UpdateCard,
        Command::ReturnCard { .. } => Operation::ReturnCard,
        Command::UnitIssue { .. } => Operation::UnitIssue,
        Command::UnitUpdate { .. } => Operation::UnitUpdate,
        Command::UnitCredit { .. } => Operation::UnitCredit,
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a unit by shared secret and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `unit_code` - The unit code (or the HQ label)
    /// * `secret` - The plaintext shared secret
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `unit_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &Persistence,
        unit_code: &str,
        secret: &str,
    ) -> Result<(String, AuthenticatedActor, UnitData), AuthError> {
        let unit: UnitData = persistence
            .get_unit_by_code(unit_code)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown unit or wrong secret"),
            })?;

        let verified: bool =
            verify_unit_secret(&unit, secret).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Secret verification error: {e}"),
            })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown unit or wrong secret"),
            });
        }

        let actor: AuthenticatedActor = actor_from_unit(&unit)?;

        // Generate session token and expiration
        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, unit.unit_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(unit.unit_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(unit_code = %unit.unit_code, "Unit logged in");

        Ok((session_token, actor, unit))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UnitData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let unit: UnitData = persistence
            .get_unit_by_id(session.unit_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unit not found"),
            })?;

        let actor: AuthenticatedActor = actor_from_unit(&unit)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((actor, unit))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}

/// Builds an authenticated actor from a unit credential row.
fn actor_from_unit(unit: &UnitData) -> Result<AuthenticatedActor, AuthError> {
    let role: Role = if unit.is_admin { Role::Admin } else { Role::Unit };
    let unit_code: UnitCode =
        UnitCode::parse(&unit.unit_code).map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Stored unit code is invalid: {e}"),
        })?;
    Ok(AuthenticatedActor::new(
        unit.unit_code.clone(),
        role,
        unit_code,
    ))
}
