// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! State-changing handlers run the fixed pipeline: rate limit,
//! validate, authorize, apply. Persisting the affected card and
//! committing the new ledger is the server layer's job, so a failed
//! write leaves the in-memory ledger untouched.

use tracing::warn;

use fuelcard::{Command, Ledger, TransitionResult, apply, parse};
use fuelcard_domain::{
    Card, FuelType, UnitCode, sanitize_text, validate_amount, validate_card_number,
    validate_name, validate_phone, validate_vehicle_number,
};
use fuelcard_persistence::{Persistence, UnitData};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::capabilities::{compute_card_capabilities, compute_global_capabilities};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_parse_error,
};
use crate::rate_limit::RateLimiter;
use crate::request_response::{
    CardResponse, CreateUnitRequest, CreateUnitResponse, ListCardsResponse, LoginRequest,
    LoginResponse, NewCardRequest, ReturnCardRequest, TranscriptRequest, UnitCreditRequest,
    UnitIssueRequest, UnitUpdateRequest, UpdateCardRequest, WhoAmIResponse,
};

/// The outcome of an accepted command, before persistence.
///
/// The server persists `transition.card` and only then swaps in
/// `transition.new_ledger`.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// The ledger transition produced by the engine.
    pub transition: TransitionResult,
    /// A human-readable confirmation.
    pub message: String,
}

/// Authenticates a unit and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the session
/// cannot be created.
pub fn login(persistence: &Persistence, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let (session_token, _actor, unit): (String, AuthenticatedActor, UnitData) =
        AuthenticationService::login(persistence, &request.unit_code, &request.secret)?;

    let expires_at: String = persistence
        .get_session_by_token(&session_token)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to retrieve session: {e}"),
        })?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        unit_code: unit.unit_code,
        display_name: unit.display_name,
        is_admin: unit.is_admin,
        expires_at,
    })
}

/// Deletes the caller's session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the authenticated caller and its capabilities.
#[must_use]
pub fn whoami(actor: &AuthenticatedActor, unit: &UnitData) -> WhoAmIResponse {
    WhoAmIResponse {
        unit_code: unit.unit_code.clone(),
        display_name: unit.display_name.clone(),
        is_admin: unit.is_admin,
        capabilities: compute_global_capabilities(actor.role),
    }
}

/// Lists the cards visible to the caller.
///
/// Administrators see the whole ledger; unit actors see only cards
/// assigned to their unit.
#[must_use]
pub fn list_cards(ledger: &Ledger, actor: &AuthenticatedActor) -> ListCardsResponse {
    let cards: Vec<Card> = match actor.role {
        Role::Admin => ledger.cards.clone(),
        Role::Unit => ledger
            .cards_for_unit(&actor.unit_code)
            .into_iter()
            .cloned()
            .collect(),
    };
    ListCardsResponse { cards }
}

/// Retrieves one card with its per-card capabilities.
///
/// # Errors
///
/// Returns an error if the card does not exist or the caller may not
/// view it.
pub fn get_card(
    ledger: &Ledger,
    actor: &AuthenticatedActor,
    card_number: u64,
) -> Result<CardResponse, ApiError> {
    let card: &Card = ledger
        .find_card(card_number)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Card"),
            message: format!("No card with number {card_number}"),
        })?;
    AuthorizationService::authorize_view(actor, card)?;

    Ok(CardResponse {
        card: card.clone(),
        capabilities: compute_card_capabilities(actor.role, card),
    })
}

/// Executes a free-text transcript.
///
/// Credit commands are never executed from a transcript; they require
/// the confirmed structured request.
///
/// # Errors
///
/// Returns an error if the caller is rate limited, the transcript does
/// not parse, or the resulting command is rejected.
pub fn execute_transcript(
    persistence: &Persistence,
    ledger: &Ledger,
    limiter: &mut RateLimiter,
    actor: &AuthenticatedActor,
    request: &TranscriptRequest,
) -> Result<CommandOutcome, ApiError> {
    limiter.check(&actor.id)?;

    let command: Command =
        parse(&sanitize_text(&request.transcript)).map_err(translate_parse_error)?;

    // Crediting zeroes the remaining fuel, and a transcript carries no
    // confirmation flag. The caller must confirm through the structured
    // credit request instead.
    if matches!(command, Command::UnitCredit { .. }) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("credit_confirmation"),
            message: String::from("Crediting a card must be explicitly confirmed"),
        });
    }

    run_command(persistence, ledger, actor, command)
}

/// Executes an already-built command through the standard pipeline.
///
/// # Errors
///
/// Returns an error if the caller is rate limited or the command is
/// rejected by authorization or the lifecycle engine.
pub fn execute_command(
    persistence: &Persistence,
    ledger: &Ledger,
    limiter: &mut RateLimiter,
    actor: &AuthenticatedActor,
    command: Command,
) -> Result<CommandOutcome, ApiError> {
    limiter.check(&actor.id)?;
    run_command(persistence, ledger, actor, command)
}

/// Shared pipeline tail: authorize, duplicate-check, apply.
fn run_command(
    persistence: &Persistence,
    ledger: &Ledger,
    actor: &AuthenticatedActor,
    command: Command,
) -> Result<CommandOutcome, ApiError> {
    AuthorizationService::authorize_command(actor, &command, ledger)?;

    // Issuance also checks the remote store: another process may have
    // inserted the number since the ledger was loaded. A failed check
    // logs and proceeds; the unique column still backstops the race.
    if let Command::NewCard { card_number, .. } = &command {
        match persistence.query_card_by_number(*card_number) {
            Ok(Some(_)) => {
                return Err(translate_core_error(fuelcard::CoreError::CardAlreadyExists(
                    *card_number,
                )));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(card_number, error = %e, "Remote duplicate check failed, proceeding");
            }
        }
    }

    let message: String = message_for(&command);
    let transition: TransitionResult =
        apply(ledger, command, &actor.to_chain_actor()).map_err(translate_core_error)?;

    Ok(CommandOutcome {
        transition,
        message,
    })
}

/// Builds the confirmation message for an accepted command.
fn message_for(command: &Command) -> String {
    let card_number: u64 = command.card_number();
    match command {
        Command::NewCard { .. } => format!("Card {card_number} issued"),
        Command::UpdateCard { .. } => format!("Card {card_number} updated"),
        Command::ReturnCard { .. } => format!("Card {card_number} returned"),
        Command::UnitIssue { .. } => format!("Card {card_number} issued to holder"),
        Command::UnitUpdate { .. } => format!("Card {card_number} holder record updated"),
        Command::UnitCredit { .. } => format!("Card {card_number} credited"),
    }
}

/// Creates a unit credential.
///
/// Administrators only; the code must come from the known unit set or
/// be the HQ label.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator, the code is
/// invalid, or the unit already exists.
pub fn create_unit(
    persistence: &Persistence,
    actor: &AuthenticatedActor,
    request: &CreateUnitRequest,
) -> Result<CreateUnitResponse, ApiError> {
    if actor.role != Role::Admin {
        return Err(ApiError::Unauthorized {
            action: String::from("create_unit"),
            required_role: String::from("Admin"),
        });
    }

    let unit_code: UnitCode =
        UnitCode::parse(&request.unit_code).map_err(translate_domain_error)?;

    if persistence
        .get_unit_by_code(unit_code.as_str())
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to query unit: {e}"),
        })?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_unit_code"),
            message: format!("Unit '{}' already exists", unit_code.as_str()),
        });
    }

    let unit_id: i64 = persistence
        .create_unit(
            unit_code.as_str(),
            &sanitize_text(&request.display_name),
            &request.secret,
            request.is_admin,
        )
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to create unit: {e}"),
        })?;

    Ok(CreateUnitResponse {
        unit_id,
        unit_code: unit_code.as_str().to_string(),
    })
}

// ============================================================================
// Structured request builders
// ============================================================================

/// Builds an issuance command from a structured request.
///
/// # Errors
///
/// Returns an error if any field fails validation.
pub fn build_new_card_command(request: &NewCardRequest) -> Result<Command, ApiError> {
    let card_number: u64 =
        validate_card_number(&request.card_number).map_err(translate_domain_error)?;
    let holder_name: String =
        validate_name(&sanitize_text(&request.holder_name)).map_err(translate_domain_error)?;
    let holder_phone: String =
        validate_phone(&request.holder_phone).map_err(translate_domain_error)?;
    let amount: u32 = validate_amount(&request.amount).map_err(translate_domain_error)?;
    let fuel_type: FuelType =
        FuelType::parse(&request.fuel_type).map_err(translate_domain_error)?;
    let unit_code: Option<UnitCode> = match &request.unit_code {
        Some(code) => Some(UnitCode::parse(code).map_err(translate_domain_error)?),
        None => None,
    };

    Ok(Command::NewCard {
        card_number,
        holder_name,
        holder_phone,
        amount,
        fuel_type,
        unit_code,
        from_voice: false,
    })
}

/// Builds a quantity update command from a structured request.
///
/// # Errors
///
/// Returns an error if any field fails validation.
pub fn build_update_command(request: &UpdateCardRequest) -> Result<Command, ApiError> {
    let card_number: u64 =
        validate_card_number(&request.card_number).map_err(translate_domain_error)?;
    let amount: u32 = validate_amount(&request.amount).map_err(translate_domain_error)?;

    Ok(Command::UpdateCard {
        card_number,
        amount,
    })
}

/// Builds a return command from a structured request.
///
/// # Errors
///
/// Returns an error if the card number fails validation.
pub fn build_return_command(request: &ReturnCardRequest) -> Result<Command, ApiError> {
    let card_number: u64 =
        validate_card_number(&request.card_number).map_err(translate_domain_error)?;

    Ok(Command::ReturnCard { card_number })
}

/// Builds a unit issuance command from a structured request.
///
/// # Errors
///
/// Returns an error if any field fails validation.
pub fn build_unit_issue_command(request: &UnitIssueRequest) -> Result<Command, ApiError> {
    let (card_number, holder_name, holder_id, fuel_amount) = validate_unit_fields(
        &request.card_number,
        &request.holder_name,
        &request.holder_id,
        &request.fuel_amount,
    )?;

    Ok(Command::UnitIssue {
        card_number,
        holder_name,
        holder_id,
        fuel_amount,
    })
}

/// Builds a unit update command from a structured request.
///
/// # Errors
///
/// Returns an error if any field fails validation.
pub fn build_unit_update_command(request: &UnitUpdateRequest) -> Result<Command, ApiError> {
    let (card_number, holder_name, holder_id, fuel_amount) = validate_unit_fields(
        &request.card_number,
        &request.holder_name,
        &request.holder_id,
        &request.fuel_amount,
    )?;

    Ok(Command::UnitUpdate {
        card_number,
        holder_name,
        holder_id,
        fuel_amount,
    })
}

/// Builds a unit credit command from a structured request.
///
/// Crediting zeroes the remaining fuel, so the request must carry the
/// confirmation flag.
///
/// # Errors
///
/// Returns an error if the request is unconfirmed or the card number
/// fails validation.
pub fn build_unit_credit_command(request: &UnitCreditRequest) -> Result<Command, ApiError> {
    if !request.confirmed {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("credit_confirmation"),
            message: String::from("Crediting a card must be explicitly confirmed"),
        });
    }
    let card_number: u64 =
        validate_card_number(&request.card_number).map_err(translate_domain_error)?;

    Ok(Command::UnitCredit { card_number })
}

/// Validates the fields shared by unit issuance and update.
fn validate_unit_fields(
    card_number: &str,
    holder_name: &str,
    holder_id: &str,
    fuel_amount: &str,
) -> Result<(u64, String, String, u32), ApiError> {
    let card_number: u64 = validate_card_number(card_number).map_err(translate_domain_error)?;
    let holder_name: String =
        validate_name(&sanitize_text(holder_name)).map_err(translate_domain_error)?;
    let fuel_amount: u32 = validate_amount(fuel_amount).map_err(translate_domain_error)?;

    // Holder IDs follow the vehicle-number shape: 7-8 bare digits.
    validate_vehicle_number(holder_id).map_err(translate_domain_error)?;

    Ok((
        card_number,
        holder_name,
        holder_id.trim().to_string(),
        fuel_amount,
    ))
}
