// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the fuel card ledger.
//!
//! Handlers translate raw requests into domain commands, enforce
//! authentication, authorization, and rate limiting, then hand the
//! command to the lifecycle engine. Persistence and ledger commits
//! stay in the server layer.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod rate_limit;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use capabilities::{
    CAPABILITY_MATRIX, CapabilityRule, Operation, compute_card_capabilities,
    compute_global_capabilities, role_allows,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_parse_error,
};
pub use handlers::{
    CommandOutcome, build_new_card_command, build_return_command, build_unit_credit_command,
    build_unit_issue_command, build_unit_update_command, build_update_command, create_unit,
    execute_command, execute_transcript, get_card, list_cards, login, logout, whoami,
};
pub use rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimitError, RateLimiter};
pub use request_response::{
    Capability, CardCapabilities, CardResponse, CommandResponse, CreateUnitRequest,
    CreateUnitResponse, GlobalCapabilities, ListCardsResponse, LoginRequest, LoginResponse,
    NewCardRequest, ReturnCardRequest, TranscriptRequest, UnitCreditRequest, UnitIssueRequest,
    UnitUpdateRequest, UpdateCardRequest, WhoAmIResponse,
};
