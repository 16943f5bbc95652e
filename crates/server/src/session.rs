// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Axum extractor that validates the bearer token from the
//! Authorization header and yields the authenticated unit context.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use fuelcard_api::{AuthenticatedActor, AuthenticationService};
use fuelcard_persistence::UnitData;

use crate::AppState;

/// Extractor for authenticated units.
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate the session token via
///    `AuthenticationService::validate_session`
/// 3. Return the `AuthenticatedActor` and `UnitData`
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if the header is missing or
/// malformed, or the session is invalid or expired.
pub struct SessionUnit(pub AuthenticatedActor, pub UnitData);

impl FromRequestParts<AppState> for SessionUnit {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let persistence = state.persistence.lock().await;
        let (actor, unit) =
            AuthenticationService::validate_session(&persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            unit_code = %unit.unit_code,
            role = ?actor.role,
            "Session validated successfully"
        );

        Ok(Self(actor, unit))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
