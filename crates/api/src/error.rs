// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fuelcard::{CoreError, ParseError};
use fuelcard_domain::DomainError;

use crate::rate_limit::RateLimitError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The transcript could not be parsed into a command.
    UnparsableTranscript {
        /// A human-readable description of what was missing.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Too many requests inside the rate window.
    RateLimited {
        /// The actor key that was limited.
        key: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::UnparsableTranscript { message } => {
                write!(f, "Unparsable transcript: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::RateLimited { key } => {
                write!(f, "Rate limit exceeded for '{key}'")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::LimitExceeded { key } => Self::RateLimited { key },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCardNumber(msg) => ApiError::InvalidInput {
            field: String::from("card_number"),
            message: msg,
        },
        DomainError::InvalidVehicleNumber(msg) => ApiError::InvalidInput {
            field: String::from("vehicle_number"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("holder_name"),
            message: msg,
        },
        DomainError::ForbiddenCharacters { field } => ApiError::InvalidInput {
            field,
            message: String::from("Contains forbidden characters"),
        },
        DomainError::InvalidPhone(msg) => ApiError::InvalidInput {
            field: String::from("holder_phone"),
            message: msg,
        },
        DomainError::InvalidAmount(msg) => ApiError::InvalidInput {
            field: String::from("amount"),
            message: msg,
        },
        DomainError::AmountOutOfRange { amount } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("Amount {amount} is outside the permitted range"),
        },
        DomainError::InvalidFuelType(msg) => ApiError::InvalidInput {
            field: String::from("fuel_type"),
            message: msg,
        },
        DomainError::InvalidUnitCode(msg) => ApiError::InvalidInput {
            field: String::from("unit_code"),
            message: msg,
        },
        DomainError::InvalidStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::CardNotFound(number) => ApiError::ResourceNotFound {
            resource_type: String::from("Card"),
            message: format!("No card with number {number}"),
        },
        CoreError::CardAlreadyExists(number) => ApiError::DomainRuleViolation {
            rule: String::from("unique_card_number"),
            message: format!("Card {number} already exists"),
        },
        CoreError::CardFinalized(number) => ApiError::DomainRuleViolation {
            rule: String::from("card_finalized"),
            message: format!("Card {number} has been returned and is read-only"),
        },
        CoreError::UnitDataMissing(number) => ApiError::DomainRuleViolation {
            rule: String::from("unit_record_required"),
            message: format!("Card {number} has no unit issuance record"),
        },
    }
}

/// Translates a transcript parse error into an API error.
#[must_use]
pub fn translate_parse_error(err: ParseError) -> ApiError {
    ApiError::UnparsableTranscript {
        message: err.to_string(),
    }
}
