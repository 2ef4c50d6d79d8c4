// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use entrada::CoreError;
use entrada_domain::DomainError;
use entrada_persistence::PersistenceError;

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
/// These are distinct from domain/core errors and represent the API contract.
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
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request lost a race against a concurrent operation.
    ///
    /// Reservation conflicts surface here: the buyer sees the seat as taken.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
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
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
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

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. Reservation conflicts map to `Conflict` so the HTTP layer can
/// answer 409; missing resources map to `ResourceNotFound` for 404.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event '{id}' does not exist"),
        },
        DomainError::PurchaseNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Purchase"),
            message: format!("Purchase '{id}' does not exist or was already resolved"),
        },
        DomainError::TicketNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket '{id}' does not exist"),
        },
        DomainError::TicketTypeNotFound {
            event_id,
            ticket_type_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Ticket type"),
            message: format!(
                "Ticket type '{ticket_type_id}' does not exist on event '{event_id}'"
            ),
        },
        DomainError::ShapeNotFound { event_id, shape_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Shape"),
            message: format!("Shape '{shape_id}' does not exist on event '{event_id}'"),
        },
        DomainError::ShapeNotAvailable { shape_id, status } => ApiError::Conflict {
            message: format!("Shape '{shape_id}' is no longer available (status: {status})"),
        },
        DomainError::ShapeNotReserved { shape_id, status } => ApiError::Conflict {
            message: format!("Shape '{shape_id}' is not reserved (status: {status})"),
        },
        DomainError::SalesDisabled(id) => ApiError::DomainRuleViolation {
            rule: String::from("sales_enabled"),
            message: format!("Sales are disabled for event '{id}'"),
        },
        DomainError::EmptySelection => ApiError::InvalidInput {
            field: String::from("selected_shapes"),
            message: String::from(
                "A purchase must select at least one shape or a positive general quantity",
            ),
        },
        DomainError::TicketTypeInUse { ticket_type_id } => ApiError::DomainRuleViolation {
            rule: String::from("ticket_type_in_use"),
            message: format!(
                "Ticket type '{ticket_type_id}' is in use by at least one shape and cannot be removed"
            ),
        },
        DomainError::LastTicketType => ApiError::DomainRuleViolation {
            rule: String::from("last_ticket_type"),
            message: String::from("An event must keep at least one ticket type"),
        },
        DomainError::DuplicateShapeId(id) => ApiError::InvalidInput {
            field: String::from("venue_shapes"),
            message: format!("Shape id '{id}' appears more than once"),
        },
        DomainError::DanglingTicketType {
            shape_id,
            ticket_type_id,
        } => ApiError::InvalidInput {
            field: String::from("venue_shapes"),
            message: format!(
                "Shape '{shape_id}' references unknown ticket type '{ticket_type_id}'"
            ),
        },
        DomainError::BookingConditionUnavailable {
            ticket_type_id,
            choice,
        } => ApiError::InvalidInput {
            field: String::from("booking_choice"),
            message: format!(
                "Booking choice '{choice}' is not enabled for ticket type '{ticket_type_id}'"
            ),
        },
        DomainError::InvalidBundleQuantity(quantity) => ApiError::InvalidInput {
            field: String::from("min_tickets"),
            message: format!("Minimum-ticket bundle quantity must be at least 1, got {quantity}"),
        },
        DomainError::InvalidShapeTransition { from, to, reason } => ApiError::Conflict {
            message: format!("Invalid shape transition {from} -> {to}: {reason}"),
        },
        DomainError::InvalidTicketTransition { from, to } => ApiError::Conflict {
            message: format!("Invalid ticket transition {from} -> {to}"),
        },
        DomainError::InvalidShapeStatus(status) => ApiError::Internal {
            message: format!("Invalid stored shape status: {status}"),
        },
        DomainError::InvalidTicketStatus(status) => ApiError::Internal {
            message: format!("Invalid stored ticket status: {status}"),
        },
        DomainError::InvalidEventField { field, reason } => ApiError::InvalidInput {
            field: field.to_string(),
            message: reason,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Domain violations that aborted a transaction surface with their precise
/// API mapping; infrastructure failures become internal errors.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Domain(domain_err) => translate_domain_error(domain_err),
        PersistenceError::DuplicateLogin(login) => ApiError::DomainRuleViolation {
            rule: String::from("unique_login"),
            message: format!("An account with login '{login}' already exists"),
        },
        PersistenceError::Conflict(message) => ApiError::Conflict { message },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::AccountNotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message,
        },
        PersistenceError::SessionNotFound(message) => ApiError::AuthenticationFailed {
            reason: message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
