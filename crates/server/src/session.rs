// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication middleware for the server.
//!
//! This module provides Axum extractors for validating session tokens and
//! enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::AppState;
use entrada_api::{AuthenticatedActor, AuthenticationService};
use entrada_persistence::AccountData;

/// Extractor for authenticated accounts.
///
/// Validates the session token from the Authorization header and returns
/// the authenticated account context.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate the token via `AuthenticationService::validate_session`
///    (expiration, disabled flag, role read from the account row)
/// 3. Return `AuthenticatedActor` and `AccountData`
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing or malformed
/// - Session token is invalid or expired
/// - Account is disabled
pub struct SessionAccount(pub AuthenticatedActor, pub AccountData);

impl FromRequestParts<AppState> for SessionAccount {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(&parts.headers)?;

        let mut persistence = state.persistence.lock().await;
        let (actor, account) = AuthenticationService::validate_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            account_id = account.account_id,
            role = ?actor.role,
            "Session validated successfully"
        );

        Ok(Self(actor, account))
    }
}

/// Extracts the bearer token from a request's Authorization header.
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Result<String, SessionError> {
    let auth_header: &str = headers
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

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })
}

/// Session extraction errors.
///
/// These errors are returned when session validation fails and are
/// automatically converted to HTTP responses.
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
