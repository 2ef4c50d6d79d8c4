// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! The account row is the identity provider: an actor's role is read from
//! storage when the session is validated, never from a client claim.

use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{AccountInfo, LoginResponse, RegisterRequest};
use entrada_audit::Actor;
use entrada_persistence::{AccountData, Persistence, SessionData};

/// How long a session stays valid after login.
const SESSION_DURATION: Duration = Duration::hours(24);

/// Actor roles for authorization.
///
/// Roles apply to accounts. Self-registration always yields `User`; admin
/// accounts are provisioned out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: event management, purchase review, and ticket scanning.
    Admin,
    /// User role: browsing events and requesting purchases.
    User,
}

impl Role {
    /// Returns the string representation stored in the account row.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parses a role from its stored representation.
    ///
    /// # Errors
    ///
    /// Returns an authentication error for an unrecognized role string; a
    /// corrupt role must never silently grant access.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}' on account"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents an account whose session was validated and whose role
/// was read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account id as a string.
    pub id: String,
    /// The role read from the account row.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The account id
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions to the
    /// authenticated account.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Formats the current instant as an ISO-8601 UTC timestamp.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub(crate) fn now_iso() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Authentication service: registration, login, logout, and session
/// validation.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers a new account and opens a session for it.
    ///
    /// All self-registrations are created with the `user` role.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `request` - The registration request
    ///
    /// # Errors
    ///
    /// Returns an error if a field is invalid, the password violates the
    /// policy, or the login is already taken.
    pub fn register(
        persistence: &mut Persistence,
        request: &RegisterRequest,
    ) -> Result<LoginResponse, ApiError> {
        if request.username.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("username"),
                message: String::from("Username must not be empty"),
            });
        }
        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(ApiError::InvalidInput {
                field: String::from("email"),
                message: String::from("A valid email address is required"),
            });
        }

        PasswordPolicy::default().validate(
            &request.password,
            &request.confirmation,
            &request.email,
            &request.username,
        )?;

        let created_at: String = now_iso()?;
        let account_id: i64 = persistence
            .create_account(
                &request.email,
                &request.username,
                &request.phone,
                &request.password,
                Role::User.as_str(),
                &created_at,
            )
            .map_err(translate_persistence_error)?;

        info!(account_id, "Registered account");

        Self::open_session(persistence, account_id)
    }

    /// Authenticates an account and opens a session for it.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The login name (email)
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are invalid or the account is
    /// disabled. The reason never reveals whether the login exists.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let account: AccountData = persistence
            .get_account_by_login(login_name)
            .map_err(translate_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        if account.is_disabled {
            warn!(account_id = account.account_id, "Login attempt on disabled account");
            return Err(invalid_credentials());
        }

        let matches: bool = persistence
            .verify_password(password, &account.password_hash)
            .map_err(translate_persistence_error)?;
        if !matches {
            return Err(invalid_credentials());
        }

        let now: String = now_iso()?;
        persistence
            .update_last_login(account.account_id, &now)
            .map_err(translate_persistence_error)?;

        Self::open_session(persistence, account.account_id)
    }

    /// Closes a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The token to invalidate
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
        persistence
            .delete_session(session_token)
            .map_err(translate_persistence_error)
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// The role is read from the account row at validation time.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The token from the Authorization header
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the
    /// account is disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, AccountData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: e.to_string(),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Malformed session expiration: {e}"),
            })?;
        if expires_at < OffsetDateTime::now_utc() {
            // Opportunistically sweep the dead session.
            let _ = persistence.delete_session(session_token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: e.to_string(),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account no longer exists"),
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let role: Role = Role::parse(&account.role)?;

        if let Ok(now) = OffsetDateTime::now_utc().format(&Iso8601::DEFAULT) {
            let _ = persistence.update_session_activity(session.session_id, &now);
        }

        debug!(
            account_id = account.account_id,
            role = role.as_str(),
            "Session validated"
        );

        Ok((
            AuthenticatedActor::new(account.account_id.to_string(), role),
            account,
        ))
    }

    /// Mints a session token and persists the session for an account.
    fn open_session(
        persistence: &mut Persistence,
        account_id: i64,
    ) -> Result<LoginResponse, ApiError> {
        let account: AccountData = persistence
            .get_account_by_id(account_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::Internal {
                message: format!("Account {account_id} vanished after creation"),
            })?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let created_at: String = now
            .format(&Iso8601::DEFAULT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format timestamp: {e}"),
            })?;
        let expires_at: String = (now + SESSION_DURATION)
            .format(&Iso8601::DEFAULT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format timestamp: {e}"),
            })?;

        let token: String = format!("session_{}_{}", now.unix_timestamp(), rand::random::<u64>());
        persistence
            .create_session(&token, account_id, &created_at, &expires_at)
            .map_err(translate_persistence_error)?;

        Ok(LoginResponse {
            token,
            account: AccountInfo::from_account(&account),
        })
    }
}

/// Builds the uniform invalid-credentials error.
fn invalid_credentials() -> ApiError {
    ApiError::AuthenticationFailed {
        reason: String::from("Invalid login or password"),
    }
}

/// Authorization service: role checks for protected operations.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Requires the actor to hold the admin role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not an admin.
    pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Admin.as_str().to_string(),
            })
        }
    }
}
