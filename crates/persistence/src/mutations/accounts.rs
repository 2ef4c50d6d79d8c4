// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session mutations.
//!
//! Passwords are hashed with bcrypt at this boundary; plain text never
//! reaches a table. Timestamps are supplied by the caller as ISO-8601
//! strings so this layer stays clock-free.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{accounts, sessions};
use crate::error::PersistenceError;

/// bcrypt cost factor for password hashing.
const BCRYPT_COST: u32 = 12;

backend_fn! {
/// Creates a new account.
///
/// The login name is normalized to lowercase. The password is hashed with
/// bcrypt before storage.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `login_name` - The login name (email, will be normalized)
/// * `display_name` - The display name
/// * `phone` - The contact phone number
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role ("user" or "admin")
/// * `created_at` - ISO-8601 creation timestamp
///
/// # Returns
///
/// The generated account id.
///
/// # Errors
///
/// Returns `DuplicateLogin` if an account with the login already exists.
pub fn create_account(
    conn: &mut _,
    login_name: &str,
    display_name: &str,
    phone: &str,
    password: &str,
    role: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.to_lowercase();
    let password_hash: String = bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| PersistenceError::Other(format!("Password hashing failed: {e}")))?;

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(accounts::table)
        .values((
            accounts::login_name.eq(&normalized_login),
            accounts::display_name.eq(display_name),
            accounts::phone.eq(phone),
            accounts::password_hash.eq(&password_hash),
            accounts::role.eq(role),
            accounts::is_disabled.eq(0),
            accounts::created_at.eq(created_at),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            let account_id: i64 = conn.get_last_insert_rowid()?;
            info!(account_id, login_name = %normalized_login, role, "Created account");
            Ok(account_id)
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::DuplicateLogin(normalized_login))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Updates the last login timestamp for an account.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `account_id` - The account id
/// * `at` - ISO-8601 timestamp
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut _, account_id: i64, at: &str) -> Result<(), PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_pk.eq(account_id)))
        .set(accounts::last_login_at.eq(at))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Disables an account and deletes nothing else.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `account_id` - The account id
/// * `at` - ISO-8601 timestamp
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn disable_account(conn: &mut _, account_id: i64, at: &str) -> Result<(), PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_pk.eq(account_id)))
        .set((
            accounts::is_disabled.eq(1),
            accounts::disabled_at.eq(Some(at)),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Re-enables a disabled account.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `account_id` - The account id
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn enable_account(conn: &mut _, account_id: i64) -> Result<(), PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_pk.eq(account_id)))
        .set((
            accounts::is_disabled.eq(0),
            accounts::disabled_at.eq(None::<String>),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Creates a new session for an account.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `session_token` - The unique session token
/// * `account_id` - The account id
/// * `created_at` - ISO-8601 creation timestamp
/// * `expires_at` - ISO-8601 expiration timestamp
///
/// # Returns
///
/// The generated session id.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    account_id: i64,
    created_at: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::account_pk.eq(account_id),
            sessions::created_at.eq(created_at),
            sessions::last_activity_at.eq(created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;
    let session_id: i64 = conn.get_last_insert_rowid()?;
    debug!(session_id, account_id, "Created session");
    Ok(session_id)
}
}

backend_fn! {
/// Updates the last activity timestamp for a session.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `session_id` - The session id
/// * `at` - ISO-8601 timestamp
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut _,
    session_id: i64,
    at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_pk.eq(session_id)))
        .set(sessions::last_activity_at.eq(at))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes a session by token.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes all sessions for a specific account.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `account_id` - The account whose sessions should be deleted
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_account(
    conn: &mut _,
    account_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::account_pk.eq(account_id)))
            .execute(conn)?,
    )
}
}

backend_fn! {
/// Deletes all sessions that expired before the given instant.
///
/// ISO-8601 UTC timestamps compare lexicographically.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `now` - ISO-8601 timestamp to compare expirations against
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now)))
            .execute(conn)?,
    )
}
}

backend_fn! {
/// Updates an account's password.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `account_id` - The account id
/// * `new_password` - The new password (will be hashed)
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_password(
    conn: &mut _,
    account_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    let password_hash: String = bcrypt::hash(new_password, BCRYPT_COST)
        .map_err(|e| PersistenceError::Other(format!("Password hashing failed: {e}")))?;
    diesel::update(accounts::table.filter(accounts::account_pk.eq(account_id)))
        .set(accounts::password_hash.eq(&password_hash))
        .execute(conn)?;
    Ok(())
}
}
