// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session queries.
//!
//! These queries back the identity surface: the account row is the
//! authoritative source of an actor's role. Roles are never accepted from
//! client claims.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{AccountData, SessionData};
use crate::diesel_schema::{accounts, sessions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for account rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
struct AccountRow {
    account_pk: i64,
    login_name: String,
    display_name: String,
    phone: String,
    password_hash: String,
    role: String,
    is_disabled: i32,
    created_at: String,
    disabled_at: Option<String>,
    last_login_at: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_pk: i64,
    session_token: String,
    account_pk: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

impl From<AccountRow> for AccountData {
    fn from(row: AccountRow) -> Self {
        Self {
            account_id: row.account_pk,
            login_name: row.login_name,
            display_name: row.display_name,
            phone: row.phone,
            password_hash: row.password_hash,
            role: row.role,
            is_disabled: row.is_disabled != 0,
            created_at: row.created_at,
            disabled_at: row.disabled_at,
            last_login_at: row.last_login_at,
        }
    }
}

impl From<SessionRow> for SessionData {
    fn from(row: SessionRow) -> Self {
        Self {
            session_id: row.session_pk,
            session_token: row.session_token,
            account_id: row.account_pk,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        }
    }
}

backend_fn! {
/// Retrieves an account by login name.
///
/// The login name is normalized to lowercase for case-insensitive lookup.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name (email) to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_account_by_login(
    conn: &mut _,
    login_name: &str,
) -> Result<Option<AccountData>, PersistenceError> {
    let normalized_login: String = login_name.to_lowercase();

    debug!("Looking up account by login_name: {}", normalized_login);

    let result: Result<AccountRow, diesel::result::Error> = accounts::table
        .filter(accounts::login_name.eq(&normalized_login))
        .select(AccountRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(AccountData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves an account by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `account_id` - The account ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_account_by_id(
    conn: &mut _,
    account_id: i64,
) -> Result<Option<AccountData>, PersistenceError> {
    let result: Result<AccountRow, diesel::result::Error> = accounts::table
        .filter(accounts::account_pk.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(AccountData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_accounts(conn: &mut _) -> Result<Vec<AccountData>, PersistenceError> {
    let rows: Vec<AccountRow> = accounts::table
        .order(accounts::account_pk.asc())
        .select(AccountRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(AccountData::from).collect())
}
}

backend_fn! {
/// Counts the number of active admin accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_admin_accounts(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(accounts::table
        .filter(accounts::role.eq("admin"))
        .filter(accounts::is_disabled.eq(0))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Arguments
///
/// * `password` - The plain text password to verify
/// * `password_hash` - The stored bcrypt hash
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Password verification failed: {e}")))
}
