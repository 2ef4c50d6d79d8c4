// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pending and completed purchase queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::convert::{parse_decimal, parse_u32};
use crate::diesel_schema::{completed_purchases, pending_purchases};
use crate::error::PersistenceError;
use entrada_domain::{CompletedPurchase, DomainError, PendingPurchase, SelectedShape};

/// Diesel Queryable struct for pending purchase rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = pending_purchases)]
pub(crate) struct PendingPurchaseRow {
    pub(crate) purchase_id: String,
    pub(crate) user_id: String,
    pub(crate) event_id: String,
    pub(crate) ticket_type_id: String,
    pub(crate) selected_shapes_json: String,
    pub(crate) general_quantity: i32,
    pub(crate) total_price: String,
    pub(crate) created_at: String,
}

/// Diesel Queryable struct for completed purchase rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = completed_purchases)]
pub(crate) struct CompletedPurchaseRow {
    pub(crate) purchase_id: String,
    pub(crate) user_id: String,
    pub(crate) event_id: String,
    pub(crate) ticket_type_id: String,
    pub(crate) selected_shapes_json: String,
    pub(crate) general_quantity: i32,
    pub(crate) total_price: String,
    pub(crate) created_at: String,
    pub(crate) approved_at: String,
}

impl PendingPurchaseRow {
    pub(crate) fn into_domain(self) -> Result<PendingPurchase, PersistenceError> {
        let selected_shapes: Vec<SelectedShape> =
            serde_json::from_str(&self.selected_shapes_json)?;
        Ok(PendingPurchase {
            id: self.purchase_id,
            user_id: self.user_id,
            event_id: self.event_id,
            ticket_type_id: self.ticket_type_id,
            selected_shapes,
            general_quantity: parse_u32(self.general_quantity, "general_quantity")?,
            total_price: parse_decimal(&self.total_price, "total_price")?,
            created_at: self.created_at,
        })
    }
}

impl CompletedPurchaseRow {
    pub(crate) fn into_domain(self) -> Result<CompletedPurchase, PersistenceError> {
        let selected_shapes: Vec<SelectedShape> =
            serde_json::from_str(&self.selected_shapes_json)?;
        Ok(CompletedPurchase {
            purchase: PendingPurchase {
                id: self.purchase_id,
                user_id: self.user_id,
                event_id: self.event_id,
                ticket_type_id: self.ticket_type_id,
                selected_shapes,
                general_quantity: parse_u32(self.general_quantity, "general_quantity")?,
                total_price: parse_decimal(&self.total_price, "total_price")?,
                created_at: self.created_at,
            },
            approved_at: self.approved_at,
        })
    }
}

backend_fn! {
/// Retrieves a pending purchase by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `purchase_id` - The purchase document id
///
/// # Errors
///
/// Returns `PersistenceError::Domain(DomainError::PurchaseNotFound)` if the
/// purchase does not exist (e.g., it was already resolved).
pub fn get_pending_purchase(
    conn: &mut _,
    purchase_id: &str,
) -> Result<entrada_domain::PendingPurchase, PersistenceError> {
    let row: PendingPurchaseRow = pending_purchases::table
        .filter(pending_purchases::purchase_id.eq(purchase_id))
        .select(PendingPurchaseRow::as_select())
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::Domain(DomainError::PurchaseNotFound(purchase_id.to_string()))
            }
            other => PersistenceError::from(other),
        })?;
    row.into_domain()
}
}

backend_fn! {
/// Lists every pending purchase, oldest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_pending_purchases(
    conn: &mut _,
) -> Result<Vec<entrada_domain::PendingPurchase>, PersistenceError> {
    let rows: Vec<PendingPurchaseRow> = pending_purchases::table
        .order(pending_purchases::purchase_pk.asc())
        .select(PendingPurchaseRow::as_select())
        .load(conn)?;
    rows.into_iter().map(PendingPurchaseRow::into_domain).collect()
}
}

backend_fn! {
/// Lists every completed purchase, oldest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_completed_purchases(
    conn: &mut _,
) -> Result<Vec<entrada_domain::CompletedPurchase>, PersistenceError> {
    let rows: Vec<CompletedPurchaseRow> = completed_purchases::table
        .order(completed_purchases::purchase_pk.asc())
        .select(CompletedPurchaseRow::as_select())
        .load(conn)?;
    rows.into_iter().map(CompletedPurchaseRow::into_domain).collect()
}
}
