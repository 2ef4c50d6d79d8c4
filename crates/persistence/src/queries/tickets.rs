// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchased ticket queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::convert::parse_ticket_status;
use crate::diesel_schema::purchased_tickets;
use crate::error::PersistenceError;
use entrada_domain::PurchasedTicket;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = purchased_tickets)]
pub(crate) struct TicketRow {
    pub(crate) ticket_id: String,
    pub(crate) owner_id: String,
    pub(crate) event_name: String,
    pub(crate) event_date: String,
    pub(crate) event_time: String,
    pub(crate) event_location: String,
    pub(crate) header_image: String,
    pub(crate) ticket_code: String,
    pub(crate) qr_code_url: String,
    pub(crate) holder_type: String,
    pub(crate) seat_info: Option<String>,
    pub(crate) status: String,
}

impl TicketRow {
    pub(crate) fn into_domain(self) -> Result<PurchasedTicket, PersistenceError> {
        Ok(PurchasedTicket {
            id: self.ticket_id,
            owner_id: self.owner_id,
            event_name: self.event_name,
            event_date: self.event_date,
            event_time: self.event_time,
            event_location: self.event_location,
            header_image: self.header_image,
            ticket_code: self.ticket_code,
            qr_code_url: self.qr_code_url,
            holder_type: self.holder_type,
            seat_info: self.seat_info,
            status: parse_ticket_status(&self.status)?,
        })
    }
}

backend_fn! {
/// Retrieves a ticket by id.
///
/// Returns `Ok(None)` for an unknown id: at check-in an unknown ticket is a
/// reportable outcome, not a failure.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_id` - The ticket document id (the QR payload)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_ticket(
    conn: &mut _,
    ticket_id: &str,
) -> Result<Option<entrada_domain::PurchasedTicket>, PersistenceError> {
    let result: Result<TicketRow, diesel::result::Error> = purchased_tickets::table
        .filter(purchased_tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists the tickets owned by an account, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner_id` - The owning account id
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tickets_for_owner(
    conn: &mut _,
    owner_id: &str,
) -> Result<Vec<entrada_domain::PurchasedTicket>, PersistenceError> {
    let rows: Vec<TicketRow> = purchased_tickets::table
        .filter(purchased_tickets::owner_id.eq(owner_id))
        .order(purchased_tickets::ticket_pk.asc())
        .select(TicketRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TicketRow::into_domain).collect()
}
}
