// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase workflow mutations: reserve, approve, reject.
//!
//! Each operation runs as one database transaction: read the current
//! documents, apply the pure workflow transition, write the new state, and
//! persist the audit event. Shape status flips use guarded updates
//! (`... WHERE status = <expected>`) so that a concurrent transaction that
//! already moved a shape forces this one to roll back. No partial writes
//! ever persist.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::diesel_schema::{completed_purchases, pending_purchases, purchased_tickets, venue_shapes};
use crate::error::PersistenceError;
use crate::ids;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
use crate::queries::events::{
    load_event_mysql, load_event_sqlite, lookup_event_pk_mysql, lookup_event_pk_sqlite,
};
use crate::queries::purchases::{get_pending_purchase_mysql, get_pending_purchase_sqlite};
use entrada::{ApprovalResult, ReservationResult, ReserveCommand, TicketBlueprint};
use entrada_audit::{Actor, Cause};
use entrada_domain::{
    CompletedPurchase, DomainError, Event, PendingPurchase, PurchasedTicket, SelectedShape,
    ShapeStatus, TicketStatus, qr_code_url, ticket_code,
};

/// The committed result of a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveOutcome {
    /// The pending purchase as inserted.
    pub purchase: PendingPurchase,
    /// The ID of the audit event persisted with it.
    pub audit_event_id: i64,
}

/// The committed result of an approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproveOutcome {
    /// The archived purchase.
    pub completed: CompletedPurchase,
    /// The tickets issued by the approval, in insertion order.
    pub tickets: Vec<PurchasedTicket>,
    /// The ID of the audit event persisted with them.
    pub audit_event_id: i64,
}

/// The committed result of a rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectOutcome {
    /// The purchase that was deleted.
    pub purchase: PendingPurchase,
    /// The ID of the audit event persisted with it.
    pub audit_event_id: i64,
}

backend_fn! {
/// Flips one shape's status, guarded by its expected current status.
///
/// Returns the number of rows updated: 1 when the guard matched, 0 when a
/// concurrent transaction already moved the shape (or it no longer exists).
///
/// # Errors
///
/// Returns an error if the update fails.
fn guarded_shape_transition(
    conn: &mut _,
    event_pk: i64,
    shape_id: &str,
    from: &str,
    to: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        venue_shapes::table
            .filter(venue_shapes::event_pk.eq(event_pk))
            .filter(venue_shapes::shape_id.eq(shape_id))
            .filter(venue_shapes::status.eq(from)),
    )
    .set(venue_shapes::status.eq(to))
    .execute(conn)?)
}
}

backend_fn! {
/// Fetches a shape's stored status, if the shape still exists.
///
/// # Errors
///
/// Returns an error if the query fails.
fn fetch_shape_status(
    conn: &mut _,
    event_pk: i64,
    shape_id: &str,
) -> Result<Option<String>, PersistenceError> {
    let result: Result<String, diesel::result::Error> = venue_shapes::table
        .filter(venue_shapes::event_pk.eq(event_pk))
        .filter(venue_shapes::shape_id.eq(shape_id))
        .select(venue_shapes::status)
        .first(conn);
    match result {
        Ok(status) => Ok(Some(status)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Inserts a pending purchase row.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_pending_purchase(
    conn: &mut _,
    purchase: &PendingPurchase,
) -> Result<(), PersistenceError> {
    let shapes_json: String = serde_json::to_string(&purchase.selected_shapes)?;
    diesel::insert_into(pending_purchases::table)
        .values((
            pending_purchases::purchase_id.eq(&purchase.id),
            pending_purchases::user_id.eq(&purchase.user_id),
            pending_purchases::event_id.eq(&purchase.event_id),
            pending_purchases::ticket_type_id.eq(&purchase.ticket_type_id),
            pending_purchases::selected_shapes_json.eq(&shapes_json),
            pending_purchases::general_quantity.eq(i32::try_from(purchase.general_quantity)
                .unwrap_or(i32::MAX)),
            pending_purchases::total_price.eq(purchase.total_price.to_string()),
            pending_purchases::created_at.eq(&purchase.created_at),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Inserts a completed purchase row (append-only archive).
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_completed_purchase(
    conn: &mut _,
    completed: &CompletedPurchase,
) -> Result<(), PersistenceError> {
    let purchase: &PendingPurchase = &completed.purchase;
    let shapes_json: String = serde_json::to_string(&purchase.selected_shapes)?;
    diesel::insert_into(completed_purchases::table)
        .values((
            completed_purchases::purchase_id.eq(&purchase.id),
            completed_purchases::user_id.eq(&purchase.user_id),
            completed_purchases::event_id.eq(&purchase.event_id),
            completed_purchases::ticket_type_id.eq(&purchase.ticket_type_id),
            completed_purchases::selected_shapes_json.eq(&shapes_json),
            completed_purchases::general_quantity.eq(i32::try_from(purchase.general_quantity)
                .unwrap_or(i32::MAX)),
            completed_purchases::total_price.eq(purchase.total_price.to_string()),
            completed_purchases::created_at.eq(&purchase.created_at),
            completed_purchases::approved_at.eq(&completed.approved_at),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes a pending purchase row by document id.
///
/// Returns the number of rows deleted: 0 means another admin resolved the
/// purchase first.
///
/// # Errors
///
/// Returns an error if the delete fails.
fn delete_pending_row(conn: &mut _, purchase_id: &str) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(pending_purchases::table.filter(
            pending_purchases::purchase_id.eq(purchase_id),
        ))
        .execute(conn)?,
    )
}
}

backend_fn! {
/// Inserts a purchased ticket row.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_ticket_row(conn: &mut _, ticket: &PurchasedTicket) -> Result<(), PersistenceError> {
    diesel::insert_into(purchased_tickets::table)
        .values((
            purchased_tickets::ticket_id.eq(&ticket.id),
            purchased_tickets::owner_id.eq(&ticket.owner_id),
            purchased_tickets::event_name.eq(&ticket.event_name),
            purchased_tickets::event_date.eq(&ticket.event_date),
            purchased_tickets::event_time.eq(&ticket.event_time),
            purchased_tickets::event_location.eq(&ticket.event_location),
            purchased_tickets::header_image.eq(&ticket.header_image),
            purchased_tickets::ticket_code.eq(&ticket.ticket_code),
            purchased_tickets::qr_code_url.eq(&ticket.qr_code_url),
            purchased_tickets::holder_type.eq(&ticket.holder_type),
            purchased_tickets::seat_info.eq(ticket.seat_info.as_deref()),
            purchased_tickets::status.eq(ticket.status.as_str()),
        ))
        .execute(conn)?;
    Ok(())
}
}

/// Materializes a blueprint into a ticket with a minted id, code, and QR URL.
fn materialize_ticket(blueprint: &TicketBlueprint, owner_id: &str) -> PurchasedTicket {
    let ticket_id: String = ids::new_doc_id("tkt");
    let code: String = ticket_code(&ticket_id, &ids::new_code_suffix());
    PurchasedTicket {
        qr_code_url: qr_code_url(&ticket_id),
        id: ticket_id,
        owner_id: owner_id.to_string(),
        event_name: blueprint.event_name.clone(),
        event_date: blueprint.event_date.clone(),
        event_time: blueprint.event_time.clone(),
        event_location: blueprint.event_location.clone(),
        header_image: blueprint.header_image.clone(),
        ticket_code: code,
        holder_type: blueprint.holder_type.clone(),
        seat_info: blueprint.seat_info.clone(),
        status: TicketStatus::Valid,
    }
}

/// Builds the conflict error for a guarded reservation update that missed.
fn reservation_conflict(shape_id: &str, found: Option<String>) -> PersistenceError {
    match found {
        Some(status) => PersistenceError::Domain(DomainError::ShapeNotAvailable {
            shape_id: shape_id.to_string(),
            status,
        }),
        None => PersistenceError::Conflict(format!(
            "Shape '{shape_id}' disappeared during reservation"
        )),
    }
}

/// Builds the conflict error for a guarded resolution update that missed.
fn resolution_conflict(shape_id: &str, found: Option<String>) -> PersistenceError {
    match found {
        Some(status) => PersistenceError::Domain(DomainError::ShapeNotReserved {
            shape_id: shape_id.to_string(),
            status,
        }),
        None => PersistenceError::Conflict(format!(
            "Shape '{shape_id}' disappeared during resolution"
        )),
    }
}

/// Reserves a purchase - `SQLite` version.
///
/// Atomically creates the pending purchase and flips every selected shape
/// AVAILABLE → RESERVED. All-or-nothing: any shape that is no longer
/// AVAILABLE aborts the whole transaction with a conflict.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event_id` - The event document id
/// * `ticket_type_id` - The ticket type the purchase is made under
/// * `selected_shapes` - Map-backed shape selections (empty for general admission)
/// * `general_quantity` - General-admission ticket count
/// * `user_id` - The authenticated buyer's account id
/// * `created_at` - ISO-8601 creation timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the event does not exist, the selection violates
/// domain rules, or a selected shape was concurrently reserved.
#[allow(clippy::too_many_arguments)]
pub fn reserve_purchase_sqlite(
    conn: &mut SqliteConnection,
    event_id: &str,
    ticket_type_id: &str,
    selected_shapes: Vec<SelectedShape>,
    general_quantity: u32,
    user_id: &str,
    created_at: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ReserveOutcome, PersistenceError> {
    conn.transaction::<ReserveOutcome, PersistenceError, _>(|conn| {
        let event: Event = load_event_sqlite(conn, event_id)?;
        let event_pk: i64 = lookup_event_pk_sqlite(conn, event_id)?;

        let command: ReserveCommand = ReserveCommand {
            purchase_id: ids::new_doc_id("purchase"),
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            ticket_type_id: ticket_type_id.to_string(),
            selected_shapes,
            general_quantity,
            created_at: created_at.to_string(),
        };
        let result: ReservationResult = entrada::reserve(&event, command, actor, cause)?;

        for selection in &result.purchase.selected_shapes {
            let affected: usize = guarded_shape_transition_sqlite(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Available.as_str(),
                ShapeStatus::Reserved.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_sqlite(conn, event_pk, &selection.shape_id)?;
                return Err(reservation_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Reserved shape");
        }

        insert_pending_purchase_sqlite(conn, &result.purchase)?;
        let audit_event_id: i64 = persist_audit_event_sqlite(conn, &result.audit_event)?;

        info!(
            purchase_id = %result.purchase.id,
            event_id = %event_id,
            audit_event_id,
            "Reserved purchase"
        );

        Ok(ReserveOutcome {
            purchase: result.purchase,
            audit_event_id,
        })
    })
}

/// Reserves a purchase - `MySQL` version.
///
/// Atomically creates the pending purchase and flips every selected shape
/// AVAILABLE → RESERVED. All-or-nothing: any shape that is no longer
/// AVAILABLE aborts the whole transaction with a conflict.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event_id` - The event document id
/// * `ticket_type_id` - The ticket type the purchase is made under
/// * `selected_shapes` - Map-backed shape selections (empty for general admission)
/// * `general_quantity` - General-admission ticket count
/// * `user_id` - The authenticated buyer's account id
/// * `created_at` - ISO-8601 creation timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the event does not exist, the selection violates
/// domain rules, or a selected shape was concurrently reserved.
#[allow(clippy::too_many_arguments)]
pub fn reserve_purchase_mysql(
    conn: &mut MysqlConnection,
    event_id: &str,
    ticket_type_id: &str,
    selected_shapes: Vec<SelectedShape>,
    general_quantity: u32,
    user_id: &str,
    created_at: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ReserveOutcome, PersistenceError> {
    conn.transaction::<ReserveOutcome, PersistenceError, _>(|conn| {
        let event: Event = load_event_mysql(conn, event_id)?;
        let event_pk: i64 = lookup_event_pk_mysql(conn, event_id)?;

        let command: ReserveCommand = ReserveCommand {
            purchase_id: ids::new_doc_id("purchase"),
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            ticket_type_id: ticket_type_id.to_string(),
            selected_shapes,
            general_quantity,
            created_at: created_at.to_string(),
        };
        let result: ReservationResult = entrada::reserve(&event, command, actor, cause)?;

        for selection in &result.purchase.selected_shapes {
            let affected: usize = guarded_shape_transition_mysql(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Available.as_str(),
                ShapeStatus::Reserved.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_mysql(conn, event_pk, &selection.shape_id)?;
                return Err(reservation_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Reserved shape");
        }

        insert_pending_purchase_mysql(conn, &result.purchase)?;
        let audit_event_id: i64 = persist_audit_event_mysql(conn, &result.audit_event)?;

        info!(
            purchase_id = %result.purchase.id,
            event_id = %event_id,
            audit_event_id,
            "Reserved purchase"
        );

        Ok(ReserveOutcome {
            purchase: result.purchase,
            audit_event_id,
        })
    })
}

/// Approves a pending purchase - `SQLite` version.
///
/// Atomically issues the tickets, flips every referenced shape
/// RESERVED → SOLD, archives the purchase, and deletes the pending row. A
/// purchase already resolved by a concurrent admin yields
/// `DomainError::PurchaseNotFound`.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `purchase_id` - The pending purchase document id
/// * `approved_at` - ISO-8601 approval timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the purchase or its event no longer exists, or a
/// referenced shape is not RESERVED.
pub fn approve_purchase_sqlite(
    conn: &mut SqliteConnection,
    purchase_id: &str,
    approved_at: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ApproveOutcome, PersistenceError> {
    conn.transaction::<ApproveOutcome, PersistenceError, _>(|conn| {
        let purchase: PendingPurchase = get_pending_purchase_sqlite(conn, purchase_id)?;
        let event: Event = load_event_sqlite(conn, &purchase.event_id)?;
        let event_pk: i64 = lookup_event_pk_sqlite(conn, &purchase.event_id)?;

        let result: ApprovalResult = entrada::approve(
            &event,
            &purchase,
            approved_at.to_string(),
            actor,
            cause,
        )?;

        for selection in &purchase.selected_shapes {
            if event.shape(&selection.shape_id).is_none() {
                continue;
            }
            let affected: usize = guarded_shape_transition_sqlite(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Reserved.as_str(),
                ShapeStatus::Sold.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_sqlite(conn, event_pk, &selection.shape_id)?;
                return Err(resolution_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Sold shape");
        }

        let mut tickets: Vec<PurchasedTicket> = Vec::with_capacity(result.tickets.len());
        for blueprint in &result.tickets {
            let ticket: PurchasedTicket = materialize_ticket(blueprint, &purchase.user_id);
            insert_ticket_row_sqlite(conn, &ticket)?;
            tickets.push(ticket);
        }

        insert_completed_purchase_sqlite(conn, &result.completed)?;

        let deleted: usize = delete_pending_row_sqlite(conn, purchase_id)?;
        if deleted != 1 {
            return Err(PersistenceError::Domain(DomainError::PurchaseNotFound(
                purchase_id.to_string(),
            )));
        }

        let audit_event_id: i64 = persist_audit_event_sqlite(conn, &result.audit_event)?;

        info!(
            purchase_id = %purchase_id,
            tickets = tickets.len(),
            audit_event_id,
            "Approved purchase"
        );

        Ok(ApproveOutcome {
            completed: result.completed,
            tickets,
            audit_event_id,
        })
    })
}

/// Approves a pending purchase - `MySQL` version.
///
/// Atomically issues the tickets, flips every referenced shape
/// RESERVED → SOLD, archives the purchase, and deletes the pending row. A
/// purchase already resolved by a concurrent admin yields
/// `DomainError::PurchaseNotFound`.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `purchase_id` - The pending purchase document id
/// * `approved_at` - ISO-8601 approval timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the purchase or its event no longer exists, or a
/// referenced shape is not RESERVED.
pub fn approve_purchase_mysql(
    conn: &mut MysqlConnection,
    purchase_id: &str,
    approved_at: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ApproveOutcome, PersistenceError> {
    conn.transaction::<ApproveOutcome, PersistenceError, _>(|conn| {
        let purchase: PendingPurchase = get_pending_purchase_mysql(conn, purchase_id)?;
        let event: Event = load_event_mysql(conn, &purchase.event_id)?;
        let event_pk: i64 = lookup_event_pk_mysql(conn, &purchase.event_id)?;

        let result: ApprovalResult = entrada::approve(
            &event,
            &purchase,
            approved_at.to_string(),
            actor,
            cause,
        )?;

        for selection in &purchase.selected_shapes {
            if event.shape(&selection.shape_id).is_none() {
                continue;
            }
            let affected: usize = guarded_shape_transition_mysql(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Reserved.as_str(),
                ShapeStatus::Sold.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_mysql(conn, event_pk, &selection.shape_id)?;
                return Err(resolution_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Sold shape");
        }

        let mut tickets: Vec<PurchasedTicket> = Vec::with_capacity(result.tickets.len());
        for blueprint in &result.tickets {
            let ticket: PurchasedTicket = materialize_ticket(blueprint, &purchase.user_id);
            insert_ticket_row_mysql(conn, &ticket)?;
            tickets.push(ticket);
        }

        insert_completed_purchase_mysql(conn, &result.completed)?;

        let deleted: usize = delete_pending_row_mysql(conn, purchase_id)?;
        if deleted != 1 {
            return Err(PersistenceError::Domain(DomainError::PurchaseNotFound(
                purchase_id.to_string(),
            )));
        }

        let audit_event_id: i64 = persist_audit_event_mysql(conn, &result.audit_event)?;

        info!(
            purchase_id = %purchase_id,
            tickets = tickets.len(),
            audit_event_id,
            "Approved purchase"
        );

        Ok(ApproveOutcome {
            completed: result.completed,
            tickets,
            audit_event_id,
        })
    })
}

/// Rejects a pending purchase - `SQLite` version.
///
/// Atomically releases every referenced shape RESERVED → AVAILABLE and
/// deletes the pending row. No tickets are created. A purchase already
/// resolved by a concurrent admin yields `DomainError::PurchaseNotFound`.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `purchase_id` - The pending purchase document id
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the purchase or its event no longer exists, or a
/// referenced shape is not RESERVED.
pub fn reject_purchase_sqlite(
    conn: &mut SqliteConnection,
    purchase_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<RejectOutcome, PersistenceError> {
    conn.transaction::<RejectOutcome, PersistenceError, _>(|conn| {
        let purchase: PendingPurchase = get_pending_purchase_sqlite(conn, purchase_id)?;
        let event: Event = load_event_sqlite(conn, &purchase.event_id)?;
        let event_pk: i64 = lookup_event_pk_sqlite(conn, &purchase.event_id)?;

        let result = entrada::reject(&event, &purchase, actor, cause)?;

        for selection in &purchase.selected_shapes {
            if event.shape(&selection.shape_id).is_none() {
                continue;
            }
            let affected: usize = guarded_shape_transition_sqlite(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Reserved.as_str(),
                ShapeStatus::Available.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_sqlite(conn, event_pk, &selection.shape_id)?;
                return Err(resolution_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Released shape");
        }

        let deleted: usize = delete_pending_row_sqlite(conn, purchase_id)?;
        if deleted != 1 {
            return Err(PersistenceError::Domain(DomainError::PurchaseNotFound(
                purchase_id.to_string(),
            )));
        }

        let audit_event_id: i64 = persist_audit_event_sqlite(conn, &result.audit_event)?;

        info!(purchase_id = %purchase_id, audit_event_id, "Rejected purchase");

        Ok(RejectOutcome {
            purchase,
            audit_event_id,
        })
    })
}

/// Rejects a pending purchase - `MySQL` version.
///
/// Atomically releases every referenced shape RESERVED → AVAILABLE and
/// deletes the pending row. No tickets are created. A purchase already
/// resolved by a concurrent admin yields `DomainError::PurchaseNotFound`.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `purchase_id` - The pending purchase document id
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the purchase or its event no longer exists, or a
/// referenced shape is not RESERVED.
pub fn reject_purchase_mysql(
    conn: &mut MysqlConnection,
    purchase_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<RejectOutcome, PersistenceError> {
    conn.transaction::<RejectOutcome, PersistenceError, _>(|conn| {
        let purchase: PendingPurchase = get_pending_purchase_mysql(conn, purchase_id)?;
        let event: Event = load_event_mysql(conn, &purchase.event_id)?;
        let event_pk: i64 = lookup_event_pk_mysql(conn, &purchase.event_id)?;

        let result = entrada::reject(&event, &purchase, actor, cause)?;

        for selection in &purchase.selected_shapes {
            if event.shape(&selection.shape_id).is_none() {
                continue;
            }
            let affected: usize = guarded_shape_transition_mysql(
                conn,
                event_pk,
                &selection.shape_id,
                ShapeStatus::Reserved.as_str(),
                ShapeStatus::Available.as_str(),
            )?;
            if affected != 1 {
                let found: Option<String> =
                    fetch_shape_status_mysql(conn, event_pk, &selection.shape_id)?;
                return Err(resolution_conflict(&selection.shape_id, found));
            }
            debug!(shape_id = %selection.shape_id, "Released shape");
        }

        let deleted: usize = delete_pending_row_mysql(conn, purchase_id)?;
        if deleted != 1 {
            return Err(PersistenceError::Domain(DomainError::PurchaseNotFound(
                purchase_id.to_string(),
            )));
        }

        let audit_event_id: i64 = persist_audit_event_mysql(conn, &result.audit_event)?;

        info!(purchase_id = %purchase_id, audit_event_id, "Rejected purchase");

        Ok(RejectOutcome {
            purchase,
            audit_event_id,
        })
    })
}
