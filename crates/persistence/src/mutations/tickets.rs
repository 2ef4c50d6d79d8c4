// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-use ticket validation.
//!
//! Check-in is one read-modify-write transaction with a guarded status
//! update, so two near-simultaneous scans of the same ticket can never both
//! observe VALID: at most one scan ever succeeds in flipping it.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{info, warn};

use crate::diesel_schema::purchased_tickets;
use crate::error::PersistenceError;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
use crate::queries::tickets::{get_ticket_mysql, get_ticket_sqlite};
use entrada::CheckIn;
use entrada_audit::{Actor, Cause};
use entrada_domain::{DomainError, PurchasedTicket, TicketStatus};

/// The outcome of a validation attempt.
///
/// `AlreadyUsed` carries the stored ticket so the scanning surface can
/// render it as a warning, distinguishable from an unknown ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketValidation {
    /// First scan: the ticket was admitted and is now USED.
    Admitted(PurchasedTicket),
    /// The ticket was already consumed; shown as a warning.
    AlreadyUsed(PurchasedTicket),
    /// No ticket with the scanned id exists.
    Invalid,
}

backend_fn! {
/// Flips a ticket VALID → USED, guarded by the expected current status.
///
/// Returns the number of rows updated: 1 when this scan won, 0 when a
/// concurrent scan got there first.
///
/// # Errors
///
/// Returns an error if the update fails.
fn guarded_use_ticket(conn: &mut _, ticket_id: &str) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        purchased_tickets::table
            .filter(purchased_tickets::ticket_id.eq(ticket_id))
            .filter(purchased_tickets::status.eq(TicketStatus::Valid.as_str())),
    )
    .set(purchased_tickets::status.eq(TicketStatus::Used.as_str()))
    .execute(conn)?)
}
}

/// Validates a scanned ticket - `SQLite` version.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `ticket_id` - The ticket id decoded from the QR scan
/// * `actor` - The actor performing the scan
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error only on database failure; unknown and already-used
/// tickets are reported as outcomes, not errors.
pub fn validate_ticket_sqlite(
    conn: &mut SqliteConnection,
    ticket_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<TicketValidation, PersistenceError> {
    conn.transaction::<TicketValidation, PersistenceError, _>(|conn| {
        let Some(ticket) = get_ticket_sqlite(conn, ticket_id)? else {
            warn!(ticket_id = %ticket_id, "Scanned unknown ticket");
            return Ok(TicketValidation::Invalid);
        };

        match entrada::check_in(&ticket, actor, cause) {
            CheckIn::AlreadyUsed { ticket } => {
                warn!(ticket_id = %ticket_id, "Scanned already-used ticket");
                Ok(TicketValidation::AlreadyUsed(ticket))
            }
            CheckIn::Admitted {
                ticket: updated,
                audit_event,
            } => {
                let affected: usize = guarded_use_ticket_sqlite(conn, ticket_id)?;
                if affected != 1 {
                    // A concurrent scan won the race between our read and
                    // the guarded update; report the stored state.
                    let stored: PurchasedTicket = get_ticket_sqlite(conn, ticket_id)?
                        .ok_or_else(|| {
                            PersistenceError::Domain(DomainError::TicketNotFound(
                                ticket_id.to_string(),
                            ))
                        })?;
                    warn!(ticket_id = %ticket_id, "Lost validation race");
                    return Ok(TicketValidation::AlreadyUsed(stored));
                }

                let audit_event_id: i64 = persist_audit_event_sqlite(conn, &audit_event)?;
                info!(ticket_id = %ticket_id, audit_event_id, "Admitted ticket");
                Ok(TicketValidation::Admitted(updated))
            }
        }
    })
}

/// Validates a scanned ticket - `MySQL` version.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `ticket_id` - The ticket id decoded from the QR scan
/// * `actor` - The actor performing the scan
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error only on database failure; unknown and already-used
/// tickets are reported as outcomes, not errors.
pub fn validate_ticket_mysql(
    conn: &mut MysqlConnection,
    ticket_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<TicketValidation, PersistenceError> {
    conn.transaction::<TicketValidation, PersistenceError, _>(|conn| {
        let Some(ticket) = get_ticket_mysql(conn, ticket_id)? else {
            warn!(ticket_id = %ticket_id, "Scanned unknown ticket");
            return Ok(TicketValidation::Invalid);
        };

        match entrada::check_in(&ticket, actor, cause) {
            CheckIn::AlreadyUsed { ticket } => {
                warn!(ticket_id = %ticket_id, "Scanned already-used ticket");
                Ok(TicketValidation::AlreadyUsed(ticket))
            }
            CheckIn::Admitted {
                ticket: updated,
                audit_event,
            } => {
                let affected: usize = guarded_use_ticket_mysql(conn, ticket_id)?;
                if affected != 1 {
                    // A concurrent scan won the race between our read and
                    // the guarded update; report the stored state.
                    let stored: PurchasedTicket = get_ticket_mysql(conn, ticket_id)?
                        .ok_or_else(|| {
                            PersistenceError::Domain(DomainError::TicketNotFound(
                                ticket_id.to_string(),
                            ))
                        })?;
                    warn!(ticket_id = %ticket_id, "Lost validation race");
                    return Ok(TicketValidation::AlreadyUsed(stored));
                }

                let audit_event_id: i64 = persist_audit_event_mysql(conn, &audit_event)?;
                info!(ticket_id = %ticket_id, audit_event_id, "Admitted ticket");
                Ok(TicketValidation::Admitted(updated))
            }
        }
    })
}
