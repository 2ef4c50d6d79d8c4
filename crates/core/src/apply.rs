// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure workflow transitions.
//!
//! Each function takes the current document state, validates the requested
//! transition, and produces the new state together with exactly one audit
//! event. Nothing here performs I/O; the persistence layer executes these
//! transitions inside a single database transaction so that either the
//! whole result is committed or nothing is.

use crate::command::ReserveCommand;
use crate::error::CoreError;
use crate::issue::{TicketBlueprint, expand_tickets};
use crate::state::{ApprovalResult, CheckIn, RejectionResult, ReservationResult};
use entrada_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use entrada_domain::{
    CompletedPurchase, DomainError, Event, PendingPurchase, PurchasedTicket, ShapeStatus,
    TicketStatus, purchase_total, validate_selection,
};

/// Summarizes an event's shape inventory for audit snapshots.
#[must_use]
pub fn event_snapshot(event: &Event) -> StateSnapshot {
    let mut available: usize = 0;
    let mut reserved: usize = 0;
    let mut sold: usize = 0;
    for shape in &event.venue_shapes {
        match shape.status {
            ShapeStatus::Available => available += 1,
            ShapeStatus::Reserved => reserved += 1,
            ShapeStatus::Sold => sold += 1,
        }
    }
    StateSnapshot::new(format!(
        "event={},available={available},reserved={reserved},sold={sold}",
        event.id
    ))
}

/// Summarizes a ticket for audit snapshots.
#[must_use]
pub fn ticket_snapshot(ticket: &PurchasedTicket) -> StateSnapshot {
    StateSnapshot::new(format!("ticket={},status={}", ticket.id, ticket.status))
}

/// Applies a reservation command to the event, producing the new event
/// state, the pending purchase, and the audit event.
///
/// Preconditions checked here:
/// - sales are enabled for the event
/// - the selection is structurally valid (see
///   `entrada_domain::validate_selection`)
/// - every selected shape is currently AVAILABLE
///
/// The reservation is all-or-nothing: the first unavailable shape aborts the
/// whole transition with a conflict, and no partial state is produced.
///
/// # Errors
///
/// Returns an error if the command violates domain rules;
/// `DomainError::ShapeNotAvailable` signals a reservation conflict.
pub fn reserve(
    event: &Event,
    command: ReserveCommand,
    actor: Actor,
    cause: Cause,
) -> Result<ReservationResult, CoreError> {
    if !event.sales_enabled {
        return Err(CoreError::DomainViolation(DomainError::SalesDisabled(
            event.id.clone(),
        )));
    }

    validate_selection(
        event,
        &command.ticket_type_id,
        &command.selected_shapes,
        command.general_quantity,
    )?;

    let total = purchase_total(
        event,
        &command.ticket_type_id,
        &command.selected_shapes,
        command.general_quantity,
    )?;

    let before: StateSnapshot = event_snapshot(event);

    // Flip every selected shape to RESERVED in the new event state.
    let mut new_event: Event = event.clone();
    for selection in &command.selected_shapes {
        for shape in &mut new_event.venue_shapes {
            if shape.id == selection.shape_id {
                shape.status.validate_transition(ShapeStatus::Reserved)?;
                shape.status = ShapeStatus::Reserved;
            }
        }
    }

    let purchase: PendingPurchase = PendingPurchase {
        id: command.purchase_id,
        user_id: command.user_id,
        event_id: event.id.clone(),
        ticket_type_id: command.ticket_type_id,
        selected_shapes: command.selected_shapes,
        general_quantity: command.general_quantity,
        total_price: total,
        created_at: command.created_at,
    };

    let after: StateSnapshot = event_snapshot(&new_event);

    let details: String = if purchase.selected_shapes.is_empty() {
        format!(
            "Requested {} general-admission ticket(s) for event '{}'",
            purchase.general_quantity, event.id
        )
    } else {
        format!(
            "Reserved {} shape(s) on event '{}'",
            purchase.selected_shapes.len(),
            event.id
        )
    };
    let action: Action = Action::new(String::from("ReservePurchase"), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(event.id.clone()),
        Some(purchase.id.clone()),
    );

    Ok(ReservationResult {
        new_event,
        purchase,
        audit_event,
    })
}

/// Applies an approval to a pending purchase, producing the new event state,
/// the tickets to issue, the archived purchase, and the audit event.
///
/// Every referenced shape still present on the event transitions
/// RESERVED → SOLD; a shape in any other status aborts the approval. A
/// general-admission purchase requires its ticket type to still exist.
///
/// # Errors
///
/// Returns an error if a referenced shape is not RESERVED or the
/// general-admission ticket type no longer exists.
pub fn approve(
    event: &Event,
    purchase: &PendingPurchase,
    approved_at: String,
    actor: Actor,
    cause: Cause,
) -> Result<ApprovalResult, CoreError> {
    if purchase.selected_shapes.is_empty() && event.ticket_type(&purchase.ticket_type_id).is_none()
    {
        return Err(CoreError::DomainViolation(DomainError::TicketTypeNotFound {
            event_id: event.id.clone(),
            ticket_type_id: purchase.ticket_type_id.clone(),
        }));
    }

    let before: StateSnapshot = event_snapshot(event);

    let tickets: Vec<TicketBlueprint> = expand_tickets(event, purchase);

    // Flip every referenced shape that still exists to SOLD.
    let mut new_event: Event = event.clone();
    for selection in &purchase.selected_shapes {
        for shape in &mut new_event.venue_shapes {
            if shape.id == selection.shape_id {
                shape.status.validate_transition(ShapeStatus::Sold)?;
                shape.status = ShapeStatus::Sold;
            }
        }
    }

    let completed: CompletedPurchase = CompletedPurchase {
        purchase: purchase.clone(),
        approved_at,
    };

    let after: StateSnapshot = event_snapshot(&new_event);

    let action: Action = Action::new(
        String::from("ApprovePurchase"),
        Some(format!(
            "Approved purchase '{}': issued {} ticket(s)",
            purchase.id,
            tickets.len()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(event.id.clone()),
        Some(purchase.id.clone()),
    );

    Ok(ApprovalResult {
        new_event,
        tickets,
        completed,
        audit_event,
    })
}

/// Applies a rejection to a pending purchase, releasing every referenced
/// shape back to AVAILABLE. No tickets are created.
///
/// # Errors
///
/// Returns an error if a referenced shape is not RESERVED.
pub fn reject(
    event: &Event,
    purchase: &PendingPurchase,
    actor: Actor,
    cause: Cause,
) -> Result<RejectionResult, CoreError> {
    let before: StateSnapshot = event_snapshot(event);

    let mut new_event: Event = event.clone();
    for selection in &purchase.selected_shapes {
        for shape in &mut new_event.venue_shapes {
            if shape.id == selection.shape_id {
                shape.status.validate_transition(ShapeStatus::Available)?;
                shape.status = ShapeStatus::Available;
            }
        }
    }

    let after: StateSnapshot = event_snapshot(&new_event);

    let action: Action = Action::new(
        String::from("RejectPurchase"),
        Some(format!("Rejected purchase '{}'", purchase.id)),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(event.id.clone()),
        Some(purchase.id.clone()),
    );

    Ok(RejectionResult {
        new_event,
        audit_event,
    })
}

/// Decides the check-in outcome for a ticket that was found by id.
///
/// A VALID ticket is admitted and transitions to USED; a USED ticket yields
/// the warning-shaped `AlreadyUsed` outcome with no state change. At most
/// one scan of a given ticket is ever admitted; the persistence layer
/// enforces this with a guarded status update in the same transaction.
#[must_use]
pub fn check_in(ticket: &PurchasedTicket, actor: Actor, cause: Cause) -> CheckIn {
    match ticket.status {
        TicketStatus::Used => CheckIn::AlreadyUsed {
            ticket: ticket.clone(),
        },
        TicketStatus::Valid => {
            let before: StateSnapshot = ticket_snapshot(ticket);

            let mut updated: PurchasedTicket = ticket.clone();
            updated.status = TicketStatus::Used;

            let after: StateSnapshot = ticket_snapshot(&updated);

            let action: Action = Action::new(
                String::from("ValidateTicket"),
                Some(format!("Admitted ticket '{}'", ticket.ticket_code)),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, None, None);

            CheckIn::Admitted {
                ticket: updated,
                audit_event,
            }
        }
    }
}
