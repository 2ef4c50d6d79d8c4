// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers authorize the actor, delegate to the persistence layer (whose
//! workflow operations apply the pure core transitions inside one
//! transaction), and shape the response. They hold no state of their own.

use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService, now_iso};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    ApprovePurchaseResponse, CreateEventResponse, DeleteEventResponse,
    ListCompletedPurchasesResponse, ListEventsResponse, ListPendingPurchasesResponse,
    MyTicketsResponse, RejectPurchaseResponse, ReservePurchaseRequest, ReservePurchaseResponse,
    UpdateEventResponse, ValidateTicketRequest, ValidateTicketResponse, ValidationStatus,
};
use entrada_audit::Cause;
use entrada_domain::{Event, validate_event};
use entrada_persistence::{Persistence, TicketValidation};

/// Creates an event (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event violates
/// structural rules, or persistence fails.
pub fn create_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event: &Event,
) -> Result<CreateEventResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_event")?;
    validate_event(event).map_err(translate_domain_error)?;

    let event_id: String = persistence
        .create_event(event)
        .map_err(translate_persistence_error)?;

    info!(event_id = %event_id, actor_id = %actor.id, "Created event");

    Ok(CreateEventResponse {
        event_id,
        message: String::from("Event created"),
    })
}

/// Updates an event (admin only).
///
/// Surviving shapes keep their stored status regardless of the payload.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event violates
/// structural rules, or the event does not exist.
pub fn update_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event: &Event,
) -> Result<UpdateEventResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_event")?;
    validate_event(event).map_err(translate_domain_error)?;

    persistence
        .update_event(event)
        .map_err(translate_persistence_error)?;

    info!(event_id = %event.id, actor_id = %actor.id, "Updated event");

    Ok(UpdateEventResponse {
        event_id: event.id.clone(),
        message: String::from("Event updated"),
    })
}

/// Deletes an event (admin only).
///
/// The response carries the uploaded image URLs; the server purges their
/// objects from the file store, ignoring missing ones.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the event does not
/// exist.
pub fn delete_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: &str,
) -> Result<DeleteEventResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_event")?;

    let image_urls: Vec<String> = persistence
        .delete_event(event_id)
        .map_err(translate_persistence_error)?;

    info!(event_id = %event_id, actor_id = %actor.id, "Deleted event");

    Ok(DeleteEventResponse {
        event_id: event_id.to_string(),
        image_urls,
        message: String::from("Event deleted"),
    })
}

/// Lists every event. Public read.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_events(persistence: &mut Persistence) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<Event> = persistence
        .list_events()
        .map_err(translate_persistence_error)?;
    Ok(ListEventsResponse { events })
}

/// Loads one event by id. Public read.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_event(persistence: &mut Persistence, event_id: &str) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)
}

/// Reserves a purchase for the calling buyer.
///
/// Atomically creates the pending purchase and holds the selected shapes. A
/// buyer who loses a reservation race receives a `Conflict`.
///
/// # Errors
///
/// Returns an error if the event does not exist, sales are disabled, the
/// selection is invalid, or a shape was concurrently reserved.
pub fn reserve_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: &ReservePurchaseRequest,
) -> Result<ReservePurchaseResponse, ApiError> {
    let created_at: String = now_iso()?;

    let outcome = persistence
        .reserve_purchase(
            &request.event_id,
            &request.ticket_type_id,
            request.selected_shapes.clone(),
            request.general_quantity,
            &actor.id,
            &created_at,
            actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_persistence_error)?;

    info!(
        purchase_id = %outcome.purchase.id,
        event_id = %request.event_id,
        actor_id = %actor.id,
        "Reserved purchase"
    );

    Ok(ReservePurchaseResponse {
        purchase: outcome.purchase,
        message: String::from("Purchase requested; awaiting verification"),
    })
}

/// Approves a pending purchase (admin only).
///
/// # Errors
///
/// Returns `ResourceNotFound` if the purchase was already resolved by a
/// concurrent admin action (a harmless no-op for the caller).
pub fn approve_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    purchase_id: &str,
) -> Result<ApprovePurchaseResponse, ApiError> {
    AuthorizationService::require_admin(actor, "approve_purchase")?;
    let approved_at: String = now_iso()?;

    let outcome = persistence
        .approve_purchase(purchase_id, &approved_at, actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    info!(
        purchase_id = %purchase_id,
        tickets = outcome.tickets.len(),
        actor_id = %actor.id,
        "Approved purchase"
    );

    Ok(ApprovePurchaseResponse {
        completed: outcome.completed,
        tickets: outcome.tickets,
        message: String::from("Purchase approved; tickets issued"),
    })
}

/// Rejects a pending purchase (admin only).
///
/// # Errors
///
/// Returns `ResourceNotFound` if the purchase was already resolved by a
/// concurrent admin action (a harmless no-op for the caller).
pub fn reject_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    purchase_id: &str,
) -> Result<RejectPurchaseResponse, ApiError> {
    AuthorizationService::require_admin(actor, "reject_purchase")?;

    let outcome = persistence
        .reject_purchase(purchase_id, actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    info!(purchase_id = %purchase_id, actor_id = %actor.id, "Rejected purchase");

    Ok(RejectPurchaseResponse {
        purchase_id: outcome.purchase.id,
        event_id: outcome.purchase.event_id,
        message: String::from("Purchase rejected; shapes released"),
    })
}

/// Lists pending purchases (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or persistence fails.
pub fn list_pending_purchases(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListPendingPurchasesResponse, ApiError> {
    AuthorizationService::require_admin(actor, "list_pending_purchases")?;
    let purchases = persistence
        .list_pending_purchases()
        .map_err(translate_persistence_error)?;
    Ok(ListPendingPurchasesResponse { purchases })
}

/// Lists completed purchases (admin only).
///
/// # Errors
///
/// Returns an error if the actor is not an admin or persistence fails.
pub fn list_completed_purchases(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListCompletedPurchasesResponse, ApiError> {
    AuthorizationService::require_admin(actor, "list_completed_purchases")?;
    let purchases = persistence
        .list_completed_purchases()
        .map_err(translate_persistence_error)?;
    Ok(ListCompletedPurchasesResponse { purchases })
}

/// Lists the calling account's tickets.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn my_tickets(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<MyTicketsResponse, ApiError> {
    let tickets = persistence
        .list_tickets_for_owner(&actor.id)
        .map_err(translate_persistence_error)?;
    Ok(MyTicketsResponse { tickets })
}

/// Validates a scanned ticket (admin only).
///
/// All three outcomes are success-shaped; an already-used ticket is a
/// warning carrying the ticket data, distinguishable from an unknown one.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the database fails.
pub fn validate_ticket(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: &ValidateTicketRequest,
) -> Result<ValidateTicketResponse, ApiError> {
    AuthorizationService::require_admin(actor, "validate_ticket")?;

    let outcome: TicketValidation = persistence
        .validate_ticket(&request.code, actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    let response: ValidateTicketResponse = match outcome {
        TicketValidation::Admitted(ticket) => ValidateTicketResponse {
            status: ValidationStatus::Admitted,
            message: String::from("Ticket validado con éxito."),
            ticket: Some(ticket),
        },
        TicketValidation::AlreadyUsed(ticket) => ValidateTicketResponse {
            status: ValidationStatus::AlreadyUsed,
            message: String::from("Este ticket ya ha sido utilizado."),
            ticket: Some(ticket),
        },
        TicketValidation::Invalid => ValidateTicketResponse {
            status: ValidationStatus::Invalid,
            message: String::from("Ticket inválido o no encontrado."),
            ticket: None,
        },
    };

    Ok(response)
}
