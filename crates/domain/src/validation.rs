// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain rule validation for events and purchase selections.

use crate::error::DomainError;
use crate::shape_status::ShapeStatus;
use crate::types::{Event, SelectedShape, VenueShape};
use std::collections::HashSet;

/// Validates the structural invariants of an event document.
///
/// Checked invariants:
/// - the event name is not empty
/// - the event carries at least one ticket type
/// - shape ids are unique within the event
/// - every shape references a ticket type that exists on the event
/// - an enabled minimum-ticket bundle has quantity >= 1
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_event(event: &Event) -> Result<(), DomainError> {
    if event.name.trim().is_empty() {
        return Err(DomainError::InvalidEventField {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }

    if event.ticket_types.is_empty() {
        return Err(DomainError::LastTicketType);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(event.venue_shapes.len());
    for shape in &event.venue_shapes {
        if !seen.insert(shape.id.as_str()) {
            return Err(DomainError::DuplicateShapeId(shape.id.clone()));
        }
        if event.ticket_type(&shape.ticket_type_id).is_none() {
            return Err(DomainError::DanglingTicketType {
                shape_id: shape.id.clone(),
                ticket_type_id: shape.ticket_type_id.clone(),
            });
        }
    }

    for ticket_type in &event.ticket_types {
        if let Some(bundle) = ticket_type
            .booking_conditions
            .as_ref()
            .and_then(|c| c.enabled_min_tickets())
        {
            if bundle.quantity == 0 {
                return Err(DomainError::InvalidBundleQuantity(bundle.quantity));
            }
        }
    }

    Ok(())
}

/// Validates that a ticket type may be removed from its event.
///
/// A ticket type in use by any shape cannot be deleted, and an event must
/// keep at least one ticket type.
///
/// # Errors
///
/// Returns `TicketTypeInUse` or `LastTicketType` when removal is blocked.
pub fn validate_ticket_type_removal(event: &Event, ticket_type_id: &str) -> Result<(), DomainError> {
    if event.ticket_types.len() <= 1 {
        return Err(DomainError::LastTicketType);
    }
    if event
        .venue_shapes
        .iter()
        .any(|shape| shape.ticket_type_id == ticket_type_id)
    {
        return Err(DomainError::TicketTypeInUse {
            ticket_type_id: ticket_type_id.to_string(),
        });
    }
    Ok(())
}

/// Validates a purchase selection against the current event state.
///
/// A selection is either a non-empty list of shapes or a positive
/// general-admission quantity, never both empty. Every selected shape must
/// exist, belong to the purchase's ticket type, be AVAILABLE, and carry a
/// booking choice only if the ticket type enables that condition.
///
/// The availability check here is advisory for early feedback; the
/// authoritative check is the guarded status update inside the reservation
/// transaction.
///
/// # Errors
///
/// Returns the first violated rule; `ShapeNotAvailable` signals a
/// reservation conflict.
pub fn validate_selection(
    event: &Event,
    ticket_type_id: &str,
    selected_shapes: &[SelectedShape],
    general_quantity: u32,
) -> Result<(), DomainError> {
    let ticket_type = event.ticket_type(ticket_type_id).ok_or_else(|| {
        DomainError::TicketTypeNotFound {
            event_id: event.id.clone(),
            ticket_type_id: ticket_type_id.to_string(),
        }
    })?;

    if selected_shapes.is_empty() {
        if general_quantity == 0 {
            return Err(DomainError::EmptySelection);
        }
        return Ok(());
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(selected_shapes.len());
    for selection in selected_shapes {
        if !seen.insert(selection.shape_id.as_str()) {
            return Err(DomainError::DuplicateShapeId(selection.shape_id.clone()));
        }

        let shape: &VenueShape =
            event
                .shape(&selection.shape_id)
                .ok_or_else(|| DomainError::ShapeNotFound {
                    event_id: event.id.clone(),
                    shape_id: selection.shape_id.clone(),
                })?;

        if shape.ticket_type_id != ticket_type.id {
            return Err(DomainError::ShapeNotFound {
                event_id: event.id.clone(),
                shape_id: selection.shape_id.clone(),
            });
        }

        if shape.status != ShapeStatus::Available {
            return Err(DomainError::ShapeNotAvailable {
                shape_id: shape.id.clone(),
                status: shape.status.as_str().to_string(),
            });
        }

        if let Some(choice) = selection.booking_choice {
            let conditions = ticket_type.booking_conditions.as_ref();
            let enabled: bool = match choice {
                crate::types::BookingChoice::MinTickets => {
                    conditions.is_some_and(|c| c.enabled_min_tickets().is_some())
                }
                crate::types::BookingChoice::Combo => {
                    conditions.is_some_and(|c| c.enabled_combo().is_some())
                }
            };
            if !enabled {
                return Err(DomainError::BookingConditionUnavailable {
                    ticket_type_id: ticket_type.id.clone(),
                    choice: choice.as_str().to_string(),
                });
            }
        }
    }

    Ok(())
}
