// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase total computation.
//!
//! Totals are computed server-side at reservation time from the event's
//! stored ticket types; a client-supplied figure is never trusted.

use crate::error::DomainError;
use crate::types::{BookingChoice, Event, SelectedShape, TicketType};
use rust_decimal::Decimal;

/// The per-ticket unit price of a ticket type.
///
/// Courtesy types carry zeroed price fields, so the unit price naturally
/// evaluates to zero.
#[must_use]
pub fn unit_price(ticket_type: &TicketType) -> Decimal {
    ticket_type.price + ticket_type.fee - ticket_type.discount
}

/// Computes the total price of a purchase request.
///
/// General admission (no selected shapes) totals `general_quantity` unit
/// prices of the purchase's ticket type. A map-backed selection totals per
/// shape: the combo's fixed price for a combo choice, `quantity` unit prices
/// for a minimum-ticket bundle, and `group_size` unit prices otherwise.
///
/// # Errors
///
/// Returns an error if the purchase's ticket type, a selected shape, or a
/// selected shape's ticket type cannot be resolved on the event, or if a
/// booking choice names a condition the ticket type does not enable.
pub fn purchase_total(
    event: &Event,
    ticket_type_id: &str,
    selected_shapes: &[SelectedShape],
    general_quantity: u32,
) -> Result<Decimal, DomainError> {
    if selected_shapes.is_empty() {
        let ticket_type: &TicketType = event.ticket_type(ticket_type_id).ok_or_else(|| {
            DomainError::TicketTypeNotFound {
                event_id: event.id.clone(),
                ticket_type_id: ticket_type_id.to_string(),
            }
        })?;
        return Ok(unit_price(ticket_type) * Decimal::from(general_quantity));
    }

    let mut total: Decimal = Decimal::ZERO;
    for selection in selected_shapes {
        let shape = event
            .shape(&selection.shape_id)
            .ok_or_else(|| DomainError::ShapeNotFound {
                event_id: event.id.clone(),
                shape_id: selection.shape_id.clone(),
            })?;
        let ticket_type: &TicketType = event.ticket_type(&shape.ticket_type_id).ok_or_else(|| {
            DomainError::TicketTypeNotFound {
                event_id: event.id.clone(),
                ticket_type_id: shape.ticket_type_id.clone(),
            }
        })?;

        total += shape_price(ticket_type, selection.booking_choice)?;
    }
    Ok(total)
}

/// The price contribution of one selected shape.
fn shape_price(
    ticket_type: &TicketType,
    choice: Option<BookingChoice>,
) -> Result<Decimal, DomainError> {
    let conditions = ticket_type.booking_conditions.as_ref();
    match choice {
        Some(BookingChoice::Combo) => {
            let combo = conditions.and_then(|c| c.enabled_combo()).ok_or_else(|| {
                DomainError::BookingConditionUnavailable {
                    ticket_type_id: ticket_type.id.clone(),
                    choice: BookingChoice::Combo.as_str().to_string(),
                }
            })?;
            Ok(combo.price)
        }
        Some(BookingChoice::MinTickets) => {
            let bundle = conditions
                .and_then(|c| c.enabled_min_tickets())
                .ok_or_else(|| DomainError::BookingConditionUnavailable {
                    ticket_type_id: ticket_type.id.clone(),
                    choice: BookingChoice::MinTickets.as_str().to_string(),
                })?;
            Ok(unit_price(ticket_type) * Decimal::from(bundle.quantity))
        }
        None => {
            Ok(unit_price(ticket_type) * Decimal::from(ticket_type.effective_group_size()))
        }
    }
}
