// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket issuance expansion.
//!
//! An approved purchase expands into one or more immutable ticket records.
//! Expansion is pure: it produces blueprints carrying display fields, holder
//! labels, and seat descriptions; identifiers, codes, and QR URLs are
//! attached by the persistence layer at insertion time.

use entrada_domain::{Event, PendingPurchase, TicketType, VenueShape};

/// The seat label stamped on general-admission tickets.
pub const GENERAL_ADMISSION_SEAT: &str = "Acceso General";

/// A ticket to issue, before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketBlueprint {
    /// Display label for the holder (uppercased ticket type or combo name).
    pub holder_type: String,
    /// Seat description, if the ticket is seat-backed.
    pub seat_info: Option<String>,
    pub event_name: String,
    pub event_date: String,
    pub event_time: String,
    pub event_location: String,
    pub header_image: String,
}

/// Expands an approved purchase into ticket blueprints.
///
/// Booking-condition rules, per selected shape:
/// - a combo choice (with the condition enabled on the shape's ticket type)
///   yields exactly one ticket labeled with the combo name;
/// - a minimum-ticket choice yields `quantity` tickets with seat labels
///   `"<label> (Ticket i/quantity)"`;
/// - otherwise `group_size` tickets are issued (default 1), the seat label
///   carrying the `(Ticket i/n)` suffix only for multi-seat units.
///
/// A selected shape whose shape or ticket type no longer resolves on the
/// event is skipped. A purchase with no selected shapes is general
/// admission and yields `general_quantity` tickets; the caller must have
/// verified its ticket type still exists.
#[must_use]
pub fn expand_tickets(event: &Event, purchase: &PendingPurchase) -> Vec<TicketBlueprint> {
    let mut tickets: Vec<TicketBlueprint> = Vec::new();

    if purchase.selected_shapes.is_empty() {
        if let Some(ticket_type) = event.ticket_type(&purchase.ticket_type_id) {
            for _ in 0..purchase.general_quantity {
                tickets.push(blueprint(
                    event,
                    ticket_type.name.to_uppercase(),
                    Some(GENERAL_ADMISSION_SEAT.to_string()),
                ));
            }
        }
        return tickets;
    }

    for selection in &purchase.selected_shapes {
        let Some(shape) = event.shape(&selection.shape_id) else {
            continue;
        };
        let Some(ticket_type) = event.ticket_type(&shape.ticket_type_id) else {
            continue;
        };

        expand_shape(event, shape, ticket_type, selection.booking_choice, &mut tickets);
    }

    tickets
}

/// Expands one selected shape into its tickets.
fn expand_shape(
    event: &Event,
    shape: &VenueShape,
    ticket_type: &TicketType,
    choice: Option<entrada_domain::BookingChoice>,
    tickets: &mut Vec<TicketBlueprint>,
) {
    let conditions = ticket_type.booking_conditions.as_ref();

    match choice {
        Some(entrada_domain::BookingChoice::Combo)
            if conditions.is_some_and(|c| c.enabled_combo().is_some()) =>
        {
            // Guarded by the is_some_and above.
            if let Some(combo) = conditions.and_then(|c| c.enabled_combo()) {
                tickets.push(blueprint(
                    event,
                    combo.name.to_uppercase(),
                    Some(shape.label.clone()),
                ));
            }
        }
        Some(entrada_domain::BookingChoice::MinTickets)
            if conditions.is_some_and(|c| c.enabled_min_tickets().is_some()) =>
        {
            if let Some(bundle) = conditions.and_then(|c| c.enabled_min_tickets()) {
                let quantity: u32 = bundle.quantity;
                for i in 1..=quantity {
                    tickets.push(blueprint(
                        event,
                        ticket_type.name.to_uppercase(),
                        Some(format!("{} (Ticket {i}/{quantity})", shape.label)),
                    ));
                }
            }
        }
        // A disabled condition falls through to the default expansion.
        _ => {
            let count: u32 = ticket_type.effective_group_size();
            for i in 1..=count {
                let seat: String = if count > 1 {
                    format!("{} (Ticket {i}/{count})", shape.label)
                } else {
                    shape.label.clone()
                };
                tickets.push(blueprint(
                    event,
                    ticket_type.name.to_uppercase(),
                    Some(seat),
                ));
            }
        }
    }
}

/// Builds one blueprint with the event's common display fields.
fn blueprint(event: &Event, holder_type: String, seat_info: Option<String>) -> TicketBlueprint {
    TicketBlueprint {
        holder_type,
        seat_info,
        event_name: event.name.clone(),
        event_date: event.date.clone(),
        event_time: event.time.clone(),
        event_location: event.location.clone(),
        header_image: event.main_image.clone(),
    }
}
