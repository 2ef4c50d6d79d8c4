// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ReserveCommand;
use entrada_audit::{Actor, Cause};
use entrada_domain::{
    BookingChoice, BookingConditions, ComboCondition, Event, MinTicketsCondition, PendingPurchase,
    PurchasedTicket, SelectedShape, ShapeGeometry, ShapeStatus, TicketStatus, TicketType,
    VenueShape,
};
use rust_decimal::Decimal;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("acct-admin"), String::from("admin"))
}

pub fn create_buyer_actor() -> Actor {
    Actor::new(String::from("acct-buyer"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn shape(id: &str, label: &str, ticket_type_id: &str, status: ShapeStatus) -> VenueShape {
    VenueShape {
        id: id.to_string(),
        label: label.to_string(),
        ticket_type_id: ticket_type_id.to_string(),
        status,
        geometry: ShapeGeometry::Circle {
            cx: 40.0,
            cy: 40.0,
            r: 12.0,
        },
    }
}

pub fn create_test_event() -> Event {
    Event {
        id: String::from("event-1"),
        name: String::from("Festival del Puerto"),
        date: String::from("2026-10-03"),
        time: String::from("20:00"),
        location: String::from("Malecón Norte"),
        description: String::from("Festival con artistas en vivo"),
        main_image: String::from("https://files.example.com/events/puerto-main.jpg"),
        carousel_images: Vec::new(),
        venue_map_image: Some(String::from("https://files.example.com/events/puerto-map.png")),
        reservation_details: String::from("Transferencia bancaria"),
        sales_enabled: true,
        ticket_types: vec![
            TicketType {
                id: String::from("tt-general"),
                name: String::from("General"),
                price: Decimal::new(40, 0),
                fee: Decimal::new(4, 0),
                discount: Decimal::ZERO,
                courtesy: false,
                group_size: None,
                booking_conditions: None,
            },
            TicketType {
                id: String::from("tt-mesa"),
                name: String::from("Mesa"),
                price: Decimal::new(80, 0),
                fee: Decimal::new(8, 0),
                discount: Decimal::ZERO,
                courtesy: false,
                group_size: Some(4),
                booking_conditions: Some(BookingConditions {
                    min_tickets: Some(MinTicketsCondition {
                        enabled: true,
                        quantity: 3,
                    }),
                    combo: Some(ComboCondition {
                        enabled: true,
                        name: String::from("Mesa Completa"),
                        price: Decimal::new(300, 0),
                    }),
                }),
            },
        ],
        venue_shapes: vec![
            shape("T-1", "Mesa 1", "tt-mesa", ShapeStatus::Available),
            shape("T-2", "Mesa 2", "tt-mesa", ShapeStatus::Available),
            shape("A-1", "Asiento 1", "tt-general", ShapeStatus::Available),
        ],
    }
}

pub fn selection(shape_id: &str, choice: Option<BookingChoice>) -> SelectedShape {
    SelectedShape {
        shape_id: shape_id.to_string(),
        booking_choice: choice,
    }
}

pub fn reserve_command(
    ticket_type_id: &str,
    selected_shapes: Vec<SelectedShape>,
    general_quantity: u32,
) -> ReserveCommand {
    ReserveCommand {
        purchase_id: String::from("purchase-1"),
        user_id: String::from("acct-buyer"),
        event_id: String::from("event-1"),
        ticket_type_id: ticket_type_id.to_string(),
        selected_shapes,
        general_quantity,
        created_at: String::from("2026-09-01T12:00:00Z"),
    }
}

pub fn pending_purchase(
    selected_shapes: Vec<SelectedShape>,
    general_quantity: u32,
    ticket_type_id: &str,
) -> PendingPurchase {
    PendingPurchase {
        id: String::from("purchase-1"),
        user_id: String::from("acct-buyer"),
        event_id: String::from("event-1"),
        ticket_type_id: ticket_type_id.to_string(),
        selected_shapes,
        general_quantity,
        total_price: Decimal::new(100, 0),
        created_at: String::from("2026-09-01T12:00:00Z"),
    }
}

pub fn valid_ticket() -> PurchasedTicket {
    PurchasedTicket {
        id: String::from("ticket-abc123"),
        owner_id: String::from("acct-buyer"),
        event_name: String::from("Festival del Puerto"),
        event_date: String::from("2026-10-03"),
        event_time: String::from("20:00"),
        event_location: String::from("Malecón Norte"),
        header_image: String::from("https://files.example.com/events/puerto-main.jpg"),
        ticket_code: String::from("TICKET-AB12"),
        qr_code_url: entrada_domain::qr_code_url("ticket-abc123"),
        holder_type: String::from("GENERAL"),
        seat_info: Some(String::from("Acceso General")),
        status: TicketStatus::Valid,
    }
}
