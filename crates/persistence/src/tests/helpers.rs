// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use entrada_audit::{Actor, Cause};
use entrada_domain::{
    BookingConditions, ComboCondition, Event, MinTicketsCondition, ShapeGeometry, ShapeStatus,
    TicketType, VenueShape,
};
use rust_decimal::Decimal;

pub fn admin_actor() -> Actor {
    Actor::new(String::from("1"), String::from("admin"))
}

pub fn buyer_actor() -> Actor {
    Actor::new(String::from("2"), String::from("user"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-test"), String::from("Test request"))
}

pub fn shape(id: &str, label: &str, ticket_type_id: &str) -> VenueShape {
    VenueShape {
        id: id.to_string(),
        label: label.to_string(),
        ticket_type_id: ticket_type_id.to_string(),
        status: ShapeStatus::Available,
        geometry: ShapeGeometry::Rect {
            x: 5.0,
            y: 5.0,
            width: 20.0,
            height: 20.0,
        },
    }
}

pub fn sample_event() -> Event {
    Event {
        id: String::new(),
        name: String::from("Gala Benéfica"),
        date: String::from("2026-11-20"),
        time: String::from("19:30"),
        location: String::from("Salón Diamante"),
        description: String::from("Cena de gala anual"),
        main_image: String::from("https://files.example.com/events/gala-main.jpg"),
        carousel_images: vec![String::from(
            "https://files.example.com/events/gala-carousel-1.jpg",
        )],
        venue_map_image: Some(String::from("https://files.example.com/events/gala-map.png")),
        reservation_details: String::from("Transferencia y comprobante"),
        sales_enabled: true,
        ticket_types: vec![
            TicketType {
                id: String::from("tt-general"),
                name: String::from("General"),
                price: Decimal::new(60, 0),
                fee: Decimal::new(6, 0),
                discount: Decimal::ZERO,
                courtesy: false,
                group_size: None,
                booking_conditions: None,
            },
            TicketType {
                id: String::from("tt-mesa"),
                name: String::from("Mesa"),
                price: Decimal::new(120, 0),
                fee: Decimal::new(12, 0),
                discount: Decimal::new(12, 0),
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
                        price: Decimal::new(420, 0),
                    }),
                }),
            },
        ],
        venue_shapes: vec![
            shape("T-1", "Mesa 1", "tt-mesa"),
            shape("T-2", "Mesa 2", "tt-mesa"),
            shape("A-1", "Asiento 1", "tt-general"),
        ],
    }
}

/// Creates an in-memory store seeded with the sample event.
///
/// Returns the store and the minted event id.
pub fn seeded_store() -> (Persistence, String) {
    let mut store = Persistence::new_in_memory().expect("in-memory store");
    let event_id = store.create_event(&sample_event()).expect("create event");
    (store, event_id)
}
