// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers;
use entrada_audit::Cause;
use entrada_domain::{
    BookingConditions, ComboCondition, Event, MinTicketsCondition, ShapeGeometry, ShapeStatus,
    TicketType, VenueShape,
};
use entrada_persistence::Persistence;
use rust_decimal::Decimal;

pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store")
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-test"), String::from("Test request"))
}

/// Creates an admin account directly (admin accounts are provisioned out of
/// band, never via self-registration) and returns its actor.
pub fn provision_admin(persistence: &mut Persistence) -> AuthenticatedActor {
    let account_id = persistence
        .create_account(
            "admin@example.com",
            "Admin",
            "",
            "Str0ng-admin-pass!",
            "admin",
            "2026-08-01T09:00:00Z",
        )
        .expect("create admin");
    AuthenticatedActor::new(account_id.to_string(), Role::Admin)
}

/// Creates a buyer account directly and returns its actor.
pub fn provision_buyer(persistence: &mut Persistence) -> AuthenticatedActor {
    let account_id = persistence
        .create_account(
            "buyer@example.com",
            "Buyer",
            "",
            "Str0ng-buyer-pass!",
            "user",
            "2026-08-01T09:05:00Z",
        )
        .expect("create buyer");
    AuthenticatedActor::new(account_id.to_string(), Role::User)
}

fn shape(id: &str, label: &str, ticket_type_id: &str) -> VenueShape {
    VenueShape {
        id: id.to_string(),
        label: label.to_string(),
        ticket_type_id: ticket_type_id.to_string(),
        status: ShapeStatus::Available,
        geometry: ShapeGeometry::Circle {
            cx: 30.0,
            cy: 30.0,
            r: 10.0,
        },
    }
}

pub fn sample_event() -> Event {
    Event {
        id: String::new(),
        name: String::from("Concierto Acústico"),
        date: String::from("2026-12-05"),
        time: String::from("20:30"),
        location: String::from("Teatro Colonial"),
        description: String::from("Sesión acústica íntima"),
        main_image: String::from("https://files.example.com/events/acustico-main.jpg"),
        carousel_images: Vec::new(),
        venue_map_image: None,
        reservation_details: String::from("Pago manual por transferencia"),
        sales_enabled: true,
        ticket_types: vec![
            TicketType {
                id: String::from("tt-general"),
                name: String::from("General"),
                price: Decimal::new(45, 0),
                fee: Decimal::new(5, 0),
                discount: Decimal::ZERO,
                courtesy: false,
                group_size: None,
                booking_conditions: None,
            },
            TicketType {
                id: String::from("tt-palco"),
                name: String::from("Palco"),
                price: Decimal::new(90, 0),
                fee: Decimal::new(10, 0),
                discount: Decimal::ZERO,
                courtesy: false,
                group_size: Some(2),
                booking_conditions: Some(BookingConditions {
                    min_tickets: Some(MinTicketsCondition {
                        enabled: true,
                        quantity: 3,
                    }),
                    combo: Some(ComboCondition {
                        enabled: true,
                        name: String::from("Palco Completo"),
                        price: Decimal::new(250, 0),
                    }),
                }),
            },
        ],
        venue_shapes: vec![
            shape("P-1", "Palco 1", "tt-palco"),
            shape("A-1", "Asiento 1", "tt-general"),
        ],
    }
}

/// Creates the sample event through the handler and returns its id.
pub fn seed_event(persistence: &mut Persistence, admin: &AuthenticatedActor) -> String {
    handlers::create_event(persistence, admin, &sample_event())
        .expect("create event")
        .event_id
}
