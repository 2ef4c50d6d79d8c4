// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BookingConditions, ComboCondition, Event, MinTicketsCondition, ShapeGeometry, ShapeStatus,
    TicketType, VenueShape,
};
use rust_decimal::Decimal;

pub fn general_ticket_type() -> TicketType {
    TicketType {
        id: String::from("tt-general"),
        name: String::from("General"),
        price: Decimal::new(50, 0),
        fee: Decimal::new(5, 0),
        discount: Decimal::ZERO,
        courtesy: false,
        group_size: None,
        booking_conditions: None,
    }
}

pub fn vip_ticket_type() -> TicketType {
    TicketType {
        id: String::from("tt-vip"),
        name: String::from("Vip"),
        price: Decimal::new(100, 0),
        fee: Decimal::new(10, 0),
        discount: Decimal::new(10, 0),
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
                price: Decimal::new(350, 0),
            }),
        }),
    }
}

pub fn rect_shape(id: &str, label: &str, ticket_type_id: &str, status: ShapeStatus) -> VenueShape {
    VenueShape {
        id: id.to_string(),
        label: label.to_string(),
        ticket_type_id: ticket_type_id.to_string(),
        status,
        geometry: ShapeGeometry::Rect {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        },
    }
}

pub fn circle_shape(id: &str, label: &str, ticket_type_id: &str, status: ShapeStatus) -> VenueShape {
    VenueShape {
        id: id.to_string(),
        label: label.to_string(),
        ticket_type_id: ticket_type_id.to_string(),
        status,
        geometry: ShapeGeometry::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 15.0,
        },
    }
}

pub fn create_test_event() -> Event {
    Event {
        id: String::from("event-1"),
        name: String::from("Noche de Salsa"),
        date: String::from("2026-09-12"),
        time: String::from("21:00"),
        location: String::from("Club Central"),
        description: String::from("Una noche de salsa en vivo"),
        main_image: String::from("https://files.example.com/events/salsa-main.jpg"),
        carousel_images: vec![String::from(
            "https://files.example.com/events/salsa-carousel-1.jpg",
        )],
        venue_map_image: Some(String::from("https://files.example.com/events/salsa-map.png")),
        reservation_details: String::from("Paga por transferencia y espera la verificación"),
        sales_enabled: true,
        ticket_types: vec![general_ticket_type(), vip_ticket_type()],
        venue_shapes: vec![
            circle_shape("T-1", "Mesa 1", "tt-vip", ShapeStatus::Available),
            circle_shape("T-2", "Mesa 2", "tt-vip", ShapeStatus::Available),
            rect_shape("A-1", "Asiento 1", "tt-general", ShapeStatus::Available),
        ],
    }
}
