// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Full purchase lifecycle through the handler layer.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    ReservePurchaseRequest, ValidateTicketRequest, ValidationStatus,
};
use crate::tests::helpers::{
    provision_admin, provision_buyer, seed_event, store, test_cause,
};
use entrada_domain::{BookingChoice, SelectedShape, ShapeStatus, TicketStatus};
use rust_decimal::Decimal;

fn palco_request(event_id: &str, choice: Option<BookingChoice>) -> ReservePurchaseRequest {
    ReservePurchaseRequest {
        event_id: event_id.to_string(),
        ticket_type_id: String::from("tt-palco"),
        selected_shapes: vec![SelectedShape {
            shape_id: String::from("P-1"),
            booking_choice: choice,
        }],
        general_quantity: 0,
    }
}

#[test]
fn test_reserve_approve_validate_lifecycle() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    // Buyer reserves the palco as a minimum-ticket bundle.
    let reserved = handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, Some(BookingChoice::MinTickets)),
    )
    .expect("reserve");
    // 3 x (90 + 10)
    assert_eq!(reserved.purchase.total_price, Decimal::new(300, 0));

    let event = handlers::get_event(&mut persistence, &event_id).expect("event");
    assert_eq!(
        event.shape("P-1").expect("shape").status,
        ShapeStatus::Reserved
    );

    // Admin approves; three labeled tickets are issued.
    let approved = handlers::approve_purchase(
        &mut persistence,
        &admin,
        test_cause(),
        &reserved.purchase.id,
    )
    .expect("approve");
    assert_eq!(approved.tickets.len(), 3);
    assert!(approved.tickets.iter().all(|t| t.holder_type == "PALCO"));
    assert_eq!(
        approved.tickets[0].seat_info.as_deref(),
        Some("Palco 1 (Ticket 1/3)")
    );

    // The buyer sees the tickets in their wallet.
    let wallet = handlers::my_tickets(&mut persistence, &buyer).expect("wallet");
    assert_eq!(wallet.tickets.len(), 3);
    assert!(wallet.tickets.iter().all(|t| t.status == TicketStatus::Valid));

    // First scan admits; second scan warns with the ticket attached.
    let code = approved.tickets[0].id.clone();
    let first = handlers::validate_ticket(
        &mut persistence,
        &admin,
        test_cause(),
        &ValidateTicketRequest { code: code.clone() },
    )
    .expect("first scan");
    assert_eq!(first.status, ValidationStatus::Admitted);
    assert_eq!(first.message, "Ticket validado con éxito.");
    assert_eq!(
        first.ticket.as_ref().expect("ticket").status,
        TicketStatus::Used
    );

    let second = handlers::validate_ticket(
        &mut persistence,
        &admin,
        test_cause(),
        &ValidateTicketRequest { code },
    )
    .expect("second scan");
    assert_eq!(second.status, ValidationStatus::AlreadyUsed);
    assert_eq!(second.message, "Este ticket ya ha sido utilizado.");
    assert!(second.ticket.is_some());
}

#[test]
fn test_reject_releases_shape_without_tickets() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    let reserved = handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, None),
    )
    .expect("reserve");

    let rejected = handlers::reject_purchase(
        &mut persistence,
        &admin,
        test_cause(),
        &reserved.purchase.id,
    )
    .expect("reject");
    assert_eq!(rejected.purchase_id, reserved.purchase.id);

    let event = handlers::get_event(&mut persistence, &event_id).expect("event");
    assert_eq!(
        event.shape("P-1").expect("shape").status,
        ShapeStatus::Available
    );
    let wallet = handlers::my_tickets(&mut persistence, &buyer).expect("wallet");
    assert!(wallet.tickets.is_empty());
}

#[test]
fn test_losing_buyer_gets_conflict() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, None),
    )
    .expect("first reserve");

    let result = handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, None),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_double_resolution_is_not_found() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    let reserved = handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, None),
    )
    .expect("reserve");

    handlers::approve_purchase(&mut persistence, &admin, test_cause(), &reserved.purchase.id)
        .expect("approve");

    let again = handlers::approve_purchase(
        &mut persistence,
        &admin,
        test_cause(),
        &reserved.purchase.id,
    );
    assert!(matches!(again, Err(ApiError::ResourceNotFound { .. })));

    let reject = handlers::reject_purchase(
        &mut persistence,
        &admin,
        test_cause(),
        &reserved.purchase.id,
    );
    assert!(matches!(reject, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_scan_of_unknown_code_is_invalid() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);

    let result = handlers::validate_ticket(
        &mut persistence,
        &admin,
        test_cause(),
        &ValidateTicketRequest {
            code: String::from("tkt-desconocido"),
        },
    )
    .expect("scan");

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.message, "Ticket inválido o no encontrado.");
    assert!(result.ticket.is_none());
}

#[test]
fn test_delete_event_reports_image_urls() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    let deleted = handlers::delete_event(&mut persistence, &admin, &event_id)
        .expect("delete");

    assert_eq!(deleted.event_id, event_id);
    assert!(
        deleted
            .image_urls
            .iter()
            .any(|u| u.contains("acustico-main"))
    );
}

#[test]
fn test_update_cannot_resurrect_reserved_shape() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    handlers::reserve_purchase(
        &mut persistence,
        &buyer,
        test_cause(),
        &palco_request(&event_id, None),
    )
    .expect("reserve");

    let mut event = handlers::get_event(&mut persistence, &event_id).expect("event");
    for shape in &mut event.venue_shapes {
        shape.status = ShapeStatus::Available;
    }
    handlers::update_event(&mut persistence, &admin, &event).expect("update");

    let stored = handlers::get_event(&mut persistence, &event_id).expect("event");
    assert_eq!(
        stored.shape("P-1").expect("shape").status,
        ShapeStatus::Reserved
    );
}
