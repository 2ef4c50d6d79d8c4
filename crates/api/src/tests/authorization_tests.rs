// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role enforcement at the handler boundary.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{ValidateTicketRequest};
use crate::tests::helpers::{
    provision_admin, provision_buyer, sample_event, seed_event, store, test_cause,
};

#[test]
fn test_user_cannot_create_event() {
    let mut persistence = store();
    let buyer = provision_buyer(&mut persistence);

    let result = handlers::create_event(&mut persistence, &buyer, &sample_event());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_user_cannot_update_or_delete_event() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    let mut event = handlers::get_event(&mut persistence, &event_id).expect("event");
    event.name = String::from("Hackeado");

    assert!(matches!(
        handlers::update_event(&mut persistence, &buyer, &event),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        handlers::delete_event(&mut persistence, &buyer, &event_id),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_user_cannot_resolve_purchases() {
    let mut persistence = store();
    let buyer = provision_buyer(&mut persistence);

    assert!(matches!(
        handlers::approve_purchase(&mut persistence, &buyer, test_cause(), "purchase-1"),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        handlers::reject_purchase(&mut persistence, &buyer, test_cause(), "purchase-1"),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_user_cannot_list_purchase_queues() {
    let mut persistence = store();
    let buyer = provision_buyer(&mut persistence);

    assert!(matches!(
        handlers::list_pending_purchases(&mut persistence, &buyer),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        handlers::list_completed_purchases(&mut persistence, &buyer),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_user_cannot_scan_tickets() {
    let mut persistence = store();
    let buyer = provision_buyer(&mut persistence);

    let result = handlers::validate_ticket(
        &mut persistence,
        &buyer,
        test_cause(),
        &ValidateTicketRequest {
            code: String::from("tkt-123"),
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_reads_are_open_to_users() {
    let mut persistence = store();
    let admin = provision_admin(&mut persistence);
    let buyer = provision_buyer(&mut persistence);
    let event_id = seed_event(&mut persistence, &admin);

    assert!(handlers::list_events(&mut persistence).is_ok());
    assert!(handlers::get_event(&mut persistence, &event_id).is_ok());
    assert!(handlers::my_tickets(&mut persistence, &buyer).is_ok());
}
