// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_cause, create_test_event, pending_purchase, selection,
};
use crate::{CoreError, approve, expand_tickets};
use entrada_domain::{BookingChoice, DomainError, ShapeStatus};

#[test]
fn test_approve_flips_reserved_shapes_to_sold() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(vec![selection("T-1", None)], 0, "tt-mesa");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(
        result.new_event.shape("T-1").expect("shape").status,
        ShapeStatus::Sold
    );
    assert_eq!(result.completed.approved_at, "2026-09-02T09:00:00Z");
    assert_eq!(result.completed.purchase.id, "purchase-1");
}

#[test]
fn test_approve_available_shape_fails() {
    // A referenced shape that is AVAILABLE means the reservation was lost;
    // the transition AVAILABLE -> SOLD is never legal.
    let event = create_test_event();
    let purchase = pending_purchase(vec![selection("T-1", None)], 0, "tt-mesa");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidShapeTransition { .. }
        ))
    ));
}

#[test]
fn test_min_tickets_quantity_three_yields_three_labeled_tickets() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(
        vec![selection("T-1", Some(BookingChoice::MinTickets))],
        0,
        "tt-mesa",
    );

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.tickets.len(), 3);
    for (i, ticket) in result.tickets.iter().enumerate() {
        assert_eq!(ticket.holder_type, "MESA");
        assert_eq!(
            ticket.seat_info.as_deref(),
            Some(format!("Mesa 1 (Ticket {}/3)", i + 1).as_str())
        );
    }
}

#[test]
fn test_combo_yields_one_ticket_regardless_of_group_size() {
    // tt-mesa has group_size 4; the combo choice still issues exactly one.
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(
        vec![selection("T-1", Some(BookingChoice::Combo))],
        0,
        "tt-mesa",
    );

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.tickets.len(), 1);
    assert_eq!(result.tickets[0].holder_type, "MESA COMPLETA");
    assert_eq!(result.tickets[0].seat_info.as_deref(), Some("Mesa 1"));
}

#[test]
fn test_default_expansion_uses_group_size_labels() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-2" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(vec![selection("T-2", None)], 0, "tt-mesa");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.tickets.len(), 4);
    assert_eq!(
        result.tickets[0].seat_info.as_deref(),
        Some("Mesa 2 (Ticket 1/4)")
    );
    assert_eq!(
        result.tickets[3].seat_info.as_deref(),
        Some("Mesa 2 (Ticket 4/4)")
    );
}

#[test]
fn test_single_seat_default_expansion_keeps_plain_label() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "A-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(vec![selection("A-1", None)], 0, "tt-general");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.tickets.len(), 1);
    assert_eq!(result.tickets[0].seat_info.as_deref(), Some("Asiento 1"));
}

#[test]
fn test_general_admission_tickets_use_general_seat_label() {
    let event = create_test_event();
    let purchase = pending_purchase(Vec::new(), 2, "tt-general");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.tickets.len(), 2);
    for ticket in &result.tickets {
        assert_eq!(ticket.holder_type, "GENERAL");
        assert_eq!(ticket.seat_info.as_deref(), Some("Acceso General"));
    }
}

#[test]
fn test_general_admission_with_missing_ticket_type_fails() {
    let mut event = create_test_event();
    event.venue_shapes.retain(|s| s.ticket_type_id != "tt-general");
    event.ticket_types.retain(|tt| tt.id != "tt-general");
    let purchase = pending_purchase(Vec::new(), 2, "tt-general");

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TicketTypeNotFound { .. }
        ))
    ));
}

#[test]
fn test_missing_shape_is_skipped_during_expansion() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(
        vec![selection("T-1", None), selection("T-99", None)],
        0,
        "tt-mesa",
    );

    let tickets = expand_tickets(&event, &purchase);

    // Only T-1 expands; the vanished shape contributes nothing.
    assert_eq!(tickets.len(), 4);
}

#[test]
fn test_disabled_condition_choice_falls_back_to_default_expansion() {
    let mut event = create_test_event();
    for ticket_type in &mut event.ticket_types {
        if let Some(conditions) = ticket_type.booking_conditions.as_mut() {
            if let Some(combo) = conditions.combo.as_mut() {
                combo.enabled = false;
            }
        }
    }
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(
        vec![selection("T-1", Some(BookingChoice::Combo))],
        0,
        "tt-mesa",
    );

    let tickets = expand_tickets(&event, &purchase);

    // Falls back to the group-size expansion of tt-mesa.
    assert_eq!(tickets.len(), 4);
    assert_eq!(tickets[0].holder_type, "MESA");
}

#[test]
fn test_blueprints_carry_event_display_fields() {
    let event = create_test_event();
    let purchase = pending_purchase(Vec::new(), 1, "tt-general");

    let tickets = expand_tickets(&event, &purchase);

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].event_name, "Festival del Puerto");
    assert_eq!(tickets[0].event_date, "2026-10-03");
    assert_eq!(tickets[0].event_time, "20:00");
    assert_eq!(tickets[0].event_location, "Malecón Norte");
    assert!(tickets[0].header_image.contains("puerto-main"));
}

#[test]
fn test_approve_emits_audit_event_with_ticket_count() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(
        vec![selection("T-1", Some(BookingChoice::MinTickets))],
        0,
        "tt-mesa",
    );

    let result = approve(
        &event,
        &purchase,
        String::from("2026-09-02T09:00:00Z"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("approve");

    assert_eq!(result.audit_event.action.name, "ApprovePurchase");
    assert!(
        result
            .audit_event
            .action
            .details
            .as_ref()
            .expect("details")
            .contains("3 ticket(s)")
    );
    assert!(result.audit_event.before.data.contains("reserved=1"));
    assert!(result.audit_event.after.data.contains("sold=1"));
}
