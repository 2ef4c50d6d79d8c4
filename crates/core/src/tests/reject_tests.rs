// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_cause, create_test_event, pending_purchase, selection,
};
use crate::{CoreError, reject};
use entrada_domain::{DomainError, ShapeStatus};

#[test]
fn test_reject_releases_reserved_shapes() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(vec![selection("T-1", None)], 0, "tt-mesa");

    let result = reject(&event, &purchase, create_test_actor(), create_test_cause())
        .expect("reject");

    assert_eq!(
        result.new_event.shape("T-1").expect("shape").status,
        ShapeStatus::Available
    );
}

#[test]
fn test_reject_sold_shape_fails() {
    // SOLD is terminal; a purchase referencing a sold shape cannot be
    // rejected into releasing it.
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Sold;
        }
    }
    let purchase = pending_purchase(vec![selection("T-1", None)], 0, "tt-mesa");

    let result = reject(&event, &purchase, create_test_actor(), create_test_cause());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidShapeTransition { .. }
        ))
    ));
}

#[test]
fn test_reject_general_admission_touches_no_shapes() {
    let event = create_test_event();
    let purchase = pending_purchase(Vec::new(), 2, "tt-general");

    let result = reject(&event, &purchase, create_test_actor(), create_test_cause())
        .expect("reject");

    assert_eq!(result.new_event, event);
}

#[test]
fn test_reject_missing_shape_is_skipped() {
    let event = create_test_event();
    let purchase = pending_purchase(vec![selection("T-99", None)], 0, "tt-mesa");

    let result = reject(&event, &purchase, create_test_actor(), create_test_cause())
        .expect("reject");

    assert_eq!(result.new_event, event);
}

#[test]
fn test_reject_emits_audit_event() {
    let mut event = create_test_event();
    for shape in &mut event.venue_shapes {
        if shape.id == "T-1" {
            shape.status = ShapeStatus::Reserved;
        }
    }
    let purchase = pending_purchase(vec![selection("T-1", None)], 0, "tt-mesa");

    let result = reject(&event, &purchase, create_test_actor(), create_test_cause())
        .expect("reject");

    assert_eq!(result.audit_event.action.name, "RejectPurchase");
    assert_eq!(result.audit_event.purchase_id.as_deref(), Some("purchase-1"));
    assert!(result.audit_event.before.data.contains("reserved=1"));
    assert!(result.audit_event.after.data.contains("available=3"));
}
