// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_event;
use crate::{ShapeGeometry, VenueShape, qr_code_url, ticket_code};

#[test]
fn test_shape_json_round_trip_rect() {
    let event = create_test_event();
    let shape = event.shape("A-1").expect("shape exists");

    let json = serde_json::to_string(shape).expect("serialize");
    let parsed: VenueShape = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(*shape, parsed);
}

#[test]
fn test_shape_json_uses_tagged_geometry() {
    let event = create_test_event();
    let shape = event.shape("T-1").expect("shape exists");

    let json = serde_json::to_value(shape).expect("serialize");
    assert_eq!(json["type"], "circle");
    assert_eq!(json["ticketTypeId"], "tt-vip");
    assert_eq!(json["status"], "AVAILABLE");
    assert!(json["cx"].is_number());
}

#[test]
fn test_polygon_geometry_round_trip() {
    let json = r#"{
        "id": "polygon-zona-1",
        "label": "Zona",
        "ticketTypeId": "tt-general",
        "status": "AVAILABLE",
        "type": "polygon",
        "points": [{"x": 0.0, "y": 0.0}, {"x": 10.0, "y": 0.0}, {"x": 5.0, "y": 8.0}]
    }"#;

    let shape: VenueShape = serde_json::from_str(json).expect("deserialize");
    match &shape.geometry {
        ShapeGeometry::Polygon { points } => assert_eq!(points.len(), 3),
        other => panic!("Expected polygon geometry, got {other:?}"),
    }
}

#[test]
fn test_effective_group_size_defaults_to_one() {
    let event = create_test_event();
    let general = event.ticket_type("tt-general").expect("ticket type exists");
    let vip = event.ticket_type("tt-vip").expect("ticket type exists");

    assert_eq!(general.effective_group_size(), 1);
    assert_eq!(vip.effective_group_size(), 4);
}

#[test]
fn test_image_urls_collects_all_uploads() {
    let event = create_test_event();
    let urls = event.image_urls();

    assert_eq!(urls.len(), 3);
    assert!(urls.iter().any(|u| u.contains("salsa-main")));
    assert!(urls.iter().any(|u| u.contains("salsa-carousel-1")));
    assert!(urls.iter().any(|u| u.contains("salsa-map")));
}

#[test]
fn test_image_urls_skips_missing_map() {
    let mut event = create_test_event();
    event.venue_map_image = None;

    assert_eq!(event.image_urls().len(), 2);
}

#[test]
fn test_ticket_code_is_uppercased_prefix_and_suffix() {
    let code = ticket_code("abc123def456", "x9k2");
    assert_eq!(code, "ABC123-X9K2");
}

#[test]
fn test_ticket_code_with_short_id() {
    let code = ticket_code("ab", "q1w2");
    assert_eq!(code, "AB-Q1W2");
}

#[test]
fn test_qr_code_url_embeds_ticket_id() {
    let url = qr_code_url("ticket-42");
    assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/"));
    assert!(url.contains("data=ticket-42"));
}

#[test]
fn test_enabled_conditions_respect_flags() {
    let event = create_test_event();
    let vip = event.ticket_type("tt-vip").expect("ticket type exists");
    let conditions = vip.booking_conditions.as_ref().expect("conditions");

    assert!(conditions.enabled_min_tickets().is_some());
    assert!(conditions.enabled_combo().is_some());

    let mut disabled = conditions.clone();
    if let Some(bundle) = disabled.min_tickets.as_mut() {
        bundle.enabled = false;
    }
    assert!(disabled.enabled_min_tickets().is_none());
    assert!(disabled.enabled_combo().is_some());
}
