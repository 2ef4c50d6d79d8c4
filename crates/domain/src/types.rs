// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::shape_status::ShapeStatus;
use crate::ticket_status::TicketStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A 2D point of a polygon shape, in venue-map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Geometry of a venue shape, one of rect/circle/polygon.
///
/// Coordinates are in the venue-map image space. Geometry is opaque to the
/// workflow engine; it is stored and forwarded for rendering only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ShapeGeometry {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
}

/// A bookable seat, table, or zone rendered on the venue map.
///
/// Shapes are embedded inside their owning event and have no identity or
/// lifecycle outside it. The `id` is the stable reservation key, unique
/// within the event. Status is mutated only by the purchase workflow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueShape {
    /// Stable identifier, unique within the owning event (e.g. "A-12").
    pub id: String,
    /// The text displayed on the shape (e.g. "Mesa 3").
    pub label: String,
    /// The ticket type this shape is sold under.
    pub ticket_type_id: String,
    /// Current lifecycle status.
    pub status: ShapeStatus,
    /// Rendering geometry.
    #[serde(flatten)]
    pub geometry: ShapeGeometry,
}

/// Minimum-ticket bundle condition: the shape must be purchased as a bundle
/// of `quantity` tickets at per-ticket unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinTicketsCondition {
    pub enabled: bool,
    pub quantity: u32,
}

/// Fixed-price combo condition: the shape is sold as a single flat-price
/// package carrying the combo's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboCondition {
    pub enabled: bool,
    pub name: String,
    pub price: Decimal,
}

/// Booking conditions constraining how a shape under a ticket type may be
/// purchased. At most one condition of each kind exists per ticket type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tickets: Option<MinTicketsCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo: Option<ComboCondition>,
}

impl BookingConditions {
    /// Returns the minimum-ticket condition if it is present and enabled.
    #[must_use]
    pub fn enabled_min_tickets(&self) -> Option<&MinTicketsCondition> {
        self.min_tickets.as_ref().filter(|c| c.enabled)
    }

    /// Returns the combo condition if it is present and enabled.
    #[must_use]
    pub fn enabled_combo(&self) -> Option<&ComboCondition> {
        self.combo.as_ref().filter(|c| c.enabled)
    }
}

/// A pricing/rules category that shapes and general-admission purchases
/// reference (e.g. VIP, General).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub fee: Decimal,
    pub discount: Decimal,
    /// Courtesy types are free; price, fee, and discount are forced to zero.
    pub courtesy: bool,
    /// Number of seats sold as one multi-person unit (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_conditions: Option<BookingConditions>,
}

impl TicketType {
    /// Returns the number of tickets a default (no booking choice) purchase
    /// of one shape under this type expands to.
    #[must_use]
    pub fn effective_group_size(&self) -> u32 {
        self.group_size.unwrap_or(1).max(1)
    }
}

/// An event with its embedded ticket types and venue shapes.
///
/// The event fully owns both embedded lists; no shape or ticket type is
/// referenced from outside its event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub main_image: String,
    pub carousel_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_map_image: Option<String>,
    pub reservation_details: String,
    /// When false, reservation requests are refused. Missing in older
    /// documents, in which case sales are on.
    #[serde(default = "default_sales_enabled")]
    pub sales_enabled: bool,
    pub ticket_types: Vec<TicketType>,
    pub venue_shapes: Vec<VenueShape>,
}

const fn default_sales_enabled() -> bool {
    true
}

impl Event {
    /// Looks up a ticket type by id.
    #[must_use]
    pub fn ticket_type(&self, ticket_type_id: &str) -> Option<&TicketType> {
        self.ticket_types.iter().find(|tt| tt.id == ticket_type_id)
    }

    /// Looks up a shape by id.
    #[must_use]
    pub fn shape(&self, shape_id: &str) -> Option<&VenueShape> {
        self.venue_shapes.iter().find(|s| s.id == shape_id)
    }

    /// Returns every image URL uploaded for this event.
    ///
    /// Used when deleting an event to purge the associated objects from the
    /// file store.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::with_capacity(self.carousel_images.len() + 2);
        if !self.main_image.is_empty() {
            urls.push(self.main_image.clone());
        }
        urls.extend(self.carousel_images.iter().cloned());
        if let Some(map) = &self.venue_map_image {
            if !map.is_empty() {
                urls.push(map.clone());
            }
        }
        urls
    }
}

/// The booking choice a buyer made for a selected shape, when the shape's
/// ticket type defines booking conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingChoice {
    MinTickets,
    Combo,
}

impl BookingChoice {
    /// Returns the string representation used in error reporting.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MinTickets => "minTickets",
            Self::Combo => "combo",
        }
    }
}

/// One shape of a map-backed purchase selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedShape {
    pub shape_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_choice: Option<BookingChoice>,
}

/// A buyer's purchase request awaiting admin approval.
///
/// While pending, the referenced shapes are held in `Reserved` status.
/// Exactly one admin action resolves a pending purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPurchase {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub ticket_type_id: String,
    /// Empty when the purchase is general admission.
    pub selected_shapes: Vec<SelectedShape>,
    pub general_quantity: u32,
    pub total_price: Decimal,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// An approved purchase, kept as an append-only audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPurchase {
    #[serde(flatten)]
    pub purchase: PendingPurchase,
    /// ISO-8601 approval timestamp.
    pub approved_at: String,
}

/// An issued digital ticket.
///
/// Tickets are created only by purchase approval and are independently
/// addressable by id at scan time. Event fields are denormalized so the
/// ticket renders even if the event is later edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedTicket {
    pub id: String,
    pub owner_id: String,
    pub event_name: String,
    pub event_date: String,
    pub event_time: String,
    pub event_location: String,
    pub header_image: String,
    /// Short human-readable code derived from the ticket id.
    pub ticket_code: String,
    /// URL of the externally rendered QR image; the QR payload is the id.
    pub qr_code_url: String,
    /// Display label for the holder (uppercased ticket type or combo name).
    pub holder_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_info: Option<String>,
    pub status: TicketStatus,
}

/// Derives the short human-readable ticket code from a ticket id and a
/// caller-supplied random suffix.
///
/// The code is the first six characters of the id, a dash, and the suffix,
/// all uppercased.
#[must_use]
pub fn ticket_code(ticket_id: &str, suffix: &str) -> String {
    let head: String = ticket_id.chars().take(6).collect();
    format!("{head}-{suffix}").to_uppercase()
}

/// Builds the external QR-image URL for a ticket. The encoded payload is the
/// ticket id itself; check-in decodes it back.
#[must_use]
pub fn qr_code_url(ticket_id: &str) -> String {
    format!(
        "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data={ticket_id}&bgcolor=ffffff"
    )
}
