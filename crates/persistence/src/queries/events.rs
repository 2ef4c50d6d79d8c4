// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event document queries.
//!
//! An event is stored as a base row plus individually keyed ticket-type and
//! shape rows. Queries compose the rows back into the embedded-document form
//! the domain layer works with.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::convert::{parse_decimal, parse_shape_status, parse_u32};
use crate::diesel_schema::{events, ticket_types, venue_shapes};
use crate::error::PersistenceError;
use entrada_domain::{BookingConditions, DomainError, Event, ShapeGeometry, TicketType, VenueShape};

/// Diesel Queryable struct for event base rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
pub(crate) struct EventRow {
    pub(crate) event_pk: i64,
    pub(crate) event_id: String,
    pub(crate) name: String,
    pub(crate) event_date: String,
    pub(crate) event_time: String,
    pub(crate) location: String,
    pub(crate) description: String,
    pub(crate) main_image: String,
    pub(crate) carousel_images_json: String,
    pub(crate) venue_map_image: Option<String>,
    pub(crate) reservation_details: String,
    pub(crate) sales_enabled: i32,
}

/// Diesel Queryable struct for ticket type rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ticket_types)]
pub(crate) struct TicketTypeRow {
    pub(crate) ticket_type_id: String,
    pub(crate) name: String,
    pub(crate) price: String,
    pub(crate) fee: String,
    pub(crate) discount: String,
    pub(crate) courtesy: i32,
    pub(crate) group_size: Option<i32>,
    pub(crate) booking_conditions_json: Option<String>,
}

/// Diesel Queryable struct for shape rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = venue_shapes)]
pub(crate) struct ShapeRow {
    pub(crate) shape_id: String,
    pub(crate) label: String,
    pub(crate) ticket_type_id: String,
    pub(crate) status: String,
    pub(crate) geometry_json: String,
}

impl TicketTypeRow {
    pub(crate) fn into_domain(self) -> Result<TicketType, PersistenceError> {
        let booking_conditions: Option<BookingConditions> = self
            .booking_conditions_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        Ok(TicketType {
            id: self.ticket_type_id,
            name: self.name,
            price: parse_decimal(&self.price, "price")?,
            fee: parse_decimal(&self.fee, "fee")?,
            discount: parse_decimal(&self.discount, "discount")?,
            courtesy: self.courtesy != 0,
            group_size: self
                .group_size
                .map(|g| parse_u32(g, "group_size"))
                .transpose()?,
            booking_conditions,
        })
    }
}

impl ShapeRow {
    pub(crate) fn into_domain(self) -> Result<VenueShape, PersistenceError> {
        let geometry: ShapeGeometry = serde_json::from_str(&self.geometry_json)?;
        Ok(VenueShape {
            id: self.shape_id,
            label: self.label,
            ticket_type_id: self.ticket_type_id,
            status: parse_shape_status(&self.status)?,
            geometry,
        })
    }
}

/// Composes an event document from its base row and child rows.
pub(crate) fn compose_event(
    row: EventRow,
    ticket_type_rows: Vec<TicketTypeRow>,
    shape_rows: Vec<ShapeRow>,
) -> Result<Event, PersistenceError> {
    let ticket_types: Vec<TicketType> = ticket_type_rows
        .into_iter()
        .map(TicketTypeRow::into_domain)
        .collect::<Result<_, _>>()?;
    let venue_shapes: Vec<VenueShape> = shape_rows
        .into_iter()
        .map(ShapeRow::into_domain)
        .collect::<Result<_, _>>()?;
    let carousel_images: Vec<String> = serde_json::from_str(&row.carousel_images_json)?;

    Ok(Event {
        id: row.event_id,
        name: row.name,
        date: row.event_date,
        time: row.event_time,
        location: row.location,
        description: row.description,
        main_image: row.main_image,
        carousel_images,
        venue_map_image: row.venue_map_image,
        reservation_details: row.reservation_details,
        sales_enabled: row.sales_enabled != 0,
        ticket_types,
        venue_shapes,
    })
}

backend_fn! {
/// Looks up the internal primary key of an event document.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event document id
///
/// # Errors
///
/// Returns `PersistenceError::Domain(DomainError::EventNotFound)` if no such
/// event exists.
pub fn lookup_event_pk(conn: &mut _, event_id: &str) -> Result<i64, PersistenceError> {
    events::table
        .filter(events::event_id.eq(event_id))
        .select(events::event_pk)
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::Domain(DomainError::EventNotFound(event_id.to_string()))
            }
            other => PersistenceError::from(other),
        })
}
}

backend_fn! {
/// Loads a full event document by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event document id
///
/// # Errors
///
/// Returns `PersistenceError::Domain(DomainError::EventNotFound)` if no such
/// event exists, or a serialization error if stored rows are corrupt.
pub fn load_event(conn: &mut _, event_id: &str) -> Result<entrada_domain::Event, PersistenceError> {
    let row: EventRow = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::Domain(DomainError::EventNotFound(event_id.to_string()))
            }
            other => PersistenceError::from(other),
        })?;

    let ticket_type_rows: Vec<TicketTypeRow> = ticket_types::table
        .filter(ticket_types::event_pk.eq(row.event_pk))
        .order(ticket_types::ticket_type_pk.asc())
        .select(TicketTypeRow::as_select())
        .load(conn)?;

    let shape_rows: Vec<ShapeRow> = venue_shapes::table
        .filter(venue_shapes::event_pk.eq(row.event_pk))
        .order(venue_shapes::shape_pk.asc())
        .select(ShapeRow::as_select())
        .load(conn)?;

    compose_event(row, ticket_type_rows, shape_rows)
}
}

backend_fn! {
/// Lists every event document.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or stored rows are
/// corrupt.
pub fn list_events(conn: &mut _) -> Result<Vec<entrada_domain::Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::event_pk.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    let mut result: Vec<entrada_domain::Event> = Vec::with_capacity(rows.len());
    for row in rows {
        let ticket_type_rows: Vec<TicketTypeRow> = ticket_types::table
            .filter(ticket_types::event_pk.eq(row.event_pk))
            .order(ticket_types::ticket_type_pk.asc())
            .select(TicketTypeRow::as_select())
            .load(conn)?;
        let shape_rows: Vec<ShapeRow> = venue_shapes::table
            .filter(venue_shapes::event_pk.eq(row.event_pk))
            .order(venue_shapes::shape_pk.asc())
            .select(ShapeRow::as_select())
            .load(conn)?;
        result.push(compose_event(row, ticket_type_rows, shape_rows)?);
    }
    Ok(result)
}
}
