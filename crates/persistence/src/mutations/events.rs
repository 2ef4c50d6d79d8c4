// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event document mutations.
//!
//! Events are written as a base row plus individually keyed ticket-type and
//! shape rows. Updates replace the embedded collections but never clobber
//! the stored status of a surviving shape: status belongs to the workflow
//! engine, not to the editor payload.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{events, ticket_types, venue_shapes};
use crate::error::PersistenceError;
use crate::ids;
use entrada_domain::{Event, ShapeStatus, TicketType, VenueShape};

backend_fn! {
/// Inserts the base event row and returns its generated primary key.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_event_row(conn: &mut _, event: &Event, event_id: &str) -> Result<i64, PersistenceError> {
    let carousel_json: String = serde_json::to_string(&event.carousel_images)?;
    diesel::insert_into(events::table)
        .values((
            events::event_id.eq(event_id),
            events::name.eq(&event.name),
            events::event_date.eq(&event.date),
            events::event_time.eq(&event.time),
            events::location.eq(&event.location),
            events::description.eq(&event.description),
            events::main_image.eq(&event.main_image),
            events::carousel_images_json.eq(&carousel_json),
            events::venue_map_image.eq(event.venue_map_image.as_deref()),
            events::reservation_details.eq(&event.reservation_details),
            events::sales_enabled.eq(i32::from(event.sales_enabled)),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Rewrites the base event row in place.
///
/// # Errors
///
/// Returns an error if the update fails.
fn update_event_row(conn: &mut _, event_pk: i64, event: &Event) -> Result<(), PersistenceError> {
    let carousel_json: String = serde_json::to_string(&event.carousel_images)?;
    diesel::update(events::table.filter(events::event_pk.eq(event_pk)))
        .set((
            events::name.eq(&event.name),
            events::event_date.eq(&event.date),
            events::event_time.eq(&event.time),
            events::location.eq(&event.location),
            events::description.eq(&event.description),
            events::main_image.eq(&event.main_image),
            events::carousel_images_json.eq(&carousel_json),
            events::venue_map_image.eq(event.venue_map_image.as_deref()),
            events::reservation_details.eq(&event.reservation_details),
            events::sales_enabled.eq(i32::from(event.sales_enabled)),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Inserts one ticket type row.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_ticket_type_row(
    conn: &mut _,
    event_pk: i64,
    ticket_type: &TicketType,
) -> Result<(), PersistenceError> {
    let conditions_json: Option<String> = ticket_type
        .booking_conditions
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let group_size: Option<i32> = ticket_type.group_size.map(|g| i32::try_from(g).unwrap_or(1));

    diesel::insert_into(ticket_types::table)
        .values((
            ticket_types::event_pk.eq(event_pk),
            ticket_types::ticket_type_id.eq(&ticket_type.id),
            ticket_types::name.eq(&ticket_type.name),
            ticket_types::price.eq(ticket_type.price.to_string()),
            ticket_types::fee.eq(ticket_type.fee.to_string()),
            ticket_types::discount.eq(ticket_type.discount.to_string()),
            ticket_types::courtesy.eq(i32::from(ticket_type.courtesy)),
            ticket_types::group_size.eq(group_size),
            ticket_types::booking_conditions_json.eq(conditions_json.as_deref()),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Inserts one shape row with an explicit status.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_shape_row(
    conn: &mut _,
    event_pk: i64,
    shape: &VenueShape,
    status: &str,
) -> Result<(), PersistenceError> {
    let geometry_json: String = serde_json::to_string(&shape.geometry)?;
    diesel::insert_into(venue_shapes::table)
        .values((
            venue_shapes::event_pk.eq(event_pk),
            venue_shapes::shape_id.eq(&shape.id),
            venue_shapes::label.eq(&shape.label),
            venue_shapes::ticket_type_id.eq(&shape.ticket_type_id),
            venue_shapes::status.eq(status),
            venue_shapes::geometry_json.eq(&geometry_json),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Fetches the stored `(shape_id, status)` pairs of an event.
///
/// # Errors
///
/// Returns an error if the query fails.
fn fetch_shape_statuses(
    conn: &mut _,
    event_pk: i64,
) -> Result<Vec<(String, String)>, PersistenceError> {
    Ok(venue_shapes::table
        .filter(venue_shapes::event_pk.eq(event_pk))
        .select((venue_shapes::shape_id, venue_shapes::status))
        .load(conn)?)
}
}

backend_fn! {
/// Deletes the embedded collections of an event.
///
/// # Errors
///
/// Returns an error if a delete fails.
fn delete_event_children(conn: &mut _, event_pk: i64) -> Result<(), PersistenceError> {
    diesel::delete(venue_shapes::table.filter(venue_shapes::event_pk.eq(event_pk)))
        .execute(conn)?;
    diesel::delete(ticket_types::table.filter(ticket_types::event_pk.eq(event_pk)))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes the base event row. Child rows cascade.
///
/// # Errors
///
/// Returns an error if the delete fails.
fn delete_event_row(conn: &mut _, event_pk: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(events::table.filter(events::event_pk.eq(event_pk))).execute(conn)?)
}
}

/// Creates an event document - `SQLite` version.
///
/// A fresh document id is minted; every shape starts AVAILABLE regardless of
/// the status carried by the payload.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The event to create (its `id` field is ignored)
///
/// # Returns
///
/// The minted event document id.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn create_event_sqlite(
    conn: &mut SqliteConnection,
    event: &Event,
) -> Result<String, PersistenceError> {
    conn.transaction::<String, PersistenceError, _>(|conn| {
        let event_id: String = ids::new_doc_id("event");
        let event_pk: i64 = insert_event_row_sqlite(conn, event, &event_id)?;
        for ticket_type in &event.ticket_types {
            insert_ticket_type_row_sqlite(conn, event_pk, ticket_type)?;
        }
        for shape in &event.venue_shapes {
            insert_shape_row_sqlite(conn, event_pk, shape, ShapeStatus::Available.as_str())?;
        }
        info!(event_pk, event_id = %event_id, "Created event");
        Ok(event_id)
    })
}

/// Creates an event document - `MySQL` version.
///
/// A fresh document id is minted; every shape starts AVAILABLE regardless of
/// the status carried by the payload.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The event to create (its `id` field is ignored)
///
/// # Returns
///
/// The minted event document id.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn create_event_mysql(
    conn: &mut MysqlConnection,
    event: &Event,
) -> Result<String, PersistenceError> {
    conn.transaction::<String, PersistenceError, _>(|conn| {
        let event_id: String = ids::new_doc_id("event");
        let event_pk: i64 = insert_event_row_mysql(conn, event, &event_id)?;
        for ticket_type in &event.ticket_types {
            insert_ticket_type_row_mysql(conn, event_pk, ticket_type)?;
        }
        for shape in &event.venue_shapes {
            insert_shape_row_mysql(conn, event_pk, shape, ShapeStatus::Available.as_str())?;
        }
        info!(event_pk, event_id = %event_id, "Created event");
        Ok(event_id)
    })
}

/// Updates an event document - `SQLite` version.
///
/// The embedded collections are replaced by the payload, but a surviving
/// shape keeps its stored status; only new shapes start AVAILABLE.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The event to update, addressed by its `id`
///
/// # Errors
///
/// Returns an error if the event does not exist or persistence fails.
pub fn update_event_sqlite(
    conn: &mut SqliteConnection,
    event: &Event,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let event_pk: i64 = crate::queries::events::lookup_event_pk_sqlite(conn, &event.id)?;
        let stored: HashMap<String, String> = fetch_shape_statuses_sqlite(conn, event_pk)?
            .into_iter()
            .collect();

        update_event_row_sqlite(conn, event_pk, event)?;
        delete_event_children_sqlite(conn, event_pk)?;
        for ticket_type in &event.ticket_types {
            insert_ticket_type_row_sqlite(conn, event_pk, ticket_type)?;
        }
        for shape in &event.venue_shapes {
            let status: &str = stored
                .get(&shape.id)
                .map_or(ShapeStatus::Available.as_str(), String::as_str);
            insert_shape_row_sqlite(conn, event_pk, shape, status)?;
        }
        debug!(event_pk, event_id = %event.id, "Updated event");
        Ok(())
    })
}

/// Updates an event document - `MySQL` version.
///
/// The embedded collections are replaced by the payload, but a surviving
/// shape keeps its stored status; only new shapes start AVAILABLE.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The event to update, addressed by its `id`
///
/// # Errors
///
/// Returns an error if the event does not exist or persistence fails.
pub fn update_event_mysql(
    conn: &mut MysqlConnection,
    event: &Event,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let event_pk: i64 = crate::queries::events::lookup_event_pk_mysql(conn, &event.id)?;
        let stored: HashMap<String, String> = fetch_shape_statuses_mysql(conn, event_pk)?
            .into_iter()
            .collect();

        update_event_row_mysql(conn, event_pk, event)?;
        delete_event_children_mysql(conn, event_pk)?;
        for ticket_type in &event.ticket_types {
            insert_ticket_type_row_mysql(conn, event_pk, ticket_type)?;
        }
        for shape in &event.venue_shapes {
            let status: &str = stored
                .get(&shape.id)
                .map_or(ShapeStatus::Available.as_str(), String::as_str);
            insert_shape_row_mysql(conn, event_pk, shape, status)?;
        }
        debug!(event_pk, event_id = %event.id, "Updated event");
        Ok(())
    })
}

/// Deletes an event document - `SQLite` version.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event_id` - The event document id
///
/// # Returns
///
/// The image URLs that were referenced by the event, for the caller to purge
/// from the file store.
///
/// # Errors
///
/// Returns an error if the event does not exist or persistence fails.
pub fn delete_event_sqlite(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> Result<Vec<String>, PersistenceError> {
    conn.transaction::<Vec<String>, PersistenceError, _>(|conn| {
        let event: Event = crate::queries::events::load_event_sqlite(conn, event_id)?;
        let event_pk: i64 = crate::queries::events::lookup_event_pk_sqlite(conn, event_id)?;
        delete_event_children_sqlite(conn, event_pk)?;
        delete_event_row_sqlite(conn, event_pk)?;
        info!(event_pk, event_id = %event_id, "Deleted event");
        Ok(event.image_urls())
    })
}

/// Deletes an event document - `MySQL` version.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event_id` - The event document id
///
/// # Returns
///
/// The image URLs that were referenced by the event, for the caller to purge
/// from the file store.
///
/// # Errors
///
/// Returns an error if the event does not exist or persistence fails.
pub fn delete_event_mysql(
    conn: &mut MysqlConnection,
    event_id: &str,
) -> Result<Vec<String>, PersistenceError> {
    conn.transaction::<Vec<String>, PersistenceError, _>(|conn| {
        let event: Event = crate::queries::events::load_event_mysql(conn, event_id)?;
        let event_pk: i64 = crate::queries::events::lookup_event_pk_mysql(conn, event_id)?;
        delete_event_children_mysql(conn, event_pk)?;
        delete_event_row_mysql(conn, event_pk)?;
        info!(event_pk, event_id = %event_id, "Deleted event");
        Ok(event.image_urls())
    })
}
