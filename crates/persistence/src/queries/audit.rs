// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, StoredAuditEvent};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use entrada_audit::AuditEvent;

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    audit_event_pk: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    event_id: Option<String>,
    purchase_id: Option<String>,
    created_at: Option<String>,
}

impl AuditEventRow {
    fn into_stored(self) -> Result<StoredAuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok(StoredAuditEvent {
            audit_event_id: self.audit_event_pk,
            audit_event: AuditEvent::new(
                actor.into(),
                cause.into(),
                action.into(),
                before.into(),
                after.into(),
                self.event_id,
                self.purchase_id,
            ),
            created_at: self.created_at,
        })
    }
}

backend_fn! {
/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `audit_event_id` - The audit event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut _,
    audit_event_id: i64,
) -> Result<StoredAuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::audit_event_pk.eq(audit_event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Audit event {audit_event_id}"))
            }
            other => PersistenceError::from(other),
        })?;
    row.into_stored()
}
}

backend_fn! {
/// Retrieves the ordered audit timeline for an event document.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event document id
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline_for_event(
    conn: &mut _,
    event_id: &str,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .order(audit_events::audit_event_pk.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AuditEventRow::into_stored).collect()
}
}

backend_fn! {
/// Retrieves the ordered audit timeline for a purchase.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `purchase_id` - The purchase document id
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline_for_purchase(
    conn: &mut _,
    purchase_id: &str,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::purchase_id.eq(purchase_id))
        .order(audit_events::audit_event_pk.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AuditEventRow::into_stored).collect()
}
}
