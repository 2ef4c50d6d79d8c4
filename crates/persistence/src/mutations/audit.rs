// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.
//!
//! Every workflow transaction persists exactly one audit event before it
//! commits, so the audit trail can never disagree with the canonical state.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use entrada_audit::AuditEvent;

backend_fn! {
/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn persist_audit_event(conn: &mut _, event: &AuditEvent) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let before_json: String = serde_json::to_string(&StateSnapshotData::from(&event.before))?;
    let after_json: String = serde_json::to_string(&StateSnapshotData::from(&event.after))?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
            audit_events::event_id.eq(event.event_id.as_deref()),
            audit_events::purchase_id.eq(event.purchase_id.as_deref()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}
