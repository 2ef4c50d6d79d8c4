// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of an audit Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&entrada_audit::Actor> for ActorData {
    fn from(actor: &entrada_audit::Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for entrada_audit::Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of an audit Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&entrada_audit::Cause> for CauseData {
    fn from(cause: &entrada_audit::Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for entrada_audit::Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an audit Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&entrada_audit::Action> for ActionData {
    fn from(action: &entrada_audit::Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for entrada_audit::Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&entrada_audit::StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &entrada_audit::StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for entrada_audit::StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

/// Account data as stored, exposed to the API layer.
///
/// The `role` is the authoritative server-side role; callers never supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub phone: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// Session data as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A persisted audit event together with its assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAuditEvent {
    pub audit_event_id: i64,
    pub audit_event: entrada_audit::AuditEvent,
    pub created_at: Option<String>,
}
