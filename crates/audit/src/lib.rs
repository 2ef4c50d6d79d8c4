// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a buyer reserving seats, an admin resolving a purchase, or the scanning
/// surface validating a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor (account id).
    pub id: String,
    /// The type of actor (e.g., "user", "admin").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ReservePurchase`", "`ApprovePurchase`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of the relevant state at a point in time.
///
/// Snapshots are compact string summaries (shape counts by status, ticket
/// status), not full document dumps; the canonical tables remain the source
/// of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a workflow state transition.
///
/// Every successful state change must produce exactly one audit event,
/// persisted in the same transaction as the change itself. Audit events are
/// immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before and after the transition
/// - Which event and/or purchase the transition was scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The event document this transition touched, if any.
    pub event_id: Option<String>,
    /// The purchase this transition touched, if any.
    pub purchase_id: Option<String>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `event_id` - The event document scope, if any
    /// * `purchase_id` - The purchase scope, if any
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        event_id: Option<String>,
        purchase_id: Option<String>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            event_id,
            purchase_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("acct-123"), String::from("admin")),
            Cause::new(String::from("req-456"), String::from("Admin request")),
            Action::new(String::from("ApprovePurchase"), None),
            StateSnapshot::new(String::from("before-state")),
            StateSnapshot::new(String::from("after-state")),
            Some(String::from("event-1")),
            Some(String::from("purchase-1")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("acct-123"), String::from("user"));

        assert_eq!(actor.id, "acct-123");
        assert_eq!(actor.actor_type, "user");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Buyer request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Buyer request");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("ReservePurchase"),
            Some(String::from("Reserved 2 shapes")),
        );

        assert_eq!(action.name, "ReservePurchase");
        assert_eq!(action.details, Some(String::from("Reserved 2 shapes")));
    }

    #[test]
    fn test_audit_event_carries_scopes() {
        let event: AuditEvent = test_event();

        assert_eq!(event.event_id.as_deref(), Some("event-1"));
        assert_eq!(event.purchase_id.as_deref(), Some("purchase-1"));
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(test_event(), test_event());
    }

    #[test]
    fn test_audit_event_is_immutable_once_created() {
        let event: AuditEvent = test_event();
        let cloned: AuditEvent = event.clone();

        assert_eq!(event, cloned);
        assert_eq!(event.actor.id, "acct-123");
        assert_eq!(event.before.data, "before-state");
        assert_eq!(event.after.data, "after-state");
    }
}
