// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::issue::TicketBlueprint;
use entrada_audit::AuditEvent;
use entrada_domain::{CompletedPurchase, Event, PendingPurchase, PurchasedTicket};

/// The result of a successful reservation.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The caller persists the new event state, the pending
/// purchase, and the audit event in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationResult {
    /// The event after the selected shapes were reserved.
    pub new_event: Event,
    /// The pending purchase to insert.
    pub purchase: PendingPurchase,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful approval.
///
/// The caller inserts the issued tickets (after assigning identifiers),
/// flips the shapes, archives the purchase, deletes the pending row, and
/// persists the audit event in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalResult {
    /// The event after the referenced shapes were sold.
    pub new_event: Event,
    /// Tickets to issue, without identifiers yet.
    pub tickets: Vec<TicketBlueprint>,
    /// The purchase moved to the append-only completed collection.
    pub completed: CompletedPurchase,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectionResult {
    /// The event after the referenced shapes were released.
    pub new_event: Event,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The outcome of a check-in decision for a ticket that was found.
///
/// `AlreadyUsed` is a distinguished success-shaped outcome, not an error:
/// callers render the ticket even when admission is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckIn {
    /// First scan: the ticket transitions to USED.
    Admitted {
        /// The ticket with its updated status.
        ticket: PurchasedTicket,
        /// The audit event recording the admission.
        audit_event: AuditEvent,
    },
    /// The ticket was already consumed; no state change.
    AlreadyUsed {
        /// The ticket as stored, for display.
        ticket: PurchasedTicket,
    },
}
