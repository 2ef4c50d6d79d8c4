// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event does not exist.
    EventNotFound(String),
    /// Pending purchase does not exist (or was already resolved).
    PurchaseNotFound(String),
    /// Purchased ticket does not exist.
    TicketNotFound(String),
    /// Ticket type does not exist on the event.
    TicketTypeNotFound {
        /// The event identifier.
        event_id: String,
        /// The ticket type identifier.
        ticket_type_id: String,
    },
    /// Shape does not exist on the event.
    ShapeNotFound {
        /// The event identifier.
        event_id: String,
        /// The shape identifier.
        shape_id: String,
    },
    /// Shape is not available for reservation.
    ShapeNotAvailable {
        /// The shape identifier.
        shape_id: String,
        /// The status the shape was found in.
        status: String,
    },
    /// Shape is not currently reserved.
    ShapeNotReserved {
        /// The shape identifier.
        shape_id: String,
        /// The status the shape was found in.
        status: String,
    },
    /// Sales are disabled for the event.
    SalesDisabled(String),
    /// A purchase must select at least one shape or a positive quantity.
    EmptySelection,
    /// Ticket type is referenced by at least one shape and cannot be removed.
    TicketTypeInUse {
        /// The ticket type identifier.
        ticket_type_id: String,
    },
    /// An event must keep at least one ticket type.
    LastTicketType,
    /// Shape identifier appears more than once within the event.
    DuplicateShapeId(String),
    /// Shape references a ticket type that does not exist on the event.
    DanglingTicketType {
        /// The shape identifier.
        shape_id: String,
        /// The missing ticket type identifier.
        ticket_type_id: String,
    },
    /// The requested booking choice is not enabled for the ticket type.
    BookingConditionUnavailable {
        /// The ticket type identifier.
        ticket_type_id: String,
        /// The requested choice ("minTickets" or "combo").
        choice: String,
    },
    /// Minimum-ticket bundle quantity must be at least one.
    InvalidBundleQuantity(u32),
    /// Shape status transition is not permitted.
    InvalidShapeTransition {
        /// The status being transitioned from.
        from: String,
        /// The status being transitioned to.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Ticket status transition is not permitted.
    InvalidTicketTransition {
        /// The status being transitioned from.
        from: String,
        /// The status being transitioned to.
        to: String,
    },
    /// Shape status string is not recognized.
    InvalidShapeStatus(String),
    /// Ticket status string is not recognized.
    InvalidTicketStatus(String),
    /// Event field is empty or invalid.
    InvalidEventField {
        /// The field that failed validation.
        field: &'static str,
        /// Why the field was rejected.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventNotFound(id) => write!(f, "Event '{id}' not found"),
            Self::PurchaseNotFound(id) => write!(f, "Purchase '{id}' not found"),
            Self::TicketNotFound(id) => write!(f, "Ticket '{id}' not found"),
            Self::TicketTypeNotFound {
                event_id,
                ticket_type_id,
            } => {
                write!(
                    f,
                    "Ticket type '{ticket_type_id}' not found on event '{event_id}'"
                )
            }
            Self::ShapeNotFound { event_id, shape_id } => {
                write!(f, "Shape '{shape_id}' not found on event '{event_id}'")
            }
            Self::ShapeNotAvailable { shape_id, status } => {
                write!(f, "Shape '{shape_id}' is not available (status: {status})")
            }
            Self::ShapeNotReserved { shape_id, status } => {
                write!(f, "Shape '{shape_id}' is not reserved (status: {status})")
            }
            Self::SalesDisabled(id) => write!(f, "Sales are disabled for event '{id}'"),
            Self::EmptySelection => {
                write!(
                    f,
                    "A purchase must select at least one shape or a positive general quantity"
                )
            }
            Self::TicketTypeInUse { ticket_type_id } => {
                write!(
                    f,
                    "Ticket type '{ticket_type_id}' is in use by at least one shape and cannot be removed"
                )
            }
            Self::LastTicketType => {
                write!(f, "An event must keep at least one ticket type")
            }
            Self::DuplicateShapeId(id) => {
                write!(f, "Shape id '{id}' appears more than once on the event")
            }
            Self::DanglingTicketType {
                shape_id,
                ticket_type_id,
            } => {
                write!(
                    f,
                    "Shape '{shape_id}' references unknown ticket type '{ticket_type_id}'"
                )
            }
            Self::BookingConditionUnavailable {
                ticket_type_id,
                choice,
            } => {
                write!(
                    f,
                    "Booking choice '{choice}' is not enabled for ticket type '{ticket_type_id}'"
                )
            }
            Self::InvalidBundleQuantity(quantity) => {
                write!(
                    f,
                    "Minimum-ticket bundle quantity must be at least 1, got {quantity}"
                )
            }
            Self::InvalidShapeTransition { from, to, reason } => {
                write!(f, "Invalid shape transition {from} -> {to}: {reason}")
            }
            Self::InvalidTicketTransition { from, to } => {
                write!(f, "Invalid ticket transition {from} -> {to}")
            }
            Self::InvalidShapeStatus(status) => {
                write!(f, "Invalid shape status: {status}")
            }
            Self::InvalidTicketStatus(status) => {
                write!(f, "Invalid ticket status: {status}")
            }
            Self::InvalidEventField { field, reason } => {
                write!(f, "Invalid event field '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
