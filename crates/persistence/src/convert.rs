// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-to-domain conversion helpers shared by queries and mutations.

use crate::error::PersistenceError;
use entrada_domain::{ShapeStatus, TicketStatus};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a decimal column stored as text.
///
/// # Errors
///
/// Returns a serialization error naming the column if the text is not a
/// valid decimal.
pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid decimal in column '{column}': {e}"))
    })
}

/// Parses a shape status column.
///
/// # Errors
///
/// Returns the domain error for an unrecognized status string.
pub(crate) fn parse_shape_status(value: &str) -> Result<ShapeStatus, PersistenceError> {
    ShapeStatus::from_str(value).map_err(PersistenceError::Domain)
}

/// Parses a ticket status column.
///
/// # Errors
///
/// Returns the domain error for an unrecognized status string.
pub(crate) fn parse_ticket_status(value: &str) -> Result<TicketStatus, PersistenceError> {
    TicketStatus::from_str(value).map_err(PersistenceError::Domain)
}

/// Converts a non-negative integer column to `u32`.
///
/// # Errors
///
/// Returns a serialization error naming the column for negative values.
pub(crate) fn parse_u32(value: i32, column: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "Negative value {value} in column '{column}'"
        ))
    })
}
