// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket status tracking for single-use check-in.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a purchased ticket.
///
/// A ticket is issued `Valid` and is consumed exactly once at the venue
/// entrance. The transition is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// The ticket has not been scanned yet.
    Valid,
    /// The ticket was scanned and admitted.
    Used,
}

impl TicketStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Used => "USED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTicketStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "VALID" => Ok(Self::Valid),
            "USED" => Ok(Self::Used),
            _ => Err(DomainError::InvalidTicketStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Used)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// The only permitted transition is `Valid` → `Used`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if matches!((self, new_status), (Self::Valid, Self::Used)) {
            Ok(())
        } else {
            Err(DomainError::InvalidTicketTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
            })
        }
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
