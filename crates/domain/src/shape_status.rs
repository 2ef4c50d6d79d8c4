// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shape status tracking and transition logic.
//!
//! This module defines the lifecycle of a bookable venue shape. Status
//! transitions are driven exclusively by the purchase workflow engine;
//! nothing else may rewrite a shape's status.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a bookable venue shape.
///
/// Status is tracked per shape, within its owning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeStatus {
    /// The shape may be selected and reserved by a buyer.
    Available,
    /// The shape is held by a pending purchase awaiting admin review.
    Reserved,
    /// The shape was sold through an approved purchase.
    Sold,
}

impl ShapeStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Reserved => "RESERVED",
            Self::Sold => "SOLD",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShapeStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "RESERVED" => Ok(Self::Reserved),
            "SOLD" => Ok(Self::Sold),
            _ => Err(DomainError::InvalidShapeStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    ///
    /// A sold shape is never restored; there is no refund path in the workflow.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Sold)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Permitted transitions:
    /// - `Available` → `Reserved` (buyer requests verification)
    /// - `Reserved` → `Sold` (admin approves)
    /// - `Reserved` → `Available` (admin rejects)
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidShapeTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid: bool = match self {
            Self::Available => matches!(new_status, Self::Reserved),
            Self::Reserved => matches!(new_status, Self::Sold | Self::Available),
            Self::Sold => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidShapeTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by shape lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ShapeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ShapeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            ShapeStatus::Available,
            ShapeStatus::Reserved,
            ShapeStatus::Sold,
        ];

        for status in statuses {
            let s = status.as_str();
            match ShapeStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = ShapeStatus::parse_str("SELECTED");
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ShapeStatus::Available.is_terminal());
        assert!(!ShapeStatus::Reserved.is_terminal());
        assert!(ShapeStatus::Sold.is_terminal());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(
            ShapeStatus::Available
                .validate_transition(ShapeStatus::Reserved)
                .is_ok()
        );
        assert!(
            ShapeStatus::Reserved
                .validate_transition(ShapeStatus::Sold)
                .is_ok()
        );
        assert!(
            ShapeStatus::Reserved
                .validate_transition(ShapeStatus::Available)
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_transitions() {
        // Direct sale without a reservation is never permitted
        assert!(
            ShapeStatus::Available
                .validate_transition(ShapeStatus::Sold)
                .is_err()
        );
        assert!(
            ShapeStatus::Available
                .validate_transition(ShapeStatus::Available)
                .is_err()
        );
        assert!(
            ShapeStatus::Reserved
                .validate_transition(ShapeStatus::Reserved)
                .is_err()
        );
    }

    #[test]
    fn test_no_transitions_from_sold() {
        assert!(
            ShapeStatus::Sold
                .validate_transition(ShapeStatus::Available)
                .is_err()
        );
        assert!(
            ShapeStatus::Sold
                .validate_transition(ShapeStatus::Reserved)
                .is_err()
        );
        assert!(
            ShapeStatus::Sold
                .validate_transition(ShapeStatus::Sold)
                .is_err()
        );
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        match serde_json::to_string(&ShapeStatus::Available) {
            Ok(json) => assert_eq!(json, "\"AVAILABLE\""),
            Err(e) => panic!("Failed to serialize status: {e}"),
        }
        match serde_json::from_str::<ShapeStatus>("\"RESERVED\"") {
            Ok(parsed) => assert_eq!(parsed, ShapeStatus::Reserved),
            Err(e) => panic!("Failed to deserialize status: {e}"),
        }
    }
}
