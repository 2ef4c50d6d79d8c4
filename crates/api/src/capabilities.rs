// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role capability descriptors.
//!
//! Capabilities describe what a role may do so UIs can gate controls
//! without re-encoding authorization rules. They are descriptive only; the
//! handlers enforce authorization regardless of what a client renders.

use crate::auth::Role;
use serde::{Deserialize, Serialize};

/// What the authenticated account may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCapabilities {
    /// Create, edit, and delete events.
    pub can_manage_events: bool,
    /// Approve or reject pending purchases.
    pub can_review_purchases: bool,
    /// Validate tickets at the entrance.
    pub can_scan_tickets: bool,
    /// Browse events and request purchases.
    pub can_purchase: bool,
}

impl AccountCapabilities {
    /// Builds the capability set for a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                can_manage_events: true,
                can_review_purchases: true,
                can_scan_tickets: true,
                can_purchase: true,
            },
            Role::User => Self {
                can_manage_events: false,
                can_review_purchases: false,
                can_scan_tickets: false,
                can_purchase: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_full_capabilities() {
        let caps = AccountCapabilities::for_role(Role::Admin);
        assert!(caps.can_manage_events);
        assert!(caps.can_review_purchases);
        assert!(caps.can_scan_tickets);
        assert!(caps.can_purchase);
    }

    #[test]
    fn test_user_can_only_purchase() {
        let caps = AccountCapabilities::for_role(Role::User);
        assert!(!caps.can_manage_events);
        assert!(!caps.can_review_purchases);
        assert!(!caps.can_scan_tickets);
        assert!(caps.can_purchase);
    }
}
