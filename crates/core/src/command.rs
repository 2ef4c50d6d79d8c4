// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use entrada_domain::SelectedShape;

/// A reservation command represents buyer intent as data only.
///
/// The identifier and timestamp are minted by the caller so the workflow
/// engine stays pure: no clock, no randomness, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveCommand {
    /// The identifier assigned to the pending purchase being created.
    pub purchase_id: String,
    /// The authenticated buyer's account id.
    pub user_id: String,
    /// The event the purchase targets.
    pub event_id: String,
    /// The ticket type the purchase is made under.
    pub ticket_type_id: String,
    /// Map-backed shape selections; empty for general admission.
    pub selected_shapes: Vec<SelectedShape>,
    /// General-admission ticket count; zero for map-backed selections.
    pub general_quantity: u32,
    /// ISO-8601 creation timestamp supplied by the caller.
    pub created_at: String,
}
