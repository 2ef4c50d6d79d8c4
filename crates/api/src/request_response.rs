// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API contract.
//!
//! Event documents and purchase records cross the boundary in their domain
//! form (they already carry the wire-stable serde layout); the DTOs here
//! wrap them with messages, identifiers, and auth payloads.

use crate::capabilities::AccountCapabilities;
use entrada_domain::{
    CompletedPurchase, Event, PendingPurchase, PurchasedTicket, SelectedShape,
};
use entrada_persistence::AccountData;
use serde::{Deserialize, Serialize};

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl AccountInfo {
    /// Builds the public view of a stored account. The password hash never
    /// leaves the persistence layer through this type.
    #[must_use]
    pub fn from_account(account: &AccountData) -> Self {
        Self {
            id: account.account_id.to_string(),
            username: account.display_name.clone(),
            email: account.login_name.clone(),
            phone: account.phone.clone(),
            role: account.role.clone(),
        }
    }
}

/// API request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
    pub confirmation: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    pub account: AccountInfo,
}

/// API response describing the calling account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub account: AccountInfo,
    pub capabilities: AccountCapabilities,
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    /// The minted event document id.
    pub event_id: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful event update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventResponse {
    pub event_id: String,
    pub message: String,
}

/// API response for a successful event deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventResponse {
    pub event_id: String,
    /// Uploaded image URLs whose objects should be purged from the file
    /// store. Missing objects are ignored by the caller.
    pub image_urls: Vec<String>,
    pub message: String,
}

/// API response listing events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

/// API request to reserve a purchase.
///
/// The total price is computed server-side; it is intentionally absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservePurchaseRequest {
    pub event_id: String,
    pub ticket_type_id: String,
    /// Map-backed shape selections; empty for general admission.
    #[serde(default)]
    pub selected_shapes: Vec<SelectedShape>,
    /// General-admission ticket count; zero for map-backed selections.
    #[serde(default)]
    pub general_quantity: u32,
}

/// API response for a successful reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservePurchaseResponse {
    pub purchase: PendingPurchase,
    pub message: String,
}

/// API response for a successful approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePurchaseResponse {
    pub completed: CompletedPurchase,
    pub tickets: Vec<PurchasedTicket>,
    pub message: String,
}

/// API response for a successful rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectPurchaseResponse {
    pub purchase_id: String,
    /// The event whose shapes were released.
    pub event_id: String,
    pub message: String,
}

/// API response listing pending purchases (admin view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPendingPurchasesResponse {
    pub purchases: Vec<PendingPurchase>,
}

/// API response listing completed purchases (admin view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCompletedPurchasesResponse {
    pub purchases: Vec<CompletedPurchase>,
}

/// API response listing the caller's tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTicketsResponse {
    pub tickets: Vec<PurchasedTicket>,
}

/// API request to validate a scanned ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTicketRequest {
    /// The string decoded from the QR code (the ticket id).
    pub code: String,
}

/// Discriminator for check-in outcomes.
///
/// `AlreadyUsed` renders as a warning distinguishable from `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Admitted,
    AlreadyUsed,
    Invalid,
}

/// API response for a validation attempt.
///
/// This is success-shaped for all three outcomes; the ticket is present
/// whenever it is known so the scanner can render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTicketResponse {
    pub status: ValidationStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<PurchasedTicket>,
}
