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

mod auth;
mod capabilities;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use capabilities::AccountCapabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_purchase, create_event, delete_event, get_event, list_completed_purchases,
    list_events, list_pending_purchases, my_tickets, reject_purchase, reserve_purchase,
    update_event, validate_ticket,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AccountInfo, ApprovePurchaseResponse, CreateEventResponse, DeleteEventResponse,
    ListCompletedPurchasesResponse, ListEventsResponse, ListPendingPurchasesResponse,
    LoginRequest, LoginResponse, MyTicketsResponse, RegisterRequest, RejectPurchaseResponse,
    ReservePurchaseRequest, ReservePurchaseResponse, UpdateEventResponse, ValidateTicketRequest,
    ValidateTicketResponse, ValidationStatus, WhoAmIResponse,
};
