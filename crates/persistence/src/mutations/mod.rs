// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Leaf mutations use Diesel DSL through the `backend_fn!` macro;
//! the workflow orchestrators (`reserve`/`approve`/`reject`/`validate`)
//! wrap their steps in a single Diesel transaction per operation.
//!
//! ## Module Organization
//!
//! - `accounts` — Account and session mutations
//! - `audit` — Audit event persistence
//! - `events` — Event document create/update/delete
//! - `tickets` — Single-use ticket validation
//! - `workflow` — Purchase reserve/approve/reject transactions

pub mod accounts;
pub mod audit;
pub mod events;
pub mod tickets;
pub mod workflow;

// Re-export backend-specific mutation functions used by lib.rs
pub use accounts::{
    create_account_mysql, create_account_sqlite, create_session_mysql, create_session_sqlite,
    delete_expired_sessions_mysql, delete_expired_sessions_sqlite, delete_session_mysql,
    delete_session_sqlite, delete_sessions_for_account_mysql, delete_sessions_for_account_sqlite,
    disable_account_mysql, disable_account_sqlite, enable_account_mysql, enable_account_sqlite,
    update_last_login_mysql, update_last_login_sqlite, update_password_mysql,
    update_password_sqlite, update_session_activity_mysql, update_session_activity_sqlite,
};
pub use audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
pub use events::{
    create_event_mysql, create_event_sqlite, delete_event_mysql, delete_event_sqlite,
    update_event_mysql, update_event_sqlite,
};
pub use tickets::{TicketValidation, validate_ticket_mysql, validate_ticket_sqlite};
pub use workflow::{
    ApproveOutcome, RejectOutcome, ReserveOutcome, approve_purchase_mysql,
    approve_purchase_sqlite, reject_purchase_mysql, reject_purchase_sqlite,
    reserve_purchase_mysql, reserve_purchase_sqlite,
};
