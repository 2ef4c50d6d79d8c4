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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use entrada_api::{
    ApiError, AuthenticationService, LoginRequest, RegisterRequest, ReservePurchaseRequest,
    ValidateTicketRequest, ValidationStatus, WhoAmIResponse,
};
use entrada_api::{AccountCapabilities, AccountInfo};
use entrada_audit::Cause;
use entrada_domain::Event;
use entrada_persistence::Persistence;

mod live;
mod session;

use live::{LiveEvent, LiveEventBroadcaster};
use session::SessionAccount;

/// Entrada Server - HTTP server for the Entrada ticketing system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory holding uploaded event images. Deleting an event removes
    /// its images from this directory; unset disables the cleanup.
    #[arg(short, long)]
    media_root: Option<PathBuf>,
}

/// Counter for per-request cause identifiers.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer wrapped in a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Broadcaster for the live read-model stream.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// Directory holding uploaded event images, if cleanup is enabled.
    media_root: Option<PathBuf>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Builds the audit cause for one incoming request.
fn request_cause(description: &str) -> Cause {
    let id: u64 = REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    Cause::new(format!("req_{id}"), description.to_string())
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Auth handlers
// ============================================================================

async fn handle_register(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<entrada_api::LoginResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = AuthenticationService::register(&mut persistence, &request)?;
    Ok(Json(response))
}

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<entrada_api::LoginResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = AuthenticationService::login(&mut persistence, &request.email, &request.password)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: String = session::bearer_token(&headers).map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing or malformed Authorization header"),
    })?;
    let mut persistence = state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &token)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_whoami(
    SessionAccount(actor, account): SessionAccount,
) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        account: AccountInfo::from_account(&account),
        capabilities: AccountCapabilities::for_role(actor.role),
    })
}

// ============================================================================
// Event handlers
// ============================================================================

async fn handle_list_events(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<entrada_api::ListEventsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(entrada_api::list_events(&mut persistence)?))
}

async fn handle_get_event(
    AxumState(state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(entrada_api::get_event(&mut persistence, &event_id)?))
}

async fn handle_create_event(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Json(event): Json<Event>,
) -> Result<Json<entrada_api::CreateEventResponse>, HttpError> {
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::create_event(&mut persistence, &actor, &event)?
    };

    state.broadcaster.broadcast(&LiveEvent::EventCreated {
        event_id: response.event_id.clone(),
    });

    Ok(Json(response))
}

async fn handle_update_event(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Path(event_id): Path<String>,
    Json(mut event): Json<Event>,
) -> Result<Json<entrada_api::UpdateEventResponse>, HttpError> {
    // The path is authoritative for which document is being edited.
    event.id = event_id;

    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::update_event(&mut persistence, &actor, &event)?
    };

    state.broadcaster.broadcast(&LiveEvent::EventUpdated {
        event_id: response.event_id.clone(),
    });

    Ok(Json(response))
}

async fn handle_delete_event(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Path(event_id): Path<String>,
) -> Result<Json<entrada_api::DeleteEventResponse>, HttpError> {
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::delete_event(&mut persistence, &actor, &event_id)?
    };

    purge_images(state.media_root.as_ref(), &response.image_urls).await;

    state.broadcaster.broadcast(&LiveEvent::EventDeleted {
        event_id: response.event_id.clone(),
    });

    Ok(Json(response))
}

/// Removes uploaded image objects named by the given URLs from the media
/// directory. Objects that are already gone are ignored.
async fn purge_images(media_root: Option<&PathBuf>, urls: &[String]) {
    let Some(root) = media_root else {
        return;
    };

    for url in urls {
        let Some(name) = url.rsplit('/').next() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let path: PathBuf = root.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed uploaded image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => error!(path = %path.display(), error = %e, "Failed to remove uploaded image"),
        }
    }
}

// ============================================================================
// Purchase handlers
// ============================================================================

async fn handle_reserve_purchase(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Json(request): Json<ReservePurchaseRequest>,
) -> Result<Json<entrada_api::ReservePurchaseResponse>, HttpError> {
    let cause: Cause = request_cause("Buyer purchase request");
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::reserve_purchase(&mut persistence, &actor, cause, &request)?
    };

    state.broadcaster.broadcast(&LiveEvent::PurchaseRequested {
        event_id: response.purchase.event_id.clone(),
        purchase_id: response.purchase.id.clone(),
    });

    Ok(Json(response))
}

async fn handle_approve_purchase(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Path(purchase_id): Path<String>,
) -> Result<Json<entrada_api::ApprovePurchaseResponse>, HttpError> {
    let cause: Cause = request_cause("Admin purchase approval");
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::approve_purchase(&mut persistence, &actor, cause, &purchase_id)?
    };

    state.broadcaster.broadcast(&LiveEvent::PurchaseApproved {
        event_id: response.completed.purchase.event_id.clone(),
        purchase_id: response.completed.purchase.id.clone(),
        tickets: response.tickets.len(),
    });

    Ok(Json(response))
}

async fn handle_reject_purchase(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Path(purchase_id): Path<String>,
) -> Result<Json<entrada_api::RejectPurchaseResponse>, HttpError> {
    let cause: Cause = request_cause("Admin purchase rejection");
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::reject_purchase(&mut persistence, &actor, cause, &purchase_id)?
    };

    state.broadcaster.broadcast(&LiveEvent::PurchaseRejected {
        event_id: response.event_id.clone(),
        purchase_id: response.purchase_id.clone(),
    });

    Ok(Json(response))
}

async fn handle_list_pending_purchases(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
) -> Result<Json<entrada_api::ListPendingPurchasesResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(entrada_api::list_pending_purchases(
        &mut persistence,
        &actor,
    )?))
}

async fn handle_list_completed_purchases(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
) -> Result<Json<entrada_api::ListCompletedPurchasesResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(entrada_api::list_completed_purchases(
        &mut persistence,
        &actor,
    )?))
}

// ============================================================================
// Ticket handlers
// ============================================================================

async fn handle_my_tickets(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
) -> Result<Json<entrada_api::MyTicketsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(entrada_api::my_tickets(&mut persistence, &actor)?))
}

async fn handle_validate_ticket(
    AxumState(state): AxumState<AppState>,
    SessionAccount(actor, _account): SessionAccount,
    Json(request): Json<ValidateTicketRequest>,
) -> Result<Json<entrada_api::ValidateTicketResponse>, HttpError> {
    let cause: Cause = request_cause("Entrance ticket scan");
    let response = {
        let mut persistence = state.persistence.lock().await;
        entrada_api::validate_ticket(&mut persistence, &actor, cause, &request)?
    };

    if response.status == ValidationStatus::Admitted
        && let Some(ticket) = &response.ticket
    {
        state.broadcaster.broadcast(&LiveEvent::TicketValidated {
            ticket_id: ticket.id.clone(),
        });
    }

    Ok(Json(response))
}

async fn handle_health() -> &'static str {
    "OK"
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/register", post(handle_register))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/whoami", get(handle_whoami))
        .route("/api/events", get(handle_list_events))
        .route("/api/events", post(handle_create_event))
        .route("/api/events/{event_id}", get(handle_get_event))
        .route("/api/events/{event_id}", axum::routing::put(handle_update_event))
        .route(
            "/api/events/{event_id}",
            axum::routing::delete(handle_delete_event),
        )
        .route("/api/purchases", post(handle_reserve_purchase))
        .route("/api/purchases/pending", get(handle_list_pending_purchases))
        .route(
            "/api/purchases/completed",
            get(handle_list_completed_purchases),
        )
        .route(
            "/api/purchases/{purchase_id}/approve",
            post(handle_approve_purchase),
        )
        .route(
            "/api/purchases/{purchase_id}/reject",
            post(handle_reject_purchase),
        )
        .route("/api/tickets", get(handle_my_tickets))
        .route("/api/tickets/validate", post(handle_validate_ticket))
        .route("/api/live", get(live::live_events_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Entrada Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        media_root: args.media_root,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
