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
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use fuelcard::{Command, Ledger};
use fuelcard_api::{
    ApiError, AuthenticatedActor, CardResponse, CommandOutcome, CommandResponse,
    CreateUnitRequest, CreateUnitResponse, ListCardsResponse, LoginRequest, LoginResponse,
    NewCardRequest, RateLimiter, ReturnCardRequest, TranscriptRequest, UnitCreditRequest,
    UnitIssueRequest, UnitUpdateRequest, UpdateCardRequest, WhoAmIResponse,
    build_new_card_command, build_return_command, build_unit_credit_command,
    build_unit_issue_command, build_unit_update_command, build_update_command, create_unit,
    execute_command, execute_transcript, get_card, list_cards, login, logout, whoami,
};
use fuelcard_domain::{Card, UnitCode};
use fuelcard_persistence::{Persistence, PersistenceError};

mod session;

use session::SessionUnit;

/// Fuel Card Server - HTTP server for the fuel card ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed the HQ admin credential with this secret if it does not
    /// exist yet
    #[arg(long)]
    admin_secret: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for cards, units, and sessions.
    persistence: Arc<Mutex<Persistence>>,
    /// The in-memory ledger, committed only after a successful write.
    ledger: Arc<Mutex<Ledger>>,
    /// The per-actor request limiter.
    limiter: Arc<Mutex<RateLimiter>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
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
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::UnparsableTranscript { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Persists the affected card, then commits the new ledger.
///
/// The order is deliberate: if the write fails, the old ledger stays
/// in place and the transition is discarded.
fn commit_outcome(
    persistence: &Persistence,
    ledger: &mut Ledger,
    outcome: CommandOutcome,
) -> Result<CommandResponse, HttpError> {
    let mut card: Card = outcome.transition.card;
    let mut new_ledger: Ledger = outcome.transition.new_ledger;

    if card.id.is_none() {
        let card_id: i64 = persistence.add_card(&card)?;
        card.id = Some(card_id);
        new_ledger.set_card_id(card.card_number, card_id);
    } else {
        persistence.update_card(&card)?;
    }

    *ledger = new_ledger;
    Ok(CommandResponse {
        card,
        message: outcome.message,
    })
}

/// Runs a structured command through the full pipeline and commits it.
async fn run_command(
    state: &AppState,
    actor: &AuthenticatedActor,
    command: Command,
) -> Result<Json<CommandResponse>, HttpError> {
    let persistence = state.persistence.lock().await;
    let mut ledger = state.ledger.lock().await;
    let mut limiter = state.limiter.lock().await;

    let outcome: CommandOutcome =
        execute_command(&persistence, &ledger, &mut limiter, actor, command)?;
    let response: CommandResponse = commit_outcome(&persistence, &mut ledger, outcome)?;
    Ok(Json(response))
}

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let persistence = state.persistence.lock().await;
    let response: LoginResponse = login(&persistence, &request)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    SessionUnit(_actor, _unit): SessionUnit,
    headers: axum::http::HeaderMap,
) -> Result<StatusCode, HttpError> {
    // The extractor already validated the header shape.
    let token: &str = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing Authorization header"),
        })?;

    let persistence = state.persistence.lock().await;
    logout(&persistence, token)?;
    Ok(StatusCode::NO_CONTENT)
}

// Axum requires an async handler even though this one never awaits.
#[allow(clippy::unused_async)]
async fn handle_whoami(
    SessionUnit(actor, unit): SessionUnit,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    Ok(Json(whoami(&actor, &unit)))
}

async fn handle_list_cards(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
) -> Result<Json<ListCardsResponse>, HttpError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(list_cards(&ledger, &actor)))
}

async fn handle_get_card(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Path(card_number): Path<u64>,
) -> Result<Json<CardResponse>, HttpError> {
    let ledger = state.ledger.lock().await;
    let response: CardResponse = get_card(&ledger, &actor, card_number)?;
    Ok(Json(response))
}

async fn handle_issue_card(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<NewCardRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_new_card_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_update_card(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<UpdateCardRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_update_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_return_card(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<ReturnCardRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_return_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_unit_issue(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<UnitIssueRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_unit_issue_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_unit_update(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<UnitUpdateRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_unit_update_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_unit_credit(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<UnitCreditRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = build_unit_credit_command(&request)?;
    run_command(&state, &actor, command).await
}

async fn handle_execute(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let persistence = state.persistence.lock().await;
    let mut ledger = state.ledger.lock().await;
    let mut limiter = state.limiter.lock().await;

    let outcome: CommandOutcome =
        execute_transcript(&persistence, &ledger, &mut limiter, &actor, &request)?;
    let response: CommandResponse = commit_outcome(&persistence, &mut ledger, outcome)?;
    Ok(Json(response))
}

async fn handle_create_unit(
    AxumState(state): AxumState<AppState>,
    SessionUnit(actor, _unit): SessionUnit,
    Json(request): Json<CreateUnitRequest>,
) -> Result<Json<CreateUnitResponse>, HttpError> {
    let persistence = state.persistence.lock().await;
    let response: CreateUnitResponse = create_unit(&persistence, &actor, &request)?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/units", post(handle_create_unit))
        .route("/cards", get(handle_list_cards).post(handle_issue_card))
        .route("/cards/{card_number}", get(handle_get_card))
        .route("/cards/update", post(handle_update_card))
        .route("/cards/return", post(handle_return_card))
        .route("/unit/issue", post(handle_unit_issue))
        .route("/unit/update", post(handle_unit_update))
        .route("/unit/credit", post(handle_unit_credit))
        .route("/execute", post(handle_execute))
        .with_state(app_state)
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

    info!("Initializing fuel card server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::open(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Seed the HQ admin credential on first run if requested
    if let Some(secret) = &args.admin_secret {
        if persistence.get_unit_by_code(UnitCode::HQ_CODE)?.is_none() {
            persistence.create_unit(UnitCode::HQ_CODE, UnitCode::HQ_CODE, secret, true)?;
            info!("Seeded HQ admin credential");
        }
    }

    // Load the full ledger into memory once at startup
    let cards: Vec<Card> = persistence.fetch_all_cards()?;
    info!(count = cards.len(), "Loaded ledger");
    let ledger: Ledger = Ledger::from_cards(cards);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        ledger: Arc::new(Mutex::new(ledger)),
        limiter: Arc::new(Mutex::new(RateLimiter::default())),
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
