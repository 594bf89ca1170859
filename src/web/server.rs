use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::cli::ServeArgs;
use crate::config::{ConfigError, ServiceConfig};
use crate::coordinator::{
    Coordinator, CoordinatorError, DisputeRequest, OutcomeRequest, RoundRequest,
};
use crate::pairing::PairingError;
use crate::services::build_coordinator;

/// Largest accepted request body; every request is a small JSON document
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Most requests handled at once
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub coordinator: Coordinator,
}

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Create a safe error response that keeps downstream error text out of the
/// body while logging it server-side
pub fn create_safe_error_response(
    kind: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", kind, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        kind: kind.to_string(),
        details: None,
    }
}

/// HTTP status for each failure kind
pub fn status_for(err: &CoordinatorError) -> StatusCode {
    match err {
        CoordinatorError::InputValidation(_) | CoordinatorError::Pairing(_) => {
            StatusCode::BAD_REQUEST
        }
        CoordinatorError::NotFound(_) => StatusCode::NOT_FOUND,
        CoordinatorError::DataUnavailable(_)
        | CoordinatorError::PartialPersistence(_)
        | CoordinatorError::StepFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &CoordinatorError) -> Response {
    let body = match err {
        CoordinatorError::DataUnavailable(inner) => create_safe_error_response(
            err.kind(),
            "A tournament service could not be reached or returned an error",
            Some(&inner.to_string()),
        ),
        CoordinatorError::PartialPersistence(report) => ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
            details: serde_json::to_value(report).ok(),
        },
        CoordinatorError::StepFailed { steps, .. } => ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
            details: serde_json::to_value(steps).ok(),
        },
        CoordinatorError::Pairing(PairingError::NoAvailabilityOverlap { unpaired }) => {
            ErrorResponse {
                error: err.to_string(),
                kind: err.kind().to_string(),
                details: Some(serde_json::json!({ "unpaired": unpaired })),
            }
        }
        _ => ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
            details: None,
        },
    };

    (status_for(err), Json(body)).into_response()
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: rejection.body_text(),
            kind: "input_validation".to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(config).await })
}

/// Resolve the configuration from file, environment and command line
///
/// # Errors
///
/// Returns an error if the config file cannot be read or a value is invalid.
pub fn load_config(args: &ServeArgs) -> anyhow::Result<ServiceConfig> {
    let config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    }
    .with_environment();

    let config = apply_cli_overrides(config, args)?;
    config.validate()?;
    Ok(config)
}

/// Replace the bind address or port with the ones given on the command line
fn apply_cli_overrides(
    mut config: ServiceConfig,
    args: &ServeArgs,
) -> Result<ServiceConfig, ConfigError> {
    if args.address.is_some() || args.port.is_some() {
        let mut addr = config.bind_addr()?;
        if let Some(ip) = args.address {
            addr.set_ip(ip);
        }
        if let Some(port) = args.port {
            addr.set_port(port);
        }
        config.bind = addr.to_string();
    }
    Ok(config)
}

/// Create the application router with all routes and middleware configured.
///
/// Per-IP rate limiting needs the peer address and is added by the server
/// itself, not here.
pub fn create_router(coordinator: Coordinator) -> Router {
    let state = Arc::new(AppState { coordinator });

    Router::new()
        .route("/health", get(health_handler))
        .route("/make-match", post(make_match_handler))
        .route("/make_matches", post(make_match_handler))
        .route("/finalize-outcome", post(finalize_outcome_handler))
        .route("/dispute/new", post(dispute_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                // The tournament frontend is served from another origin
                .layer(CorsLayer::permissive())
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(config: ServiceConfig) -> anyhow::Result<()> {
    let coordinator = build_coordinator(&config)?;

    // One request replenished per second per IP, bursts of 50
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(1)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = create_router(coordinator).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = config.bind_addr()?;
    tracing::info!("Starting round-pairing coordinator at http://{addr}");
    tracing::info!(
        "Services: schedule={} tournament={} match={}",
        config.schedule_url,
        config.tournament_url,
        config.match_url
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Pair a round and create its matches
async fn make_match_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoundRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state.coordinator.make_matches(&request).await {
        Ok(report) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": format!(
                    "Matches for round {} created!",
                    report.round_number
                ),
                "tournamentId": report.tournament_id,
                "roundNumber": report.round_number,
                "matchesCreated": report.matches_created,
                "announced": report.announced,
            })),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

/// Record a match result and update standings
async fn finalize_outcome_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OutcomeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state.coordinator.finalize_outcome(&request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Open a dispute on a match
async fn dispute_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DisputeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state.coordinator.open_dispute(&request).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(err) => error_response(&err),
    }
}
