//! Tally Web Server
//!
//! Axum-based REST API exposing the derived analytics views over an
//! in-memory snapshot. The server owns no durable state: the snapshot is
//! loaded by the caller and budgets edited through the API live only for
//! the process lifetime — durability belongs to the external store.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use tally_core::{AnalyticsConfig, Snapshot};

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// The loaded snapshot. Budgets are replaceable through the API; the
    /// transaction list is read-only.
    snapshot: RwLock<Snapshot>,
    /// Analytics thresholds
    pub analytics: AnalyticsConfig,
}

impl AppState {
    /// Read access to the snapshot. A poisoned lock is reported as an
    /// internal error rather than a panic.
    pub fn snapshot(&self) -> Result<RwLockReadGuard<'_, Snapshot>, AppError> {
        self.snapshot
            .read()
            .map_err(|_| AppError::internal("State lock poisoned"))
    }

    /// Replace the budget list.
    pub fn replace_budgets(&self, budgets: Vec<tally_core::Budget>) -> Result<(), AppError> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| AppError::internal("State lock poisoned"))?;
        snapshot.budgets = budgets;
        Ok(())
    }
}

/// Generic `{"items": [...]}` envelope for list responses
#[derive(Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: Vec<T>,
}

/// Create the application router
pub fn create_router(snapshot: Snapshot, analytics: AnalyticsConfig, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        snapshot: RwLock::new(snapshot),
        analytics,
    });

    let api_routes = Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/monthly-summary", get(handlers::get_monthly_summary))
        .route("/transactions", get(handlers::list_transactions))
        .route("/insights", get(handlers::get_insights))
        .route("/recurring", get(handlers::list_recurring))
        .route(
            "/budgets",
            get(handlers::list_budgets).put(handlers::replace_budgets),
        )
        .route("/budgets/status", get(handlers::budget_status))
        .route("/alerts", get(handlers::list_alerts))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer from configured origins. With no origins listed the
/// API stays same-origin only.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    if !origins.is_empty() {
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors
}

/// Bind and serve until shutdown.
pub async fn run_server(
    snapshot: Snapshot,
    analytics: AnalyticsConfig,
    config: ServerConfig,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let router = create_router(snapshot, analytics, config);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
