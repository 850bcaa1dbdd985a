//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, request tracing, a body size
//! limit, and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Messages arrive from external agent platforms, so CORS is open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", post(handlers::rpc_message))
        .route("/health", get(handlers::health))
        .route("/.well-known/agent.json", get(handlers::agent_card))
        .route(
            "/api/birthdays",
            get(handlers::list_birthdays).post(handlers::add_birthday),
        )
        .route("/api/birthdays/today", get(handlers::todays_birthdays))
        .route("/api/birthdays/upcoming", get(handlers::upcoming_birthdays))
        .route("/api/wishes/generate", post(handlers::generate_wish))
        .route("/api/wishes/person/{id}", get(handlers::wish_for_person))
        .route("/api/wishes/simple", get(handlers::simple_wish))
        .route("/api/a2a/message", post(handlers::a2a_message))
        .route("/api/webhook", post(handlers::webhook))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB global limit
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 127.0.0.1 (localhost only) on the port from config.
pub async fn start_server(state: AppState) -> Result<(), jubilee_core::error::JubileeError> {
    let port = state.config.general.port;
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| jubilee_core::error::JubileeError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| jubilee_core::error::JubileeError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
