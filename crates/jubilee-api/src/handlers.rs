//! Route handler functions for all API endpoints.
//!
//! Each handler extracts parameters via axum extractors, interacts with
//! AppState services, and returns JSON responses. The two message entry
//! points speak JSONRPC-shaped bodies and build their own error objects
//! with the standard codes (-32700, -32600, -32601, -32602).

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use jubilee_agent::envelope;
use jubilee_agent::reminder;
use jubilee_core::types::Birthday;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AddBirthdayRequest {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddBirthdayResponse {
    pub message: String,
    pub name: String,
    pub date: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BirthdayListResponse {
    pub birthdays: Vec<Birthday>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct WishRequest {
    pub name: String,
    pub age: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SimpleWishParams {
    pub name: Option<String>,
    pub age: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub wish: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub agent: String,
    pub version: String,
    pub uptime_secs: u64,
    pub birthday_count: usize,
}

// =============================================================================
// JSONRPC entry points
// =============================================================================

fn rpc_error(id: Option<&Value>, code: i64, message: &str) -> (StatusCode, Json<Value>) {
    let mut body = json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message }
    });
    if let Some(id) = id {
        body["id"] = id.clone();
    }
    (StatusCode::BAD_REQUEST, Json(body))
}

/// POST / - strict JSONRPC message entry point.
///
/// Validates the envelope before the text ever reaches the router: parse
/// error, wrong version, missing method, and unsupported method each get
/// their standard error code.
pub async fn rpc_message(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => return rpc_error(None, -32700, "Parse error").into_response(),
    };

    if payload["jsonrpc"].as_str() != Some("2.0") {
        return rpc_error(None, -32600, "Invalid Request").into_response();
    }

    let method = match payload["method"].as_str() {
        Some(method) => method,
        None => {
            return rpc_error(payload.get("id"), -32600, "Invalid Request - missing method")
                .into_response()
        }
    };

    if method != "message/send" {
        warn!(method, "Unsupported JSONRPC method");
        return rpc_error(payload.get("id"), -32601, "Method not found").into_response();
    }

    let text = match envelope::extract_rpc_text(&payload) {
        Some(text) if !text.is_empty() => text,
        _ => {
            return rpc_error(
                payload.get("id"),
                -32602,
                "Invalid params - no text content found",
            )
            .into_response()
        }
    };

    let reply = state.responder.handle_text(&text).await;
    Json(envelope::wrap_reply(&payload, &reply)).into_response()
}

/// POST /api/a2a/message - lenient message entry point.
///
/// Accepts both the JSONRPC envelope and the simplified `{content}` shape.
/// Envelope validation only applies when the payload claims to be JSONRPC.
pub async fn a2a_message(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid A2A message" })),
            )
                .into_response()
        }
    };

    if payload["jsonrpc"].as_str() == Some("2.0") {
        match payload["method"].as_str() {
            Some("message/send") => {}
            Some(method) => {
                warn!(method, "Unsupported JSONRPC method");
                return rpc_error(payload.get("id"), -32601, "Method not found").into_response();
            }
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing JSONRPC method" })),
                )
                    .into_response()
            }
        }
    }

    // An empty text falls through to the guidance reply.
    let text = envelope::extract_text(&payload).unwrap_or_default();
    let reply = state.responder.handle_text(&text).await;
    Json(envelope::wrap_reply(&payload, &reply)).into_response()
}

// =============================================================================
// Health and agent card
// =============================================================================

/// GET /health - liveness check with uptime and record count.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        agent: "jubilee".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        birthday_count: state.store.len(),
    })
}

/// GET /.well-known/agent.json - the agent card.
pub async fn agent_card(State(state): State<AppState>) -> Json<Value> {
    Json(state.agent_card.as_ref().clone())
}

// =============================================================================
// Birthday endpoints
// =============================================================================

/// POST /api/birthdays - store a birthday.
pub async fn add_birthday(
    State(state): State<AppState>,
    Json(req): Json<AddBirthdayRequest>,
) -> Result<(StatusCode, Json<AddBirthdayResponse>), ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let id = state.store.insert(&req.name, &req.date)?;
    info!(%id, name = %req.name, "Birthday added via API");

    Ok((
        StatusCode::CREATED,
        Json(AddBirthdayResponse {
            message: "Birthday added successfully".to_string(),
            name: req.name,
            date: req.date,
            id,
        }),
    ))
}

/// GET /api/birthdays - list all stored birthdays.
pub async fn list_birthdays(State(state): State<AppState>) -> Json<BirthdayListResponse> {
    let birthdays = state.store.list();
    let total = birthdays.len();
    Json(BirthdayListResponse { birthdays, total })
}

/// GET /api/birthdays/today - birthdays falling on today's calendar day.
pub async fn todays_birthdays(State(state): State<AppState>) -> Json<BirthdayListResponse> {
    let birthdays = state.store.today(Utc::now().date_naive());
    let total = birthdays.len();
    Json(BirthdayListResponse { birthdays, total })
}

/// GET /api/birthdays/upcoming - birthdays inside the 30-day window.
pub async fn upcoming_birthdays(State(state): State<AppState>) -> Json<BirthdayListResponse> {
    let birthdays = state.store.upcoming(Utc::now().naive_utc());
    let total = birthdays.len();
    Json(BirthdayListResponse { birthdays, total })
}

// =============================================================================
// Wish endpoints
// =============================================================================

/// POST /api/wishes/generate - generate a wish for a named person.
pub async fn generate_wish(
    State(state): State<AppState>,
    Json(req): Json<WishRequest>,
) -> Result<Json<WishResponse>, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let (wish, source) = match req.age {
        Some(age) if age > 0 => state.responder.generate_wish_with_age(&req.name, age).await,
        _ => state.responder.generate_wish(Some(&req.name)).await,
    };

    Ok(Json(WishResponse {
        id: None,
        name: req.name,
        wish,
        age: req.age.filter(|a| *a > 0),
        source: source.as_str().to_string(),
    }))
}

/// GET /api/wishes/person/{id} - generate a wish for a stored person.
pub async fn wish_for_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WishResponse>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid person ID".to_string()))?;

    let person = state
        .store
        .find(id)
        .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))?;

    let (wish, source) = state.responder.generate_wish(Some(&person.name)).await;

    Ok(Json(WishResponse {
        id: Some(person.id),
        name: person.name,
        wish,
        age: None,
        source: source.as_str().to_string(),
    }))
}

/// GET /api/wishes/simple - generate a wish from query parameters.
pub async fn simple_wish(
    State(state): State<AppState>,
    Query(params): Query<SimpleWishParams>,
) -> Result<Json<WishResponse>, ApiError> {
    let name = params
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Name parameter is required".to_string()))?;

    let (wish, source) = match params.age {
        Some(age) if age > 0 => state.responder.generate_wish_with_age(&name, age).await,
        _ => state.responder.generate_wish(Some(&name)).await,
    };

    Ok(Json(WishResponse {
        id: None,
        name,
        wish,
        age: params.age.filter(|a| *a > 0),
        source: source.as_str().to_string(),
    }))
}

// =============================================================================
// Webhook
// =============================================================================

/// POST /api/webhook - external event trigger.
///
/// `daily_check` sweeps the store for birthdays today and tomorrow; other
/// events are acknowledged and ignored.
pub async fn webhook(
    State(state): State<AppState>,
    Json(req): Json<WebhookRequest>,
) -> Json<Value> {
    match req.event.as_str() {
        "daily_check" => {
            info!("Triggering daily birthday check");
            let check = reminder::run_daily_check(&state.store, Utc::now().naive_utc());
            Json(json!({
                "status": "ok",
                "today": check.today.len(),
                "tomorrow": check.tomorrow.len(),
            }))
        }
        event => {
            warn!(event, "Unknown webhook event");
            Json(json!({ "status": "ok" }))
        }
    }
}
