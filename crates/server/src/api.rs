//! HTTP routes.
//!
//! - `GET  /`: plain-text liveness banner
//! - `GET  /health`: catalog readiness report
//! - `GET  /productos`: catalog listing in catalog order
//! - `POST /cotizar`: quote from `{ "items": [...] }` or `{ "mensaje": "..." }`

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cotiza_core::{InterfaceError, ProductRecord, Quote, QuoteRequest, QuoteResolver};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::health;

pub const BANNER: &str = "Agente de prueba funcionando correctamente";

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<QuoteResolver>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
}

impl From<InterfaceError> for ApiError {
    fn from(value: InterfaceError) -> Self {
        Self { error: value.message().to_string(), correlation_id: value.correlation_id().to_string() }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(resolver: Arc<QuoteResolver>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health))
        .route("/productos", get(list_products))
        .route("/cotizar", post(create_quote))
        .with_state(AppState { resolver })
}

async fn home() -> &'static str {
    BANNER
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductRecord>> {
    Json(state.resolver.catalog().iter().cloned().collect())
}

/// The body is parsed by hand so that a missing content type or malformed
/// JSON produce the same error shape as an empty request.
async fn create_quote(State(state): State<AppState>, body: Bytes) -> ApiResult<Quote> {
    let correlation_id = Uuid::new_v4().to_string();

    let payload: Value = serde_json::from_slice(&body).map_err(|error| {
        warn!(
            event_name = "api.quote.malformed_body",
            correlation_id = %correlation_id,
            error = %error,
            "quote request body is not valid JSON"
        );
        bad_request(InterfaceError::bad_request(
            format!("request body must be a JSON object: {error}"),
            &correlation_id,
        ))
    })?;

    let quote = QuoteRequest::from_value(&payload)
        .and_then(|request| state.resolver.quote(&request))
        .map_err(|error| {
            info!(
                event_name = "api.quote.rejected",
                correlation_id = %correlation_id,
                reason = %error,
                "quote request rejected"
            );
            bad_request(error.into_interface(&correlation_id))
        })?;

    info!(
        event_name = "api.quote.resolved",
        correlation_id = %correlation_id,
        lines = quote.lines.len(),
        unmatched = quote.unmatched.len(),
        total = %quote.total,
        "quote served"
    );
    Ok(Json(quote))
}

fn bad_request(error: InterfaceError) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::from(error)))
}
