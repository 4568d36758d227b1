//! HTTP surface: the lookup endpoint and health route.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::Reporting;
use crate::error::LookupError;
use crate::models::LookupResult;
use crate::pipeline::LookupService;

/// Application state shared across handlers
pub struct AppState {
    pub service: LookupService,
    pub reporting: Reporting,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/lookup", post(lookup_handler))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "data_source": state.service.data_source(),
    }))
}

/// Address lookup endpoint.
///
/// A malformed body or missing `address` field is treated as a
/// validation-failure lookup rather than a transport fault, so uniform
/// reporting still answers 200 with a `not_found` body.
async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<LookupResult>) {
    let address = match &body {
        Ok(Json(value)) => value.get("address").and_then(Value::as_str),
        Err(_) => None,
    };

    let (result, error) = match address {
        Some(address) => state.service.lookup_detailed(address).await,
        None => {
            debug!("Lookup request without a usable address field");
            (
                LookupResult::not_found(state.service.data_source()),
                Some(LookupError::InvalidInput),
            )
        }
    };

    let status = match (state.reporting, &error) {
        (Reporting::Uniform, _) | (_, None) => StatusCode::OK,
        (Reporting::Verbose, Some(e)) => status_for(e),
    };

    (status, Json(result))
}

/// Status mapping used by verbose reporting; the body shape is unchanged.
fn status_for(error: &LookupError) -> StatusCode {
    match error {
        LookupError::InvalidInput => StatusCode::BAD_REQUEST,
        LookupError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
        LookupError::GeocodeMiss | LookupError::NoMatch | LookupError::Ambiguous(_) => {
            StatusCode::NOT_FOUND
        }
    }
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
