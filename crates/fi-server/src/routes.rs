use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use fi_core::{FOLLOWUP_ENDPOINT, INTAKE_ENDPOINT, SubmitError};
use fi_forms::{FormsContext, handle_followup, handle_intake};
use serde_json::json;

pub const REQUEST_TOO_LARGE: &str = "Request body too large";

/// Shared per-server state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub forms: Arc<FormsContext>,
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(forms: FormsContext, expose_error_details: bool) -> Self {
        Self {
            forms: Arc::new(forms),
            expose_error_details,
        }
    }
}

struct ApiError {
    error: SubmitError,
    expose_details: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.error.body(self.expose_details))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(INTAKE_ENDPOINT, any(submit_intake))
        .route(FOLLOWUP_ENDPOINT, any(submit_followup))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_intake(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return reject_body(rejection),
    };
    tracing::debug!(%method, bytes = body.len(), "intake request");
    let body = String::from_utf8_lossy(&body);
    respond(&state, handle_intake(&state.forms, method.as_str(), &body).await)
}

async fn submit_followup(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return reject_body(rejection),
    };
    tracing::debug!(%method, bytes = body.len(), "follow-up request");
    let body = String::from_utf8_lossy(&body);
    respond(&state, handle_followup(&state.forms, method.as_str(), &body).await)
}

/// Unreadable or oversized bodies still answer with a JSON `{error}`.
fn reject_body(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        REQUEST_TOO_LARGE.to_string()
    } else {
        rejection.body_text()
    };
    tracing::warn!(status = status.as_u16(), error = %rejection.body_text(), "request body rejected");
    (status, Json(json!({ "error": message }))).into_response()
}

fn respond<T: serde::Serialize>(state: &AppState, outcome: Result<T, SubmitError>) -> Response {
    match outcome {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(error) => ApiError {
            error,
            expose_details: state.expose_error_details,
        }
        .into_response(),
    }
}
