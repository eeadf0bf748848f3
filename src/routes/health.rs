use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{dto::quiz_dto::MessageResponse, error::Result, AppState};

pub const API_NAME: &str = "AI Wiki Quiz Generator API";

#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: API_NAME.to_string(),
    })
}

/// Liveness probe backed by a database round-trip.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.quiz_service.health().await?;
    let body = json!({
        "status": "healthy",
    });
    Ok((StatusCode::OK, Json(body)))
}
