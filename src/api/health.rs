use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub mail: String,
    pub timestamp: String,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Health check endpoint
///
/// Reports whether mail settings are complete without saying which one is
/// missing.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mail_status = if state.config.mail.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        mail: mail_status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
