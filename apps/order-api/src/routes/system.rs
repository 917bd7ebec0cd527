//! Health check endpoint.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// `GET /api/health` — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
