//! Catalog read endpoints.
//!
//! The catalog is reference data served straight from the in-memory
//! snapshot; the engine never mutates it. The assets endpoints feed the
//! frame/motif pickers in the image editor.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use fotokiosk_core::AddOnKind;

use crate::state::AppState;

/// `GET /api/pricing` — products with their tier tables + shipping options.
pub async fn pricing(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "products": state.catalog.products(),
        "shipping_options": state.catalog.shipping_options(),
    }))
}

/// `GET /api/assets/frames` — frame add-ons.
pub async fn frames(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.catalog.add_ons_of_kind(AddOnKind::Frame)))
}

/// `GET /api/assets/motifs` — motif add-ons.
pub async fn motifs(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.catalog.add_ons_of_kind(AddOnKind::Motif)))
}
