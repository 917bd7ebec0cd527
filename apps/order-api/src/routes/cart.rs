//! # Cart Routes
//!
//! HTTP handlers for cart manipulation.
//!
//! ## Operation Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api/cart           → CartSnapshot (items + computed totals)    │
//! │  POST   /api/cart           → created ConfiguredItem (price frozen)     │
//! │  DELETE /api/cart/:item_id  → { success: true }  (always; idempotent)   │
//! │  DELETE /api/cart           → { success: true }  (clear all)            │
//! │                                                                         │
//! │  Session scope: x-session-id header; absent → default session.          │
//! │  Removal never fails: repeated or late-arriving DELETEs are no-ops,     │
//! │  which keeps retry semantics trivial under network uncertainty.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fotokiosk_core::{CartSnapshot, ConfiguredItem, ItemConfiguration, NewItemRequest};

use crate::error::ApiError;
use crate::session::session_id;
use crate::state::AppState;

/// Body for `POST /api/cart`.
///
/// Every recognized field is explicit. The unit price is never accepted
/// from the client; it is derived from the catalog and echoed back on the
/// created item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Catalog product id, e.g. "digital-single".
    pub product_id: String,

    /// Photo lookup code.
    pub image_code: String,

    /// Defaults to 1 when unspecified.
    pub quantity: Option<i64>,

    /// Add-on ids (at most one frame, one motif).
    #[serde(default)]
    pub add_ons: Vec<String>,

    /// Crop/zoom/overlay parameters; defaults to an empty configuration.
    #[serde(default)]
    pub configuration: ItemConfiguration,
}

/// Body for both DELETE endpoints. Always `{ "success": true }`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// `GET /api/cart` — current snapshot for the caller's session.
pub async fn get_cart(State(state): State<AppState>, headers: HeaderMap) -> Json<CartSnapshot> {
    let session = session_id(&headers);
    debug!(session_id = %session, "get cart");
    Json(state.carts.snapshot(&session))
}

/// `POST /api/cart` — configure and add one item; prices are computed and
/// frozen here.
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<ConfiguredItem>), ApiError> {
    let session = session_id(&headers);

    let item = state.carts.add_item(
        &session,
        NewItemRequest {
            product_id: body.product_id,
            image_code: body.image_code,
            quantity: body.quantity.unwrap_or(1),
            add_on_ids: body.add_ons,
            configuration: body.configuration,
        },
    )?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /api/cart/:item_id` — remove one item. Succeeds whether or not
/// the item (still) exists.
pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
) -> Json<DeleteResponse> {
    let session = session_id(&headers);
    state.carts.remove_item(&session, &item_id);
    Json(DeleteResponse { success: true })
}

/// `DELETE /api/cart` — clear the session's cart.
pub async fn clear_cart(State(state): State<AppState>, headers: HeaderMap) -> Json<DeleteResponse> {
    let session = session_id(&headers);
    state.carts.clear(&session);
    Json(DeleteResponse { success: true })
}
