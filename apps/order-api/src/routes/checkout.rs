//! # Checkout Route
//!
//! Accepts the order and issues a tracking identifier. Payment is handled
//! by an external collaborator after this step; the cart is deliberately
//! left intact (clearing it is the UI flow's decision, not the engine's).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fotokiosk_core::Order;

use crate::error::ApiError;
use crate::session::session_id;
use crate::state::AppState;

/// Body for `POST /api/checkout`. The whole body is optional; customer
/// data and payment method are pass-through for the (external) payment
/// step and do not influence the total.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer: Option<CustomerData>,

    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Minimal customer contact data, echoed to the payment collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order: Order,
}

/// `POST /api/checkout` — finalize the session's cart.
///
/// Fails with 400 `EMPTY_CART` when the cart holds no items.
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<CheckoutRequest>>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let session = session_id(&headers);
    let request = body.map(|Json(b)| b).unwrap_or_default();
    debug!(
        session_id = %session,
        payment_method = request.payment_method.as_deref().unwrap_or("unspecified"),
        "checkout requested"
    );

    let order = state.checkout.finalize(&state.carts, &session)?;
    Ok(Json(CheckoutResponse {
        success: true,
        order,
    }))
}
