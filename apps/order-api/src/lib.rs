//! # order-api: HTTP Surface for the FotoKiosk Order Engine
//!
//! A thin axum layer over `fotokiosk-core`. All business rules live in the
//! core crate; handlers here only translate HTTP to engine calls and map
//! `CoreError` to status codes.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the API router over shared application state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::system::health))
        .route("/api/pricing", get(routes::catalog::pricing))
        .route("/api/assets/frames", get(routes::catalog::frames))
        .route("/api/assets/motifs", get(routes::catalog::motifs))
        .route(
            "/api/cart",
            get(routes::cart::get_cart)
                .post(routes::cart::add_item)
                .delete(routes::cart::clear_cart),
        )
        .route("/api/cart/:item_id", delete(routes::cart::remove_item))
        .route("/api/checkout", post(routes::checkout::checkout))
        .with_state(state)
}
