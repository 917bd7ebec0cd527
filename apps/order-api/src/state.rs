//! # Application State
//!
//! The injectable engine objects shared by every handler.
//!
//! ## Ownership
//! Constructed once per process in `main`, torn down on shutdown. The cart
//! store is never a global: it is passed to handlers through axum's
//! `State` extractor, so tests can build as many isolated instances as
//! they like.

use std::sync::Arc;

use fotokiosk_core::{CartStore, CheckoutFinalizer, Money, PriceCatalog, ShippingPolicy};

use crate::config::{ApiConfig, ConfigError};

/// Shared application state (cheap to clone; everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PriceCatalog>,
    pub carts: Arc<CartStore>,
    pub checkout: Arc<CheckoutFinalizer>,
}

impl AppState {
    /// Builds the engine over a catalog, deriving the flat shipping fee
    /// from the configured region's first shipping option.
    pub fn build(catalog: PriceCatalog, config: &ApiConfig) -> Result<Self, ConfigError> {
        let flat_fee = catalog
            .shipping_option(&config.shipping_region)
            .map(|option| option.price())
            .ok_or_else(|| ConfigError::UnknownShippingRegion(config.shipping_region.clone()))?;

        Ok(Self::with_policy(catalog, ShippingPolicy::new(flat_fee)))
    }

    /// Builds the engine with an explicit shipping policy (used by tests).
    pub fn with_policy(catalog: PriceCatalog, policy: ShippingPolicy) -> Self {
        let catalog = Arc::new(catalog);
        AppState {
            carts: Arc::new(CartStore::new(Arc::clone(&catalog), policy)),
            catalog,
            checkout: Arc::new(CheckoutFinalizer::new()),
        }
    }

    /// Default engine: built-in catalog, German standard shipping.
    pub fn default_engine() -> Self {
        Self::with_policy(
            PriceCatalog::builtin(),
            ShippingPolicy::new(Money::from_cents(499)),
        )
    }
}
