//! Order API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `order-api` start serves the built-in catalog on
//! port 8080 with German standard shipping.

use std::env;

/// Order API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to a catalog JSON file; `None` uses the built-in catalog.
    pub catalog_path: Option<String>,

    /// Shipping region whose first catalog option supplies the flat fee.
    pub shipping_region: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            catalog_path: env::var("CATALOG_PATH").ok(),

            shipping_region: env::var("SHIPPING_REGION").unwrap_or_else(|_| "DE".to_string()),
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("No shipping option configured for region '{0}'")]
    UnknownShippingRegion(String),
}
