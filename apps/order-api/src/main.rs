//! # FotoKiosk Order API
//!
//! HTTP server for the order composition & pricing engine.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Load config (env) ──► Load catalog (file or built-in, validated)       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Build engine: CartStore + CheckoutFinalizer over Arc<PriceCatalog>     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serve axum router on 0.0.0.0:<HTTP_PORT>                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use fotokiosk_core::PriceCatalog;
use order_api::config::ApiConfig;
use order_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,order_api=debug,fotokiosk_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting FotoKiosk order API...");

    let config = ApiConfig::load()?;

    // Catalog snapshot: external file if configured, built-in otherwise.
    // Validation happens at load; a malformed catalog aborts startup.
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path, "loading catalog file");
            let json = std::fs::read_to_string(path)?;
            PriceCatalog::from_json(&json)?
        }
        None => {
            info!("using built-in catalog");
            PriceCatalog::builtin()
        }
    };

    let state = AppState::build(catalog, &config)?;
    let app = order_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
