//! # fotokiosk-core: Pure Business Logic for FotoKiosk
//!
//! This crate is the **heart** of FotoKiosk: the order composition &
//! pricing engine, as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       FotoKiosk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │   Photo Search ──► Image Editor ──► Cart UI ──► Checkout UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/order-api (axum)                        │   │
//! │  │    GET/POST/DELETE /api/cart, POST /api/checkout, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ fotokiosk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │   │
//! │  │  │  money  │ │ catalog │ │ pricing │ │  cart   │ │ checkout │  │   │
//! │  │  │  Money  │ │ tiers,  │ │  tier   │ │ session │ │ order id │  │   │
//! │  │  │ (cents) │ │ add-ons │ │ lookup  │ │  carts  │ │  issue   │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, AddOn, ConfiguredItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Read-only price catalog with load-time validation
//! - [`pricing`] - Tiered unit price lookup and line pricing
//! - [`cart`] - Session-keyed cart store (per-session critical sections)
//! - [`checkout`] - Checkout finalizer (authoritative total + order id)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Frozen Prices**: A configured item keeps the price in effect when
//!    it was added; re-pricing happens only by remove + re-add
//! 5. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fotokiosk_core::Money` instead of
// `use fotokiosk_core::money::Money`

pub use cart::{CartStore, NewItemRequest, ShippingPolicy};
pub use catalog::PriceCatalog;
pub use checkout::CheckoutFinalizer;
pub use error::{CatalogError, CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Session used when the caller supplies no session token.
///
/// ## Why a constant?
/// The external contract maps an absent `x-session-id` header to a single
/// well-known session rather than an error, which keeps single-user and
/// testing setups trivial.
pub const DEFAULT_SESSION_ID: &str = "default-session";

/// Free-shipping threshold in cents (50.00 €).
///
/// Shipping is waived only when the cart subtotal STRICTLY exceeds this
/// value; a subtotal of exactly 50.00 € still pays the flat fee.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Maximum quantity of a single configured item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Can be made configurable in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
