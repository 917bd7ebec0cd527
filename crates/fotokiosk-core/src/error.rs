//! # Error Types
//!
//! Domain-specific error types for fotokiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fotokiosk-core errors (this file)                                     │
//! │  ├── CoreError        - Cart/pricing/checkout failures                 │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CatalogError     - Catalog loading/authoring failures             │
//! │                                                                         │
//! │  order-api errors (in app)                                             │
//! │  └── ApiError         - What the HTTP client sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, session id, etc.)
//! 3. Errors are enum variants, never String
//! 4. User-correctable errors and data defects are distinct variants:
//!    `NoMatchingTier` is the only variant that indicates a catalog
//!    authoring bug rather than bad input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or pricing failures.
/// All of them except `NoMatchingTier` are user-correctable and map to
/// 4xx responses at the API layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced product id does not exist in the price catalog.
    ///
    /// User-correctable: the client sent a product id the catalog does
    /// not know (stale client data, typo in a test request).
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Referenced add-on id does not exist in the price catalog.
    #[error("Unknown add-on: {0}")]
    UnknownAddOn(String),

    /// More than one add-on of the same exclusive kind was requested.
    ///
    /// Business rule: a configured item carries at most one frame and at
    /// most one motif.
    #[error("Only one add-on of kind '{kind}' is allowed per item")]
    ConflictingAddOn { kind: String },

    /// No price tier matched the requested quantity.
    ///
    /// ## When This Occurs
    /// - Quantity below 1 reached the tier lookup
    /// - The catalog has a gap in its tier coverage
    ///
    /// This is NOT a user input problem. Tiers are validated to be
    /// contiguous at catalog load, so hitting this at pricing time means
    /// the catalog data is malformed. The API layer maps it to a 500 and
    /// logs at error level so it trips an alert.
    #[error("No price tier matches quantity {quantity} for product {product_id}")]
    NoMatchingTier { product_id: String, quantity: i64 },

    /// Checkout attempted on a cart with no items.
    #[error("Cart for session '{session_id}' is empty")]
    EmptyCart { session_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether the caller can fix this error by changing the request.
    ///
    /// `NoMatchingTier` is the only defect-class error: it must be fixed
    /// in catalog data, not retried by the client.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, CoreError::NoMatchingTier { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// A string field exceeds its maximum length.
    #[error("Field '{field}' exceeds maximum length of {max}")]
    TooLong { field: String, max: usize },

    /// A field has an invalid format.
    #[error("Field '{field}' is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Quantity must be at least 1.
    #[error("Quantity must be at least 1, got {requested}")]
    QuantityNotPositive { requested: i64 },

    /// Quantity exceeds the per-item maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised while loading or validating price catalog data.
///
/// These surface at startup (or on catalog reload), never during a cart
/// operation: a catalog that fails validation is rejected wholesale.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog JSON could not be parsed.
    #[error("Failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product's tier table violates the coverage invariant.
    ///
    /// Tiers must be sorted ascending, contiguous, start at quantity 1,
    /// and end with an unbounded tier so every quantity ≥ 1 matches
    /// exactly one tier.
    #[error("Malformed tiers for product {product_id}: {reason}")]
    MalformedTiers { product_id: String, reason: String },

    /// A catalog entry carries a negative price.
    #[error("Negative price on catalog entry {entry_id}")]
    NegativePrice { entry_id: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
