//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in order-api                              │
//! │                                                                         │
//! │  CoreError (fotokiosk-core)            HTTP response                    │
//! │  ──────────────────────────            ─────────────                    │
//! │  UnknownProduct / UnknownAddOn ──────► 400 Bad Request                  │
//! │  Validation(...)               ──────► 400 Bad Request                  │
//! │  EmptyCart                     ──────► 400 Bad Request                  │
//! │  ConflictingAddOn              ──────► 422 Unprocessable Entity         │
//! │  NoMatchingTier                ──────► 500 Internal Server Error        │
//! │                                        (catalog defect; alerts fire     │
//! │                                         on the error-level log)         │
//! │                                                                         │
//! │  Body: { "code": "UNKNOWN_PRODUCT", "message": "Unknown product: x" }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! User-correctable failures are structured and recoverable; only
//! `NoMatchingTier` is treated as a defect to be fixed in catalog data.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use fotokiosk_core::CoreError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the frontend receives when a request fails:
/// ```json
/// {
///   "code": "UNKNOWN_PRODUCT",
///   "message": "Unknown product: poster-a1"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced product is not in the catalog (400)
    UnknownProduct,

    /// Referenced add-on is not in the catalog (400)
    UnknownAddOn,

    /// More than one add-on of an exclusive kind (422)
    ConflictingAddOn,

    /// Input validation failed (400)
    ValidationError,

    /// Checkout attempted with no items (400)
    EmptyCart,

    /// Catalog data is malformed - tier lookup failed (500)
    PricingError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::UnknownProduct
            | ErrorCode::UnknownAddOn
            | ErrorCode::ValidationError
            | ErrorCode::EmptyCart => StatusCode::BAD_REQUEST,
            ErrorCode::ConflictingAddOn => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::PricingError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnknownProduct(_) => ErrorCode::UnknownProduct,
            CoreError::UnknownAddOn(_) => ErrorCode::UnknownAddOn,
            CoreError::ConflictingAddOn { .. } => ErrorCode::ConflictingAddOn,
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::EmptyCart { .. } => ErrorCode::EmptyCart,
            // Already logged at error level by the pricing module
            CoreError::NoMatchingTier { .. } => ErrorCode::PricingError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                CoreError::UnknownProduct("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::UnknownAddOn("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::ConflictingAddOn {
                    kind: "frame".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::EmptyCart {
                    session_id: "s".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::NoMatchingTier {
                    product_id: "x".into(),
                    quantity: 0,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core_err, expected) in cases {
            let api_err: ApiError = core_err.into();
            assert_eq!(api_err.status(), expected);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::UnknownProduct("poster-a1".to_string()));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNKNOWN_PRODUCT");
        assert!(json["message"].as_str().unwrap().contains("poster-a1"));
    }
}
