//! # Validation Module
//!
//! Input validation utilities for FotoKiosk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (deserialization, defaults)                       │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog load                                                 │
//! │  └── Tier coverage / price sign invariants (catalog.rs)                │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, ValidationError};
use crate::types::AddOn;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (≥ 1)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Quantity defaulting (absent → 1) happens at the API edge before this
/// runs; by the time the engine sees a quantity it is always explicit.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::QuantityNotPositive {
            requested: quantity,
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a photo lookup code.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Returns
/// The trimmed code.
pub fn validate_image_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "image_code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "image_code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "image_code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code.to_string())
}

/// Validates a session identifier.
///
/// Session ids are opaque caller-supplied tokens; we only bound their size.
/// The empty string is rejected — an absent token must be mapped to the
/// well-known default session by the caller, not passed through empty.
pub fn validate_session_id(session_id: &str) -> ValidationResult<()> {
    if session_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "session_id".to_string(),
        });
    }

    if session_id.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "session_id".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Business Rules
// =============================================================================

/// Enforces add-on exclusivity: at most one frame, at most one motif.
pub fn validate_add_on_exclusivity(add_ons: &[AddOn]) -> Result<(), CoreError> {
    for (i, add_on) in add_ons.iter().enumerate() {
        if add_ons[..i].iter().any(|other| other.kind == add_on.kind) {
            return Err(CoreError::ConflictingAddOn {
                kind: add_on.kind.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddOnKind;

    fn add_on(id: &str, kind: AddOnKind) -> AddOn {
        AddOn {
            add_on_id: id.to_string(),
            kind,
            name: id.to_string(),
            price_cents: 100,
            asset_url: None,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_image_code() {
        assert_eq!(validate_image_code(" ZB-2024_001 ").unwrap(), "ZB-2024_001");
        assert!(validate_image_code("").is_err());
        assert!(validate_image_code("   ").is_err());
        assert!(validate_image_code(&"A".repeat(51)).is_err());
        assert!(validate_image_code("bad code!").is_err());
    }

    #[test]
    fn test_validate_session_id() {
        assert!(validate_session_id("default-session").is_ok());
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id(&"s".repeat(101)).is_err());
    }

    #[test]
    fn test_add_on_exclusivity() {
        let frame1 = add_on("zoo1", AddOnKind::Frame);
        let frame2 = add_on("safari", AddOnKind::Frame);
        let motif = add_on("tiger", AddOnKind::Motif);

        assert!(validate_add_on_exclusivity(&[]).is_ok());
        assert!(validate_add_on_exclusivity(&[frame1.clone()]).is_ok());
        assert!(validate_add_on_exclusivity(&[frame1.clone(), motif.clone()]).is_ok());

        let err = validate_add_on_exclusivity(&[frame1, frame2, motif]).unwrap_err();
        match err {
            CoreError::ConflictingAddOn { kind } => assert_eq!(kind, "frame"),
            other => panic!("expected ConflictingAddOn, got {other:?}"),
        }
    }
}
