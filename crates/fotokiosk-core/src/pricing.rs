//! # Tiered Pricing Calculator
//!
//! Pure functions mapping (product, quantity) to a unit price, and a full
//! item configuration to a frozen line price.
//!
//! ## Tier Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product: "digital-single"                                              │
//! │                                                                         │
//! │  Tier       Quantity     Unit Price                                     │
//! │  ────       ────────     ──────────                                     │
//! │  1          1 – 4        2.99 €                                         │
//! │  2          5 – 9        2.49 €                                         │
//! │  3          10+          1.99 €      (unbounded)                        │
//! │                                                                         │
//! │  unit_price_for(q=4)    → 2.99 €                                        │
//! │  unit_price_for(q=5)    → 2.49 €                                        │
//! │  unit_price_for(q=1000) → 1.99 €                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tiers are scanned in declaration order and the FIRST matching tier wins.
//! With a validated catalog exactly one tier matches; should malformed data
//! ever double-cover a quantity, the lookup stays deterministic (lowest
//! tier first) instead of erroring.

use tracing::error;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{AddOn, Product};

// =============================================================================
// Unit Price Lookup
// =============================================================================

/// Returns the unit price for ordering `quantity` units of `product`.
///
/// Scans `product.tiers` in order and returns the first tier where
/// `quantity ≥ min_quantity` and (`max_quantity` is unbounded or
/// `quantity ≤ max_quantity`).
///
/// ## Errors
/// `NoMatchingTier` if `quantity < 1` or no tier covers the quantity.
/// This indicates a malformed catalog, not bad user input: it is logged at
/// error level here because it must trip an alert, and callers treat it as
/// a fatal pricing configuration error.
pub fn unit_price_for(product: &Product, quantity: i64) -> Result<Money, CoreError> {
    if quantity >= 1 {
        if let Some(tier) = product.tiers.iter().find(|t| t.matches(quantity)) {
            return Ok(tier.unit_price());
        }
    }

    error!(
        product_id = %product.product_id,
        quantity,
        "no price tier matched; catalog data is malformed"
    );
    Err(CoreError::NoMatchingTier {
        product_id: product.product_id.clone(),
        quantity,
    })
}

// =============================================================================
// Line Pricing
// =============================================================================

/// The price computed for one configured item, frozen at add-to-cart time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePrice {
    /// Tier-derived unit price.
    pub unit_price: Money,

    /// `unit_price × quantity + Σ add-on surcharges`.
    pub total_price: Money,
}

/// Prices one configured item: tier lookup plus flat add-on surcharges.
///
/// Add-ons are charged once per item regardless of quantity. All arithmetic
/// is in integer cents, so the result is exact; there is no intermediate
/// rounding to compound across cart aggregation.
///
/// ## Example
/// ```rust
/// use fotokiosk_core::catalog::PriceCatalog;
/// use fotokiosk_core::pricing::price_line;
///
/// let catalog = PriceCatalog::builtin();
/// let product = catalog.product("print-10x15-glossy").unwrap();
/// let frame = catalog.add_on("safari").unwrap().clone();
///
/// // 4.99 € × 3 + 1.99 € = 16.96 €
/// let price = price_line(product, 3, &[frame]).unwrap();
/// assert_eq!(price.total_price.cents(), 1696);
/// ```
pub fn price_line(
    product: &Product,
    quantity: i64,
    add_ons: &[AddOn],
) -> Result<LinePrice, CoreError> {
    let unit_price = unit_price_for(product, quantity)?;
    let surcharges: Money = add_ons.iter().map(|a| a.price()).sum();
    let total_price = unit_price.multiply_quantity(quantity) + surcharges;

    Ok(LinePrice {
        unit_price,
        total_price,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddOnKind, PriceTier};

    fn tier(min: i64, max: Option<i64>, cents: i64) -> PriceTier {
        PriceTier {
            min_quantity: min,
            max_quantity: max,
            unit_price_cents: cents,
        }
    }

    fn discount_product() -> Product {
        Product {
            product_id: "digital-single".to_string(),
            name: "Digitaler Download".to_string(),
            base_price_cents: 299,
            tiers: vec![
                tier(1, Some(4), 299),
                tier(5, Some(9), 249),
                tier(10, None, 199),
            ],
        }
    }

    fn add_on(cents: i64) -> AddOn {
        AddOn {
            add_on_id: "safari".to_string(),
            kind: AddOnKind::Frame,
            name: "Safari Rahmen".to_string(),
            price_cents: cents,
            asset_url: None,
        }
    }

    #[test]
    fn test_unit_price_tier_boundaries() {
        let product = discount_product();

        assert_eq!(unit_price_for(&product, 1).unwrap().cents(), 299);
        assert_eq!(unit_price_for(&product, 4).unwrap().cents(), 299);
        assert_eq!(unit_price_for(&product, 5).unwrap().cents(), 249);
        assert_eq!(unit_price_for(&product, 9).unwrap().cents(), 249);
        assert_eq!(unit_price_for(&product, 10).unwrap().cents(), 199);
        assert_eq!(unit_price_for(&product, 1000).unwrap().cents(), 199);
    }

    #[test]
    fn test_unit_price_non_increasing_across_quantities() {
        let product = discount_product();
        let mut previous = i64::MAX;
        for quantity in 1..=50 {
            let price = unit_price_for(&product, quantity).unwrap().cents();
            assert!(
                price <= previous,
                "price rose from {previous} to {price} at quantity {quantity}"
            );
            previous = price;
        }
    }

    #[test]
    fn test_quantity_below_one_is_no_matching_tier() {
        let product = discount_product();
        assert!(matches!(
            unit_price_for(&product, 0),
            Err(CoreError::NoMatchingTier { quantity: 0, .. })
        ));
        assert!(matches!(
            unit_price_for(&product, -3),
            Err(CoreError::NoMatchingTier { .. })
        ));
    }

    #[test]
    fn test_tier_gap_is_no_matching_tier() {
        // Bypasses catalog validation on purpose: quantity 5 is uncovered
        let product = Product {
            product_id: "gappy".to_string(),
            name: "Gappy".to_string(),
            base_price_cents: 299,
            tiers: vec![tier(1, Some(4), 299), tier(6, None, 199)],
        };
        assert!(matches!(
            unit_price_for(&product, 5),
            Err(CoreError::NoMatchingTier { quantity: 5, .. })
        ));
    }

    #[test]
    fn test_overlapping_tiers_first_match_wins() {
        // Malformed on purpose: both tiers cover quantity 5.
        // The lookup must stay deterministic: first in declaration order.
        let product = Product {
            product_id: "overlappy".to_string(),
            name: "Overlappy".to_string(),
            base_price_cents: 299,
            tiers: vec![tier(1, Some(9), 299), tier(5, None, 199)],
        };
        assert_eq!(unit_price_for(&product, 5).unwrap().cents(), 299);
    }

    #[test]
    fn test_price_line_with_add_on() {
        // unit 4.99 €, quantity 3, one add-on of 2.00 € → 16.97 €
        let product = Product {
            product_id: "print-10x15-glossy".to_string(),
            name: "Druck 10x15cm Glossy".to_string(),
            base_price_cents: 499,
            tiers: vec![tier(1, None, 499)],
        };

        let price = price_line(&product, 3, &[add_on(200)]).unwrap();
        assert_eq!(price.unit_price.cents(), 499);
        assert_eq!(price.total_price.cents(), 1697);
    }

    #[test]
    fn test_price_line_without_add_ons() {
        let product = discount_product();
        let price = price_line(&product, 5, &[]).unwrap();
        assert_eq!(price.unit_price.cents(), 249);
        assert_eq!(price.total_price.cents(), 1245);
    }

    #[test]
    fn test_add_on_charged_once_regardless_of_quantity() {
        let product = discount_product();
        let price = price_line(&product, 10, &[add_on(200)]).unwrap();
        // 1.99 € × 10 + 2.00 € (not 2.00 € × 10)
        assert_eq!(price.total_price.cents(), 2190);
    }
}
