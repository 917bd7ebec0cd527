//! # Domain Types
//!
//! Core domain types used throughout FotoKiosk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     AddOn       │   │ ShippingOption  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  add_on_id      │   │  id             │       │
//! │  │  base_price     │   │  kind           │   │  region         │       │
//! │  │  tiers[]        │   │  price_cents    │   │  price_cents    │       │
//! │  └────────┬────────┘   └────────┬────────┘   └─────────────────┘       │
//! │           │                     │                                       │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │           ┌─────────────────────┐       ┌─────────────────────┐        │
//! │           │   ConfiguredItem    │──────►│    CartSnapshot     │        │
//! │           │  frozen prices,     │       │  derived totals,    │        │
//! │           │  crop/zoom/overlay  │       │  never stored       │        │
//! │           └─────────────────────┘       └─────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `ConfiguredItem` freezes the unit price, the line total and the add-on
//! surcharges at the moment it is added to the cart. Catalog changes after
//! that moment never reprice an item in a cart; re-pricing happens only by
//! removing the item and adding it again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Price Tier
// =============================================================================

/// A quantity range mapped to a unit price, used for bulk-discount pricing.
///
/// `max_quantity: None` means the tier is unbounded ("10 and up"). For a
/// well-formed product, tiers are contiguous, non-overlapping and sorted
/// ascending by `min_quantity`, so exactly one tier matches any quantity ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    /// Lowest quantity this tier applies to (inclusive, ≥ 1).
    pub min_quantity: i64,

    /// Highest quantity this tier applies to (inclusive); `None` = unbounded.
    pub max_quantity: Option<i64>,

    /// Unit price in cents while this tier applies.
    pub unit_price_cents: i64,
}

impl PriceTier {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Checks whether a quantity falls inside this tier.
    pub fn matches(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A configurable product available for ordering (digital download, print).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Business identifier, e.g. "print-10x15-glossy".
    pub product_id: String,

    /// Display name shown to the customer.
    pub name: String,

    /// Price in cents at quantity 1. Should equal the first tier's unit
    /// price; checked (with a warning) at catalog load.
    pub base_price_cents: i64,

    /// Quantity tiers, sorted ascending by `min_quantity`.
    pub tiers: Vec<PriceTier>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Add-Ons
// =============================================================================

/// The kind of an add-on. Each kind is exclusive: a configured item carries
/// at most one frame and at most one motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    /// Decorative frame around the photo.
    Frame,
    /// Overlay motif placed on the photo.
    Motif,
}

impl fmt::Display for AddOnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOnKind::Frame => write!(f, "frame"),
            AddOnKind::Motif => write!(f, "motif"),
        }
    }
}

/// A flat-price enhancement applied once per configured item, regardless of
/// quantity. Not quantity-tiered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddOn {
    /// Business identifier, e.g. "safari" or "tiger".
    pub add_on_id: String,

    /// Whether this is a frame or a motif.
    pub kind: AddOnKind,

    /// Display name shown to the customer.
    pub name: String,

    /// Flat surcharge in cents.
    pub price_cents: i64,

    /// Asset URL for the rendering surface (None for "no frame" entries).
    pub asset_url: Option<String>,
}

impl AddOn {
    /// Returns the surcharge as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// A shipping option keyed by region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingOption {
    /// Business identifier, e.g. "standard".
    pub id: String,

    /// Display name, e.g. "Standard Versand".
    pub name: String,

    /// Flat fee in cents.
    pub price_cents: i64,

    /// Region code, e.g. "DE" or "INTL".
    pub region: String,
}

impl ShippingOption {
    /// Returns the fee as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Item Configuration
// =============================================================================

/// Crop rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement of an overlay motif on the composed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct OverlayPlacement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Composition parameters chosen in the image editor.
///
/// Opaque to the pricing engine; carried through the cart for the rendering
/// collaborator. Every field is optional and defaults when absent, so a bare
/// `{}` request body is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct ItemConfiguration {
    /// Crop rectangle; `None` = full image.
    #[serde(default)]
    pub crop: Option<CropRect>,

    /// Zoom factor; `None` = 1.0.
    #[serde(default)]
    pub zoom: Option<f64>,

    /// Overlay motif placement; `None` = renderer default.
    #[serde(default)]
    pub overlay: Option<OverlayPlacement>,
}

// =============================================================================
// Configured Item
// =============================================================================

/// One user-configured, priced line the customer intends to purchase.
///
/// Uses the snapshot pattern to freeze all pricing data at add-to-cart time:
/// `unit_price_cents`, `total_price_cents` and the embedded `add_ons` never
/// change after creation. The item is immutable; the only mutations the cart
/// supports are removal and clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfiguredItem {
    /// Unique within the session (UUID v4), assigned at creation, never reused.
    pub id: String,

    /// Opaque session key supplied by the caller.
    pub session_id: String,

    /// References a catalog Product.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// Source photo reference (lookup code for the image-asset catalog).
    pub image_code: String,

    /// Quantity ordered (≥ 1).
    pub quantity: i64,

    /// Chosen add-ons at time of adding (frozen copies).
    pub add_ons: Vec<AddOn>,

    /// Crop/zoom/overlay parameters for the rendering collaborator.
    pub configuration: ItemConfiguration,

    /// Unit price in cents at time of adding (frozen tier lookup result).
    pub unit_price_cents: i64,

    /// Line total in cents: unit_price × quantity + Σ add-on surcharges.
    pub total_price_cents: i64,

    /// When this item was added to the cart. Immutable.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ConfiguredItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the frozen line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// A derived, point-in-time view of a cart's contents and computed totals.
///
/// Recomputed on every read; never persisted independently of its items.
/// `items` preserves insertion order (significant for display and stable
/// removal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub session_id: String,
    pub items: Vec<ConfiguredItem>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl CartSnapshot {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the shipping cost as Money.
    #[inline]
    pub fn shipping_cost(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Checks if the snapshot holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A finalized (accepted, unpaid) order.
///
/// Issued by the checkout finalizer for a non-empty cart. Payment and cart
/// clearing are responsibilities of external collaborators; this is purely
/// the authoritative total plus a tracking identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique for the process lifetime, e.g. "ZB1724400000000-0001".
    pub order_id: String,

    pub session_id: String,

    /// Number of configured items at finalization time.
    pub item_count: usize,

    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the authoritative total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_matches() {
        let bounded = PriceTier {
            min_quantity: 5,
            max_quantity: Some(9),
            unit_price_cents: 249,
        };
        assert!(!bounded.matches(4));
        assert!(bounded.matches(5));
        assert!(bounded.matches(9));
        assert!(!bounded.matches(10));

        let unbounded = PriceTier {
            min_quantity: 10,
            max_quantity: None,
            unit_price_cents: 199,
        };
        assert!(unbounded.matches(10));
        assert!(unbounded.matches(1000));
        assert!(!unbounded.matches(9));
    }

    #[test]
    fn test_add_on_kind_display() {
        assert_eq!(AddOnKind::Frame.to_string(), "frame");
        assert_eq!(AddOnKind::Motif.to_string(), "motif");
    }

    #[test]
    fn test_item_configuration_deserializes_from_empty_object() {
        let cfg: ItemConfiguration = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ItemConfiguration::default());
        assert!(cfg.crop.is_none());
        assert!(cfg.zoom.is_none());
        assert!(cfg.overlay.is_none());
    }
}
