//! # Price Catalog
//!
//! Read-only reference data for the pricing engine: products with ordered
//! quantity tiers, add-ons (frames, motifs) with flat surcharges, and
//! shipping options keyed by region.
//!
//! ## Catalog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │    │                                                                    │
//! │    ├── PriceCatalog::from_json(...)  ← external catalog file            │
//! │    │         or                                                         │
//! │    └── PriceCatalog::builtin()       ← compiled-in default data         │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        validate()  ── tier coverage, price signs ──► CatalogError       │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        Arc<PriceCatalog> shared with the cart store (point-in-time      │
//! │        snapshot; pricing never blocks on a remote call)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog that fails validation is rejected wholesale at load time, so
//! the tier lookup can rely on "exactly one tier matches any quantity ≥ 1"
//! during cart operations.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;
use crate::types::{AddOn, AddOnKind, PriceTier, Product, ShippingOption};

// =============================================================================
// Catalog
// =============================================================================

/// The price catalog: validated, immutable reference data.
///
/// Read-only from the engine's perspective. Catalog updates are modeled as
/// loading a new catalog, never as mutating this one; items already in a
/// cart keep the prices in effect when they were added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCatalog {
    products: Vec<Product>,
    add_ons: Vec<AddOn>,
    shipping_options: Vec<ShippingOption>,
}

impl PriceCatalog {
    /// Builds a catalog from its parts, validating tier coverage and prices.
    pub fn new(
        products: Vec<Product>,
        add_ons: Vec<AddOn>,
        shipping_options: Vec<ShippingOption>,
    ) -> Result<Self, CatalogError> {
        let catalog = PriceCatalog {
            products,
            add_ons,
            shipping_options,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from a JSON document.
    ///
    /// Expected shape:
    /// ```json
    /// {
    ///   "products": [{"product_id": "...", "name": "...",
    ///                 "base_price_cents": 299,
    ///                 "tiers": [{"min_quantity": 1, "max_quantity": 4,
    ///                            "unit_price_cents": 299}, ...]}],
    ///   "add_ons": [...],
    ///   "shipping_options": [...]
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: PriceCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The compiled-in default catalog.
    ///
    /// Mirrors the shop's standing offer: a digital download and a glossy
    /// print product with bulk-discount tiers, zoo/safari frames,
    /// tiger/elephant motifs, and DE + international shipping.
    pub fn builtin() -> Self {
        let products = vec![
            Product {
                product_id: "digital-single".to_string(),
                name: "Digitaler Download - Einzelbild".to_string(),
                base_price_cents: 299,
                tiers: vec![
                    tier(1, Some(4), 299),
                    tier(5, Some(9), 249),
                    tier(10, None, 199),
                ],
            },
            Product {
                product_id: "print-10x15-glossy".to_string(),
                name: "Druck 10x15cm Glossy".to_string(),
                base_price_cents: 499,
                tiers: vec![
                    tier(1, Some(9), 499),
                    tier(10, Some(24), 449),
                    tier(25, None, 399),
                ],
            },
        ];

        let add_ons = vec![
            AddOn {
                add_on_id: "zoo1".to_string(),
                kind: AddOnKind::Frame,
                name: "Zoo Rahmen 1".to_string(),
                price_cents: 149,
                asset_url: Some("https://assets.fotokiosk.example/rahmen/zoo1.png".to_string()),
            },
            AddOn {
                add_on_id: "safari".to_string(),
                kind: AddOnKind::Frame,
                name: "Safari Rahmen".to_string(),
                price_cents: 199,
                asset_url: Some("https://assets.fotokiosk.example/rahmen/safari.png".to_string()),
            },
            AddOn {
                add_on_id: "tiger".to_string(),
                kind: AddOnKind::Motif,
                name: "Tiger".to_string(),
                price_cents: 99,
                asset_url: Some("https://assets.fotokiosk.example/motive/tiger.png".to_string()),
            },
            AddOn {
                add_on_id: "elephant".to_string(),
                kind: AddOnKind::Motif,
                name: "Elefant".to_string(),
                price_cents: 129,
                asset_url: Some("https://assets.fotokiosk.example/motive/elephant.png".to_string()),
            },
        ];

        let shipping_options = vec![
            ShippingOption {
                id: "standard".to_string(),
                name: "Standard Versand".to_string(),
                price_cents: 499,
                region: "DE".to_string(),
            },
            ShippingOption {
                id: "express".to_string(),
                name: "Express Versand".to_string(),
                price_cents: 999,
                region: "DE".to_string(),
            },
            ShippingOption {
                id: "international".to_string(),
                name: "International".to_string(),
                price_cents: 1299,
                region: "INTL".to_string(),
            },
        ];

        PriceCatalog::new(products, add_ons, shipping_options)
            .expect("builtin catalog is valid")
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Finds a product by its business id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Finds an add-on by its business id.
    pub fn add_on(&self, add_on_id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.add_on_id == add_on_id)
    }

    /// Returns all add-ons of one kind (for the assets endpoints).
    pub fn add_ons_of_kind(&self, kind: AddOnKind) -> Vec<&AddOn> {
        self.add_ons.iter().filter(|a| a.kind == kind).collect()
    }

    /// Finds the first shipping option for a region, in declaration order.
    pub fn shipping_option(&self, region: &str) -> Option<&ShippingOption> {
        self.shipping_options.iter().find(|s| s.region == region)
    }

    /// All products, in declaration order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All add-ons, in declaration order.
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// All shipping options, in declaration order.
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.shipping_options
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validates the coverage invariant for every product's tier table and
    /// the sign of every price.
    ///
    /// ## Rules
    /// - Every product has at least one tier
    /// - The first tier starts at quantity 1
    /// - Tiers are contiguous: each tier starts where the previous ended + 1
    /// - Every tier except the last is bounded; the last is unbounded
    /// - No negative prices anywhere
    ///
    /// A `base_price_cents` that differs from the first tier's unit price is
    /// a labeling inconsistency, not an unusable catalog: it is logged as a
    /// warning and the tier table stays authoritative.
    fn validate(&self) -> Result<(), CatalogError> {
        for product in &self.products {
            Self::validate_tiers(product)?;

            if product.base_price_cents < 0 {
                return Err(CatalogError::NegativePrice {
                    entry_id: product.product_id.clone(),
                });
            }

            let first_tier_price = product.tiers[0].unit_price_cents;
            if product.base_price_cents != first_tier_price {
                warn!(
                    product_id = %product.product_id,
                    base_price_cents = product.base_price_cents,
                    first_tier_cents = first_tier_price,
                    "base price does not match first tier price; tiers are authoritative"
                );
            }
        }

        for add_on in &self.add_ons {
            if add_on.price_cents < 0 {
                return Err(CatalogError::NegativePrice {
                    entry_id: add_on.add_on_id.clone(),
                });
            }
        }

        for shipping in &self.shipping_options {
            if shipping.price_cents < 0 {
                return Err(CatalogError::NegativePrice {
                    entry_id: shipping.id.clone(),
                });
            }
        }

        Ok(())
    }

    fn validate_tiers(product: &Product) -> Result<(), CatalogError> {
        let malformed = |reason: &str| CatalogError::MalformedTiers {
            product_id: product.product_id.clone(),
            reason: reason.to_string(),
        };

        if product.tiers.is_empty() {
            return Err(malformed("product has no tiers"));
        }

        if product.tiers[0].min_quantity != 1 {
            return Err(malformed("first tier must start at quantity 1"));
        }

        let last_index = product.tiers.len() - 1;
        for (i, tier) in product.tiers.iter().enumerate() {
            if tier.unit_price_cents < 0 {
                return Err(CatalogError::NegativePrice {
                    entry_id: product.product_id.clone(),
                });
            }

            match tier.max_quantity {
                Some(max) => {
                    if i == last_index {
                        return Err(malformed("last tier must be unbounded"));
                    }
                    if max < tier.min_quantity {
                        return Err(malformed("tier max_quantity below min_quantity"));
                    }
                    // Contiguity: the next tier starts exactly where this ends
                    let next = &product.tiers[i + 1];
                    if next.min_quantity != max + 1 {
                        return Err(malformed("tiers must be contiguous without gaps or overlaps"));
                    }
                }
                None => {
                    if i != last_index {
                        return Err(malformed("only the last tier may be unbounded"));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Shorthand tier constructor for catalog data.
fn tier(min: i64, max: Option<i64>, cents: i64) -> PriceTier {
    PriceTier {
        min_quantity: min,
        max_quantity: max,
        unit_price_cents: cents,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_tiers(tiers: Vec<PriceTier>) -> Product {
        Product {
            product_id: "test-product".to_string(),
            name: "Test Product".to_string(),
            base_price_cents: tiers.first().map(|t| t.unit_price_cents).unwrap_or(0),
            tiers,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = PriceCatalog::builtin();
        assert!(catalog.product("digital-single").is_some());
        assert!(catalog.product("print-10x15-glossy").is_some());
        assert!(catalog.add_on("safari").is_some());
        assert!(catalog.shipping_option("DE").is_some());
        assert!(catalog.shipping_option("INTL").is_some());
    }

    #[test]
    fn test_lookup_unknown_ids() {
        let catalog = PriceCatalog::builtin();
        assert!(catalog.product("poster-a1").is_none());
        assert!(catalog.add_on("unicorn").is_none());
        assert!(catalog.shipping_option("MARS").is_none());
    }

    #[test]
    fn test_add_ons_of_kind() {
        let catalog = PriceCatalog::builtin();
        let frames = catalog.add_ons_of_kind(AddOnKind::Frame);
        let motifs = catalog.add_ons_of_kind(AddOnKind::Motif);
        assert_eq!(frames.len(), 2);
        assert_eq!(motifs.len(), 2);
        assert!(frames.iter().all(|a| a.kind == AddOnKind::Frame));
    }

    #[test]
    fn test_shipping_option_first_match_for_region() {
        let catalog = PriceCatalog::builtin();
        // DE has standard + express; declaration order picks standard
        let option = catalog.shipping_option("DE").unwrap();
        assert_eq!(option.id, "standard");
        assert_eq!(option.price_cents, 499);
    }

    #[test]
    fn test_rejects_empty_tiers() {
        let result = PriceCatalog::new(vec![product_with_tiers(vec![])], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::MalformedTiers { .. })));
    }

    #[test]
    fn test_rejects_first_tier_not_starting_at_one() {
        let product = product_with_tiers(vec![tier(2, None, 299)]);
        let result = PriceCatalog::new(vec![product], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::MalformedTiers { .. })));
    }

    #[test]
    fn test_rejects_tier_gap() {
        // [1-4], [6+] leaves quantity 5 uncovered
        let product = product_with_tiers(vec![tier(1, Some(4), 299), tier(6, None, 199)]);
        let result = PriceCatalog::new(vec![product], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::MalformedTiers { .. })));
    }

    #[test]
    fn test_rejects_tier_overlap() {
        // [1-5], [5+] double-covers quantity 5
        let product = product_with_tiers(vec![tier(1, Some(5), 299), tier(5, None, 199)]);
        let result = PriceCatalog::new(vec![product], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::MalformedTiers { .. })));
    }

    #[test]
    fn test_rejects_bounded_last_tier() {
        let product = product_with_tiers(vec![tier(1, Some(4), 299), tier(5, Some(9), 249)]);
        let result = PriceCatalog::new(vec![product], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::MalformedTiers { .. })));
    }

    #[test]
    fn test_rejects_negative_prices() {
        let product = product_with_tiers(vec![tier(1, None, -1)]);
        let result = PriceCatalog::new(vec![product], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::NegativePrice { .. })));
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = serde_json::to_string(&PriceCatalog::builtin()).unwrap();
        let catalog = PriceCatalog::from_json(&json).unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.add_ons().len(), 4);
        assert_eq!(catalog.shipping_options().len(), 3);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            PriceCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
