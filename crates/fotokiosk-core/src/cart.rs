//! # Cart Store
//!
//! Session-keyed store of configured items; the cart state machine.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Locking                                   │
//! │                                                                         │
//! │  CartStore                                                              │
//! │  └── RwLock<HashMap<session_id, Arc<Mutex<Vec<ConfiguredItem>>>>>       │
//! │           │                         │                                   │
//! │           │                         └── per-session critical section:   │
//! │           │                             add/remove/clear/snapshot on    │
//! │           │                             ONE session serialize here      │
//! │           │                                                             │
//! │           └── held only to look up / insert the session entry; never    │
//! │               across an operation, so different sessions proceed in     │
//! │               parallel with no shared mutable state                     │
//! │                                                                         │
//! │  Catalog lookups and pricing happen BEFORE the session lock is taken:   │
//! │  nothing inside the critical section blocks or does I/O.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The store exclusively owns the `session_id → items` mapping. A
//! `ConfiguredItem`, once added, belongs solely to its session entry and is
//! only ever destroyed by removal, clear, or session expiry (an external
//! TTL policy outside this crate).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::PriceCatalog;
use crate::error::CoreError;
use crate::money::Money;
use crate::pricing::price_line;
use crate::types::{AddOn, CartSnapshot, ConfiguredItem, ItemConfiguration};
use crate::validation::{
    validate_add_on_exclusivity, validate_image_code, validate_quantity, validate_session_id,
};
use crate::FREE_SHIPPING_THRESHOLD_CENTS;

// =============================================================================
// Shipping Policy
// =============================================================================

/// Shipping rule applied when computing a cart snapshot.
///
/// Shipping is free only when the subtotal STRICTLY exceeds the threshold.
/// A subtotal equal to the threshold still pays the flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Flat fee charged below (or at) the threshold.
    pub flat_fee: Money,

    /// Free-shipping threshold (default 50.00 €).
    pub free_threshold: Money,
}

impl ShippingPolicy {
    /// Policy with the default 50.00 € threshold.
    pub fn new(flat_fee: Money) -> Self {
        ShippingPolicy {
            flat_fee,
            free_threshold: Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS),
        }
    }

    /// Policy with an explicit threshold.
    pub fn with_threshold(flat_fee: Money, free_threshold: Money) -> Self {
        ShippingPolicy {
            flat_fee,
            free_threshold,
        }
    }

    /// Shipping cost for a given subtotal.
    ///
    /// The literal threshold rule also applies to an empty cart (subtotal
    /// zero): the flat fee is NOT waived. Whether an empty cart should show
    /// zero shipping instead is a product-policy question; checkout never
    /// observes it because empty carts cannot be finalized.
    pub fn shipping_cost(&self, subtotal: Money) -> Money {
        if subtotal > self.free_threshold {
            Money::zero()
        } else {
            self.flat_fee
        }
    }
}

// =============================================================================
// Add-Item Request
// =============================================================================

/// Explicit input shape for adding an item to a cart.
///
/// Every recognized field is enumerated here; there is no loose JSON bag.
/// `unit_price` is deliberately absent — it is always derived from the
/// catalog, never client-supplied.
#[derive(Debug, Clone)]
pub struct NewItemRequest {
    /// Catalog product to order.
    pub product_id: String,

    /// Photo lookup code (source image reference).
    pub image_code: String,

    /// Quantity ≥ 1. Absent-means-1 defaulting happens at the API edge.
    pub quantity: i64,

    /// Catalog ids of chosen add-ons (at most one frame, one motif).
    pub add_on_ids: Vec<String>,

    /// Crop/zoom/overlay parameters, opaque to pricing.
    pub configuration: ItemConfiguration,
}

// =============================================================================
// Cart Store
// =============================================================================

/// Session-keyed collection of configured items.
///
/// Constructed once per process and passed by reference to every operation
/// (no ambient global). Holds a point-in-time catalog snapshot so pricing
/// inside `add_item` never reaches out of memory.
#[derive(Debug)]
pub struct CartStore {
    catalog: Arc<PriceCatalog>,
    policy: ShippingPolicy,
    sessions: RwLock<HashMap<String, Arc<Mutex<Vec<ConfiguredItem>>>>>,
}

impl CartStore {
    /// Creates an empty store over a catalog snapshot.
    pub fn new(catalog: Arc<PriceCatalog>, policy: ShippingPolicy) -> Self {
        CartStore {
            catalog,
            policy,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The catalog snapshot this store prices against.
    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Returns the session's item list, creating the entry on first use.
    ///
    /// No prior "create session" step exists; a session comes into being
    /// the first time anything touches it.
    fn session_entry(&self, session_id: &str) -> Arc<Mutex<Vec<ConfiguredItem>>> {
        {
            let sessions = self.sessions.read().expect("session map lock poisoned");
            if let Some(entry) = sessions.get(session_id) {
                return Arc::clone(entry);
            }
        }

        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Vec::new()))),
        )
    }

    /// Adds a configured item to a session's cart.
    ///
    /// ## Behavior
    /// - Validates quantity, image code and session id
    /// - Resolves the product and every add-on against the catalog
    /// - Enforces add-on exclusivity (one frame, one motif)
    /// - Computes and FREEZES the unit price and line total; catalog
    ///   changes after this moment never reprice the item
    /// - Assigns a fresh UUID and appends in insertion order
    ///
    /// ## Errors
    /// `UnknownProduct`, `UnknownAddOn`, `ConflictingAddOn`, `Validation`,
    /// or `NoMatchingTier` (catalog defect).
    pub fn add_item(
        &self,
        session_id: &str,
        request: NewItemRequest,
    ) -> Result<ConfiguredItem, CoreError> {
        validate_session_id(session_id)?;
        validate_quantity(request.quantity)?;
        let image_code = validate_image_code(&request.image_code)?;

        let product = self
            .catalog
            .product(&request.product_id)
            .ok_or_else(|| CoreError::UnknownProduct(request.product_id.clone()))?;

        let add_ons: Vec<AddOn> = request
            .add_on_ids
            .iter()
            .map(|id| {
                self.catalog
                    .add_on(id)
                    .cloned()
                    .ok_or_else(|| CoreError::UnknownAddOn(id.clone()))
            })
            .collect::<Result<_, _>>()?;
        validate_add_on_exclusivity(&add_ons)?;

        // All catalog work is done; the critical section below is only a push.
        let price = price_line(product, request.quantity, &add_ons)?;

        let item = ConfiguredItem {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            image_code,
            quantity: request.quantity,
            add_ons,
            configuration: request.configuration,
            unit_price_cents: price.unit_price.cents(),
            total_price_cents: price.total_price.cents(),
            created_at: Utc::now(),
        };

        let entry = self.session_entry(session_id);
        let mut items = entry.lock().expect("session cart lock poisoned");
        items.push(item.clone());

        debug!(
            session_id,
            item_id = %item.id,
            product_id = %item.product_id,
            quantity = item.quantity,
            total = %item.total_price(),
            "item added to cart"
        );
        Ok(item)
    }

    /// Removes the item with the given id from a session's cart.
    ///
    /// Idempotent by contract: absence is a no-op, never an error, so
    /// repeated or late-arriving removal requests are safe to retry.
    /// Returns whether an item was actually removed.
    pub fn remove_item(&self, session_id: &str, item_id: &str) -> bool {
        let entry = {
            let sessions = self.sessions.read().expect("session map lock poisoned");
            match sessions.get(session_id) {
                Some(entry) => Arc::clone(entry),
                None => return false,
            }
        };

        let mut items = entry.lock().expect("session cart lock poisoned");
        let before = items.len();
        items.retain(|item| item.id != item_id);
        let removed = items.len() != before;

        if removed {
            debug!(session_id, item_id, "item removed from cart");
        }
        removed
    }

    /// Empties a session's cart. No-op for unknown or already-empty sessions.
    pub fn clear(&self, session_id: &str) {
        let entry = {
            let sessions = self.sessions.read().expect("session map lock poisoned");
            match sessions.get(session_id) {
                Some(entry) => Arc::clone(entry),
                None => return,
            }
        };

        let mut items = entry.lock().expect("session cart lock poisoned");
        if !items.is_empty() {
            debug!(session_id, item_count = items.len(), "cart cleared");
            items.clear();
        }
    }

    /// Computes a derived, point-in-time snapshot of a session's cart.
    ///
    /// Recomputed on every read: `subtotal` is the sum of the items' frozen
    /// line totals, shipping follows the strictly-greater-than threshold
    /// rule, `total = subtotal + shipping`. Item order is insertion order.
    pub fn snapshot(&self, session_id: &str) -> CartSnapshot {
        let items: Vec<ConfiguredItem> = {
            let sessions = self.sessions.read().expect("session map lock poisoned");
            match sessions.get(session_id) {
                Some(entry) => entry
                    .lock()
                    .expect("session cart lock poisoned")
                    .clone(),
                None => Vec::new(),
            }
        };

        let subtotal: Money = items.iter().map(|item| item.total_price()).sum();
        let shipping = self.policy.shipping_cost(subtotal);

        CartSnapshot {
            session_id: session_id.to_string(),
            items,
            subtotal_cents: subtotal.cents(),
            shipping_cents: shipping.cents(),
            total_cents: (subtotal + shipping).cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddOnKind, PriceTier, Product};

    fn store() -> CartStore {
        CartStore::new(
            Arc::new(PriceCatalog::builtin()),
            ShippingPolicy::new(Money::from_cents(499)),
        )
    }

    fn request(product_id: &str, quantity: i64, add_on_ids: &[&str]) -> NewItemRequest {
        NewItemRequest {
            product_id: product_id.to_string(),
            image_code: "ZB-1234".to_string(),
            quantity,
            add_on_ids: add_on_ids.iter().map(|s| s.to_string()).collect(),
            configuration: ItemConfiguration::default(),
        }
    }

    #[test]
    fn test_add_item_freezes_tier_price() {
        let store = store();
        let item = store
            .add_item("session-a", request("digital-single", 3, &[]))
            .unwrap();

        assert_eq!(item.unit_price_cents, 299);
        assert_eq!(item.total_price_cents, 897);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.session_id, "session-a");
    }

    #[test]
    fn test_add_item_includes_add_on_surcharges() {
        let store = store();
        let item = store
            .add_item("s", request("digital-single", 2, &["safari", "tiger"]))
            .unwrap();

        // 2.99 € × 2 + 1.99 € + 0.99 € = 8.96 €
        assert_eq!(item.total_price_cents, 896);
        assert_eq!(item.add_ons.len(), 2);
    }

    #[test]
    fn test_add_item_unknown_product() {
        let store = store();
        let err = store
            .add_item("s", request("poster-a1", 1, &[]))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct(id) if id == "poster-a1"));
    }

    #[test]
    fn test_add_item_unknown_add_on() {
        let store = store();
        let err = store
            .add_item("s", request("digital-single", 1, &["unicorn"]))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownAddOn(id) if id == "unicorn"));
    }

    #[test]
    fn test_add_item_conflicting_add_ons() {
        let store = store();
        let err = store
            .add_item("s", request("digital-single", 1, &["zoo1", "safari"]))
            .unwrap_err();
        assert!(matches!(err, CoreError::ConflictingAddOn { .. }));
    }

    #[test]
    fn test_add_item_invalid_quantity() {
        let store = store();
        assert!(matches!(
            store.add_item("s", request("digital-single", 0, &[])),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_item_ids_are_unique() {
        let store = store();
        let a = store.add_item("s", request("digital-single", 1, &[])).unwrap();
        let b = store.add_item("s", request("digital-single", 1, &[])).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let store = store();
        let item = store.add_item("s", request("digital-single", 1, &[])).unwrap();

        assert!(store.remove_item("s", &item.id));
        let after_first = store.snapshot("s");

        // Second removal with the same id is a no-op, not an error
        assert!(!store.remove_item("s", &item.id));
        assert_eq!(store.snapshot("s"), after_first);
        assert!(after_first.is_empty());

        // Unknown sessions are also a no-op
        assert!(!store.remove_item("ghost-session", "whatever"));
    }

    #[test]
    fn test_clear() {
        let store = store();
        store.add_item("s", request("digital-single", 2, &[])).unwrap();
        store.add_item("s", request("print-10x15-glossy", 1, &[])).unwrap();

        store.clear("s");
        assert!(store.snapshot("s").is_empty());

        // Clearing again (and clearing unknown sessions) is fine
        store.clear("s");
        store.clear("ghost-session");
    }

    #[test]
    fn test_snapshot_preserves_insertion_order_but_subtotal_is_order_independent() {
        let store = store();
        store.add_item("ab", request("digital-single", 1, &[])).unwrap();
        store.add_item("ab", request("print-10x15-glossy", 1, &[])).unwrap();

        store.add_item("ba", request("print-10x15-glossy", 1, &[])).unwrap();
        store.add_item("ba", request("digital-single", 1, &[])).unwrap();

        let ab = store.snapshot("ab");
        let ba = store.snapshot("ba");

        assert_eq!(ab.subtotal_cents, ba.subtotal_cents);
        assert_eq!(ab.items[0].product_id, "digital-single");
        assert_eq!(ab.items[1].product_id, "print-10x15-glossy");
        assert_eq!(ba.items[0].product_id, "print-10x15-glossy");
        assert_eq!(ba.items[1].product_id, "digital-single");
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        store.add_item("alice", request("digital-single", 1, &[])).unwrap();
        store.add_item("bob", request("digital-single", 2, &[])).unwrap();

        assert_eq!(store.snapshot("alice").items.len(), 1);
        assert_eq!(store.snapshot("bob").items.len(), 1);

        store.clear("alice");
        assert!(store.snapshot("alice").is_empty());
        assert_eq!(store.snapshot("bob").items.len(), 1);
    }

    /// Free-shipping boundary uses a custom catalog so the subtotal can hit
    /// exactly 50.00 € and 50.01 €.
    fn boundary_store() -> CartStore {
        let products = vec![
            Product {
                product_id: "exactly-fifty".to_string(),
                name: "Exactly Fifty".to_string(),
                base_price_cents: 5000,
                tiers: vec![PriceTier {
                    min_quantity: 1,
                    max_quantity: None,
                    unit_price_cents: 5000,
                }],
            },
            Product {
                product_id: "fifty-oh-one".to_string(),
                name: "Fifty Oh One".to_string(),
                base_price_cents: 5001,
                tiers: vec![PriceTier {
                    min_quantity: 1,
                    max_quantity: None,
                    unit_price_cents: 5001,
                }],
            },
        ];
        let catalog = PriceCatalog::new(products, vec![], vec![]).unwrap();
        CartStore::new(Arc::new(catalog), ShippingPolicy::new(Money::from_cents(499)))
    }

    #[test]
    fn test_free_shipping_threshold_is_strictly_greater_than() {
        let store = boundary_store();

        let mut req = request("exactly-fifty", 1, &[]);
        req.add_on_ids.clear();
        store.add_item("at-threshold", req).unwrap();
        let at = store.snapshot("at-threshold");
        assert_eq!(at.subtotal_cents, 5000);
        assert_eq!(at.shipping_cents, 499); // 50.00 € is NOT free
        assert_eq!(at.total_cents, 5499);

        store.add_item("over-threshold", request("fifty-oh-one", 1, &[])).unwrap();
        let over = store.snapshot("over-threshold");
        assert_eq!(over.subtotal_cents, 5001);
        assert_eq!(over.shipping_cents, 0); // 50.01 € is free
        assert_eq!(over.total_cents, 5001);
    }

    #[test]
    fn test_empty_cart_snapshot_carries_flat_fee() {
        // Literal threshold rule: zero subtotal does not exceed 50.00 €,
        // so the flat fee shows even with no items.
        let store = store();
        let snapshot = store.snapshot("fresh-session");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.subtotal_cents, 0);
        assert_eq!(snapshot.shipping_cents, 499);
        assert_eq!(snapshot.total_cents, 499);
    }

    #[test]
    fn test_concurrent_adds_never_lose_an_item() {
        let store = Arc::new(store());
        let threads = 8;
        let adds_per_thread = 25;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..adds_per_thread {
                        store
                            .add_item("shared-session", request("digital-single", 1, &[]))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot("shared-session");
        assert_eq!(snapshot.items.len(), threads * adds_per_thread);
        assert_eq!(
            snapshot.subtotal_cents,
            (threads * adds_per_thread) as i64 * 299
        );
    }
}
