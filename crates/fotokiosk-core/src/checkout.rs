//! # Checkout Finalizer
//!
//! Validates a non-empty cart, computes the authoritative total, and issues
//! an order identifier.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  finalize(session)                                                      │
//! │    │                                                                    │
//! │    ├── cart empty? ──────────► EmptyCart error (user-correctable)       │
//! │    │                                                                    │
//! │    ├── snapshot(session) ────► authoritative subtotal/shipping/total    │
//! │    │                                                                    │
//! │    └── issue order id ───────► unique for the process lifetime          │
//! │                                                                         │
//! │  Does NOT clear the cart. Does NOT process payment. Both belong to      │
//! │  external collaborators; this is "accept the order, hand out a          │
//! │  tracking identifier" and nothing more.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::info;

use crate::cart::CartStore;
use crate::error::CoreError;
use crate::types::Order;

// =============================================================================
// Checkout Finalizer
// =============================================================================

/// Issues order identifiers and finalizes carts.
///
/// Order ids combine a millisecond timestamp with a process-wide monotonic
/// counter ("ZB" prefix as printed on the shop's receipts), so they are
/// unique across all orders finalized in one process even when two
/// checkouts land in the same millisecond.
#[derive(Debug, Default)]
pub struct CheckoutFinalizer {
    sequence: AtomicU64,
}

impl CheckoutFinalizer {
    /// Creates a finalizer with a fresh order sequence.
    pub fn new() -> Self {
        CheckoutFinalizer {
            sequence: AtomicU64::new(0),
        }
    }

    /// Finalizes a session's cart into an accepted, unpaid order.
    ///
    /// Consumes the cart's current contents exactly once per checkout
    /// attempt: the returned total is the snapshot total at this moment.
    ///
    /// ## Errors
    /// `EmptyCart` if the session holds no items.
    pub fn finalize(&self, carts: &CartStore, session_id: &str) -> Result<Order, CoreError> {
        let snapshot = carts.snapshot(session_id);
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart {
                session_id: session_id.to_string(),
            });
        }

        let order = Order {
            order_id: self.next_order_id(),
            session_id: session_id.to_string(),
            item_count: snapshot.items.len(),
            subtotal_cents: snapshot.subtotal_cents,
            shipping_cents: snapshot.shipping_cents,
            total_cents: snapshot.total_cents,
            created_at: Utc::now(),
        };

        info!(
            order_id = %order.order_id,
            session_id,
            item_count = order.item_count,
            total = %order.total(),
            "order finalized"
        );
        Ok(order)
    }

    fn next_order_id(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("ZB{}-{:04}", Utc::now().timestamp_millis(), sequence)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
