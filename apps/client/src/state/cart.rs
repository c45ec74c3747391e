//! # Cart Store
//!
//! The session's one cart, published to observers.
//!
//! The cart lives inside a `tokio::sync::watch` channel:
//! - Every mutation runs under the channel's lock, so concurrent adds of
//!   the same item never lose an increment
//! - Observers are woken only when the cart actually changed; a rejected
//!   add or a remove of an absent item publishes nothing
//! - Readers get clones, never a reference into the live cart
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore                                       │
//! │                                                                         │
//! │  add_item ──┐                                                           │
//! │  remove ────┼──► send_if_modified(|cart| op(cart).changed())            │
//! │  clear ─────┘             │                                             │
//! │                           │ true                                        │
//! │                           ▼                                             │
//! │               watch::Receiver<Cart>  (cart badge, menu counters,        │
//! │                                       checkout screen)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fusion_core::{AddOutcome, Cart, CartTotals, MenuItem, RemoveOutcome};
use tokio::sync::watch;
use tracing::debug;

/// Observable cart for one session.
#[derive(Debug)]
pub struct CartStore {
    tx: watch::Sender<Cart>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Cart::new());
        CartStore { tx }
    }

    /// Adds one unit of `item` from `restaurant_id`.
    pub fn add_item(&self, item: &MenuItem, restaurant_id: &str) -> AddOutcome {
        let mut outcome = AddOutcome::Rejected {
            cart_restaurant_id: String::new(),
        };
        self.tx.send_if_modified(|cart| {
            outcome = cart.add_item(item, restaurant_id);
            outcome.is_accepted()
        });

        match &outcome {
            AddOutcome::Added { quantity } => {
                debug!(item = %item.name, restaurant_id, quantity, "Cart item added");
            }
            AddOutcome::Rejected { cart_restaurant_id } => {
                debug!(
                    item = %item.name,
                    restaurant_id,
                    cart_restaurant_id = %cart_restaurant_id,
                    "Add rejected: cart belongs to another restaurant"
                );
            }
        }
        outcome
    }

    /// Removes one unit of `item` from `restaurant_id`.
    pub fn remove_item(&self, item: &MenuItem, restaurant_id: &str) -> RemoveOutcome {
        let mut outcome = RemoveOutcome::NotInCart;
        self.tx.send_if_modified(|cart| {
            outcome = cart.remove_item(item, restaurant_id);
            outcome.is_applied()
        });

        match outcome {
            RemoveOutcome::NotInCart => {
                debug!(item = %item.name, restaurant_id, "Remove ignored: item not in cart");
            }
            RemoveOutcome::Decremented { .. } | RemoveOutcome::Removed => {
                debug!(item = %item.name, restaurant_id, ?outcome, "Cart item removed");
            }
        }
        outcome
    }

    /// Empties the cart. Returns true if anything was discarded.
    pub fn clear(&self) -> bool {
        let cleared = self.tx.send_if_modified(Cart::clear);
        debug!(cleared, "Cart cleared");
        cleared
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Subscribes to cart changes.
    ///
    /// The receiver starts at the current cart; `changed()` resolves after
    /// the next effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }

    /// Independent copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.tx.borrow().clone()
    }

    /// Executes a function with read access to the cart.
    ///
    /// Mutations wait while `f` runs; keep it short.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.tx.borrow())
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn pizza() -> MenuItem {
        MenuItem::new("Pizza", "10.0")
    }

    fn burger() -> MenuItem {
        MenuItem::new("Burger", "5.0")
    }

    #[tokio::test]
    async fn test_accepted_add_notifies() {
        let store = CartStore::new();
        let mut rx = store.subscribe();

        assert!(store.add_item(&pizza(), "R1").is_accepted());

        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rx.borrow_and_update().item_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_add_does_not_notify() {
        let store = CartStore::new();
        store.add_item(&pizza(), "R1");
        let mut rx = store.subscribe();

        let outcome = store.add_item(&burger(), "R2");
        assert_eq!(
            outcome,
            AddOutcome::Rejected {
                cart_restaurant_id: "R1".into()
            }
        );
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_noop_remove_and_clear_do_not_notify() {
        let store = CartStore::new();
        let mut rx = store.subscribe();

        assert_eq!(store.remove_item(&pizza(), "R1"), RemoveOutcome::NotInCart);
        assert!(!store.clear());
        assert!(!rx.has_changed().unwrap());

        store.add_item(&pizza(), "R1");
        rx.borrow_and_update();
        assert!(store.clear());
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_remove_for_other_restaurant_is_ignored() {
        let store = CartStore::new();
        store.add_item(&pizza(), "R1");
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        assert_eq!(store.remove_item(&pizza(), "R2"), RemoveOutcome::NotInCart);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.snapshot().quantity_of(&pizza(), "R1"), 1);

        assert_eq!(store.remove_item(&pizza(), "R1"), RemoveOutcome::Removed);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_add_reports_outcome_from_the_cart() {
        let store = CartStore::new();
        assert_eq!(
            store.add_item(&pizza(), "R1"),
            AddOutcome::Added { quantity: 1 }
        );
        assert_eq!(
            store.add_item(&pizza(), "R1"),
            AddOutcome::Added { quantity: 2 }
        );
        assert_eq!(
            store.add_item(&burger(), "R2"),
            AddOutcome::Rejected {
                cart_restaurant_id: "R1".into()
            }
        );
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = CartStore::new();
        store.add_item(&pizza(), "R1");
        let before = store.snapshot();

        store.add_item(&pizza(), "R1");

        assert_eq!(before.quantity_of(&pizza(), "R1"), 1);
        assert_eq!(store.snapshot().quantity_of(&pizza(), "R1"), 2);
        assert_eq!(store.totals().total_cents, 2000);
    }

    #[test]
    fn test_concurrent_adds_lose_nothing() {
        let store = Arc::new(CartStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.add_item(&pizza(), "R1");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.with_cart(|c| c.quantity_of(&pizza(), "R1")), 800);
    }

    #[test]
    fn test_reference_scenario() {
        let store = CartStore::new();

        store.add_item(&pizza(), "R1");
        store.add_item(&pizza(), "R1");
        assert!(!store.add_item(&burger(), "R2").is_accepted());
        assert_eq!(
            store.remove_item(&pizza(), "R1"),
            RemoveOutcome::Decremented { quantity: 1 }
        );
        assert_eq!(store.totals().total_cents, 1000);
        assert_eq!(store.remove_item(&pizza(), "R1"), RemoveOutcome::Removed);

        let cart = store.snapshot();
        assert!(cart.is_empty());
        assert_eq!(cart.current_restaurant_id(), None);
        assert_eq!(store.totals().item_count, 0);
    }
}
