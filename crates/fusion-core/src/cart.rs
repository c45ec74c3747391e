//! # Cart
//!
//! The single-restaurant shopping cart.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │            add(item, R)                       add(item, R)              │
//! │  ┌─────────┐ ─────────────► ┌──────────────┐ ─────────────► qty + 1     │
//! │  │  Empty  │                │ Owned by R   │                            │
//! │  │ rest=∅  │ ◄───────────── │ rest = R     │ ── add(_, S≠R) ──► no-op   │
//! │  └─────────┘  remove last   └──────────────┘                            │
//! │       ▲        line (qty 1)        │                                    │
//! │       │                            │ remove(item, R), qty > 1 ─► qty-1  │
//! │       └──────── clear() ───────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line item belongs to `current_restaurant_id`
//! - Quantity is always >= 1; a line that would reach 0 is removed
//! - An empty cart has no restaurant
//!
//! Operations never fail. A cross-restaurant add and a remove of an absent
//! line are no-ops reported through [`AddOutcome`] and [`RemoveOutcome`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::money::{parse_price, Money};
use crate::types::MenuItem;

// =============================================================================
// Line Key
// =============================================================================

/// Composite identity of a line: menu item name + restaurant id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineKey {
    item_name: String,
    restaurant_id: String,
}

impl LineKey {
    pub fn new(item_name: impl Into<String>, restaurant_id: impl Into<String>) -> Self {
        LineKey {
            item_name: item_name.into(),
            restaurant_id: restaurant_id.into(),
        }
    }

    /// Key for `item` ordered from `restaurant_id`.
    pub fn for_item(item: &MenuItem, restaurant_id: &str) -> Self {
        LineKey::new(item.name.as_str(), restaurant_id)
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.item_name, self.restaurant_id)
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One distinct menu item and its quantity within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// The dish, as it was when first added.
    pub menu_item: MenuItem,

    /// Always >= 1 while the line exists.
    pub quantity: u32,

    /// Restaurant the dish was ordered from.
    pub restaurant_id: String,
}

impl CartLineItem {
    fn new(menu_item: MenuItem, restaurant_id: &str) -> Self {
        CartLineItem {
            menu_item,
            quantity: 1,
            restaurant_id: restaurant_id.to_string(),
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::for_item(&self.menu_item, &self.restaurant_id)
    }

    /// Parsed unit price; an unparseable price counts as zero.
    pub fn unit_price(&self) -> Money {
        self.menu_item.unit_price().unwrap_or_default()
    }

    /// Exact price × quantity, before any rounding.
    ///
    /// ## Silent Zero
    /// A price that does not parse contributes nothing instead of failing,
    /// so totals are always renderable.
    pub fn line_amount(&self) -> Decimal {
        parse_price(&self.menu_item.price)
            .unwrap_or(Decimal::ZERO)
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// [`line_amount`](Self::line_amount) rounded to minor units.
    pub fn line_total(&self) -> Money {
        Money::from_decimal(self.line_amount())
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The line now has `quantity` units.
    Added { quantity: u32 },

    /// The cart belongs to another restaurant; nothing changed.
    Rejected { cart_restaurant_id: String },
}

impl AddOutcome {
    /// True when the cart changed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

/// Result of [`Cart::remove_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// One unit removed; `quantity` units remain.
    Decremented { quantity: u32 },

    /// The last unit was removed and the line deleted.
    Removed,

    /// No such line; nothing changed.
    NotInCart,
}

impl RemoveOutcome {
    /// True when the cart changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, RemoveOutcome::NotInCart)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// A plain owned value: clones are independent snapshots, so observers can
/// hold one without seeing later mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: BTreeMap<LineKey, CartLineItem>,
    current_restaurant_id: Option<String>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `item` ordered from `restaurant_id`.
    ///
    /// ## Behavior
    /// - Empty cart: the cart is claimed by `restaurant_id`
    /// - Cart of another restaurant: rejected, cart unchanged
    /// - Line exists: quantity + 1
    /// - Otherwise: new line with quantity 1
    pub fn add_item(&mut self, item: &MenuItem, restaurant_id: &str) -> AddOutcome {
        match self.current_restaurant_id.as_deref() {
            Some(current) if current != restaurant_id => {
                return AddOutcome::Rejected {
                    cart_restaurant_id: current.to_string(),
                };
            }
            Some(_) => {}
            None => self.current_restaurant_id = Some(restaurant_id.to_string()),
        }

        let line = self
            .items
            .entry(LineKey::for_item(item, restaurant_id))
            .and_modify(|line| line.quantity = line.quantity.saturating_add(1))
            .or_insert_with(|| CartLineItem::new(item.clone(), restaurant_id));

        AddOutcome::Added {
            quantity: line.quantity,
        }
    }

    /// Removes one unit of `item` ordered from `restaurant_id`.
    ///
    /// ## Behavior
    /// - No such line: no-op
    /// - Quantity > 1: quantity - 1
    /// - Quantity == 1: line deleted; an emptied cart releases its restaurant
    pub fn remove_item(&mut self, item: &MenuItem, restaurant_id: &str) -> RemoveOutcome {
        let key = LineKey::for_item(item, restaurant_id);

        let Some(line) = self.items.get_mut(&key) else {
            return RemoveOutcome::NotInCart;
        };

        if line.quantity > 1 {
            line.quantity -= 1;
            return RemoveOutcome::Decremented {
                quantity: line.quantity,
            };
        }

        self.items.remove(&key);
        if self.items.is_empty() {
            self.current_restaurant_id = None;
        }
        RemoveOutcome::Removed
    }

    /// Resets to a fresh empty cart.
    ///
    /// Returns true if anything was discarded.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.is_empty();
        *self = Cart::new();
        had_items
    }

    // =========================================================================
    // Derived Reads
    // =========================================================================

    /// Σ price × quantity, rounded once; unparseable prices contribute zero.
    pub fn total_amount(&self) -> Money {
        let exact = self
            .items
            .values()
            .map(CartLineItem::line_amount)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        Money::from_decimal(exact)
    }

    /// Σ quantities.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Quantity of `item` from `restaurant_id`, 0 when absent.
    pub fn quantity_of(&self, item: &MenuItem, restaurant_id: &str) -> u32 {
        self.items
            .get(&LineKey::for_item(item, restaurant_id))
            .map_or(0, |line| line.quantity)
    }

    pub fn get(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.get(key)
    }

    /// Lines ordered by item name.
    pub fn lines(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.values()
    }

    /// Restaurant the cart is bound to, `None` when empty.
    pub fn current_restaurant_id(&self) -> Option<&str> {
        self.current_restaurant_id.as_deref()
    }

    /// True if an add from `restaurant_id` would be accepted.
    pub fn accepts(&self, restaurant_id: &str) -> bool {
        self.current_restaurant_id
            .as_deref()
            .map_or(true, |current| current == restaurant_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total_cents: cart.total_amount().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> MenuItem {
        MenuItem::new("Pizza", "10.0")
    }

    fn burger() -> MenuItem {
        MenuItem::new("Burger", "5.0")
    }

    #[test]
    fn test_first_add_claims_restaurant() {
        let mut cart = Cart::new();
        assert_eq!(cart.current_restaurant_id(), None);

        let outcome = cart.add_item(&pizza(), "R1");

        assert_eq!(outcome, AddOutcome::Added { quantity: 1 });
        assert_eq!(cart.current_restaurant_id(), Some("R1"));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_amount(), Money::from_cents(1000));
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for n in 1..=7 {
            assert_eq!(cart.add_item(&pizza(), "R1"), AddOutcome::Added { quantity: n });
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 7);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_cross_restaurant_add_is_rejected() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        cart.add_item(&pizza(), "R1");
        let before = cart.clone();

        let outcome = cart.add_item(&burger(), "R2");

        assert_eq!(
            outcome,
            AddOutcome::Rejected {
                cart_restaurant_id: "R1".to_string()
            }
        );
        assert!(!outcome.is_accepted());
        assert_eq!(cart, before);
        assert_eq!(cart.current_restaurant_id(), Some("R1"));
        assert!(!cart.accepts("R2"));
        assert!(cart.accepts("R1"));
    }

    #[test]
    fn test_same_name_different_restaurant_is_rejected() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");

        assert!(!cart.add_item(&pizza(), "R2").is_accepted());
        assert_eq!(cart.quantity_of(&pizza(), "R2"), 0);
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 1);
    }

    #[test]
    fn test_remove_decrements() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        cart.add_item(&pizza(), "R1");

        assert_eq!(
            cart.remove_item(&pizza(), "R1"),
            RemoveOutcome::Decremented { quantity: 1 }
        );
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 1);
        assert_eq!(cart.current_restaurant_id(), Some("R1"));
    }

    #[test]
    fn test_removing_last_line_releases_restaurant() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");

        assert_eq!(cart.remove_item(&pizza(), "R1"), RemoveOutcome::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.current_restaurant_id(), None);

        // The cart is restaurant-agnostic again.
        assert!(cart.add_item(&burger(), "R2").is_accepted());
        assert_eq!(cart.current_restaurant_id(), Some("R2"));
    }

    #[test]
    fn test_removing_one_of_several_lines_keeps_restaurant() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        cart.add_item(&burger(), "R1");

        assert_eq!(cart.remove_item(&pizza(), "R1"), RemoveOutcome::Removed);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.current_restaurant_id(), Some("R1"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.remove_item(&pizza(), "R1"), RemoveOutcome::NotInCart);
        assert_eq!(cart, Cart::new());

        cart.add_item(&pizza(), "R1");
        let before = cart.clone();
        let outcome = cart.remove_item(&burger(), "R1");
        assert_eq!(outcome, RemoveOutcome::NotInCart);
        assert!(!outcome.is_applied());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_unparseable_price_contributes_zero() {
        let mut cart = Cart::new();
        let mystery = MenuItem::new("Chef's Special", "ask staff");
        cart.add_item(&pizza(), "R1");
        cart.add_item(&mystery, "R1");
        cart.add_item(&mystery, "R1");

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_amount(), Money::from_cents(1000));
    }

    #[test]
    fn test_total_sums_lines() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        cart.add_item(&pizza(), "R1");
        cart.add_item(&MenuItem::new("Coke", "1.25"), "R1");

        assert_eq!(cart.total_amount(), Money::from_cents(2125));
        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_cents, 2125);
    }

    #[test]
    fn test_sub_cent_prices_round_after_multiplying() {
        let mut cart = Cart::new();
        let chai = MenuItem::new("Chai", "0.125");
        for _ in 0..8 {
            cart.add_item(&chai, "R1");
        }
        assert_eq!(cart.total_amount(), Money::from_cents(100));
        assert_eq!(CartTotals::from(&cart).total_cents, 100);

        let mut cart = Cart::new();
        let mint = MenuItem::new("Mint", "0.005");
        for _ in 0..100 {
            cart.add_item(&mint, "R1");
        }
        assert_eq!(cart.total_amount(), Money::from_cents(50));
    }

    #[test]
    fn test_total_rounds_sum_not_lines() {
        let mut cart = Cart::new();
        cart.add_item(&MenuItem::new("Chai", "0.125"), "R1");
        cart.add_item(&MenuItem::new("Mint", "0.125"), "R1");

        // 0.125 + 0.125 = 0.25; rounding each line first would give 0.24.
        assert_eq!(cart.total_amount(), Money::from_cents(25));
    }

    #[test]
    fn test_clear_always_empties() {
        let mut cart = Cart::new();
        assert!(!cart.clear());

        cart.add_item(&pizza(), "R1");
        cart.add_item(&burger(), "R1");
        assert!(cart.clear());

        assert_eq!(cart.item_count(), 0);
        assert!(cart.total_amount().is_zero());
        assert_eq!(cart.current_restaurant_id(), None);
        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn test_lines_and_keys() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        cart.add_item(&burger(), "R1");

        let names: Vec<_> = cart.lines().map(|l| l.menu_item.name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Pizza"]);

        let key = LineKey::for_item(&pizza(), "R1");
        assert_eq!(key.to_string(), "Pizza_R1");
        assert_eq!(cart.get(&key).map(|l| l.quantity), Some(1));
        assert_eq!(cart.get(&key).map(CartLineItem::key), Some(key));
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut cart = Cart::new();
        cart.add_item(&pizza(), "R1");
        let snapshot = cart.clone();

        cart.add_item(&pizza(), "R1");

        assert_eq!(snapshot.quantity_of(&pizza(), "R1"), 1);
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 2);
    }

    /// Walks the reference scenario end to end.
    #[test]
    fn test_pizza_burger_scenario() {
        let mut cart = Cart::new();

        cart.add_item(&pizza(), "R1");
        assert_eq!(cart.current_restaurant_id(), Some("R1"));
        assert_eq!(cart.total_amount().to_string(), "10.00");
        assert_eq!(cart.item_count(), 1);

        cart.add_item(&pizza(), "R1");
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 2);
        assert_eq!(cart.total_amount().to_string(), "20.00");

        assert!(!cart.add_item(&burger(), "R2").is_accepted());
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 2);

        cart.remove_item(&pizza(), "R1");
        assert_eq!(cart.quantity_of(&pizza(), "R1"), 1);
        assert_eq!(cart.total_amount().to_string(), "10.00");

        cart.remove_item(&pizza(), "R1");
        assert_eq!(cart.current_restaurant_id(), None);
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total_amount().is_zero());
    }
}
