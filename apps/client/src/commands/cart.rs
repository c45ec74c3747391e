//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart(R1)  ┌──────────┐                            │
//! │  │  Empty   │──────────────────►│ Cart @R1 │◄─── add/remove (R1)        │
//! │  │  Cart    │                   │          │                            │
//! │  └──────────┘◄──────────────────└──────────┘──── add (R2) → rejected    │
//! │        ▲      last item removed       │          (cart unchanged,       │
//! │        │                              │           changed = false)      │
//! │        └───────── clear_cart ─────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fusion_core::validation::validate_restaurant_id;
use fusion_core::{AddOutcome, Cart, CartLineItem, CartTotals, CoreError, LineKey, MenuItem, RemoveOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartStore, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub restaurant_id: Option<String>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().cloned().collect(),
            restaurant_id: cart.current_restaurant_id().map(str::to_string),
            totals: CartTotals::from(cart),
        }
    }
}

/// Result of a cart mutation.
///
/// `changed` is false for the two silent no-ops (adding from another
/// restaurant, removing an item that is not in the cart); `notice` then
/// says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    pub changed: bool,
    pub notice: Option<String>,
    pub cart: CartResponse,
}

impl CartUpdate {
    fn new(cart: &CartStore, changed: bool, notice: Option<String>) -> Self {
        CartUpdate {
            changed,
            notice,
            cart: cart.with_cart(|c| CartResponse::from(c)),
        }
    }

    fn from_add(cart: &CartStore, outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added { .. } => CartUpdate::new(cart, true, None),
            AddOutcome::Rejected { cart_restaurant_id } => CartUpdate::new(
                cart,
                false,
                Some(format!(
                    "Your cart has items from restaurant {}. Clear it to order from here.",
                    cart_restaurant_id
                )),
            ),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a menu item to the cart.
///
/// ## Behavior
/// - Empty cart: the cart now belongs to `restaurant_id`
/// - Same restaurant: quantity increases
/// - Other restaurant: nothing changes, `changed = false`
pub fn add_to_cart(
    cart: &CartStore,
    item: MenuItem,
    restaurant_id: String,
) -> Result<CartUpdate, ApiError> {
    debug!(item = %item.name, restaurant_id = %restaurant_id, "add_to_cart command");
    validate_restaurant_id(&restaurant_id)?;

    let outcome = cart.add_item(&item, &restaurant_id);
    Ok(CartUpdate::from_add(cart, outcome))
}

/// Adds a dish by name, resolving it through the catalog first.
///
/// ## User Workflow
/// ```text
/// menu screen "+" ──► add_menu_item("r1", "Pizza")
///                          │
///                          ├─ catalog.menu("r1")      (NOT_FOUND if unknown)
///                          ├─ menu.find("Pizza")      (NOT_FOUND if absent)
///                          └─ cart.add_item(...)
/// ```
pub async fn add_menu_item(
    catalog: &CatalogState,
    cart: &CartStore,
    restaurant_id: String,
    item_name: String,
) -> Result<CartUpdate, ApiError> {
    debug!(item = %item_name, restaurant_id = %restaurant_id, "add_menu_item command");
    validate_restaurant_id(&restaurant_id)?;

    let menu = catalog.inner().menu(&restaurant_id).await?;
    let item = menu
        .find(&item_name)
        .ok_or_else(|| CoreError::MenuItemNotFound {
            name: item_name.clone(),
            restaurant_id: restaurant_id.clone(),
        })?;

    let outcome = cart.add_item(item, &restaurant_id);
    Ok(CartUpdate::from_add(cart, outcome))
}

/// Removes one unit of a menu item from the cart.
pub fn remove_from_cart(
    cart: &CartStore,
    item: MenuItem,
    restaurant_id: String,
) -> Result<CartUpdate, ApiError> {
    debug!(item = %item.name, restaurant_id = %restaurant_id, "remove_from_cart command");
    validate_restaurant_id(&restaurant_id)?;

    let update = match cart.remove_item(&item, &restaurant_id) {
        RemoveOutcome::NotInCart => CartUpdate::new(
            cart,
            false,
            Some(format!("{} is not in your cart", item.name)),
        ),
        _ => CartUpdate::new(cart, true, None),
    };
    Ok(update)
}

/// Clears all items from the cart.
///
/// ## When Used
/// - User switches restaurant after a rejected add
/// - After checkout
pub fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");
    cart.clear();
    get_cart(cart)
}

/// Quantity of a dish in the cart (menu screen counters), 0 when absent.
pub fn item_quantity(cart: &CartStore, item_name: &str, restaurant_id: &str) -> u32 {
    let key = LineKey::new(item_name, restaurant_id);
    cart.with_cart(|c| c.get(&key).map_or(0, |line| line.quantity))
}
