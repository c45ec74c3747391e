//! # Domain Types
//!
//! Core domain types used throughout FusionCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Restaurant    │   │ RestaurantMenu  │   │    MenuItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (tree key)  │──►│  restaurant_id  │──►│  name (identity)│       │
//! │  │  name, cuisine  │   │  items          │   │  price (text)   │       │
//! │  │  rating, is_veg │   └─────────────────┘   │  image, type    │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   UserHandle    │   │   AuthState     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  uid, email     │   │  Initial        │                             │
//! │  │  is_anonymous   │   │  Loading        │                             │
//! │  │  id_token       │   │  Success, Error │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog records keep the tree store's field names on the wire
//! (`deliveryTime`, `costForTwo`, `isVeg`, `type`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on a restaurant's menu.
///
/// `name` is the item's identity within one restaurant's menu. The price is
/// kept exactly as the catalog stores it and parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Display name; unique within a menu.
    pub name: String,

    /// Price as stored in the catalog (e.g. `"249.50"`).
    pub price: String,

    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category tag ("Veg", "Starter", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl MenuItem {
    /// Creates a menu item with no image or category.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        MenuItem {
            name: name.into(),
            price: price.into(),
            image: None,
            item_type: None,
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the category tag.
    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Parsed unit price, `None` when the text is not a number.
    #[inline]
    pub fn unit_price(&self) -> Option<Money> {
        Money::from_price_text(&self.price)
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Tree key of the restaurant record.
    pub id: String,
    pub name: String,
    pub image: String,
    pub location: String,
    pub rating: f64,
    pub cuisine: String,
    /// Estimated delivery time in minutes.
    pub delivery_time: u32,
    pub cost_for_two: u32,
    pub is_veg: bool,
    /// Promotional tag ("Great Offers", "Bestseller", ...).
    pub tag: String,
}

impl Restaurant {
    /// Default delivery estimate when the record omits one.
    pub const DEFAULT_DELIVERY_TIME: u32 = 30;

    /// Creates a restaurant with every optional attribute at its default.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Restaurant {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            location: String::new(),
            rating: 0.0,
            cuisine: String::new(),
            delivery_time: Self::DEFAULT_DELIVERY_TIME,
            cost_for_two: 0,
            is_veg: false,
            tag: String::new(),
        }
    }
}

// =============================================================================
// Restaurant Menu
// =============================================================================

/// The menu of one restaurant, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMenu {
    pub restaurant_id: String,
    pub items: Vec<MenuItem>,
}

impl RestaurantMenu {
    /// Looks up an item by its exact name.
    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Opaque handle for an authenticated (or anonymous) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserHandle {
    pub uid: String,
    pub email: Option<String>,
    pub is_anonymous: bool,
    /// Signed token proving the sign-in.
    pub id_token: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Progress of the current sign-in flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum AuthState {
    /// No sign-in attempted, or signed out.
    #[default]
    Initial,
    /// A provider call is in flight.
    Loading,
    /// Signed in.
    Success,
    /// The last attempt failed.
    Error(String),
}

impl AuthState {
    /// Returns true while a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::Success)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_unit_price() {
        assert_eq!(
            MenuItem::new("Pizza", "10.0").unit_price(),
            Some(Money::from_cents(1000))
        );
        assert_eq!(MenuItem::new("Special", "ask staff").unit_price(), None);
    }

    #[test]
    fn test_menu_item_wire_names() {
        let item = MenuItem::new("Paneer Tikka", "220").with_type("Starter");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Starter");
        assert!(json.get("image").is_none());

        let back: MenuItem =
            serde_json::from_str(r#"{"name":"Dal","price":"90","type":"Main"}"#).unwrap();
        assert_eq!(back.item_type.as_deref(), Some("Main"));
        assert_eq!(back.image, None);
    }

    #[test]
    fn test_restaurant_defaults_and_wire_names() {
        let restaurant = Restaurant::new("r1", "Spice Route");
        assert_eq!(restaurant.delivery_time, 30);
        let json = serde_json::to_value(&restaurant).unwrap();
        assert_eq!(json["deliveryTime"], 30);
        assert_eq!(json["isVeg"], false);
        assert_eq!(json["costForTwo"], 0);
    }

    #[test]
    fn test_menu_find() {
        let menu = RestaurantMenu {
            restaurant_id: "r1".into(),
            items: vec![MenuItem::new("Pizza", "10"), MenuItem::new("Burger", "5")],
        };
        assert_eq!(menu.find("Burger").map(|i| i.price.as_str()), Some("5"));
        assert!(menu.find("burger").is_none());
    }

    #[test]
    fn test_auth_state_serialization() {
        assert!(!AuthState::default().is_signed_in());
        assert!(AuthState::Success.is_signed_in());

        let json = serde_json::to_value(AuthState::Error("bad password".into())).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "bad password");
    }
}
