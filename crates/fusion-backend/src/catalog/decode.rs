//! Decoding of catalog records from tree values.
//!
//! The catalog is edited by hand, so every field is read leniently: a
//! missing or mistyped attribute falls back to its default instead of
//! discarding the record. Only records that cannot be shown at all are
//! skipped (a restaurant without a name, a dish without a name or price).

use fusion_core::{MenuItem, Restaurant};
use serde_json::Value;
use tracing::debug;

use crate::tree::children_of;

// =============================================================================
// Field Readers
// =============================================================================

fn text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text field that must be present and non-blank.
fn required_text(record: &Value, field: &str) -> Option<String> {
    text(record, field).filter(|s| !s.trim().is_empty())
}

fn number(record: &Value, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn whole_number(record: &Value, field: &str) -> Option<u32> {
    number(record, field)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.round() as u32)
}

fn flag(record: &Value, field: &str) -> Option<bool> {
    match record.get(field)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// =============================================================================
// Records
// =============================================================================

/// Decodes one restaurant record keyed `id`.
///
/// Returns `None` for non-object records and records with a blank name.
pub fn decode_restaurant(id: &str, record: &Value) -> Option<Restaurant> {
    if !record.is_object() {
        debug!(restaurant_id = id, "Skipping non-object restaurant record");
        return None;
    }

    let Some(name) = required_text(record, "name") else {
        debug!(restaurant_id = id, "Skipping restaurant without a name");
        return None;
    };

    let defaults = Restaurant::new(id, name);
    Some(Restaurant {
        image: text(record, "image").unwrap_or_default(),
        location: text(record, "location").unwrap_or_default(),
        rating: number(record, "rating").unwrap_or(defaults.rating),
        cuisine: text(record, "cuisine").unwrap_or_default(),
        delivery_time: whole_number(record, "deliveryTime").unwrap_or(defaults.delivery_time),
        cost_for_two: whole_number(record, "costForTwo").unwrap_or(defaults.cost_for_two),
        is_veg: flag(record, "isVeg").unwrap_or(defaults.is_veg),
        tag: text(record, "tag").unwrap_or_default(),
        ..defaults
    })
}

/// Decodes every restaurant under the restaurants node, in key order.
pub fn decode_restaurants(node: &Value) -> Vec<Restaurant> {
    children_of(node)
        .into_iter()
        .filter_map(|(id, record)| decode_restaurant(&id, record))
        .collect()
}

/// Decodes one menu entry.
///
/// Entries without a name or price are dropped. Numeric prices are kept
/// as their JSON text (`10.5` becomes `"10.5"`).
pub fn decode_menu_item(key: &str, entry: &Value) -> Option<MenuItem> {
    if !entry.is_object() {
        return None;
    }

    let (Some(name), Some(price)) = (required_text(entry, "name"), required_text(entry, "price"))
    else {
        debug!(menu_key = key, "Dropping menu entry without name or price");
        return None;
    };

    Some(MenuItem {
        name,
        price,
        image: required_text(entry, "image"),
        item_type: required_text(entry, "type"),
    })
}

/// Decodes a menu node (object or array), skipping holes.
pub fn decode_menu(node: &Value) -> Vec<MenuItem> {
    children_of(node)
        .into_iter()
        .filter_map(|(key, entry)| decode_menu_item(&key, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restaurant_full_record() {
        let record = json!({
            "name": "Spice Route",
            "image": "https://img/1.png",
            "location": "MG Road",
            "rating": 4.3,
            "cuisine": "North Indian",
            "deliveryTime": 25,
            "costForTwo": 400,
            "isVeg": true,
            "tag": "Great Offers",
            "menu": {}
        });

        let r = decode_restaurant("r1", &record).unwrap();
        assert_eq!(r.id, "r1");
        assert_eq!(r.rating, 4.3);
        assert_eq!(r.delivery_time, 25);
        assert_eq!(r.cost_for_two, 400);
        assert!(r.is_veg);
        assert_eq!(r.tag, "Great Offers");
    }

    #[test]
    fn test_restaurant_defaults_for_missing_and_mistyped() {
        let record = json!({
            "name": "Corner Cafe",
            "rating": "not a number",
            "deliveryTime": -5,
            "costForTwo": "350",
            "isVeg": "TRUE"
        });

        let r = decode_restaurant("r2", &record).unwrap();
        assert_eq!(r.rating, 0.0);
        assert_eq!(r.delivery_time, Restaurant::DEFAULT_DELIVERY_TIME);
        assert_eq!(r.cost_for_two, 350);
        assert!(r.is_veg);
        assert_eq!(r.image, "");
    }

    #[test]
    fn test_restaurants_without_name_are_skipped() {
        let node = json!({
            "r1": {"name": "Spice Route"},
            "r2": {"name": "  "},
            "r3": {"rating": 5},
            "r4": "garbage"
        });

        let ids: Vec<_> = decode_restaurants(&node).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r1"]);
    }

    #[test]
    fn test_menu_drops_incomplete_entries() {
        let node = json!([
            null,
            {"name": "Pizza", "price": "10.0", "type": "Main"},
            {"name": "Burger", "price": ""},
            {"price": "3"},
            {"name": "Lassi", "price": 2.5, "image": ""},
            "oops"
        ]);

        let items = decode_menu(&node);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Lassi"]);
        assert_eq!(items[0].item_type.as_deref(), Some("Main"));
        assert_eq!(items[1].price, "2.5");
        assert_eq!(items[1].image, None);
    }

    #[test]
    fn test_menu_object_form() {
        let node = json!({
            "1": {"name": "Dal", "price": "90"},
            "0": {"name": "Roti", "price": "15"}
        });
        let names: Vec<_> = decode_menu(&node).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Roti", "Dal"]);
    }
}
