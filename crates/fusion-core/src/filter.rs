//! # Search Filters
//!
//! Pure filters behind the home screen (restaurants) and the menu screen.
//!
//! Matching is a case-insensitive substring test. A blank query matches
//! everything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{MenuItem, Restaurant};

/// Lower-cased, trimmed query, or `None` when it matches everything.
fn normalize(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// =============================================================================
// Menu Filter
// =============================================================================

/// Filters menu items by name or category tag.
///
/// ## Example
/// ```rust
/// use fusion_core::{filter_menu, MenuItem};
///
/// let items = vec![
///     MenuItem::new("Paneer Tikka", "220").with_type("Starter"),
///     MenuItem::new("Dal Makhani", "180").with_type("Main"),
/// ];
///
/// assert_eq!(filter_menu(&items, "").len(), 2);
/// assert_eq!(filter_menu(&items, "PANEER")[0].name, "Paneer Tikka");
/// assert_eq!(filter_menu(&items, "main")[0].name, "Dal Makhani");
/// ```
pub fn filter_menu<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
    let Some(needle) = normalize(query) else {
        return items.iter().collect();
    };

    items
        .iter()
        .filter(|item| {
            contains_ci(&item.name, &needle)
                || item
                    .item_type
                    .as_deref()
                    .is_some_and(|t| contains_ci(t, &needle))
        })
        .collect()
}

// =============================================================================
// Restaurant Filter
// =============================================================================

/// Home screen filter: search box plus the "Pure Veg" and "Rating 4.0+" chips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RestaurantFilter {
    /// Matched against name and cuisine.
    pub query: String,
    pub veg_only: bool,
    pub min_rating: Option<f64>,
}

impl RestaurantFilter {
    /// Filter that matches only on the search text.
    pub fn search(query: impl Into<String>) -> Self {
        RestaurantFilter {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if self.veg_only && !restaurant.is_veg {
            return false;
        }
        if let Some(min) = self.min_rating {
            if restaurant.rating < min {
                return false;
            }
        }
        match normalize(&self.query) {
            None => true,
            Some(needle) => {
                contains_ci(&restaurant.name, &needle) || contains_ci(&restaurant.cuisine, &needle)
            }
        }
    }
}

/// Applies `filter` to `restaurants`, preserving order.
pub fn filter_restaurants<'a>(
    restaurants: &'a [Restaurant],
    filter: &RestaurantFilter,
) -> Vec<&'a Restaurant> {
    restaurants.iter().filter(|r| filter.matches(r)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: &str, name: &str, cuisine: &str, rating: f64, is_veg: bool) -> Restaurant {
        Restaurant {
            cuisine: cuisine.to_string(),
            rating,
            is_veg,
            ..Restaurant::new(id, name)
        }
    }

    fn venues() -> Vec<Restaurant> {
        vec![
            restaurant("r1", "Spice Route", "North Indian", 4.4, false),
            restaurant("r2", "Green Leaf", "South Indian", 3.8, true),
            restaurant("r3", "Pizza Planet", "Italian", 4.1, true),
        ]
    }

    #[test]
    fn test_menu_blank_query_returns_all() {
        let items = vec![MenuItem::new("Pizza", "10"), MenuItem::new("Burger", "5")];
        assert_eq!(filter_menu(&items, "   ").len(), 2);
    }

    #[test]
    fn test_menu_items_without_type_match_on_name_only() {
        let items = vec![MenuItem::new("Pizza", "10"), MenuItem::new("Lassi", "3").with_type("Drinks")];
        let hits = filter_menu(&items, "drink");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lassi");
        assert!(filter_menu(&items, "zzz").is_empty());
    }

    #[test]
    fn test_restaurant_query_matches_name_or_cuisine() {
        let venues = venues();
        let hits = filter_restaurants(&venues, &RestaurantFilter::search("indian"));
        let ids: Vec<_> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);

        let hits = filter_restaurants(&venues, &RestaurantFilter::search("planet"));
        assert_eq!(hits[0].id, "r3");
    }

    #[test]
    fn test_restaurant_chips() {
        let venues = venues();
        let veg = RestaurantFilter {
            veg_only: true,
            ..Default::default()
        };
        assert_eq!(filter_restaurants(&venues, &veg).len(), 2);

        let top_veg = RestaurantFilter {
            veg_only: true,
            min_rating: Some(4.0),
            ..Default::default()
        };
        let hits = filter_restaurants(&venues, &top_veg);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "r3");
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let venues = venues();
        assert_eq!(filter_restaurants(&venues, &RestaurantFilter::default()).len(), 3);
    }
}
