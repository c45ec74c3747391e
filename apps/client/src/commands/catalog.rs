//! # Catalog Commands
//!
//! Restaurant listing and menu browsing.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Browse Flow                                          │
//! │                                                                         │
//! │  Home screen                                                            │
//! │  list_restaurants({ query: "piz", vegOnly: false, minRating: 4.0 })     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.restaurants()  ──►  filter_restaurants(...)                    │
//! │       │                                                                 │
//! │       ▼ (tap a card)                                                    │
//! │  get_menu("r1", Some("starter"))                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.menu("r1")  ──►  filter_menu(items, "starter")                 │
//! │                            (name or type, case-insensitive)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fusion_core::validation::{validate_restaurant_id, validate_search_query};
use fusion_core::{filter_menu, filter_restaurants, CoreError, MenuItem, Restaurant, RestaurantFilter};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::CatalogState;

/// Lists restaurants matching the home screen filter.
///
/// An empty filter returns every restaurant in catalog order.
pub async fn list_restaurants(
    catalog: &CatalogState,
    filter: RestaurantFilter,
) -> Result<Vec<Restaurant>, ApiError> {
    let start = Instant::now();
    let filter = RestaurantFilter {
        query: validate_search_query(&filter.query)?,
        ..filter
    };

    let restaurants = catalog.inner().restaurants().await?;
    let matched: Vec<Restaurant> = filter_restaurants(&restaurants, &filter)
        .into_iter()
        .cloned()
        .collect();

    info!(
        query = %filter.query,
        total = restaurants.len(),
        matched = matched.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Restaurant list"
    );
    Ok(matched)
}

/// Gets a single restaurant.
pub async fn get_restaurant(catalog: &CatalogState, id: String) -> Result<Restaurant, ApiError> {
    debug!(id = %id, "get_restaurant command");
    validate_restaurant_id(&id)?;

    catalog
        .inner()
        .restaurant(&id)
        .await?
        .ok_or_else(|| CoreError::RestaurantNotFound(id.clone()).into())
}

/// Gets a restaurant's menu, optionally narrowed by a search query.
///
/// ## Query Matching
/// - Blank or missing: every dish
/// - Otherwise: dishes whose name or type contains the query, ignoring case
pub async fn get_menu(
    catalog: &CatalogState,
    restaurant_id: String,
    query: Option<String>,
) -> Result<Vec<MenuItem>, ApiError> {
    debug!(restaurant_id = %restaurant_id, query = ?query, "get_menu command");
    validate_restaurant_id(&restaurant_id)?;
    let query = match query {
        Some(q) => validate_search_query(&q)?,
        None => String::new(),
    };

    let menu = catalog.inner().menu(&restaurant_id).await?;
    Ok(filter_menu(&menu.items, &query).into_iter().cloned().collect())
}
