//! [`CatalogSource`] backed by a [`TreeStore`].

use async_trait::async_trait;
use fusion_core::validation::validate_restaurant_id;
use fusion_core::{Restaurant, RestaurantMenu};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::decode::{decode_menu, decode_restaurant, decode_restaurants};
use super::CatalogSource;
use crate::config::CatalogSettings;
use crate::error::{BackendError, BackendResult};
use crate::tree::{TreeStore, TreeWatcher};

/// Catalog reading restaurant records from a shared tree.
#[derive(Debug, Clone)]
pub struct TreeCatalog {
    store: Arc<TreeStore>,
    restaurants_path: String,
    menu_field: String,
}

impl TreeCatalog {
    /// Creates a catalog using the configured paths.
    pub fn new(store: Arc<TreeStore>, settings: &CatalogSettings) -> Self {
        TreeCatalog {
            store,
            restaurants_path: settings.restaurants_path.trim_matches('/').to_string(),
            menu_field: settings.menu_field.clone(),
        }
    }

    /// Creates a catalog over the default `restaurants/<id>/menu` layout.
    pub fn with_defaults(store: Arc<TreeStore>) -> Self {
        TreeCatalog::new(store, &CatalogSettings::default())
    }

    pub fn store(&self) -> &Arc<TreeStore> {
        &self.store
    }

    fn restaurant_path(&self, id: &str) -> BackendResult<String> {
        validate_restaurant_id(id)?;
        Ok(format!("{}/{}", self.restaurants_path, id))
    }

    fn menu_path(&self, id: &str) -> BackendResult<String> {
        Ok(format!("{}/{}", self.restaurant_path(id)?, self.menu_field))
    }

    /// Live restaurant list that refreshes whenever any restaurant record
    /// changes.
    pub fn subscribe_restaurants(&self) -> BackendResult<RestaurantFeed> {
        Ok(RestaurantFeed {
            watcher: self.store.watch(&self.restaurants_path)?,
        })
    }
}

#[async_trait]
impl CatalogSource for TreeCatalog {
    async fn restaurants(&self) -> BackendResult<Vec<Restaurant>> {
        let node = self
            .store
            .get(&self.restaurants_path)?
            .unwrap_or(Value::Null);
        let restaurants = decode_restaurants(&node);

        debug!(count = restaurants.len(), "Loaded restaurants");
        Ok(restaurants)
    }

    async fn restaurant(&self, id: &str) -> BackendResult<Option<Restaurant>> {
        let path = self.restaurant_path(id)?;
        Ok(self
            .store
            .get(&path)?
            .and_then(|record| decode_restaurant(id, &record)))
    }

    /// Menu of a restaurant that [`restaurant`](Self::restaurant) would
    /// return; records without a name are `NotFound` here too.
    async fn menu(&self, restaurant_id: &str) -> BackendResult<RestaurantMenu> {
        if self.restaurant(restaurant_id).await?.is_none() {
            return Err(BackendError::not_found("Restaurant", restaurant_id));
        }

        let node = self
            .store
            .get(&self.menu_path(restaurant_id)?)?
            .unwrap_or(Value::Null);
        let items = decode_menu(&node);

        debug!(restaurant_id, count = items.len(), "Loaded menu");
        Ok(RestaurantMenu {
            restaurant_id: restaurant_id.to_string(),
            items,
        })
    }
}

// =============================================================================
// Restaurant Feed
// =============================================================================

/// Realtime restaurant list.
#[derive(Debug)]
pub struct RestaurantFeed {
    watcher: TreeWatcher,
}

impl RestaurantFeed {
    /// Restaurants as of the last update.
    pub fn current(&self) -> Vec<Restaurant> {
        self.watcher
            .current()
            .map(decode_restaurants)
            .unwrap_or_default()
    }

    /// Waits for the restaurants subtree to change and returns the new list.
    pub async fn next(&mut self) -> BackendResult<Vec<Restaurant>> {
        let node = self.watcher.changed().await?.unwrap_or(Value::Null);
        Ok(decode_restaurants(&node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn sample_store() -> Arc<TreeStore> {
        Arc::new(TreeStore::from_value(json!({
            "restaurants": {
                "r1": {
                    "name": "Spice Route",
                    "cuisine": "North Indian",
                    "rating": 4.4,
                    "menu": [
                        null,
                        {"name": "Pizza", "price": "10.0"},
                        {"name": "Burger", "price": "5.0"},
                        {"name": "Mystery"}
                    ]
                },
                "r2": {"name": "", "menu": {}},
                "r3": {"name": "Green Leaf", "isVeg": true}
            }
        })))
    }

    #[tokio::test]
    async fn test_restaurants_skip_unnamed() {
        let catalog = TreeCatalog::with_defaults(sample_store());
        let ids: Vec<_> = catalog
            .restaurants()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[tokio::test]
    async fn test_restaurant_lookup() {
        let catalog = TreeCatalog::with_defaults(sample_store());
        let r = catalog.restaurant("r3").await.unwrap().unwrap();
        assert!(r.is_veg);
        assert!(catalog.restaurant("r2").await.unwrap().is_none());
        assert!(catalog.restaurant("r9").await.unwrap().is_none());
        assert!(matches!(
            catalog.restaurant("r.1").await,
            Err(BackendError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_menu_decoding() {
        let catalog = TreeCatalog::with_defaults(sample_store());
        let menu = catalog.menu("r1").await.unwrap();
        let names: Vec<_> = menu.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Burger"]);
        assert_eq!(menu.restaurant_id, "r1");

        let empty = catalog.menu("r3").await.unwrap();
        assert!(empty.items.is_empty());
    }

    #[tokio::test]
    async fn test_menu_of_unknown_restaurant() {
        let catalog = TreeCatalog::with_defaults(sample_store());
        assert!(matches!(
            catalog.menu("r9").await,
            Err(BackendError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_menu_of_nameless_restaurant() {
        let catalog = TreeCatalog::with_defaults(sample_store());
        assert!(matches!(
            catalog.menu("r2").await,
            Err(BackendError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_paths() {
        let store = Arc::new(TreeStore::new());
        store
            .set("catalog/venues/v1", json!({"name": "Dosa Hut", "items": [{"name": "Dosa", "price": 4}]}))
            .unwrap();
        let settings = CatalogSettings {
            snapshot_path: None,
            restaurants_path: "/catalog/venues/".into(),
            menu_field: "items".into(),
        };

        let catalog = TreeCatalog::new(store, &settings);
        assert_eq!(catalog.restaurants().await.unwrap().len(), 1);
        assert_eq!(catalog.menu("v1").await.unwrap().items[0].price, "4");
    }

    #[tokio::test]
    async fn test_feed_refreshes_on_change() {
        let store = sample_store();
        let catalog = TreeCatalog::with_defaults(store.clone());
        let mut feed = catalog.subscribe_restaurants().unwrap();
        assert_eq!(feed.current().len(), 2);

        store
            .set("restaurants/r4", json!({"name": "Pizza Planet"}))
            .unwrap();

        let list = tokio::time::timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].name, "Pizza Planet");
    }
}
