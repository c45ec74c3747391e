//! # Catalog
//!
//! Read access to restaurants and their menus.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Access                                   │
//! │                                                                         │
//! │   client commands                                                       │
//! │        │  Arc<dyn CatalogSource>                                        │
//! │        ▼                                                                │
//! │   ┌─────────────────┐        ┌─────────────────────────────────────┐   │
//! │   │  CatalogSource  │◄───────│  TreeCatalog                        │   │
//! │   │  (async trait)  │        │  restaurants/<id>        → Restaurant│   │
//! │   └─────────────────┘        │  restaurants/<id>/menu/* → MenuItem  │   │
//! │                              └──────────────┬──────────────────────┘   │
//! │                                             │ decode (lenient)          │
//! │                                             ▼                           │
//! │                                        TreeStore                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod decode;
pub mod tree_catalog;

use async_trait::async_trait;
use fusion_core::{Restaurant, RestaurantMenu};

use crate::error::BackendResult;

pub use tree_catalog::{RestaurantFeed, TreeCatalog};

/// Source of restaurant and menu records.
///
/// Injected into the client as `Arc<dyn CatalogSource>`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All displayable restaurants, in catalog order.
    async fn restaurants(&self) -> BackendResult<Vec<Restaurant>>;

    /// One restaurant, `None` when absent or not displayable.
    async fn restaurant(&self, id: &str) -> BackendResult<Option<Restaurant>>;

    /// The menu of `restaurant_id`.
    ///
    /// Fails with `NotFound` when the restaurant has no record.
    async fn menu(&self, restaurant_id: &str) -> BackendResult<RestaurantMenu>;
}
