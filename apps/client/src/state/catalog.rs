//! # Catalog State
//!
//! Holds the injected catalog source for commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn list_restaurants(catalog: &CatalogState, ...) -> Result<Vec<Restaurant>, ApiError> {
//!     let restaurants = catalog.inner().restaurants().await?;
//!     ...
//! }
//! ```

use fusion_backend::CatalogSource;
use std::sync::Arc;

/// Wrapper around the session's [`CatalogSource`].
#[derive(Clone)]
pub struct CatalogState {
    source: Arc<dyn CatalogSource>,
}

impl CatalogState {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        CatalogState { source }
    }

    /// Returns the catalog source.
    pub fn inner(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }
}
