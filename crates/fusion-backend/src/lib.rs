//! # fusion-backend: External Collaborators for FusionCart
//!
//! The catalog the client browses and the identity provider it signs in
//! with. Both sit behind async traits so the client can be handed any
//! implementation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       FusionCart Data Flow                              │
//! │                                                                         │
//! │  fusion-client commands (list_restaurants, get_menu, sign_in, ...)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  fusion-backend (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   TreeStore   │    │   Catalog     │    │   Identity   │  │   │
//! │  │   │   (tree.rs)   │◄───│ TreeCatalog   │    │ LocalIdentity│  │   │
//! │  │   │ watch + JSON  │    │ lenient decode│    │ argon2 + JWT │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │   catalog.json snapshot (offline copy of the tree)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`tree`] - Realtime JSON tree with path listeners
//! - [`catalog`] - `CatalogSource` trait and its tree implementation
//! - [`identity`] - `IdentityProvider` trait and the local provider
//! - [`config`] - Backend configuration (TOML + environment)
//! - [`error`] - Backend error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fusion_backend::{CatalogSource, TreeCatalog, TreeStore};
//!
//! # async fn demo() -> fusion_backend::BackendResult<()> {
//! let store = Arc::new(TreeStore::open("catalog.json")?);
//! let catalog = TreeCatalog::with_defaults(store);
//!
//! for restaurant in catalog.restaurants().await? {
//!     let menu = catalog.menu(&restaurant.id).await?;
//!     println!("{}: {} dishes", restaurant.name, menu.items.len());
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod tree;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogSource, RestaurantFeed, TreeCatalog};
pub use config::BackendConfig;
pub use error::{BackendError, BackendResult};
pub use identity::{IdTokenClaims, IdentityProvider, LocalIdentityProvider};
pub use tree::{TreeStore, TreeWatcher};
