//! # FusionCart Client Library
//!
//! Session state and commands for the FusionCart client, plus a headless
//! entry point that drives one browsing session against the local catalog.
//!
//! ## Module Organization
//! ```text
//! fusion_client_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Observable cart (one restaurant at a time)
//! │   ├── catalog.rs  ◄─── Injected catalog source
//! │   ├── session.rs  ◄─── Auth progress and signed-in user
//! │   └── config.rs   ◄─── Currency and logging settings
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── Sign-in / sign-up / guest / delete
//! │   ├── catalog.rs  ◄─── Restaurant list and menu search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wiring
//! The catalog and identity provider are trait objects chosen at startup.
//! Tests hand [`AppContext::new`] in-memory implementations; [`bootstrap`]
//! builds the local ones from [`BackendConfig`].

pub mod commands;
pub mod error;
pub mod state;

use fusion_backend::config::BackendConfig;
use fusion_backend::{CatalogSource, IdentityProvider, LocalIdentityProvider, TreeCatalog, TreeStore};
use fusion_core::RestaurantFilter;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use state::{CartStore, CatalogState, ConfigState, SessionState};

/// Everything one client session holds.
pub struct AppContext {
    pub cart: CartStore,
    pub catalog: CatalogState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl AppContext {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        identity: Arc<dyn IdentityProvider>,
        config: ConfigState,
    ) -> Self {
        AppContext {
            cart: CartStore::new(),
            catalog: CatalogState::new(catalog),
            session: SessionState::new(identity),
            config,
        }
    }
}

/// Builds a context over the local catalog snapshot and identity provider.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Resolve snapshot path ─── FUSION_SNAPSHOT_PATH or platform data dir │
/// │  2. Open TreeStore ────────── empty tree when no snapshot exists yet    │
/// │  3. TreeCatalog ───────────── restaurants_path / menu_field from config │
/// │  4. LocalIdentityProvider ─── token secret and lifetime from config     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn bootstrap(
    backend: &BackendConfig,
    config: ConfigState,
) -> Result<AppContext, Box<dyn std::error::Error>> {
    let store = match backend.snapshot_path() {
        Some(path) => {
            info!(path = %path.display(), "Opening catalog snapshot");
            TreeStore::open(&path)?
        }
        None => {
            warn!("No data directory available, starting with an empty catalog");
            TreeStore::new()
        }
    };

    let catalog = TreeCatalog::new(Arc::new(store), &backend.catalog);
    let identity = LocalIdentityProvider::new(&backend.identity);

    Ok(AppContext::new(Arc::new(catalog), Arc::new(identity), config))
}

/// Runs one headless session: guest sign-in, browse, fill the cart.
///
/// Useful for checking a freshly seeded snapshot end to end.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigState::from_env();
    init_tracing(&config.log_filter);

    info!(app = %config.app_name, "Starting FusionCart client");

    let backend = BackendConfig::load_or_default(None);
    let ctx = bootstrap(&backend, config)?;

    let user = commands::auth::sign_in_anonymously(&ctx.session).await?;
    info!(uid = %user.uid, "Browsing as guest");

    let restaurants =
        commands::catalog::list_restaurants(&ctx.catalog, RestaurantFilter::default()).await?;
    if restaurants.is_empty() {
        warn!("Catalog is empty; run the seed binary to create a snapshot");
    }

    for restaurant in &restaurants {
        let menu = commands::catalog::get_menu(&ctx.catalog, restaurant.id.clone(), None).await?;
        info!(
            restaurant_id = %restaurant.id,
            name = %restaurant.name,
            dishes = menu.len(),
            "Restaurant"
        );
    }

    // Order the first two dishes of the first restaurant, then try one from
    // the next restaurant, which the cart turns away.
    if let Some(first) = restaurants.first() {
        let menu = commands::catalog::get_menu(&ctx.catalog, first.id.clone(), None).await?;
        for item in menu.into_iter().take(2) {
            commands::cart::add_to_cart(&ctx.cart, item, first.id.clone())?;
        }
    }
    if let Some(second) = restaurants.get(1) {
        let menu = commands::catalog::get_menu(&ctx.catalog, second.id.clone(), None).await?;
        if let Some(item) = menu.into_iter().next() {
            let update = commands::cart::add_to_cart(&ctx.cart, item, second.id.clone())?;
            if let Some(notice) = update.notice {
                info!(%notice, "Add declined");
            }
        }
    }

    let cart = commands::cart::get_cart(&ctx.cart);
    info!(
        restaurant_id = ?cart.restaurant_id,
        lines = cart.totals.line_count,
        items = cart.totals.item_count,
        total = %commands::config::format_cart_total(&ctx.config, &ctx.cart),
        "Cart"
    );

    commands::auth::sign_out(&ctx.session).await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fusion_backend=trace` - Trace one crate only
/// - Default: `default_filter` (from [`ConfigState::log_filter`])
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
