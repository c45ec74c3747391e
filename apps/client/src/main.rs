//! # FusionCart Client Entry Point
//!
//! Runs one headless session against the local catalog snapshot.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FusionCart Client                                │
//! │                                                                         │
//! │  main.rs ────► tokio runtime, exit code                                 │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, bootstrap, session script               │
//! │                                                                         │
//! │  commands/ ──► list_restaurants, get_menu, add_to_cart, sign_in ...     │
//! │                                                                         │
//! │  state/ ─────► CartStore, CatalogState, SessionState, ConfigState       │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  fusion-backend ──► TreeCatalog over catalog.json, LocalIdentityProvider│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    if let Err(err) = fusion_client_lib::run().await {
        eprintln!("fusion-client: {}", err);
        std::process::exit(1);
    }
}
