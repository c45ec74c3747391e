//! # Commands Module
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── auth.rs     ◄─── Sign-in, sign-up, guest sessions, account deletion
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── catalog.rs  ◄─── Restaurant listing, menu browsing and search
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │  ──────────────────                                                     │
//! │  let menu = commands::catalog::get_menu(                                │
//! │      &ctx.catalog,          ◄── State it needs, nothing more            │
//! │      "r1".into(),           ◄── Plain parameters                        │
//! │      Some("veg".into()),    ◄── Optional param                          │
//! │  ).await?;                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<Vec<MenuItem>, ApiError>  (both serialize to camelCase JSON)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartStore)
//!
//! // Needs catalog and cart
//! async fn add_menu_item(catalog: &CatalogState, cart: &CartStore, ...)
//!
//! // Auth commands
//! async fn sign_in_anonymously(session: &SessionState)
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
