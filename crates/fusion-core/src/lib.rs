//! # fusion-core: Pure Business Logic for FusionCart
//!
//! This crate is the **heart** of FusionCart. It contains the cart state
//! machine and everything it needs, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FusionCart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │    Restaurants ──► Menu ──► Cart badge ──► Checkout             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  fusion-client (CartStore, commands)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fusion-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  filter   │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart    │  │  menus    │  │   │
//! │  │   │Restaurant │  │ price txt │  │ LineItem  │  │  venues   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Restaurant, UserHandle, etc.)
//! - [`money`] - Money type with integer arithmetic and text price parsing
//! - [`cart`] - The single-restaurant cart state machine
//! - [`filter`] - Menu and restaurant search filters
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use fusion_core::{Cart, MenuItem};
//!
//! let pizza = MenuItem::new("Pizza", "10.0");
//! let mut cart = Cart::new();
//!
//! cart.add_item(&pizza, "R1");
//! cart.add_item(&pizza, "R1");
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total_amount().cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLineItem, CartTotals, LineKey, RemoveOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_menu, filter_restaurants, RestaurantFilter};
pub use money::{parse_price, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted for email accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum length of a search query typed into the menu or home screen.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;
