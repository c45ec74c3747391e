//! # State Module
//!
//! Session state for the FusionCart client.
//!
//! Each concern gets its own state type, and each command takes only the
//! states it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  CartStore   │  │ CatalogState │  │ SessionState │  │ConfigState │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │ watch<Cart>  │  │ Arc<dyn      │  │ watch<       │  │ currency   │  │
//! │  │              │  │ CatalogSource│  │  Session>    │  │ log filter │  │
//! │  │              │  │ >            │  │ Arc<dyn Id.. │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore / SessionState: mutations serialized by the watch lock    │
//! │  • CatalogState: the source is Send + Sync                             │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::CartStore;
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use session::{Session, SessionState};
