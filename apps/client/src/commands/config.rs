//! # Config Commands
//!
//! Commands for retrieving client configuration.

use tracing::debug;

use crate::state::{CartStore, ConfigState};

/// Gets the current client configuration.
///
/// ## When Used
/// - App startup (app bar title, currency)
/// - Currency formatting done on the presentation side
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Cart total formatted for the checkout button, e.g. `"₹249.50"`.
pub fn format_cart_total(config: &ConfigState, cart: &CartStore) -> String {
    let total = cart.with_cart(|c| c.total_amount());
    config.format_currency(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::MenuItem;

    #[test]
    fn test_format_cart_total() {
        let config = ConfigState::default();
        let cart = CartStore::new();
        assert_eq!(format_cart_total(&config, &cart), "₹0.00");

        cart.add_item(&MenuItem::new("Paneer Tikka", "249.50"), "r1");
        cart.add_item(&MenuItem::new("Paneer Tikka", "249.50"), "r1");
        assert_eq!(format_cart_total(&config, &cart), "₹499.00");
    }
}
