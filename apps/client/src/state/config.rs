//! # Configuration State
//!
//! Presentation settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FUSION_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock.

use fusion_core::Money;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest number of fraction digits a currency may be shown with.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the app bar.
    pub app_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            app_name: "FusionCart".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            log_filter: "info,fusion=debug".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FUSION_CURRENCY_CODE`, `FUSION_CURRENCY_SYMBOL`
    /// - `FUSION_CURRENCY_DECIMALS`: 0 to 4
    /// - `FUSION_LOG`: default log filter
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(code) = std::env::var("FUSION_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Ok(symbol) = std::env::var("FUSION_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(decimals) = std::env::var("FUSION_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) if d <= MAX_CURRENCY_DECIMALS => config.currency_decimals = d,
                _ => warn!(value = %decimals, "Ignoring invalid FUSION_CURRENCY_DECIMALS"),
            }
        }

        if let Ok(filter) = std::env::var("FUSION_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Formats an amount with the currency symbol.
    ///
    /// Amounts are rounded half-to-even when shown with fewer than two
    /// decimals.
    ///
    /// ## Example
    /// ```rust
    /// use fusion_client_lib::state::ConfigState;
    /// use fusion_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "₹12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals.min(MAX_CURRENCY_DECIMALS));
        let value = Decimal::new(amount.cents(), 2)
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);

        format!(
            "{}{}{:.*}",
            if value.is_sign_negative() && !value.is_zero() { "-" } else { "" },
            self.currency_symbol,
            decimals as usize,
            value.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> ConfigState {
        ConfigState {
            currency_code: "USD".into(),
            currency_symbol: "$".into(),
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_format_currency_positive() {
        let config = usd();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(usd().format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = usd();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1250)), "$12");
        assert_eq!(config.format_currency(Money::from_cents(1350)), "$14");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1250)), "$12.500");
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.currency_code, "INR");
        assert_eq!(config.format_currency(Money::from_cents(24950)), "₹249.50");
    }
}
