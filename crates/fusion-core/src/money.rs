//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Menu prices arrive as text ("10.0", "249.50") from the catalog.       │
//! │  Summing them as floats drifts:                                        │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  OUR SOLUTION: parse text with rust_decimal, store integer minor units │
//! │    "249.50" ──► Decimal(249.50) ──► 24950 minor units                  │
//! │    Cart sums stay in Decimal and are rounded once, at the end          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fusion_core::money::Money;
//!
//! let price = Money::from_price_text("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "32.97");
//!
//! // Unparseable text has no value; callers decide what that means.
//! assert!(Money::from_price_text("Market price").is_none());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, paise, ...).
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  MenuItem.price ("10.0") ──► parse_price ──► Decimal price              │
/// │                                                   │                     │
/// │                               CartLineItem.line_amount = price × qty    │
/// │                                                   │                     │
/// │                Cart.total_amount = Money::from_decimal(Σ line amounts)  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use fusion_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a price stored as text and rounds it to minor units.
    ///
    /// See [`parse_price`] for the accepted forms. Values with more than two
    /// decimal places are rounded half-to-even. Returns `None` for anything
    /// that is not a number or does not fit in an `i64` of minor units.
    ///
    /// ## Example
    /// ```rust
    /// use fusion_core::money::Money;
    ///
    /// assert_eq!(Money::from_price_text("10.0").map(|m| m.cents()), Some(1000));
    /// assert_eq!(Money::from_price_text("0.125").map(|m| m.cents()), Some(12));
    /// assert_eq!(Money::from_price_text(""), None);
    /// assert_eq!(Money::from_price_text("free"), None);
    /// ```
    pub fn from_price_text(text: &str) -> Option<Self> {
        parse_price(text)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Rounds an exact amount to minor units, half-to-even.
    ///
    /// Amounts beyond the `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use fusion_core::money::{parse_price, Money};
    ///
    /// let unit = parse_price("0.125").unwrap();
    /// assert_eq!(Money::from_decimal(unit * rust_decimal::Decimal::from(8)).cents(), 100);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Self {
        let cents = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .saturating_mul(Decimal::ONE_HUNDRED);

        match cents.to_i64() {
            Some(cents) => Money(cents),
            None if cents.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use fusion_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major_units(), 10);
    /// assert_eq!(Money::from_cents(-550).major_units(), -5);
    /// ```
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use fusion_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Price Text
// =============================================================================

/// Parses a price stored as text into an exact, unrounded amount.
///
/// ## Accepted Forms
/// ```text
/// [+|-] digits [. digits*]   [(e|E) [+|-] digits]
/// [+|-] . digits             [(e|E) [+|-] digits]
/// ```
/// Surrounding whitespace is ignored. Digit separators (`"1_000"`,
/// `"1,000"`), hex, `NaN` and trailing text are rejected.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let (mantissa, exponent) = split_plain_number(text)?;

    // ".5" and "5." become "0.5" and "5.0".
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let lead = if digits.starts_with('.') { "0" } else { "" };
    let trail = if digits.ends_with('.') { "0" } else { "" };
    let mantissa = format!("{}{}{}{}", sign, lead, digits, trail);

    match exponent {
        None => Decimal::from_str(&mantissa).ok(),
        Some(exponent) => {
            let exponent: i64 = exponent.parse().ok()?;
            Decimal::from_scientific(&format!("{}e{}", mantissa, exponent)).ok()
        }
    }
}

/// Splits `text` into an unsigned-or-negative mantissa and an optional
/// exponent, or returns `None` when it is not a plain number.
///
/// A leading `+` is dropped from both parts.
fn split_plain_number(text: &str) -> Option<(&str, Option<&str>)> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mantissa_start = usize::from(bytes.first() == Some(&b'+'));
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_end = digits_from(i);
    let mut digit_count = int_end - i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        digit_count += frac_end - (i + 1);
        i = frac_end;
    }
    if digit_count == 0 {
        return None;
    }
    let mantissa = &text[mantissa_start..i];

    if i == bytes.len() {
        return Some((mantissa, None));
    }
    if !matches!(bytes[i], b'e' | b'E') {
        return None;
    }

    let exponent_start = match bytes.get(i + 1) {
        Some(b'+') => i + 2,
        _ => i + 1,
    };
    let sign_len = usize::from(matches!(bytes.get(i + 1), Some(b'+' | b'-')));
    let exp_end = digits_from(i + 1 + sign_len);
    if exp_end == i + 1 + sign_len || exp_end != bytes.len() {
        return None;
    }

    Some((mantissa, Some(&text[exponent_start..exp_end])))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount without a currency symbol (`"10.99"`, `"-5.50"`).
///
/// The symbol is a presentation concern and is added by the client config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
