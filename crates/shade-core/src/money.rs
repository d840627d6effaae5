//! # Money Module
//!
//! Integer money for line prices and summaries.
//!
//! Prices arrive from the pricing provider already computed; this crate only
//! stores, sums and formats them. Values are whole cents so that summing a
//! column never drifts.
//!
//! ## Usage
//! ```rust
//! use shade_core::money::Money;
//!
//! let motor = Money::from_cents(25_000);
//! let remotes = Money::from_cents(3_500).multiply_quantity(2);
//! assert_eq!((motor + remotes).cents(), 32_000);
//! assert_eq!((motor + remotes).display_whole(), "$320");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PricingProvider ──► ProductSummary.total_cents ──► K5 summary text     │
/// │                  └─► AccessoriesSummary.*       ──► K4 price labels     │
/// │                                                                         │
/// │  QuoteItem.line_price_cents ──► sum over rows ──► table footer          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Unit price times a count.
    #[inline]
    pub const fn multiply_quantity(&self, count: i64) -> Self {
        Money(self.0 * count)
    }

    /// Formats rounded to whole dollars, the way price labels in the
    /// editing panels show them (`$1250`, half a dollar rounds away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use shade_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(12_449).display_whole(), "$124");
    /// assert_eq!(Money::from_cents(12_450).display_whole(), "$125");
    /// assert_eq!(Money::from_cents(-150).display_whole(), "-$2");
    /// ```
    pub fn display_whole(&self) -> String {
        let rounded = (self.0.abs() + 50) / 100;
        let sign = if self.0 < 0 && rounded != 0 { "-" } else { "" };
        format!("{}${}", sign, rounded)
    }
}

/// Formats an optional price label. Missing prices render as empty text.
pub fn format_price(price: Option<Money>) -> String {
    price.map(|m| m.display_whole()).unwrap_or_default()
}

/// Exact form with cents (`$12.05`), used in logs and the JSON dump.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}
