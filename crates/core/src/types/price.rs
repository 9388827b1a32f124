//! Type-safe price representation using decimal arithmetic.
//!
//! Prices in the shop are whole roubles: there are no kopecks on the price
//! tags, so every price is a non-negative integer amount. The amount is kept
//! as a [`Decimal`] so line subtotals and cart totals never lose precision
//! and saturate instead of overflowing.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in whole roubles.
///
/// Serializes transparently as its decimal amount, so a catalog entry may
/// write `"price": 890`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero roubles.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency sign used when displaying prices.
    pub const CURRENCY_SIGN: &'static str = "₽";

    /// Create a price from a whole number of roubles.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a price from a decimal amount.
    ///
    /// Returns `None` for negative or fractional amounts.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        (amount.is_sign_positive() || amount.is_zero())
            .then_some(amount)
            .filter(|a| a.fract().is_zero())
            .map(|a| Self(a.normalize()))
    }

    /// Returns the amount in roubles.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this is a valid shop price: whole and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_sign_negative() && self.0.fract().is_zero()
    }

    /// Price of `quantity` items at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Adds two prices, saturating at the maximum representable amount.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.normalize(), Self::CURRENCY_SIGN)
    }
}

impl From<u32> for Price {
    fn from(units: u32) -> Self {
        Self::from_units(units)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
