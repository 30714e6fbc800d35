//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are plain `Decimal` amounts in the currency's standard unit
//! (rupees, dollars), tagged with an ISO 4217 code. Menu prices on campus
//! are whole rupees, so [`Price`]'s `Display` drops the fraction when it is
//! zero:
//!
//! ```rust
//! use campus_bite_core::{CurrencyCode, Price};
//! use rust_decimal::Decimal;
//!
//! let burger = Price::new(Decimal::from(350), CurrencyCode::PKR);
//! assert_eq!(burger.to_string(), "Rs. 350");
//!
//! let coffee = Price::new(Decimal::new(450, 2), CurrencyCode::USD);
//! assert_eq!(coffee.to_string(), "$4.50");
//! ```

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quantity;

/// Errors from price construction and arithmetic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices are never negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// Two prices in different currencies were combined.
    #[error("currency mismatch: {left} and {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: CurrencyCode,
        /// Currency of the right operand.
        right: CurrencyCode,
    },
    /// The currency code is not one we support.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paisa).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price without validation.
    ///
    /// Use [`Price::try_new`] for amounts coming from configuration files.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a new price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn try_new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self::new(amount, currency_code))
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch {
                left: self.currency_code,
                right: other.currency_code,
            });
        }
        Ok(self.saturating_add(other.amount))
    }

    /// Add a raw amount in this price's currency, clamping at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn saturating_add(self, amount: Decimal) -> Self {
        Self::new(self.amount.saturating_add(amount), self.currency_code)
    }

    /// Multiply a unit price by a quantity, clamping at the `Decimal`
    /// bounds.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_code.symbol();
        let amount = self.amount.round_dp(2);
        if amount.fract().is_zero() {
            write!(f, "{symbol}{}", amount.normalize())
        } else {
            write!(f, "{symbol}{amount:.2}")
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Pakistani rupee.
    #[default]
    PKR,
    USD,
}

impl CurrencyCode {
    /// Display prefix, including any separating space.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::PKR => "Rs. ",
            Self::USD => "$",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PKR => "PKR",
            Self::USD => "USD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PKR" => Ok(Self::PKR),
            "USD" => Ok(Self::USD),
            other => Err(PriceError::UnknownCurrency(other.to_string())),
        }
    }
}
