//! Menu price in Chinese yuan, with parse-time validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A menu item price in CNY.
///
/// Decimal-backed so `12.50` stays `12.50`. Construction through `FromStr`
/// rejects non-numeric and negative input, which is the only price check the
/// client performs before a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCny(Decimal);

/// Error returned when parsing an invalid price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceParseError {
    /// Input is not a decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),
    /// Input parses but is negative.
    #[error("price must not be negative: {0}")]
    Negative(Decimal),
}

impl PriceCny {
    /// Wrap a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceParseError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceParseError> {
        if amount.is_sign_negative() {
            return Err(PriceParseError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g., "12.50").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}", self.0.round_dp(2))
    }
}

impl std::fmt::Display for PriceCny {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl std::str::FromStr for PriceCny {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s
            .trim()
            .parse()
            .map_err(|_| PriceParseError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_price() {
        let price: PriceCny = "12.5".parse().expect("parse");
        assert_eq!(price.display(), "12.5");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = "abc".parse::<PriceCny>().expect_err("should fail");
        assert!(matches!(err, PriceParseError::NotANumber(_)));
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = "-3".parse::<PriceCny>().expect_err("should fail");
        assert!(matches!(err, PriceParseError::Negative(_)));
    }

    #[test]
    fn test_trims_whitespace() {
        let price: PriceCny = " 19.99 ".parse().expect("parse");
        assert_eq!(price.display(), "19.99");
    }
}
