//! Monetary amounts with an explicit display boundary.
//!
//! Prices are stored and computed as non-negative decimals. The only places
//! a locale-formatted string ("R$ 1.234,56") exists are the form/template
//! boundary, via [`Money::parse_brl`] and [`Money::format_brl`].

use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input string could not be parsed as a decimal amount.
    #[error("invalid amount: {0:?}")]
    Invalid(String),
    /// The amount is negative.
    #[error("amount cannot be negative")]
    Negative,
}

/// A non-negative monetary amount.
///
/// The amount is held as a [`Decimal`] in the currency's standard unit
/// (reais, not centavos). Serialization is transparent, so a `Money` inside
/// a session or JSON payload round-trips as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(amount))
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a Brazilian-formatted price string.
    ///
    /// Accepts an optional `R$` prefix. Dots are thousands separators and
    /// are discarded; the comma is the decimal separator.
    ///
    /// ```
    /// use mercadinho_core::Money;
    ///
    /// let price = Money::parse_brl("R$ 1.234,56").unwrap();
    /// assert_eq!(price.format_brl(), "R$ 1.234,56");
    /// assert_eq!(Money::parse_brl("71,00").unwrap(), Money::parse_brl("R$ 71,00").unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Invalid`] if the string is not a decimal
    /// amount, or [`MoneyError::Negative`] for amounts below zero.
    pub fn parse_brl(input: &str) -> Result<Self, MoneyError> {
        let s = input.trim();
        let s = s.strip_prefix("R$").map_or(s, str::trim_start);

        let normalized = s.replace('.', "").replace(',', ".");
        if normalized.is_empty() {
            return Err(MoneyError::Invalid(input.to_owned()));
        }

        let amount =
            Decimal::from_str(&normalized).map_err(|_| MoneyError::Invalid(input.to_owned()))?;

        Self::new(amount)
    }

    /// Format as a Brazilian price string, e.g. `R$ 1.234,56`.
    #[must_use]
    pub fn format_brl(&self) -> String {
        let rounded = self.0.round_dp(2);
        let text = rounded.to_string();

        let (int_part, frac_part) = match text.split_once('.') {
            Some((int, frac)) => (int.to_owned(), format!("{frac:0<2}")),
            None => (text, "00".to_owned()),
        };

        format!("R$ {},{frac_part}", group_thousands(&int_part))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Insert a dot between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_parse_with_prefix_and_thousands() {
        let price = Money::parse_brl("R$ 1.234,56").unwrap();
        assert_eq!(price, money(123_456));
    }

    #[test]
    fn test_parse_without_prefix() {
        assert_eq!(Money::parse_brl("71,00").unwrap(), money(7100));
        assert_eq!(Money::parse_brl("10,50").unwrap(), money(1050));
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(Money::parse_brl("25").unwrap().amount(), Decimal::from(25));
        assert_eq!(Money::parse_brl("25").unwrap().format_brl(), "R$ 25,00");
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert_eq!(Money::parse_brl("R$ -5,00"), Err(MoneyError::Negative));
        assert_eq!(Money::parse_brl("-1"), Err(MoneyError::Negative));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(matches!(Money::parse_brl("abc"), Err(MoneyError::Invalid(_))));
        assert!(matches!(Money::parse_brl(""), Err(MoneyError::Invalid(_))));
        assert!(matches!(Money::parse_brl("R$ "), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(Money::zero().format_brl(), "R$ 0,00");
    }

    #[test]
    fn test_format_groups_thousands() {
        let price = Money::new(Decimal::new(123_456_750, 2)).unwrap();
        assert_eq!(price.format_brl(), "R$ 1.234.567,50");
    }

    #[test]
    fn test_format_pads_decimals() {
        let price = Money::new(Decimal::new(105, 1)).unwrap();
        assert_eq!(price.format_brl(), "R$ 10,50");

        let whole = Money::new(Decimal::from(25)).unwrap();
        assert_eq!(whole.format_brl(), "R$ 25,00");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for text in ["R$ 0,99", "R$ 12,00", "R$ 1.234,56", "R$ 10.000.000,01"] {
            let parsed = Money::parse_brl(text).unwrap();
            assert_eq!(parsed.format_brl(), text);
        }
    }

    #[test]
    fn test_sum() {
        let total: Money = [money(1000), money(2550), money(1000), money(2550)]
            .into_iter()
            .sum();
        assert_eq!(total, money(7100));
        assert_eq!(total.format_brl(), "R$ 71,00");
    }

    #[test]
    fn test_negative_construction_rejected() {
        assert_eq!(Money::new(Decimal::new(-1, 2)), Err(MoneyError::Negative));
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = money(123_456);
        let json = serde_json::to_string(&price).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
