//! Exact monetary amounts.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount stored as integer cents.
///
/// Prices, commissions and client spend totals are adjusted incrementally,
/// so they are kept in integer cents to make `+price` followed by `-price`
/// an exact identity. JSON renders the amount as a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from a decimal value, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self((value * 100.0).round() as i64))
        } else {
            None
        }
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Amount as a decimal value.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `rate` percent of this amount, rounded to the nearest cent.
    pub fn percentage(&self, rate: f64) -> Money {
        Money((self.0 as f64 * rate / 100.0).round() as i64)
    }

    /// Subtracts `other`, flooring the result at zero.
    pub fn saturating_sub_floor(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Returns true for negative amounts.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = String;

    /// Parses `"80"`, `"80.5"` or `"80.00"`. At most two fractional digits
    /// are accepted and negative amounts are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2
        {
            return Err(format!("Invalid amount: {s}"));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| format!("Invalid amount: {s}"))?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| format!("Invalid amount: {s}"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| format!("Invalid amount: {s}"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| format!("Amount out of range: {s}"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid amount: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("80".parse::<Money>().unwrap(), Money::from_cents(8000));
        assert_eq!("80.5".parse::<Money>().unwrap(), Money::from_cents(8050));
        assert_eq!("80.05".parse::<Money>().unwrap(), Money::from_cents(8005));
        assert_eq!(Money::from_cents(8000).to_string(), "80.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");

        assert!("".parse::<Money>().is_err());
        assert!("-5".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_beyond_cent_range() {
        assert!("92233720368547758.08".parse::<Money>().is_err());
        assert!("92233720368547759".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
        assert_eq!(
            "92233720368547757.99".parse::<Money>(),
            Ok(Money::from_cents(9_223_372_036_854_775_799))
        );
    }

    #[test]
    fn test_percentage_rounds_to_cent() {
        let price = Money::from_cents(8000);
        assert_eq!(price.percentage(40.0), Money::from_cents(3200));
        assert_eq!(Money::from_cents(3333).percentage(15.0), Money::from_cents(500));
    }

    #[test]
    fn test_add_then_subtract_is_exact() {
        let start = Money::from_cents(10);
        let price = "80.10".parse::<Money>().unwrap();
        let after = (start + price).saturating_sub_floor(price);
        assert_eq!(after, start);
        assert_eq!(Money::from_cents(500).saturating_sub_floor(price), Money::ZERO);
    }

    #[test]
    fn test_json_as_number() {
        let json = serde_json::to_string(&Money::from_cents(8000)).unwrap();
        assert_eq!(json, "80.0");
        let parsed: Money = serde_json::from_str("45.5").unwrap();
        assert_eq!(parsed, Money::from_cents(4550));
    }
}
