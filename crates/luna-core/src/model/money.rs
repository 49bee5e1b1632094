// ── Monetary amounts ──
//
// Backends disagree on how they ship money: some columns are numeric,
// some are already formatted ("$1,200.50"). `Amount` accepts both on the
// wire and always renders the same way.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Non-negative amount in the store currency, held as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Convert a decimal value (e.g. `120.5`), rounding to the nearest cent.
    ///
    /// Returns `None` for negative, NaN, or infinite input.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return None;
        }
        Some(Self(cents as u64))
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a unit count (e.g. price × stock).
    pub fn times(self, units: u64) -> Self {
        Self(self.0.saturating_mul(units))
    }
}

/// Parse a currency string such as `"$1,200.50"` or `"45"`.
pub fn parse_currency(raw: &str) -> Option<Amount> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().and_then(Amount::from_decimal)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Amount::from_decimal(n).ok_or_else(|| {
                serde::de::Error::custom(format!("amount must be a non-negative number, got {n}"))
            }),
            Wire::Text(s) => parse_currency(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("amount is not a currency value: {s:?}"))
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_formatted_render_identically() {
        let from_number: Amount = serde_json::from_str("120.5").unwrap();
        let from_text: Amount = serde_json::from_str("\"$120.50\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.to_string(), "$120.50");
    }

    #[test]
    fn thousands_separators_are_accepted() {
        assert_eq!(parse_currency("$1,200.50"), Some(Amount::from_cents(120_050)));
        assert_eq!(parse_currency(" 45 "), Some(Amount::from_cents(4500)));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Amount>("-1").is_err());
        assert!(serde_json::from_str::<Amount>("\"free\"").is_err());
        assert_eq!(parse_currency("$"), None);
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(Amount::from_decimal(35.999), Some(Amount::from_cents(3600)));
        assert_eq!(Amount::from_decimal(0.0), Some(Amount::ZERO));
    }

    #[test]
    fn sums_and_scales() {
        let total: Amount = [Amount::from_cents(150), Amount::from_cents(275)]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "$4.25");
        assert_eq!(Amount::from_cents(9900).times(5).to_string(), "$495.00");
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Amount::from_cents(8500)).unwrap();
        assert_eq!(json, "85.0");
    }
}
