//! Shared domain models.

use std::{fmt, iter::Sum, ops::Add, str::FromStr};

use thiserror::Error;

/// Format used for sale timestamps, local wall clock with second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Monetary amount stored as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

/// Raised when text cannot be read as a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price {input:?}")]
pub struct PriceParseError {
    /// The offending input, untrimmed.
    pub input: String,
}

impl Price {
    /// Zero amount.
    pub const ZERO: Price = Price(0);

    /// Build a price from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build a price from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for non-finite values and amounts too large to hold in cents.
    pub fn from_decimal(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    /// Accepts decimal and exponent notation, with `_` allowed between digits (`1_000`).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        strip_digit_separators(input.trim())
            .and_then(|text| text.parse::<f64>().ok())
            .and_then(Price::from_decimal)
            .ok_or_else(|| PriceParseError {
                input: input.to_string(),
            })
    }
}

/// Removes `_` separators, which must sit between two ASCII digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        if ch != '_' {
            out.push(ch);
            continue;
        }
        let before = idx.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(idx + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

/// A game offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Title, unique within the catalog ignoring case.
    pub name: String,
    /// Free-form genre label (e.g. `RPG`).
    pub genre: String,
    /// Current asking price.
    pub price: Price,
}

impl GameRecord {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, genre: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
            price,
        }
    }

    /// Case-insensitive name comparison used for the uniqueness rule.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// Case-insensitive substring match on name or genre.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.genre.to_lowercase().contains(needle)
    }
}

/// A completed sale. Name, genre and price are copied from the catalog at sale time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    /// Name of the game sold.
    pub name: String,
    /// Genre at the time of the sale.
    pub genre: String,
    /// Price charged.
    pub price: Price,
    /// Local time of the sale formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl SaleRecord {
    /// Snapshot a catalog entry into a sale stamped with `timestamp`.
    pub fn from_game(game: &GameRecord, timestamp: impl Into<String>) -> Self {
        Self {
            name: game.name.clone(),
            genre: game.genre.clone(),
            price: game.price,
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_parses_and_rounds_to_cents() {
        assert_eq!("15.5".parse::<Price>(), Ok(Price::from_cents(1550)));
        assert_eq!(" 10 ".parse::<Price>(), Ok(Price::from_cents(1000)));
        assert_eq!("1.999".parse::<Price>(), Ok(Price::from_cents(200)));
        assert!("abc".parse::<Price>().is_err());
        assert!("inf".parse::<Price>().is_err());
        assert!("".parse::<Price>().is_err());
    }

    #[test]
    fn price_rejects_amounts_beyond_cent_range() {
        assert_eq!(Price::from_decimal(1e20), None);
        assert_eq!(Price::from_decimal(-1e20), None);
        assert_eq!(Price::from_decimal(f64::NAN), None);
        assert!("1e20".parse::<Price>().is_err());
        assert_eq!(
            "90000000000000000".parse::<Price>(),
            Ok(Price::from_cents(9_000_000_000_000_000_000))
        );
    }

    #[test]
    fn price_accepts_underscores_between_digits() {
        assert_eq!("1_000".parse::<Price>(), Ok(Price::from_cents(100_000)));
        assert_eq!("1_0.5_0".parse::<Price>(), Ok(Price::from_cents(1050)));
        assert!("_1".parse::<Price>().is_err());
        assert!("1_".parse::<Price>().is_err());
        assert!("1__0".parse::<Price>().is_err());
        assert!("1_.5".parse::<Price>().is_err());
    }

    #[test]
    fn price_displays_two_decimals() {
        assert_eq!(Price::from_cents(1550).to_string(), "15.50");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!(Price::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn prices_sum_exactly() {
        let prices = [Price::from_cents(10), Price::from_cents(20)];
        let total: Price = prices.iter().sum();
        assert_eq!(total.to_string(), "0.30");
    }

    #[test]
    fn search_matches_name_or_genre() {
        let game = GameRecord::new("Chrono Trigger", "RPG", Price::from_cents(4999));
        assert!(game.matches("rp"));
        assert!(game.matches("trig"));
        assert!(!game.matches("racing"));
        assert!(game.same_name("CHRONO TRIGGER"));
    }
}
