//! Checks applied to form input before it reaches the store.

use crate::{error::InputError, models::Price};

/// Trimmed name and genre for a new game, both required.
pub fn validate_new_game<'a>(
    name: &'a str,
    genre: &'a str,
) -> Result<(&'a str, &'a str), InputError> {
    let (name, genre) = (name.trim(), genre.trim());
    if name.is_empty() || genre.is_empty() {
        return Err(InputError::MissingFields);
    }
    Ok((name, genre))
}

/// Parse a price typed by the user. Blank input counts as zero.
pub fn parse_user_price(input: &str) -> Result<Price, InputError> {
    if input.trim().is_empty() {
        return Ok(Price::ZERO);
    }
    let price: Price = input.parse()?;
    if price.is_negative() {
        return Err(InputError::NegativePrice);
    }
    Ok(price)
}

/// Trimmed, non-empty search term.
pub fn validate_search(term: &str) -> Result<&str, InputError> {
    match term.trim() {
        "" => Err(InputError::EmptySearch),
        term => Ok(term),
    }
}
