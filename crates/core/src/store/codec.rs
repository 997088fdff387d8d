//! Line format shared by the catalog and ledger files.
//!
//! Both files hold one record per line with `;` as the only separator and no
//! escaping. The two loaders deliberately disagree on bad prices: the catalog
//! keeps the record at `0.00`, the ledger drops the line.

use tracing::warn;

use crate::models::{GameRecord, Price, SaleRecord};

const SEPARATOR: char = ';';
const CATALOG_FIELDS: usize = 3;
const LEDGER_FIELDS: usize = 4;

fn split_fields(line: &str) -> Vec<&str> {
    line.trim().split(SEPARATOR).collect()
}

/// Parse one `name;genre;price` line.
pub fn parse_game(line: &str) -> Option<GameRecord> {
    let fields = split_fields(line);
    if fields.len() != CATALOG_FIELDS {
        return None;
    }
    let price = fields[2].parse::<Price>().unwrap_or_else(|err| {
        warn!(name = fields[0], "{err}; treating as 0.00");
        Price::ZERO
    });
    Some(GameRecord::new(fields[0], fields[1], price))
}

/// Parse one `name;genre;price;timestamp` line.
pub fn parse_sale(line: &str) -> Option<SaleRecord> {
    let fields = split_fields(line);
    if fields.len() != LEDGER_FIELDS {
        return None;
    }
    match fields[2].parse::<Price>() {
        Ok(price) => Some(SaleRecord {
            name: fields[0].to_string(),
            genre: fields[1].to_string(),
            price,
            timestamp: fields[3].to_string(),
        }),
        Err(err) => {
            warn!(name = fields[0], "{err}; dropping sale line");
            None
        }
    }
}

/// Render a catalog line, newline included.
pub fn format_game(game: &GameRecord) -> String {
    format!("{};{};{}\n", game.name, game.genre, game.price)
}

/// Render a ledger line, newline included.
pub fn format_sale(sale: &SaleRecord) -> String {
    format!(
        "{};{};{};{}\n",
        sale.name, sale.genre, sale.price, sale.timestamp
    )
}

/// Parse a whole catalog file, skipping lines with the wrong field count.
pub fn parse_catalog(content: &str) -> Vec<GameRecord> {
    content.lines().filter_map(parse_game).collect()
}

/// Parse a whole ledger file, skipping malformed lines.
pub fn parse_ledger(content: &str) -> Vec<SaleRecord> {
    content.lines().filter_map(parse_sale).collect()
}

/// Render a whole catalog file.
pub fn format_catalog(games: &[GameRecord]) -> String {
    games.iter().map(format_game).collect()
}
