//! Sales ledger operations over a [`LedgerRepository`].

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::{
    error::StoreResult,
    models::{GameRecord, Price, SaleRecord, TIMESTAMP_FORMAT},
    store::LedgerRepository,
};

/// Append-only record of sales.
#[derive(Debug, Clone)]
pub struct SalesLedger<R> {
    repo: R,
}

impl<R: LedgerRepository> SalesLedger<R> {
    /// Wrap a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record a sale stamped with the current local time.
    pub fn append(&self, name: &str, genre: &str, price: Price) -> StoreResult<SaleRecord> {
        self.append_at(name, genre, price, Local::now().naive_local())
    }

    /// Record a sale with an explicit timestamp.
    pub fn append_at(
        &self,
        name: &str,
        genre: &str,
        price: Price,
        at: NaiveDateTime,
    ) -> StoreResult<SaleRecord> {
        let sale = SaleRecord {
            name: name.to_string(),
            genre: genre.to_string(),
            price,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        };
        self.repo.append(&sale)?;
        info!(name, %price, timestamp = %sale.timestamp, "Sale recorded");
        Ok(sale)
    }

    /// Record a sale of `game` at its current genre and price.
    pub fn record(&self, game: &GameRecord) -> StoreResult<SaleRecord> {
        self.append(&game.name, &game.genre, game.price)
    }

    /// Record a sale of `game` with an explicit timestamp.
    pub fn record_at(&self, game: &GameRecord, at: NaiveDateTime) -> StoreResult<SaleRecord> {
        self.append_at(&game.name, &game.genre, game.price, at)
    }

    /// Every sale, oldest first.
    pub fn load(&self) -> StoreResult<Vec<SaleRecord>> {
        self.repo.load()
    }

    /// Sum of all sale prices.
    pub fn total(&self) -> StoreResult<Price> {
        Ok(self.repo.load()?.iter().map(|sale| sale.price).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::GameCatalog,
        store::{FileLedger, MemoryCatalog, MemoryLedger},
    };
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid test timestamp")
    }

    #[test]
    fn total_sums_parsed_lines() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sales.txt");
        std::fs::write(
            &path,
            "Chess;Board;10.00;2024-01-01 10:00:00\n\
             Go;Board;15.50;2024-01-01 11:00:00\n\
             Bad;Board;n/a;2024-01-01 12:00:00\n",
        )?;
        let ledger = SalesLedger::new(FileLedger::new(&path));
        assert_eq!(ledger.total()?, Price::from_cents(2550));
        assert_eq!(ledger.total()?.to_string(), "25.50");
        Ok(())
    }

    #[test]
    fn empty_ledger_totals_zero() -> Result<()> {
        let dir = tempdir()?;
        let ledger = SalesLedger::new(FileLedger::new(dir.path().join("sales.txt")));
        assert_eq!(ledger.total()?, Price::ZERO);
        assert!(ledger.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn append_formats_timestamp_and_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sales.txt");
        let ledger = SalesLedger::new(FileLedger::new(&path));
        ledger.append_at("Chess", "Board", Price::from_cents(1000), at(10))?;
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "Chess;Board;10.00;2024-01-01 10:00:00\n"
        );
        Ok(())
    }

    #[test]
    fn append_uses_local_clock() -> Result<()> {
        let ledger = SalesLedger::new(MemoryLedger::new());
        let sale = ledger.append("Go", "Board", Price::from_cents(1550))?;
        assert!(NaiveDateTime::parse_from_str(&sale.timestamp, TIMESTAMP_FORMAT).is_ok());
        Ok(())
    }

    #[test]
    fn sales_keep_order_and_ignore_catalog_updates() -> Result<()> {
        let catalog = GameCatalog::new(MemoryCatalog::new());
        let ledger = SalesLedger::new(MemoryLedger::new());
        catalog.insert("Chess", "Board", Price::from_cents(1000))?;
        catalog.insert("Go", "Board", Price::from_cents(1550))?;

        let chess = catalog.find("Chess")?.expect("chess exists");
        let go = catalog.find("Go")?.expect("go exists");
        let first = ledger.record_at(&chess, at(10))?;
        let second = ledger.record_at(&go, at(11))?;

        catalog.update("Chess", "Chess Deluxe", "Strategy", Price::from_cents(9900))?;

        let sales = ledger.load()?;
        assert_eq!(sales, vec![first, second]);
        assert_eq!(sales[0].name, "Chess");
        assert_eq!(sales[0].genre, "Board");
        assert_eq!(sales[0].price, Price::from_cents(1000));
        Ok(())
    }
}
