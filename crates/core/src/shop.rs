//! Catalog and ledger bundled together for the frontends.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::{
    catalog::GameCatalog,
    config::AppConfig,
    error::StoreResult,
    ledger::SalesLedger,
    models::{Price, SaleRecord},
    store::{CatalogRepository, FileCatalog, FileLedger, LedgerRepository},
};

/// Counters shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShopSummary {
    /// Games in the catalog.
    pub games: usize,
    /// Sales in the ledger.
    pub sales: usize,
    /// Sum of all sale prices.
    pub revenue: Price,
}

/// Shop state: a catalog plus a sales ledger sharing one data directory.
pub struct Shop<C = FileCatalog, L = FileLedger> {
    catalog: GameCatalog<C>,
    ledger: SalesLedger<L>,
}

impl Shop {
    /// Open the text-file stores named by `config`.
    pub fn open(config: &AppConfig) -> Self {
        Self::new(
            FileCatalog::new(config.catalog_path()),
            FileLedger::new(config.ledger_path()),
        )
    }
}

impl<C: CatalogRepository, L: LedgerRepository> Shop<C, L> {
    /// Build a shop from arbitrary repositories.
    pub fn new(catalog: C, ledger: L) -> Self {
        Self {
            catalog: GameCatalog::new(catalog),
            ledger: SalesLedger::new(ledger),
        }
    }

    /// Catalog operations.
    pub fn catalog(&self) -> &GameCatalog<C> {
        &self.catalog
    }

    /// Ledger operations.
    pub fn ledger(&self) -> &SalesLedger<L> {
        &self.ledger
    }

    /// Sell the game named exactly `name` at its current price.
    ///
    /// Returns `None` without touching the ledger when no such game exists.
    pub fn sell(&self, name: &str) -> StoreResult<Option<SaleRecord>> {
        match self.catalog.find(name)? {
            Some(game) => self.ledger.record(&game).map(Some),
            None => {
                warn!(name, "Sale requested for unknown game");
                Ok(None)
            }
        }
    }

    /// Same as [`Shop::sell`] with an explicit timestamp.
    pub fn sell_at(&self, name: &str, at: NaiveDateTime) -> StoreResult<Option<SaleRecord>> {
        match self.catalog.find(name)? {
            Some(game) => self.ledger.record_at(&game, at).map(Some),
            None => Ok(None),
        }
    }

    /// Game and sale counts plus revenue.
    pub fn summary(&self) -> StoreResult<ShopSummary> {
        let games = self.catalog.list()?.len();
        let sales = self.ledger.load()?;
        Ok(ShopSummary {
            games,
            sales: sales.len(),
            revenue: sales.iter().map(|sale| sale.price).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryCatalog, MemoryLedger};
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn sell_snapshots_current_catalog_entry() -> Result<()> {
        let ledger = MemoryLedger::new();
        let shop = Shop::new(MemoryCatalog::new(), ledger.clone());
        shop.catalog().insert("Zelda", "Adventure", Price::from_cents(30000))?;

        let at = NaiveDate::from_ymd_opt(2024, 3, 2)
            .and_then(|date| date.and_hms_opt(14, 5, 9))
            .expect("valid timestamp");
        let sale = shop.sell_at("Zelda", at)?.expect("sale recorded");
        assert_eq!(sale.price, Price::from_cents(30000));
        assert_eq!(sale.timestamp, "2024-03-02 14:05:09");

        assert!(shop.sell("Mario")?.is_none());
        assert_eq!(ledger.len(), 1);
        Ok(())
    }

    #[test]
    fn summary_counts_games_and_sales() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let shop = Shop::open(&config);
        assert_eq!(shop.summary()?, ShopSummary::default());

        shop.catalog().insert("Chess", "Board", Price::from_cents(1000))?;
        shop.catalog().insert("Go", "Board", Price::from_cents(1550))?;
        shop.sell("Chess")?;
        shop.sell("Go")?;

        let summary = shop.summary()?;
        assert_eq!(summary.games, 2);
        assert_eq!(summary.sales, 2);
        assert_eq!(summary.revenue.to_string(), "25.50");
        assert!(config.catalog_path().exists());
        assert!(config.ledger_path().exists());
        Ok(())
    }
}
