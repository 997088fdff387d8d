use std::sync::Arc;

use parking_lot::RwLock;

use super::{CatalogRepository, LedgerRepository};
use crate::{
    error::StoreResult,
    models::{GameRecord, SaleRecord},
};

/// Thread-safe catalog held in memory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    games: Arc<RwLock<Vec<GameRecord>>>,
}

impl MemoryCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with `games`, duplicates allowed.
    pub fn with_games(games: Vec<GameRecord>) -> Self {
        Self {
            games: Arc::new(RwLock::new(games)),
        }
    }

    /// Current contents.
    pub fn snapshot(&self) -> Vec<GameRecord> {
        self.games.read().clone()
    }
}

impl CatalogRepository for MemoryCatalog {
    fn load(&self) -> StoreResult<Vec<GameRecord>> {
        Ok(self.snapshot())
    }

    fn save_all(&self, games: &[GameRecord]) -> StoreResult<()> {
        *self.games.write() = games.to_vec();
        Ok(())
    }
}

/// Thread-safe ledger held in memory. Clones share the same sales.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    sales: Arc<RwLock<Vec<SaleRecord>>>,
}

impl MemoryLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded sales.
    pub fn len(&self) -> usize {
        self.sales.read().len()
    }

    /// Whether no sale has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sales.read().is_empty()
    }
}

impl LedgerRepository for MemoryLedger {
    fn load(&self) -> StoreResult<Vec<SaleRecord>> {
        Ok(self.sales.read().clone())
    }

    fn append(&self, sale: &SaleRecord) -> StoreResult<()> {
        self.sales.write().push(sale.clone());
        Ok(())
    }
}
