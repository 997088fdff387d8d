//! Persistence for the catalog and the sales ledger.

/// Semicolon-delimited line format.
pub mod codec;
/// Text-file repositories.
pub mod file;
/// In-memory repositories.
pub mod memory;

pub use file::{FileCatalog, FileLedger};
pub use memory::{MemoryCatalog, MemoryLedger};

use crate::{
    error::StoreResult,
    models::{GameRecord, SaleRecord},
};

/// Storage for the full set of game records.
pub trait CatalogRepository: Send + Sync {
    /// Read every record. A store that does not exist yet is empty.
    fn load(&self) -> StoreResult<Vec<GameRecord>>;

    /// Replace the stored records with `games`.
    fn save_all(&self, games: &[GameRecord]) -> StoreResult<()>;
}

/// Append-only storage for sales.
pub trait LedgerRepository: Send + Sync {
    /// Read every sale in the order it was appended.
    fn load(&self) -> StoreResult<Vec<SaleRecord>>;

    /// Add one sale at the end.
    fn append(&self, sale: &SaleRecord) -> StoreResult<()>;
}
