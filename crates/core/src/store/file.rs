use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{codec, CatalogRepository, LedgerRepository};
use crate::{
    error::{StoreError, StoreResult},
    models::{GameRecord, SaleRecord},
};

/// Catalog kept in a `name;genre;price` text file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Catalog backed by the file at `path`; the file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for FileCatalog {
    fn load(&self) -> StoreResult<Vec<GameRecord>> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };
        let games = codec::parse_catalog(&content);
        debug!(path = %self.path.display(), count = games.len(), "Catalog loaded");
        Ok(games)
    }

    fn save_all(&self, games: &[GameRecord]) -> StoreResult<()> {
        ensure_parent(&self.path)?;
        fs::write(&self.path, codec::format_catalog(games))
            .map_err(|err| StoreError::io(&self.path, err))?;
        debug!(path = %self.path.display(), count = games.len(), "Catalog saved");
        Ok(())
    }
}

/// Ledger kept in an append-only `name;genre;price;timestamp` text file.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Ledger backed by the file at `path`; the file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerRepository for FileLedger {
    fn load(&self) -> StoreResult<Vec<SaleRecord>> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };
        let sales = codec::parse_ledger(&content);
        debug!(path = %self.path.display(), count = sales.len(), "Ledger loaded");
        Ok(sales)
    }

    fn append(&self, sale: &SaleRecord) -> StoreResult<()> {
        ensure_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| StoreError::io(&self.path, err))?;
        file.write_all(codec::format_sale(sale).as_bytes())
            .map_err(|err| StoreError::io(&self.path, err))
    }
}

fn read_optional(path: &Path) -> StoreResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::io(path, err)),
    }
}

fn ensure_parent(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))
        }
        _ => Ok(()),
    }
}
