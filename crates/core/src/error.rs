//! Error types surfaced by the store and form validation.

use std::{io, path::PathBuf};

use thiserror::Error;

pub use crate::models::PriceParseError;

/// Failure while reading or writing a backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file system refused the operation.
    #[error("file I/O failed for {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Rejected user input on one of the shop forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Name or genre left blank.
    #[error("fill in both the name and the genre")]
    MissingFields,
    /// Search submitted without a term.
    #[error("type a term to search for")]
    EmptySearch,
    /// Price text did not parse.
    #[error(transparent)]
    Price(#[from] PriceParseError),
    /// Price below zero.
    #[error("price cannot be negative")]
    NegativePrice,
}
