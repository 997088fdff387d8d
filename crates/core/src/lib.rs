#![warn(clippy::all, missing_docs)]

//! Core domain logic for the game shop.
//!
//! This crate hosts the data models, configuration handling, and the
//! text-file persistence for the game catalog and the sales ledger used
//! by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod shop;
pub mod store;
pub mod validate;

pub use catalog::GameCatalog;
pub use config::AppConfig;
pub use error::{InputError, StoreError};
pub use ledger::SalesLedger;
pub use models::{GameRecord, Price, SaleRecord};
pub use shop::{Shop, ShopSummary};
