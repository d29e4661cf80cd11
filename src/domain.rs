//! Domain layer - core types for the stock sync pipeline

pub mod error;
pub mod product;

pub use error::ScrapeError;
pub use product::{normalize_ean, StockRecord, StockStatus, StyleEntry};
