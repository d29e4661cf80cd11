//! JSON checkpoint persistence
//!
//! The checkpoint is a pretty-printed JSON array of stock records, written
//! after every scraped product and every successful push so a run can be
//! killed and resumed at any point. The format matches the original
//! `product_data.json` files, which keep loading unchanged.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::domain::StockRecord;

/// File-backed checkpoint store for stock records
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records; a missing file is an empty checkpoint.
    pub async fn load(&self) -> Result<Vec<StockRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read checkpoint: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid checkpoint file: {}", self.path.display()))
    }

    /// Persist the full record set.
    ///
    /// Writes to a sibling temp file and renames it over the checkpoint so a
    /// crash mid-write cannot leave a truncated array behind.
    pub async fn save(&self, records: &[StockRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize checkpoint records")?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write checkpoint: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace checkpoint: {}", self.path.display()))?;
        Ok(())
    }

    /// The set of EANs already present in a record list.
    pub fn processed_eans(records: &[StockRecord]) -> HashSet<String> {
        records.iter().map(|record| record.ean.clone()).collect()
    }
}
