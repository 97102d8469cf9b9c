//! JSON file backend for the item store.

use std::path::PathBuf;

use tracing::debug;

use super::fs::write_private;
use super::paths::DataDir;
use super::store::{StagedStore, StoreBackend};
use crate::error::{KeyInfoError, Result};
use crate::items::Item;

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<Item>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let items: Vec<Item> = serde_json::from_str(&content)
            .map_err(|e| KeyInfoError::Storage(format!("Item file corrupted: {}", e)))?;
        Ok(items)
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        write_private(&self.path, &content)?;

        debug!("Wrote {} items to {:?}", items.len(), self.path);
        Ok(())
    }
}

pub type JsonItemStore = StagedStore<JsonFileBackend>;

/// Open the item store under the data directory.
///
/// Failure here is fatal for the app: without a store there is nothing to
/// show behind the lock screen.
pub fn open_item_store(data_dir: &DataDir) -> Result<JsonItemStore> {
    JsonItemStore::open(JsonFileBackend::new(data_dir.items_path()))
        .map_err(|e| KeyInfoError::StoreInit(e.to_string()))
}
