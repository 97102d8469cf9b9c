use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::store::{StagedStore, StoreBackend};
use crate::error::{KeyInfoError, Result};
use crate::items::Item;

/// Backend that keeps nothing beyond the process lifetime.
///
/// Saves can be switched to fail, which is how persistence failures are
/// exercised without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBackend {
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    fn save(&self, _items: &[Item]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(KeyInfoError::Storage("in-memory save rejected".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub type MemoryItemStore = StagedStore<MemoryBackend>;

impl MemoryItemStore {
    pub fn empty() -> Self {
        Self::with_items(MemoryBackend::default(), Vec::new())
    }
}
