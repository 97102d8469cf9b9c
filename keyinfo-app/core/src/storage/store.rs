//! The item store contract and its staged implementation.
//!
//! Mutations (`insert`, `update`, `delete`) only touch a staging copy.
//! `persist` writes the staged snapshot through the backend and, only when the
//! write succeeds, publishes it to the live query. A failed write rolls the
//! stage back to the last committed snapshot.

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use crate::error::{KeyInfoError, Result};
use crate::items::{Item, ItemId};

/// Durable keyed collection of items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn insert(&self, item: Item) -> Result<()>;

    /// Replace the stored item with the same id.
    async fn update(&self, item: Item) -> Result<()>;

    /// Remove an item. Unknown ids are ignored.
    async fn delete(&self, id: ItemId) -> Result<()>;

    /// Live view of the committed collection, newest first.
    fn query_all(&self) -> watch::Receiver<Vec<Item>>;

    /// Write staged mutations through to durable storage.
    async fn persist(&self) -> Result<()>;

    /// Current committed collection.
    fn snapshot(&self) -> Vec<Item> {
        self.query_all().borrow().clone()
    }
}

/// Where a staged store writes its snapshots.
pub trait StoreBackend: Send + Sync {
    fn load(&self) -> Result<Vec<Item>>;
    fn save(&self, items: &[Item]) -> Result<()>;
}

fn newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.date_created.cmp(&a.date_created));
}

pub struct StagedStore<B> {
    backend: B,
    staged: RwLock<Vec<Item>>,
    committed: watch::Sender<Vec<Item>>,
}

impl<B: StoreBackend> StagedStore<B> {
    /// Load the backend's contents and start with them committed.
    pub fn open(backend: B) -> Result<Self> {
        let items = backend.load()?;
        debug!("Opened item store with {} items", items.len());
        Ok(Self::with_items(backend, items))
    }

    /// Start from a known collection without reading the backend.
    pub fn with_items(backend: B, mut items: Vec<Item>) -> Self {
        newest_first(&mut items);
        let (committed, _) = watch::channel(items.clone());
        Self {
            backend,
            staged: RwLock::new(items),
            committed,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: StoreBackend> ItemStore for StagedStore<B> {
    async fn insert(&self, item: Item) -> Result<()> {
        let mut staged = self.staged.write().await;
        if staged.iter().any(|i| i.id == item.id) {
            return Err(KeyInfoError::Storage(format!(
                "Item {} already exists",
                item.id
            )));
        }
        staged.push(item);
        Ok(())
    }

    async fn update(&self, item: Item) -> Result<()> {
        let mut staged = self.staged.write().await;
        let slot = staged
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(KeyInfoError::ItemNotFound(item.id))?;
        *slot = item;
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut staged = self.staged.write().await;
        staged.retain(|i| i.id != id);
        Ok(())
    }

    fn query_all(&self) -> watch::Receiver<Vec<Item>> {
        self.committed.subscribe()
    }

    async fn persist(&self) -> Result<()> {
        let mut staged = self.staged.write().await;
        newest_first(&mut staged);

        match self.backend.save(&staged) {
            Ok(()) => {
                self.committed.send_replace(staged.clone());
                debug!("Persisted {} items", staged.len());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to persist items, discarding staged changes: {}", e);
                *staged = self.committed.borrow().clone();
                Err(e)
            }
        }
    }
}
