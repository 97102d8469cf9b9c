//! Validated create/update/delete of items.
//!
//! Every mutation is staged in the store and persisted before the caller's
//! copy of the item changes. If persisting fails the caller's item is left as
//! it was and the error is returned.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use super::kind::ItemKind;
use super::model::{Item, ItemColor, ItemId, DEFAULT_CATEGORY};
use crate::error::Result;
use crate::storage::ItemStore;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Label must not be empty")]
    EmptyLabel,

    #[error("Value must not be empty")]
    EmptyValue,
}

/// Input for the add path. Unset fields come from `kind`, then from the
/// global defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<ItemColor>,
}

impl NewItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn color(mut self, color: ItemColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// The four fields the edit path may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEdit {
    pub label: String,
    pub value: String,
    pub category: String,
    pub color: ItemColor,
}

impl ItemEdit {
    /// Pre-fill an edit form from the current item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            label: item.label.clone(),
            value: item.value.clone(),
            category: item.category.clone(),
            color: item.color,
        }
    }
}

/// Labels are stored trimmed; values are stored verbatim but must not be
/// blank.
fn validate(label: &str, value: &str) -> std::result::Result<String, ValidationError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyValue);
    }
    Ok(label.to_string())
}

fn category_or_default(category: Option<&str>, fallback: &str) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => fallback.to_string(),
    }
}

#[derive(Clone)]
pub struct ItemEditor {
    store: Arc<dyn ItemStore>,
}

impl ItemEditor {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: NewItem) -> Result<Item> {
        let label = validate(&draft.label, &draft.value)?;
        let defaults = draft.kind.unwrap_or(ItemKind::Custom).defaults();

        let icon_name = draft
            .icon_name
            .unwrap_or_else(|| defaults.icon_name.to_string());
        let category = category_or_default(draft.category.as_deref(), defaults.category);
        let color = draft.color.unwrap_or(defaults.color);

        let item = Item::new(label, draft.value, icon_name, category, color);
        self.store.insert(item.clone()).await?;
        self.commit("create").await?;

        info!("Created item {} in {}", item.id, item.category);
        Ok(item)
    }

    /// Apply an edit. `id`, `date_created` and the favorite flag are kept.
    pub async fn update(&self, item: &mut Item, edit: ItemEdit) -> Result<()> {
        let label = validate(&edit.label, &edit.value)?;

        let mut updated = item.clone();
        updated.label = label;
        updated.value = edit.value;
        updated.category = category_or_default(Some(&edit.category), DEFAULT_CATEGORY);
        updated.color = edit.color;

        self.store.update(updated.clone()).await?;
        self.commit("update").await?;

        debug!("Updated item {}", updated.id);
        *item = updated;
        Ok(())
    }

    pub async fn toggle_favorite(&self, item: &mut Item) -> Result<()> {
        let mut updated = item.clone();
        updated.is_favorite = !updated.is_favorite;

        self.store.update(updated.clone()).await?;
        self.commit("toggle favorite").await?;

        debug!("Item {} favorite: {}", updated.id, updated.is_favorite);
        *item = updated;
        Ok(())
    }

    pub async fn delete(&self, item: &Item) -> Result<()> {
        self.delete_by_id(item.id).await
    }

    /// Unknown ids are not an error; the store simply stays as it is.
    pub async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.store.delete(id).await?;
        self.commit("delete").await?;

        info!("Deleted item {}", id);
        Ok(())
    }

    /// Remove every item as a single persisted change.
    pub async fn delete_all(&self) -> Result<()> {
        let items = self.store.snapshot();
        for item in &items {
            self.store.delete(item.id).await?;
        }
        self.commit("delete all").await?;

        info!("Deleted all {} items", items.len());
        Ok(())
    }

    /// Insert a batch of prepared items as one persisted change.
    pub(crate) async fn insert_batch(&self, items: Vec<Item>) -> Result<usize> {
        let count = items.len();
        for item in items {
            self.store.insert(item).await?;
        }
        self.commit("insert batch").await?;
        Ok(count)
    }

    async fn commit(&self, action: &str) -> Result<()> {
        if let Err(e) = self.store.persist().await {
            error!("Failed to persist {}: {}", action, e);
            return Err(e);
        }
        Ok(())
    }
}
