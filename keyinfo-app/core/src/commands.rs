use tracing::{debug, info, warn};

use crate::auth::{AuthAvailability, AuthConfig, LifecycleEvent, LockState};
use crate::clipboard::CopiedNotice;
use crate::error::{KeyInfoError, Result};
use crate::items::{
    sample_items, Item, ItemEdit, ItemId, ListEngine, ListOptions, ListView, NewItem, SortOption,
};
use crate::state::AppState;
use crate::storage::{save_settings, AppSettings, SettingsView};

/// Word the user must type to confirm wiping every item.
pub const DELETE_ALL_CONFIRMATION: &str = "delete";

fn find_item(state: &AppState, id: ItemId) -> Result<Item> {
    state
        .store
        .snapshot()
        .into_iter()
        .find(|item| item.id == id)
        .ok_or(KeyInfoError::ItemNotFound(id))
}

// Auth commands
pub async fn get_lock_state(state: &AppState) -> LockState {
    state.auth.state()
}

pub async fn check_biometric_availability(state: &AppState) -> AuthAvailability {
    state.auth.availability().await
}

pub async fn unlock_with_biometrics(state: &AppState) -> Result<LockState> {
    state.auth.request_biometric_auth().await?;
    Ok(state.auth.state())
}

pub async fn unlock_with_passcode(state: &AppState, passcode: &str) -> Result<LockState> {
    state.auth.verify_passcode(passcode).await?;
    Ok(state.auth.state())
}

pub async fn handle_lifecycle_event(state: &AppState, event: LifecycleEvent) -> LockState {
    debug!("Lifecycle event: {:?}", event);
    state.auth.handle_lifecycle(event).await
}

// List commands
pub async fn list_items(state: &AppState) -> Result<ListView> {
    state.auth.ensure_unlocked()?;
    let items = state.store.snapshot();
    let options = state.list_options.borrow().clone();
    Ok(ListEngine::derive(&items, &options))
}

pub async fn get_list_options(state: &AppState) -> ListOptions {
    state.list_options.borrow().clone()
}

pub async fn set_search_text(state: &AppState, text: String) {
    state.list_options.send_modify(|options| options.search_text = text);
}

pub async fn set_sort_option(state: &AppState, sort: SortOption) {
    state.list_options.send_modify(|options| options.sort = sort);
}

/// Switch between grouped and flat layout. The choice is persisted.
pub async fn set_group_by_category(state: &AppState, enabled: bool) -> Result<()> {
    state.auth.ensure_unlocked()?;
    let mut settings = state.settings.read().await.clone();
    settings.group_by_category = enabled;
    apply_settings(state, settings).await?;
    Ok(())
}

// Item commands
pub async fn add_item(state: &AppState, draft: NewItem) -> Result<Item> {
    state.auth.ensure_unlocked()?;
    state.editor.create(draft).await
}

pub async fn update_item(state: &AppState, id: ItemId, edit: ItemEdit) -> Result<Item> {
    state.auth.ensure_unlocked()?;
    let mut item = find_item(state, id)?;
    state.editor.update(&mut item, edit).await?;
    Ok(item)
}

pub async fn toggle_favorite(state: &AppState, id: ItemId) -> Result<Item> {
    state.auth.ensure_unlocked()?;
    let mut item = find_item(state, id)?;
    state.editor.toggle_favorite(&mut item).await?;
    Ok(item)
}

pub async fn delete_item(state: &AppState, id: ItemId) -> Result<()> {
    state.auth.ensure_unlocked()?;
    state.editor.delete_by_id(id).await
}

pub async fn delete_all_items(state: &AppState, confirmation: &str) -> Result<()> {
    state.auth.ensure_unlocked()?;
    if !confirmation.trim().eq_ignore_ascii_case(DELETE_ALL_CONFIRMATION) {
        warn!("Delete all refused: confirmation did not match");
        return Err(KeyInfoError::ConfirmationMismatch);
    }
    state.editor.delete_all().await
}

/// Insert the demo entries. Returns how many were added.
pub async fn generate_sample_data(state: &AppState) -> Result<usize> {
    state.auth.ensure_unlocked()?;
    let count = state
        .editor
        .insert_batch(sample_items(chrono::Utc::now()))
        .await?;
    info!("Generated {} sample items", count);
    Ok(count)
}

/// Copy an item's value to the clipboard and show the copied notice.
pub async fn copy_item_value(state: &AppState, id: ItemId) -> Result<CopiedNotice> {
    state.auth.ensure_unlocked()?;
    let item = find_item(state, id)?;

    state.clipboard.copy(&item.value)?;
    debug!("Copied value of item {}", item.id);

    let notice = CopiedNotice {
        label: item.label,
        value: item.value,
    };
    state.copy_notice.show(notice.clone());
    Ok(notice)
}

pub async fn get_copied_notice(state: &AppState) -> Result<Option<CopiedNotice>> {
    state.auth.ensure_unlocked()?;
    Ok(state.copy_notice.current())
}

// Settings commands
pub async fn get_settings(state: &AppState) -> Result<SettingsView> {
    state.auth.ensure_unlocked()?;
    let settings = state.settings.read().await;
    Ok(SettingsView::from(&*settings))
}

/// Persist new settings and apply them. Returns the settings as stored,
/// which may differ from the input when a rule forces a toggle back on.
pub async fn update_settings(state: &AppState, view: SettingsView) -> Result<SettingsView> {
    state.auth.ensure_unlocked()?;
    let settings = view.apply_to(&*state.settings.read().await);
    apply_settings(state, settings).await
}

pub async fn reset_settings(state: &AppState) -> Result<SettingsView> {
    state.auth.ensure_unlocked()?;
    let mut settings = state.settings.read().await.clone();
    settings.reset_security();
    info!("Resetting security settings");
    apply_settings(state, settings).await
}

async fn apply_settings(state: &AppState, settings: AppSettings) -> Result<SettingsView> {
    let settings = settings.normalized();
    save_settings(&state.data_dir, &settings)?;

    {
        let mut current = state.settings.write().await;
        *current = settings.clone();
    }

    state.auth.apply_config(AuthConfig::from(&settings)).await;
    state.list_options.send_if_modified(|options| {
        let changed = options.group_by_category != settings.group_by_category;
        options.group_by_category = settings.group_by_category;
        changed
    });

    debug!("Settings updated: {:?}", settings);
    Ok(SettingsView::from(&settings))
}
