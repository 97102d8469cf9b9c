use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::auth::{AuthConfig, AuthGate, Authenticator};
use crate::clipboard::{Clipboard, CopyNotice};
use crate::items::{ItemEditor, ListOptions, ListProjection};
use crate::storage::{AppSettings, DataDir, ItemStore};

pub struct AppState {
    pub data_dir: DataDir,
    pub settings: Arc<RwLock<AppSettings>>,
    pub auth: AuthGate,
    pub store: Arc<dyn ItemStore>,
    pub editor: ItemEditor,
    /// Sort, grouping and search currently applied to the list.
    /// `group_by_category` mirrors the persisted setting.
    pub list_options: watch::Sender<ListOptions>,
    pub clipboard: Arc<dyn Clipboard>,
    pub copy_notice: CopyNotice,
}

impl AppState {
    pub fn new(
        data_dir: DataDir,
        settings: AppSettings,
        store: Arc<dyn ItemStore>,
        authenticator: Arc<dyn Authenticator>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let auth = AuthGate::new(authenticator, AuthConfig::from(&settings));
        let (list_options, _) = watch::channel(ListOptions {
            group_by_category: settings.group_by_category,
            ..ListOptions::default()
        });

        Self {
            data_dir,
            settings: Arc::new(RwLock::new(settings)),
            auth,
            editor: ItemEditor::new(store.clone()),
            store,
            list_options,
            clipboard,
            copy_notice: CopyNotice::new(),
        }
    }

    /// A live list view over the committed items and current options.
    pub fn list_projection(&self) -> ListProjection {
        ListProjection::new(self.store.query_all(), self.list_options.subscribe())
    }
}
