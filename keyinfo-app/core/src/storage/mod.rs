mod config;
mod fs;
mod items_file;
mod memory;
mod paths;
mod store;

pub use config::{load_settings, save_settings, AppSettings, SettingsView, DEFAULT_PASSCODE};
pub use items_file::{open_item_store, JsonFileBackend, JsonItemStore};
pub use memory::{MemoryBackend, MemoryItemStore};
pub use paths::DataDir;
pub use store::{ItemStore, StagedStore, StoreBackend};
