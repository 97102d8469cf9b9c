pub mod auth;
pub mod clipboard;
pub mod commands;
pub mod error;
pub mod items;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::Authenticator;
use clipboard::Clipboard;
use error::{KeyInfoError, Result};
use state::AppState;
use storage::{load_settings, open_item_store, DataDir};

/// Install the tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyinfo_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Bring up the vault rooted at `data_dir`.
///
/// Unreadable settings fall back to defaults. Failing to open the item store
/// is fatal.
pub async fn initialize_app(
    data_dir: impl Into<PathBuf>,
    authenticator: Arc<dyn Authenticator>,
    clipboard: Arc<dyn Clipboard>,
) -> Result<AppState> {
    info!("Starting KeyInfo...");

    let data_dir = DataDir::init(data_dir)?;

    let settings = load_settings(&data_dir).unwrap_or_else(|e| {
        warn!("Failed to load settings, using defaults: {}", e);
        Default::default()
    });

    let store = match open_item_store(&data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open item store: {}", e);
            return Err(match e {
                KeyInfoError::StoreInit(_) => e,
                other => KeyInfoError::StoreInit(other.to_string()),
            });
        }
    };

    let state = AppState::new(data_dir, settings, store, authenticator, clipboard);
    info!(
        "KeyInfo ready: {} items, {}",
        state.store.snapshot().len(),
        state.auth.state()
    );
    Ok(state)
}
