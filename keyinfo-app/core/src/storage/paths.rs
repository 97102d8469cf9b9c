use std::path::{Path, PathBuf};

use crate::error::Result;

const SETTINGS_FILE: &str = "settings.json";
const ITEMS_FILE: &str = "items.json";

/// Root directory for everything the app persists.
///
/// Passed explicitly to each storage call; the host platform decides where
/// it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Create the directory if needed and return a handle to it.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join(ITEMS_FILE)
    }
}
