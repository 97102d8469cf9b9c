use std::sync::Mutex;

use crate::error::{KeyInfoError, Result};

/// Write-only access to the platform pasteboard.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// The desktop system clipboard.
#[cfg(not(any(target_os = "android", target_os = "ios")))]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(not(any(target_os = "android", target_os = "ios")))]
impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| KeyInfoError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| KeyInfoError::Clipboard(e.to_string()))
    }
}

/// Clipboard that only remembers the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        match self.last.lock() {
            Ok(last) => last.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut last = self
            .last
            .lock()
            .map_err(|e| KeyInfoError::Clipboard(e.to_string()))?;
        *last = Some(text.to_string());
        Ok(())
    }
}
