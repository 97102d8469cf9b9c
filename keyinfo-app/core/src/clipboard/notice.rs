use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// How long the "copied" confirmation stays visible.
pub const COPIED_NOTICE_WINDOW: Duration = Duration::from_secs(2);

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedNotice {
    pub label: String,
    pub value: String,
}

impl fmt::Debug for CopiedNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopiedNotice")
            .field("label", &self.label)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Transient confirmation shown after a copy, cleared automatically.
///
/// Each `show` starts a fresh window; an older timer never clears a newer
/// notice.
pub struct CopyNotice {
    current: Arc<watch::Sender<Option<CopiedNotice>>>,
    generation: Arc<AtomicU64>,
    window: Duration,
}

impl CopyNotice {
    pub fn new() -> Self {
        Self::with_window(COPIED_NOTICE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
            generation: Arc::new(AtomicU64::new(0)),
            window,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&self, notice: CopiedNotice) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Showing copied notice for {}", notice.label);
        self.current.send_replace(Some(notice));

        let current = self.current.clone();
        let latest = self.generation.clone();
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if latest.load(Ordering::SeqCst) == generation {
                current.send_replace(None);
            }
        });
    }

    pub fn current(&self) -> Option<CopiedNotice> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CopiedNotice>> {
        self.current.subscribe()
    }
}

impl Default for CopyNotice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(label: &str) -> CopiedNotice {
        CopiedNotice {
            label: label.into(),
            value: "secret".into(),
        }
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_clears_after_window() {
        let notices = CopyNotice::new();
        notices.show(notice("Wifi"));
        assert_eq!(notices.current(), Some(notice("Wifi")));

        advance(1_900).await;
        assert!(notices.current().is_some());

        advance(200).await;
        assert_eq!(notices.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_copy_restarts_window() {
        let notices = CopyNotice::new();
        notices.show(notice("First"));
        advance(1_500).await;
        notices.show(notice("Second"));

        advance(1_000).await;
        assert_eq!(notices.current(), Some(notice("Second")));

        advance(1_100).await;
        assert_eq!(notices.current(), None);
    }
}
