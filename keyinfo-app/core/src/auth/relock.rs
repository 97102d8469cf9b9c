use serde::{Deserialize, Serialize};

/// App lifecycle transitions reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Background,
    Foreground,
    Terminate,
}

/// Which lifecycle events send the gate back to `Locked`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelockPolicy {
    /// Stay unlocked until the process goes away.
    #[default]
    Never,
    /// Lock when the app leaves the foreground or terminates.
    OnBackground,
    /// Lock only on termination.
    OnTerminate,
}

impl RelockPolicy {
    pub fn should_lock(&self, event: LifecycleEvent) -> bool {
        match (self, event) {
            (Self::Never, _) => false,
            (_, LifecycleEvent::Foreground) => false,
            (Self::OnBackground, _) => true,
            (Self::OnTerminate, LifecycleEvent::Terminate) => true,
            (Self::OnTerminate, LifecycleEvent::Background) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relock_table() {
        use LifecycleEvent::*;

        assert!(!RelockPolicy::Never.should_lock(Background));
        assert!(!RelockPolicy::Never.should_lock(Terminate));
        assert!(RelockPolicy::OnBackground.should_lock(Background));
        assert!(RelockPolicy::OnBackground.should_lock(Terminate));
        assert!(!RelockPolicy::OnBackground.should_lock(Foreground));
        assert!(!RelockPolicy::OnTerminate.should_lock(Background));
        assert!(RelockPolicy::OnTerminate.should_lock(Terminate));
    }
}
