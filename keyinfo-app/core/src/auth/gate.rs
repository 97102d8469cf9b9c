//! Lock/unlock state machine in front of every item operation.
//!
//! `Locked → Unlocked` happens only after the platform authenticator or the
//! passcode check succeeds. Going back to `Locked` is driven by lifecycle
//! events and the configured [`RelockPolicy`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::authenticator::{AuthAvailability, Authenticator, BIOMETRICS_UNAVAILABLE};
use super::error::AuthError;
use super::relock::{LifecycleEvent, RelockPolicy};
use crate::error::{KeyInfoError, Result};
use crate::storage::AppSettings;

/// Reason string handed to the platform prompt.
pub const AUTH_REASON: &str = "Unlock KeyInfo to access your secure information";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LockState {
    Locked,
    Unlocked,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "Locked"),
            Self::Unlocked => write!(f, "Unlocked"),
        }
    }
}

/// The subset of settings the gate needs, injected at construction.
#[derive(Clone)]
pub struct AuthConfig {
    pub use_biometric_auth: bool,
    pub require_auth_on_launch: bool,
    pub relock_policy: RelockPolicy,
    passcode: Zeroizing<String>,
}

impl AuthConfig {
    pub fn new(
        use_biometric_auth: bool,
        require_auth_on_launch: bool,
        relock_policy: RelockPolicy,
        passcode: impl Into<String>,
    ) -> Self {
        Self {
            use_biometric_auth,
            require_auth_on_launch,
            relock_policy,
            passcode: Zeroizing::new(passcode.into()),
        }
    }
}

impl From<&AppSettings> for AuthConfig {
    fn from(settings: &AppSettings) -> Self {
        Self::new(
            settings.use_biometric_auth,
            settings.require_auth_on_launch,
            settings.relock_policy,
            settings.passcode.clone(),
        )
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("use_biometric_auth", &self.use_biometric_auth)
            .field("require_auth_on_launch", &self.require_auth_on_launch)
            .field("relock_policy", &self.relock_policy)
            .field("passcode", &"[REDACTED]")
            .finish()
    }
}

pub struct AuthGate {
    state: watch::Sender<LockState>,
    authenticator: Arc<dyn Authenticator>,
    config: RwLock<AuthConfig>,
}

impl AuthGate {
    /// Starts `Locked` unless launch authentication is switched off.
    pub fn new(authenticator: Arc<dyn Authenticator>, config: AuthConfig) -> Self {
        let initial = if config.require_auth_on_launch {
            LockState::Locked
        } else {
            LockState::Unlocked
        };
        debug!("Auth gate starting {}", initial);

        let (state, _) = watch::channel(initial);
        Self {
            state,
            authenticator,
            config: RwLock::new(config),
        }
    }

    pub fn state(&self) -> LockState {
        *self.state.borrow()
    }

    pub fn is_unlocked(&self) -> bool {
        self.state() == LockState::Unlocked
    }

    /// Observe lock state changes (lock screen vs. main content).
    pub fn subscribe(&self) -> watch::Receiver<LockState> {
        self.state.subscribe()
    }

    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(KeyInfoError::Locked)
        }
    }

    pub async fn availability(&self) -> AuthAvailability {
        if !self.config.read().await.use_biometric_auth {
            return AuthAvailability::unavailable(AuthError::BiometricsDisabled.to_string());
        }
        self.authenticator.availability().await
    }

    /// Run the platform biometric prompt and unlock on success.
    pub async fn request_biometric_auth(&self) -> std::result::Result<(), AuthError> {
        if self.is_unlocked() {
            debug!("Biometric auth requested while already unlocked");
            return Ok(());
        }

        if !self.config.read().await.use_biometric_auth {
            return Err(AuthError::BiometricsDisabled);
        }

        let availability = self.authenticator.availability().await;
        if !availability.available {
            let reason = availability
                .unavailable_reason
                .unwrap_or_else(|| BIOMETRICS_UNAVAILABLE.to_string());
            warn!("Biometric auth unavailable: {}", reason);
            return Err(AuthError::NotAvailable(reason));
        }

        match self.authenticator.authenticate(AUTH_REASON).await {
            Ok(()) => {
                self.unlock("biometrics");
                Ok(())
            }
            Err(e) => {
                warn!("Biometric auth failed: {}", e);
                Err(e)
            }
        }
    }

    /// Compare against the configured passcode and unlock on a match.
    pub async fn verify_passcode(&self, candidate: &str) -> std::result::Result<(), AuthError> {
        let matches = {
            let config = self.config.read().await;
            candidate == config.passcode.as_str()
        };

        if matches {
            self.unlock("passcode");
            Ok(())
        } else {
            warn!("Passcode rejected");
            Err(AuthError::InvalidPasscode)
        }
    }

    /// Apply the relock policy to a lifecycle event. Returns the new state.
    pub async fn handle_lifecycle(&self, event: LifecycleEvent) -> LockState {
        let policy = self.config.read().await.relock_policy;
        if policy.should_lock(event) && self.is_unlocked() {
            info!("Locking on {:?} (policy {:?})", event, policy);
            self.state.send_replace(LockState::Locked);
        }
        self.state()
    }

    /// Swap in new settings without touching the current lock state.
    pub async fn apply_config(&self, config: AuthConfig) {
        debug!("Updating auth config: {:?}", config);
        *self.config.write().await = config;
    }

    fn unlock(&self, via: &str) {
        let previous = self.state.send_replace(LockState::Unlocked);
        if previous == LockState::Locked {
            info!("Unlocked via {}", via);
        }
    }
}
