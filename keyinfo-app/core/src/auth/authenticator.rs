//! The platform authenticator seam.
//!
//! The host app implements [`Authenticator`] on top of the native biometric
//! prompt (LocalAuthentication on iOS, BiometricPrompt on Android).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::error::AuthError;

/// Message shown when the device cannot do biometrics at all.
pub const BIOMETRICS_UNAVAILABLE: &str = "Biometric authentication is not available on this device.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BiometricKind {
    FaceId,
    TouchId,
    Fingerprint,
    Generic,
}

impl BiometricKind {
    /// Label used in the settings toggle ("Use Face ID Authentication").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FaceId => "Face ID",
            Self::TouchId => "Touch ID",
            Self::Fingerprint => "Fingerprint",
            Self::Generic => "Biometric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAvailability {
    pub available: bool,
    pub kind: Option<BiometricKind>,
    pub unavailable_reason: Option<String>,
}

impl AuthAvailability {
    pub fn available(kind: BiometricKind) -> Self {
        Self {
            available: true,
            kind: Some(kind),
            unavailable_reason: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            kind: None,
            unavailable_reason: Some(reason.into()),
        }
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn availability(&self) -> AuthAvailability;

    /// Show the platform prompt with `reason`; resolves once the user is done.
    async fn authenticate(&self, reason: &str) -> Result<(), AuthError>;

    async fn can_authenticate(&self) -> bool {
        self.availability().await.available
    }
}

/// Authenticator with a fixed availability and a queue of scripted results.
///
/// Used on hosts without biometric hardware and in tests. Once the script is
/// exhausted every attempt is cancelled.
pub struct ScriptedAuthenticator {
    availability: AuthAvailability,
    results: Mutex<Vec<Result<(), AuthError>>>,
    prompts: AtomicUsize,
}

impl ScriptedAuthenticator {
    pub fn new(availability: AuthAvailability, results: Vec<Result<(), AuthError>>) -> Self {
        let mut results = results;
        results.reverse();
        Self {
            availability,
            results: Mutex::new(results),
            prompts: AtomicUsize::new(0),
        }
    }

    /// A device without biometric support.
    pub fn unavailable() -> Self {
        Self::new(AuthAvailability::unavailable(BIOMETRICS_UNAVAILABLE), Vec::new())
    }

    /// How many times the platform prompt was shown.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for ScriptedAuthenticator {
    async fn availability(&self) -> AuthAvailability {
        self.availability.clone()
    }

    async fn authenticate(&self, _reason: &str) -> Result<(), AuthError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let next = match self.results.lock() {
            Ok(mut results) => results.pop(),
            Err(poisoned) => poisoned.into_inner().pop(),
        };
        next.unwrap_or(Err(AuthError::UserCancelled))
    }
}
