//! Authentication gate for the vault.
//!
//! Item access is only possible while the gate is `Unlocked`. Unlocking goes
//! through the platform biometric prompt or the passcode fallback.

pub mod authenticator;
pub mod error;
pub mod gate;
pub mod relock;

pub use authenticator::{
    AuthAvailability, Authenticator, BiometricKind, ScriptedAuthenticator, BIOMETRICS_UNAVAILABLE,
};
pub use error::AuthError;
pub use gate::{AuthConfig, AuthGate, LockState, AUTH_REASON};
pub use relock::{LifecycleEvent, RelockPolicy};
