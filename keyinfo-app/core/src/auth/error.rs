//! Authentication error types.
//!
//! Every variant is recoverable: the lock screen shows the message and lets
//! the user retry or fall back to the passcode.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Biometric hardware or enrollment is missing on this device.
    #[error("{0}")]
    NotAvailable(String),

    /// The platform rejected the biometric attempt; carries its reason.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("No biometrics enrolled on this device")]
    NoBiometricsEnrolled,

    #[error("User cancelled authentication")]
    UserCancelled,

    /// Biometric unlock is switched off in settings.
    #[error("Biometric authentication is turned off")]
    BiometricsDisabled,

    #[error("Incorrect passcode. Please try again.")]
    InvalidPasscode,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NotAvailable(_) => "NOT_AVAILABLE",
            AuthError::AuthenticationFailed(_) => "AUTH_FAILED",
            AuthError::NoBiometricsEnrolled => "NO_BIOMETRICS",
            AuthError::UserCancelled => "USER_CANCELLED",
            AuthError::BiometricsDisabled => "BIOMETRICS_DISABLED",
            AuthError::InvalidPasscode => "INVALID_PASSCODE",
        }
    }

    /// Whether the lock screen should switch to passcode entry.
    pub fn falls_back_to_passcode(&self) -> bool {
        !matches!(self, AuthError::InvalidPasscode)
    }
}

impl serde::Serialize for AuthError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AuthError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
