use thiserror::Error;

use crate::auth::AuthError;
use crate::items::{ItemId, ValidationError};

#[derive(Error, Debug)]
pub enum KeyInfoError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Vault is locked")]
    Locked,

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store initialization failed: {0}")]
    StoreInit(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Confirmation text did not match")]
    ConfirmationMismatch,
}

impl serde::Serialize for KeyInfoError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KeyInfoError>;
