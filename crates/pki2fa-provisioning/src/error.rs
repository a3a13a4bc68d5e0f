//! Error types for `pki2fa-provisioning`.

use pki2fa_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by provisioning, proof and storage operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Cryptographic operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// No seed has been provisioned yet.
    #[error("seed not decrypted yet")]
    SeedNotProvisioned,

    /// A required request field was absent.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// The artifact to prove is not a 40-character hex commit hash.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// The seed authority answered with a non-success status.
    #[error("seed authority error: {0}")]
    Authority(String),

    /// Refusing to overwrite existing key material.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
