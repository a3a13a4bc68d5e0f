//! Cryptographic error types for `pki2fa-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// RSA key generation failed or the requested size is below the minimum.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// RSA-OAEP decryption failed.
    ///
    /// Carries no detail: padding failure, wrong key and truncated
    /// ciphertext all collapse into this one variant.
    #[error("decryption failed")]
    Decryption,

    /// RSA-OAEP encryption failed (payload too large for the modulus).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Invalid base64, hex or UTF-8 input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Seed is not exactly 64 hexadecimal characters.
    #[error("invalid seed format: {0}")]
    InvalidSeedFormat(String),

    /// Signature or code did not verify on a strict validation path.
    #[error("verification failed: {0}")]
    Verification(String),

    /// Signature creation failed.
    #[error("signature error: {0}")]
    Signature(String),

    /// Invalid key material (unparseable PEM, unsupported encoding).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// TOTP/HOTP generation or validation error.
    #[error("OTP error: {0}")]
    Otp(String),

    /// Secure memory allocation failure (mlock, CSPRNG, rlimit).
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
