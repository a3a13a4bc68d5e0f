//! RSA key pairs: generation, size helpers, and PEM encoding.
//!
//! Private keys serialize as unencrypted PKCS#1 (`BEGIN RSA PRIVATE KEY`);
//! public keys as `SubjectPublicKeyInfo` (`BEGIN PUBLIC KEY`). Both loaders
//! also accept the other common encoding (PKCS#8 private, PKCS#1 public).

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::BigUint;
use zeroize::Zeroizing;

pub use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default modulus size for new identities.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Smallest modulus [`generate_keypair`] accepts.
pub const MIN_KEY_BITS: usize = 2048;

/// Largest modulus the PEM decoders accept back.
pub const MAX_KEY_BITS: usize = 4096;

/// Fixed public exponent (F4).
pub const PUBLIC_EXPONENT: u32 = 65_537;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// RSA private key together with its public half.
///
/// The private key is zeroized on drop by the `rsa` crate. This type does
/// not implement `Clone` or any serialization; use [`private_key_to_pem`]
/// explicitly when the key has to be persisted.
pub struct RsaKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl RsaKeyPair {
    /// Wrap an existing private key, deriving the public half.
    #[must_use]
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self { private, public }
    }

    /// The private key. Never leaves the local process.
    #[must_use]
    pub const fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// The public key, safe to distribute.
    #[must_use]
    pub const fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Modulus size in bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.public.n().bits()
    }

    /// Split into `(private, public)`.
    #[must_use]
    pub fn into_parts(self) -> (RsaPrivateKey, RsaPublicKey) {
        (self.private, self.public)
    }
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsaKeyPair({} bits, ***)", self.bits())
    }
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Generate an RSA key pair with public exponent 65537.
///
/// Draws from the operating system CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::KeyGeneration`] if `bits` is outside
/// [`MIN_KEY_BITS`]..=[`MAX_KEY_BITS`] or prime generation fails.
pub fn generate_keypair(bits: usize) -> Result<RsaKeyPair, CryptoError> {
    if bits < MIN_KEY_BITS {
        return Err(CryptoError::KeyGeneration(format!(
            "{bits}-bit keys are below the {MIN_KEY_BITS}-bit minimum"
        )));
    }
    if bits > MAX_KEY_BITS {
        return Err(CryptoError::KeyGeneration(format!(
            "{bits}-bit keys exceed the {MAX_KEY_BITS}-bit maximum"
        )));
    }

    let exponent = BigUint::from(PUBLIC_EXPONENT);
    let private = RsaPrivateKey::new_with_exp(&mut OsRng, bits, &exponent)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    Ok(RsaKeyPair::from_private(private))
}

/// Modulus length in bytes, i.e. the exact length of every ciphertext and
/// signature produced under this key.
#[must_use]
pub fn modulus_bytes<K: PublicKeyParts>(key: &K) -> usize {
    key.size()
}

// ---------------------------------------------------------------------------
// PEM
// ---------------------------------------------------------------------------

/// Serialize a private key as unencrypted PKCS#1 PEM.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if DER encoding fails.
pub fn private_key_to_pem(key: &RsaPrivateKey) -> Result<Zeroizing<String>, CryptoError> {
    key.to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("private key encoding failed: {e}")))
}

/// Serialize a public key as `SubjectPublicKeyInfo` PEM.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if DER encoding fails.
pub fn public_key_to_pem(key: &RsaPublicKey) -> Result<String, CryptoError> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("public key encoding failed: {e}")))
}

/// Parse a private key from PKCS#1 or PKCS#8 PEM.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if neither encoding parses.
pub fn private_key_from_pem(pem: &str) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("unreadable private key PEM: {e}")))
}

/// Parse a public key from `SubjectPublicKeyInfo` or PKCS#1 PEM.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if neither encoding parses.
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("unreadable public key PEM: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// One 2048-bit key pair per test binary; generation dominates test time.
#[cfg(test)]
pub(crate) fn test_keypair() -> &'static RsaKeyPair {
    static KEYPAIR: std::sync::OnceLock<RsaKeyPair> = std::sync::OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("test keygen"))
}

/// A second, unrelated key pair for cross-key tests.
#[cfg(test)]
pub(crate) fn other_test_keypair() -> &'static RsaKeyPair {
    static KEYPAIR: std::sync::OnceLock<RsaKeyPair> = std::sync::OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("test keygen"))
}
