//! RSA-PSS signatures over SHA-256 with MGF1-SHA-256 and maximum salt.
//!
//! # Salt policy
//!
//! The salt fills all available space in the encoded message:
//! `salt_len = em_len - hash_len - 2`, where `em_len` is
//! `ceil((modulus_bits - 1) / 8)`. Verifiers must use the same length.
//! Signatures are still randomized: the salt bytes are fresh per call.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Output length of the PSS message hash (SHA-256).
pub const PSS_HASH_LEN: usize = 32;

/// Maximum PSS salt length for a key of `modulus_bits`.
#[must_use]
pub const fn pss_max_salt_len(modulus_bits: usize) -> usize {
    let em_bits = modulus_bits.saturating_sub(1);
    let em_len = em_bits.div_ceil(8);
    em_len.saturating_sub(PSS_HASH_LEN).saturating_sub(2)
}

fn pss_scheme<K: PublicKeyParts>(key: &K) -> Pss {
    Pss::new_with_salt::<Sha256>(pss_max_salt_len(key.n().bits()))
}

/// Sign `message` with RSA-PSS (SHA-256, MGF1-SHA-256, maximum salt).
///
/// The signature is exactly `modulus_bytes` long.
///
/// # Errors
///
/// Returns [`CryptoError::Signature`] if the private key operation fails.
pub fn sign_pss(message: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    let digest = Sha256::digest(message);
    private_key
        .sign_with_rng(&mut OsRng, pss_scheme(private_key), &digest)
        .map_err(|e| CryptoError::Signature(format!("PSS signing failed: {e}")))
}

/// Check a PSS signature. Any mismatch yields `false`, never an error.
#[must_use]
pub fn verify_pss(message: &[u8], signature: &[u8], public_key: &RsaPublicKey) -> bool {
    let digest = Sha256::digest(message);
    public_key
        .verify(pss_scheme(public_key), &digest, signature)
        .is_ok()
}

/// Strict form of [`verify_pss`] for validation paths that must fail loudly.
///
/// # Errors
///
/// Returns [`CryptoError::Verification`] if the signature does not verify.
pub fn verify_pss_strict(
    message: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> Result<(), CryptoError> {
    if verify_pss(message, signature, public_key) {
        Ok(())
    } else {
        Err(CryptoError::Verification(
            "RSA-PSS signature does not match message and key".into(),
        ))
    }
}
