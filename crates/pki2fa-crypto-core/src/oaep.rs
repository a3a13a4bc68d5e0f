//! RSA-OAEP encryption with SHA-256 for both the label hash and MGF1.
//!
//! Decryption failures are deliberately indistinguishable: a wrong key, a
//! bad padding block and a ciphertext of the wrong length all surface as
//! [`CryptoError::Decryption`] with the same message.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::memory::SecretBuffer;

/// Output length of the OAEP hash (SHA-256).
pub const OAEP_HASH_LEN: usize = 32;

/// Largest plaintext OAEP can carry under `key`:
/// `modulus_bytes - 2 * hash_len - 2`.
///
/// For a 4096-bit key this is 446 bytes.
#[must_use]
pub fn max_oaep_payload(key: &RsaPublicKey) -> usize {
    key.size()
        .saturating_sub(OAEP_HASH_LEN.saturating_mul(2))
        .saturating_sub(2)
}

fn oaep_sha256() -> Oaep {
    Oaep::new::<Sha256>()
}

/// Encrypt `plaintext` to `public_key` with OAEP(SHA-256, MGF1-SHA-256).
///
/// Output is randomized and always exactly `modulus_bytes` long.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] if `plaintext` exceeds
/// [`max_oaep_payload`].
pub fn encrypt_oaep(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>, CryptoError> {
    let limit = max_oaep_payload(public_key);
    if plaintext.len() > limit {
        return Err(CryptoError::Encryption(format!(
            "plaintext is {} bytes; OAEP limit for this key is {limit}",
            plaintext.len()
        )));
    }

    public_key
        .encrypt(&mut OsRng, oaep_sha256(), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

/// Decrypt an OAEP(SHA-256, MGF1-SHA-256) ciphertext.
///
/// The plaintext is returned in a [`SecretBuffer`].
///
/// # Errors
///
/// Returns [`CryptoError::Decryption`] for every failure cause.
#[must_use = "decrypted plaintext should be consumed"]
pub fn decrypt_oaep(
    ciphertext: &[u8],
    private_key: &RsaPrivateKey,
) -> Result<SecretBuffer, CryptoError> {
    if ciphertext.len() != private_key.size() {
        return Err(CryptoError::Decryption);
    }

    private_key
        .decrypt(oaep_sha256(), ciphertext)
        .map(SecretBuffer::from_vec)
        .map_err(|_| CryptoError::Decryption)
}
