//! Seed provisioning: turn the authority's base64 ciphertext into a
//! validated hex seed.
//!
//! Pipeline: base64 → OAEP-SHA256 decrypt → UTF-8 → trim → 64 lowercase
//! hex characters. Decryption failures stay generic; only the checks that
//! run after a successful decryption report specifics.

use data_encoding::BASE64;
use pki2fa_crypto_core::{decrypt_oaep, CryptoError, HexSeed, RsaPrivateKey};
use tracing::debug;
use zeroize::Zeroizing;

/// Decode standard base64, ignoring embedded whitespace and line breaks.
///
/// # Errors
///
/// [`CryptoError::Encoding`] if the text is not valid base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))
}

/// Recover the hex seed from the authority's base64 ciphertext.
///
/// # Errors
///
/// - [`CryptoError::Encoding`] for invalid base64 or non-UTF-8 plaintext
/// - [`CryptoError::Decryption`] for any OAEP failure (never more specific)
/// - [`CryptoError::InvalidSeedFormat`] if the plaintext is not a seed
pub fn decrypt_seed(
    encrypted_seed_b64: &str,
    private_key: &RsaPrivateKey,
) -> Result<HexSeed, CryptoError> {
    let ciphertext = decode_base64(encrypted_seed_b64)?;
    debug!(len = ciphertext.len(), "decrypting seed ciphertext");

    let plaintext = decrypt_oaep(&ciphertext, private_key)?;
    let text = Zeroizing::new(
        std::str::from_utf8(plaintext.expose())
            .map_err(|_| CryptoError::Encoding("seed plaintext is not UTF-8".into()))?
            .to_owned(),
    );
    HexSeed::parse(&text)
}
