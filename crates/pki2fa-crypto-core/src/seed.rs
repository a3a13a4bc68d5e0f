//! Seed codec: 64-hex-character seeds and their base32 OTP form.
//!
//! A seed is 32 random bytes carried as 64 lowercase hex characters.
//! Authenticator apps and the OTP engine use the RFC 4648 base32 form
//! (uppercase alphabet, `=` padding) of the same 32 bytes.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CryptoError;
use crate::memory::SecretBuffer;

/// Length of a hex-encoded seed in characters.
pub const SEED_HEX_LEN: usize = 64;

/// Length of a decoded seed in bytes.
pub const SEED_BYTES_LEN: usize = 32;

/// Number of hex characters shown by [`HexSeed::preview`].
const PREVIEW_LEN: usize = 8;

/// Check that `hex_seed` is exactly 64 characters from `[0-9a-fA-F]`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSeedFormat`] naming the first violation.
pub fn validate_hex_seed(hex_seed: &str) -> Result<(), CryptoError> {
    let len = hex_seed.chars().count();
    if len != SEED_HEX_LEN {
        return Err(CryptoError::InvalidSeedFormat(format!(
            "expected {SEED_HEX_LEN} hex characters, got {len}"
        )));
    }
    if let Some(pos) = hex_seed.chars().position(|c| !c.is_ascii_hexdigit()) {
        return Err(CryptoError::InvalidSeedFormat(format!(
            "non-hex character at position {pos}"
        )));
    }
    Ok(())
}

/// Decode a validated hex seed into its 32 raw bytes.
fn hex_seed_bytes(hex_seed: &str) -> Result<SecretBuffer, CryptoError> {
    validate_hex_seed(hex_seed)?;
    data_encoding::HEXLOWER_PERMISSIVE
        .decode(hex_seed.as_bytes())
        .map(SecretBuffer::from_vec)
        .map_err(|e| CryptoError::InvalidSeedFormat(format!("invalid hex: {e}")))
}

/// Convert a 64-character hex seed to RFC 4648 base32 (uppercase, padded).
///
/// Upper- and lowercase hex digits are both accepted.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSeedFormat`] if the length is not 64 or a
/// character is outside `[0-9a-fA-F]`.
pub fn hex_to_base32(hex_seed: &str) -> Result<String, CryptoError> {
    let bytes = hex_seed_bytes(hex_seed)?;
    Ok(data_encoding::BASE32.encode(bytes.expose()))
}

/// Decode a base32 OTP secret back to raw bytes.
///
/// # Errors
///
/// Returns [`CryptoError::Encoding`] if `base32` is not valid RFC 4648
/// base32 with padding.
pub fn base32_to_bytes(base32: &str) -> Result<SecretBuffer, CryptoError> {
    data_encoding::BASE32
        .decode(base32.as_bytes())
        .map(SecretBuffer::from_vec)
        .map_err(|e| CryptoError::Encoding(format!("invalid base32: {e}")))
}

// ---------------------------------------------------------------------------
// HexSeed
// ---------------------------------------------------------------------------

/// A validated, normalized seed: 64 lowercase hex characters.
///
/// Held in a [`SecretString`]; `Debug` is masked and the text is zeroized
/// on drop.
pub struct HexSeed {
    inner: SecretString,
}

impl HexSeed {
    /// Parse seed text: trim surrounding whitespace, validate, lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSeedFormat`] if the trimmed text is not
    /// 64 hex characters.
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let trimmed = text.trim();
        validate_hex_seed(trimmed)?;
        Ok(Self {
            inner: SecretString::from(trimmed.to_ascii_lowercase()),
        })
    }

    /// The normalized hex text. Keep exposure to a single expression.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// The 32 raw seed bytes.
    #[must_use = "seed bytes should be consumed"]
    pub fn to_bytes(&self) -> SecretBuffer {
        // The text was validated on construction, so decoding cannot fail;
        // fall back to an empty buffer rather than panicking.
        hex_seed_bytes(self.expose()).unwrap_or_else(|_| SecretBuffer::new(&[]))
    }

    /// The base32 shared-secret form used by the OTP engine.
    #[must_use]
    pub fn to_base32(&self) -> String {
        data_encoding::BASE32.encode(self.to_bytes().expose())
    }

    /// First eight hex characters followed by `...`, safe for logs and UI.
    #[must_use]
    pub fn preview(&self) -> String {
        let head: String = self.expose().chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    }
}

impl fmt::Debug for HexSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HexSeed(***)")
    }
}

impl std::str::FromStr for HexSeed {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
