//! RFC 6238 TOTP and RFC 4226 HOTP engine.
//!
//! The low-level functions take raw secret bytes and an explicit time.
//! The seed-level functions ([`generate_code`], [`verify_code`]) take a
//! 64-character hex seed, route it through the base32 codec, and use the
//! wall clock. HMAC comes from `ring::hmac`.

use ring::hmac;

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use crate::seed::{base32_to_bytes, hex_to_base32};

/// Constant-time byte comparison for OTP codes.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// The length of an OTP code is public (it is the digit count), so the
/// early return on length mismatch leaks nothing about the code value.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_PERIOD: u32 = 30;

/// Default verification window: ±1 time step (RFC 6238 §5.2).
pub const DEFAULT_WINDOW: u32 = 1;

/// Digits in every code.
pub const CODE_DIGITS: usize = 6;

/// `10^CODE_DIGITS`.
const CODE_MODULUS: u32 = 1_000_000;

// ── Types ───────────────────────────────────────────────────────────

/// TOTP parameters for the seed-level API.
///
/// Codes are always HMAC-SHA1 with [`CODE_DIGITS`] digits; only the step
/// and the verification window vary. `Default` is 30 seconds, ±1 step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotpConfig {
    /// Time step in seconds.
    pub period: u32,
    /// Steps accepted on either side of the current one.
    pub window: u32,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
        }
    }
}

// ── HOTP (RFC 4226) ────────────────────────────────────────────────

/// Generate a 6-digit HMAC-SHA1 HOTP code per RFC 4226.
///
/// # Errors
/// Returns `CryptoError::Otp` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp(
    secret: &[u8],
    counter: u64,
) -> Result<String, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::Otp("secret must not be empty".to_owned()));
    }

    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret);
    let tag = hmac::sign(&key, &counter.to_be_bytes());
    let mac = tag.as_ref();

    // Dynamic truncation (RFC 4226 §5.3): low nibble of the last byte
    // selects a 4-byte window; the top bit is masked off.
    let offset = usize::from(mac[mac.len().wrapping_sub(1)] & 0x0F);
    let binary_code = u32::from_be_bytes([
        mac[offset] & 0x7F,
        mac[offset.wrapping_add(1)],
        mac[offset.wrapping_add(2)],
        mac[offset.wrapping_add(3)],
    ]);

    // modulus is non-zero.
    #[allow(clippy::arithmetic_side_effects)]
    let code = binary_code % CODE_MODULUS;

    Ok(format!("{code:0>CODE_DIGITS$}"))
}

// ── TOTP (RFC 6238) ────────────────────────────────────────────────

fn time_step(time: u64, period: u32) -> Result<u64, CryptoError> {
    if period == 0 {
        return Err(CryptoError::Otp("period must be > 0".to_owned()));
    }
    // period is non-zero.
    #[allow(clippy::arithmetic_side_effects)]
    let step = time / u64::from(period);
    Ok(step)
}

/// Generate a TOTP code for Unix time `time`.
///
/// # Errors
/// Returns `CryptoError::Otp` if `period` is 0 or the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp(
    secret: &[u8],
    time: u64,
    period: u32,
) -> Result<String, CryptoError> {
    generate_hotp(secret, time_step(time, period)?)
}

/// Validate a TOTP code against steps `[T - window, T + window]`.
///
/// Every step in the window is computed and compared in constant time,
/// so the running time does not depend on which step (if any) matched.
/// The window saturates at the ends of the `u64` counter range.
///
/// # Errors
/// Returns `CryptoError::Otp` if `period` is 0 or the secret is empty.
#[must_use = "validation result should be checked"]
pub fn validate_totp(
    secret: &[u8],
    time: u64,
    code: &str,
    period: u32,
    window: u32,
) -> Result<bool, CryptoError> {
    let current = time_step(time, period)?;
    let start = current.saturating_sub(u64::from(window));
    let end = current.saturating_add(u64::from(window));

    let mut valid = false;
    let mut step = start;
    loop {
        let expected = generate_hotp(secret, step)?;
        valid |= constant_time_eq(expected.as_bytes(), code.as_bytes());
        if step == end {
            break;
        }
        step = step.wrapping_add(1);
    }

    Ok(valid)
}

// ── Seed-level API ─────────────────────────────────────────────────

/// Current Unix time in whole seconds (0 if the clock is before 1970).
#[must_use]
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Derive the HMAC key for a hex seed via its base32 form.
fn seed_secret(hex_seed: &str) -> Result<SecretBuffer, CryptoError> {
    let base32 = hex_to_base32(hex_seed)?;
    base32_to_bytes(&base32)
}

/// Generate the code for the current 30-second step.
///
/// # Errors
/// Returns `CryptoError::InvalidSeedFormat` for a malformed seed.
#[must_use = "OTP code should be used or stored"]
pub fn generate_code(hex_seed: &str) -> Result<String, CryptoError> {
    generate_code_at(hex_seed, unix_now(), &TotpConfig::default())
}

/// Generate the code for `hex_seed` at Unix time `time`.
///
/// # Errors
/// Returns `CryptoError::InvalidSeedFormat` for a malformed seed, or
/// `CryptoError::Otp` for a zero period.
#[must_use = "OTP code should be used or stored"]
pub fn generate_code_at(
    hex_seed: &str,
    time: u64,
    config: &TotpConfig,
) -> Result<String, CryptoError> {
    let secret = seed_secret(hex_seed)?;
    generate_totp(secret.expose(), time, config.period)
}

/// Check `candidate` against the current step ± `window`.
///
/// # Errors
/// Returns `CryptoError::InvalidSeedFormat` for a malformed seed.
#[must_use = "validation result should be checked"]
pub fn verify_code(hex_seed: &str, candidate: &str, window: u32) -> Result<bool, CryptoError> {
    let config = TotpConfig {
        window,
        ..TotpConfig::default()
    };
    verify_code_at(hex_seed, candidate, unix_now(), &config)
}

/// Check `candidate` at Unix time `time` using `config`.
///
/// # Errors
/// Returns `CryptoError::InvalidSeedFormat` for a malformed seed, or
/// `CryptoError::Otp` for a zero period.
#[must_use = "validation result should be checked"]
pub fn verify_code_at(
    hex_seed: &str,
    candidate: &str,
    time: u64,
    config: &TotpConfig,
) -> Result<bool, CryptoError> {
    let secret = seed_secret(hex_seed)?;
    validate_totp(
        secret.expose(),
        time,
        candidate,
        config.period,
        config.window,
    )
}

/// Seconds until the current step ends, in `[1, period]`.
///
/// A zero period yields 0.
#[must_use]
pub fn seconds_remaining_in_period(period: u32) -> u32 {
    seconds_remaining_at(unix_now(), period)
}

/// [`seconds_remaining_in_period`] at an explicit Unix time.
///
/// On an exact step boundary the whole period remains, never 0.
#[must_use]
pub fn seconds_remaining_at(time: u64, period: u32) -> u32 {
    if period == 0 {
        return 0;
    }
    // period is non-zero and the remainder is below period, so it fits u32.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    let elapsed = (time % u64::from(period)) as u32;
    period.saturating_sub(elapsed)
}

// ── Tests ───────────────────────────────────────────────────────────
