//! `pki2fa-crypto-core`: cryptographic primitives for public-key-seeded TOTP.
//!
//! RSA key pairs, RSA-OAEP seed decryption, RSA-PSS proof signatures, the
//! hex/base32 seed codec, and the TOTP engine. Zero I/O, zero network, no
//! global state: every function works on the keys and seeds passed in.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod rsa_keys;

pub mod oaep;
pub mod signing;

pub mod seed;

pub mod totp;

pub use error::CryptoError;
pub use memory::{disable_core_dumps, SecretBuffer};
pub use oaep::{decrypt_oaep, encrypt_oaep, max_oaep_payload, OAEP_HASH_LEN};
pub use rsa_keys::{
    generate_keypair, modulus_bytes, private_key_from_pem, private_key_to_pem,
    public_key_from_pem, public_key_to_pem, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
    DEFAULT_KEY_BITS, MAX_KEY_BITS, MIN_KEY_BITS, PUBLIC_EXPONENT,
};
pub use seed::{
    base32_to_bytes, hex_to_base32, validate_hex_seed, HexSeed, SEED_BYTES_LEN, SEED_HEX_LEN,
};
pub use signing::{pss_max_salt_len, sign_pss, verify_pss, verify_pss_strict};
pub use totp::{
    generate_code, generate_code_at, generate_hotp, generate_totp, seconds_remaining_at,
    seconds_remaining_in_period, unix_now, validate_totp, verify_code, verify_code_at,
    TotpConfig, CODE_DIGITS, DEFAULT_PERIOD, DEFAULT_WINDOW,
};
