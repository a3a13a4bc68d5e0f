use std::sync::OnceLock;

use pki2fa_crypto_core::{generate_keypair, RsaKeyPair, DEFAULT_KEY_BITS, MIN_KEY_BITS};

mod oaep_roundtrip;
mod seed_exchange;

/// Holder key pair shared by every test in this binary.
pub fn holder() -> &'static RsaKeyPair {
    static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("holder keygen"))
}

/// Verifier key pair, unrelated to [`holder`].
pub fn verifier() -> &'static RsaKeyPair {
    static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("verifier keygen"))
}

/// Full-size production key pair (slow to generate; used sparingly).
pub fn production_sized() -> &'static RsaKeyPair {
    static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(DEFAULT_KEY_BITS).expect("4096-bit keygen"))
}
