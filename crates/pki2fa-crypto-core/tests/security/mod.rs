use std::sync::OnceLock;

use pki2fa_crypto_core::{generate_keypair, RsaKeyPair, MIN_KEY_BITS};

mod entropy_quality;

/// One key pair per test binary; generation dominates runtime otherwise.
pub fn keypair() -> &'static RsaKeyPair {
    static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("keygen"))
}

/// A second key pair unrelated to [`keypair`].
pub fn stranger() -> &'static RsaKeyPair {
    static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_keypair(MIN_KEY_BITS).expect("keygen"))
}
