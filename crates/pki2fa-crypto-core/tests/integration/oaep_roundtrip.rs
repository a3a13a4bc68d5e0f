//! RSA-OAEP roundtrips at the payload boundaries.

use pki2fa_crypto_core::{
    decrypt_oaep, encrypt_oaep, max_oaep_payload, modulus_bytes, CryptoError,
};

use super::{holder, production_sized, verifier};

/// A 4096-bit key carries at most 446 bytes: 512 - 2 * 32 - 2.
#[test]
fn production_key_payload_limit_is_446_bytes() {
    let kp = production_sized();
    assert_eq!(modulus_bytes(kp.public_key()), 512);
    assert_eq!(max_oaep_payload(kp.public_key()), 446);

    let at_limit = vec![0xC3_u8; 446];
    let ct = encrypt_oaep(&at_limit, kp.public_key()).expect("446 bytes must fit");
    assert_eq!(ct.len(), 512);
    let pt = decrypt_oaep(&ct, kp.private_key()).expect("decrypt");
    assert_eq!(pt.expose(), at_limit.as_slice());

    let over = encrypt_oaep(&[0u8; 447], kp.public_key());
    assert!(matches!(over, Err(CryptoError::Encryption(_))));
}

/// Empty plaintext is a valid OAEP message.
#[test]
fn empty_plaintext_roundtrip() {
    let kp = holder();
    let ct = encrypt_oaep(&[], kp.public_key()).expect("encrypt");
    let pt = decrypt_oaep(&ct, kp.private_key()).expect("decrypt");
    assert!(pt.is_empty());
}

/// Ciphertext for one key never decrypts under another.
#[test]
fn cross_key_decryption_fails_generically() {
    let ct = encrypt_oaep(b"for the holder only", holder().public_key()).expect("encrypt");
    let result = decrypt_oaep(&ct, verifier().private_key());
    assert!(matches!(result, Err(CryptoError::Decryption)));
}

/// Ciphertext of the wrong size for the modulus fails with the same error.
#[test]
fn ciphertext_length_mismatch_fails_generically() {
    let kp = holder();
    for len in [0usize, 1, 255, 257, 512] {
        let result = decrypt_oaep(&vec![0x01; len], kp.private_key());
        assert!(
            matches!(result, Err(CryptoError::Decryption)),
            "length {len} should fail as Decryption"
        );
    }
}
