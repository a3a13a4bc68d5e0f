//! Artifacts produced by an independent RSA implementation (OAEP-SHA256 and
//! PSS-SHA256 with maximum salt) against a fixed 2048-bit key.

use data_encoding::BASE64;
use pki2fa_crypto_core::{
    decrypt_oaep, private_key_from_pem, public_key_from_pem, verify_pss, HexSeed,
    RsaKeyPair,
};

const PRIVATE_PEM: &str = include_str!("fixtures/holder_private.pem");
const PUBLIC_PEM: &str = include_str!("fixtures/holder_public.pem");
const ENCRYPTED_SEED_B64: &str = include_str!("fixtures/encrypted_seed.b64");
const COMMIT_SIGNATURE_B64: &str = include_str!("fixtures/commit_signature.b64");

const SEQUENTIAL_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const COMMIT: &[u8] = b"8f3b2a1c9d0e7f6a5b4c3d2e1f0a9b8c7d6e5f4a";

fn b64(text: &str) -> Vec<u8> {
    BASE64.decode(text.trim().as_bytes()).expect("fixture is base64")
}

#[test]
fn fixture_pems_describe_the_same_key() {
    let private = private_key_from_pem(PRIVATE_PEM).expect("PKCS#1 private key");
    let public = public_key_from_pem(PUBLIC_PEM).expect("SPKI public key");
    let pair = RsaKeyPair::from_private(private);
    assert_eq!(pair.bits(), 2048);
    assert_eq!(pair.public_key(), &public);
}

#[test]
fn foreign_ciphertext_decrypts_to_sequential_seed() {
    let private = private_key_from_pem(PRIVATE_PEM).expect("private key");
    let plaintext = decrypt_oaep(&b64(ENCRYPTED_SEED_B64), &private).expect("decrypt");
    let text = std::str::from_utf8(plaintext.expose()).expect("utf-8");
    let seed = HexSeed::parse(text).expect("valid seed");
    assert_eq!(seed.expose(), SEQUENTIAL_HEX);
}

#[test]
fn foreign_signature_verifies() {
    let public = public_key_from_pem(PUBLIC_PEM).expect("public key");
    let sig = b64(COMMIT_SIGNATURE_B64);
    assert_eq!(sig.len(), 256);
    assert!(verify_pss(COMMIT, &sig, &public));
    assert!(!verify_pss(b"8f3b2a1c9d0e7f6a5b4c3d2e1f0a9b8c7d6e5f4b", &sig, &public));
}
