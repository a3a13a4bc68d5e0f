//! Seed exchange at the primitive level: an issuer encrypts a hex seed to
//! the holder's public key; the holder decrypts it and derives codes.

use pki2fa_crypto_core::{
    decrypt_oaep, encrypt_oaep, generate_code_at, public_key_from_pem, public_key_to_pem,
    HexSeed, TotpConfig,
};

use super::holder;

const SEED: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

#[test]
fn issuer_encrypts_to_published_pem_and_holder_derives_codes() {
    let kp = holder();

    // The issuer only ever sees the PEM text.
    let published = public_key_to_pem(kp.public_key()).expect("publish");
    let issuer_view = public_key_from_pem(&published).expect("issuer parses PEM");
    let ciphertext = encrypt_oaep(SEED.as_bytes(), &issuer_view).expect("issuer encrypts");

    let plaintext = decrypt_oaep(&ciphertext, kp.private_key()).expect("holder decrypts");
    let text = std::str::from_utf8(plaintext.expose()).expect("utf-8");
    let seed = HexSeed::parse(text).expect("valid seed");

    assert_eq!(seed.expose(), SEED);
    let code = generate_code_at(seed.expose(), 59, &TotpConfig::default()).expect("code");
    assert_eq!(code, "555770");
}

#[test]
fn uppercase_seed_with_newline_is_normalized() {
    let kp = holder();
    let wire = format!("{}\n", SEED.to_ascii_uppercase());
    let ciphertext = encrypt_oaep(wire.as_bytes(), kp.public_key()).expect("encrypt");
    let plaintext = decrypt_oaep(&ciphertext, kp.private_key()).expect("decrypt");
    let seed = HexSeed::parse(std::str::from_utf8(plaintext.expose()).expect("utf-8"))
        .expect("valid seed");
    assert_eq!(seed.expose(), SEED);
}
