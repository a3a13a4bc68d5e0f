//! Entropy quality of randomized RSA output.
//!
//! OAEP ciphertexts and PSS signatures are indistinguishable from random
//! bytes when the padding draws fresh randomness from `OsRng`. Concatenating
//! several outputs gives a sample large enough for Shannon entropy to catch
//! degenerate padding (fixed seed, zeroed salt, repeated blocks).
//!
//! | Sample size | Expected entropy | Our threshold |
//! |-------------|------------------|---------------|
//! | 256 bytes   | ~7.2             | 6.5           |
//! | 4 KB        | ~7.95            | 7.8           |

use pki2fa_crypto_core::{encrypt_oaep, sign_pss};

use super::keypair;

/// Shannon entropy of a byte slice (bits per byte).
///
/// H = -Σ p(x) * log2(p(x)) for each byte value x in [0, 255]
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// A single 2048-bit ciphertext of a low-entropy plaintext.
#[test]
fn single_ciphertext_entropy() {
    let ct = encrypt_oaep(&[0u8; 64], keypair().public_key()).expect("encrypt");
    let entropy = shannon_entropy(&ct);
    assert!(entropy > 6.5, "ciphertext entropy too low: {entropy:.4}");
}

/// Sixteen ciphertexts of the same plaintext.
#[test]
fn repeated_ciphertexts_entropy() {
    let kp = keypair();
    let sample: Vec<u8> = (0..16)
        .flat_map(|_| encrypt_oaep(b"identical plaintext", kp.public_key()).expect("encrypt"))
        .collect();
    let entropy = shannon_entropy(&sample);
    assert!(entropy > 7.8, "ciphertext sample entropy too low: {entropy:.4}");
}

/// Sixteen signatures of the same message.
#[test]
fn repeated_signatures_entropy() {
    let kp = keypair();
    let sample: Vec<u8> = (0..16)
        .flat_map(|_| sign_pss(b"identical message", kp.private_key()).expect("sign"))
        .collect();
    let entropy = shannon_entropy(&sample);
    assert!(entropy > 7.8, "signature sample entropy too low: {entropy:.4}");
}

#[test]
fn shannon_entropy_of_constant_data_is_zero() {
    assert!(shannon_entropy(&[0xAA; 512]).abs() < f64::EPSILON);
    assert!(shannon_entropy(&[]).abs() < f64::EPSILON);
}
