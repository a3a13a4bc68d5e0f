//! Proof of key possession over a commit hash.
//!
//! The holder signs the commit hash (RSA-PSS-SHA256, maximum salt) and
//! encrypts the signature to the verifier (RSA-OAEP-SHA256). The result is
//! a single line of base64 that only the verifier can open.
//!
//! The signature is as long as the signer's modulus and must fit in one
//! OAEP block under the verifier's key, so the verifier's modulus has to be
//! at least 66 bytes longer than the signer's. A 2048-bit signer fits a
//! 4096-bit verifier; two keys of the same size never fit.

use data_encoding::BASE64;
use pki2fa_crypto_core::{
    decrypt_oaep, encrypt_oaep, max_oaep_payload, modulus_bytes, sign_pss, verify_pss_strict,
    CryptoError, RsaPrivateKey, RsaPublicKey,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ProvisionError;
use crate::provisioning::decode_base64;

/// Length of a SHA-1 git commit hash in hex.
pub const COMMIT_HASH_LEN: usize = 40;

/// Output of [`create_commit_proof`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitProof {
    pub commit_hash: String,
    /// Base64 of the OAEP-encrypted PSS signature, no line breaks.
    pub encrypted_signature: String,
}

/// Check that `commit_hash` is exactly 40 hex characters.
///
/// # Errors
///
/// [`ProvisionError::InvalidArtifact`] otherwise.
pub fn validate_commit_hash(commit_hash: &str) -> Result<(), ProvisionError> {
    let len = commit_hash.chars().count();
    if len != COMMIT_HASH_LEN {
        return Err(ProvisionError::InvalidArtifact(format!(
            "commit hash must be {COMMIT_HASH_LEN} characters, got {len}"
        )));
    }
    if !commit_hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ProvisionError::InvalidArtifact(
            "commit hash must be hexadecimal".into(),
        ));
    }
    Ok(())
}

/// Check that a signature from `signer_private` fits in one OAEP block
/// under `verifier_public`.
///
/// # Errors
///
/// [`CryptoError::Encryption`] naming both key sizes otherwise.
pub fn check_key_sizes(
    signer_private: &RsaPrivateKey,
    verifier_public: &RsaPublicKey,
) -> Result<(), CryptoError> {
    let signature_len = modulus_bytes(signer_private);
    let limit = max_oaep_payload(verifier_public);
    if signature_len > limit {
        return Err(CryptoError::Encryption(format!(
            "a {}-bit signer key produces {signature_len}-byte signatures, but a {}-bit \
             verifier key carries at most {limit} bytes; the verifier key must be at least \
             66 bytes longer than the signer key",
            signature_len.saturating_mul(8),
            modulus_bytes(verifier_public).saturating_mul(8),
        )));
    }
    Ok(())
}

/// Sign `artifact` with the signer's key and encrypt the signature to the
/// verifier, returning single-line base64.
///
/// The artifact is signed as given; shape checks belong to the caller.
/// Output differs on every call because both paddings are randomized.
///
/// # Errors
///
/// - [`CryptoError::Encryption`] before signing if the signer's signature
///   cannot fit under the verifier's key (see [`check_key_sizes`])
/// - [`CryptoError::Signature`] or [`CryptoError::Encryption`] from the
///   underlying primitives
pub fn sign_and_encrypt(
    artifact: &str,
    signer_private: &RsaPrivateKey,
    verifier_public: &RsaPublicKey,
) -> Result<String, CryptoError> {
    check_key_sizes(signer_private, verifier_public)?;
    let signature = sign_pss(artifact.as_bytes(), signer_private)?;
    let ciphertext = encrypt_oaep(&signature, verifier_public)?;
    Ok(BASE64.encode(&ciphertext))
}

/// Validate `commit_hash` and produce its [`CommitProof`].
///
/// The hash is trimmed before validation and signed exactly as trimmed.
///
/// # Errors
///
/// [`ProvisionError::InvalidArtifact`] for a malformed hash, otherwise the
/// key-size check and primitive failures of [`sign_and_encrypt`].
pub fn create_commit_proof(
    commit_hash: &str,
    signer_private: &RsaPrivateKey,
    verifier_public: &RsaPublicKey,
) -> Result<CommitProof, ProvisionError> {
    let commit_hash = commit_hash.trim();
    validate_commit_hash(commit_hash)?;
    let encrypted_signature = sign_and_encrypt(commit_hash, signer_private, verifier_public)?;
    info!(commit = commit_hash, "commit proof created");
    Ok(CommitProof {
        commit_hash: commit_hash.to_owned(),
        encrypted_signature,
    })
}

/// Verifier side: decrypt the proof and check the signature strictly.
///
/// # Errors
///
/// - [`CryptoError::Encoding`] for invalid base64
/// - [`CryptoError::Decryption`] if the proof was not encrypted to
///   `verifier_private`
/// - [`CryptoError::Verification`] if the signature does not match
///   `commit_hash` under `signer_public`
pub fn open_commit_proof(
    encrypted_signature_b64: &str,
    commit_hash: &str,
    verifier_private: &RsaPrivateKey,
    signer_public: &RsaPublicKey,
) -> Result<(), ProvisionError> {
    let ciphertext = decode_base64(encrypted_signature_b64)?;
    let signature = decrypt_oaep(&ciphertext, verifier_private)?;
    verify_pss_strict(commit_hash.trim().as_bytes(), signature.expose(), signer_public)?;
    Ok(())
}
