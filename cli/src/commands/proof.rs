//! `prove` and `open-proof`.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use pki2fa_provisioning::{
    create_commit_proof, load_private_key, load_public_key, open_commit_proof, Settings,
};

use super::Outcome;

/// Sign `commit_hash` and print the proof encrypted to the verifier.
///
/// # Errors
///
/// Fails on a malformed hash or when either key cannot be loaded.
pub fn prove(
    settings: &Settings,
    commit_hash: &str,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let signer = load_private_key(&settings.private_key_path).with_context(|| {
        format!(
            "cannot load private key {}",
            settings.private_key_path.display()
        )
    })?;
    let verifier = load_public_key(&settings.verifier_public_key_path).with_context(|| {
        format!(
            "cannot load verifier public key {}",
            settings.verifier_public_key_path.display()
        )
    })?;

    let proof = create_commit_proof(commit_hash, &signer, &verifier)?;
    writeln!(out, "{}", proof.encrypted_signature)?;
    Ok(Outcome::Success)
}

/// Open a proof addressed to our key and check it against `commit`.
///
/// # Errors
///
/// Fails if the keys cannot be loaded or the proof does not verify.
pub fn open_proof(
    settings: &Settings,
    encrypted_signature: &str,
    commit: &str,
    signer_public: &Path,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let verifier = load_private_key(&settings.private_key_path).with_context(|| {
        format!(
            "cannot load private key {}",
            settings.private_key_path.display()
        )
    })?;
    let signer = load_public_key(signer_public)
        .with_context(|| format!("cannot load signer public key {}", signer_public.display()))?;

    open_commit_proof(encrypted_signature, commit, &verifier, &signer)?;
    writeln!(out, "proof valid")?;
    Ok(Outcome::Success)
}
