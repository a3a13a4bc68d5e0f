//! `keygen` and `request-payload`.

use std::io::Write;

use anyhow::Context;
use pki2fa_provisioning::{
    generate_and_store_keypair, load_public_key_text, SeedRequest, Settings,
};

use super::Outcome;

/// Generate and store the holder's key pair.
///
/// # Errors
///
/// Fails if the key exists (without `force`), the size is unsupported, or
/// the files cannot be written.
pub fn keygen(
    settings: &Settings,
    bits: usize,
    force: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    generate_and_store_keypair(
        &settings.private_key_path,
        &settings.public_key_path,
        bits,
        force,
    )
    .context("key generation failed")?;

    writeln!(
        out,
        "wrote {} and {}",
        settings.private_key_path.display(),
        settings.public_key_path.display()
    )?;
    Ok(Outcome::Success)
}

/// Print the seed request body for the stored public key.
///
/// # Errors
///
/// Fails if the public key is missing or invalid, or a field is blank.
pub fn request_payload(
    settings: &Settings,
    student_id: &str,
    repo_url: &str,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let public_key = load_public_key_text(&settings.public_key_path).with_context(|| {
        format!(
            "cannot read public key {}",
            settings.public_key_path.display()
        )
    })?;
    let request = SeedRequest::new(student_id, repo_url, public_key)?;
    tracing::info!(student_id = %request.student_id, "seed request prepared");

    writeln!(out, "{}", request.to_json()?)?;
    Ok(Outcome::Success)
}
