//! `store-seed-response` and `decrypt-seed`.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use pki2fa_provisioning::{
    load_private_key, read_encrypted_seed, write_encrypted_seed, DecryptSeedRequest,
    SeedResponse, Settings,
};

use super::{seed_service, Outcome};

/// Extract the ciphertext from the authority's reply and store it.
///
/// # Errors
///
/// Fails if the reply is unreadable, malformed, or not a success.
pub fn store_seed_response(
    settings: &Settings,
    response_path: &Path,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let text = std::fs::read_to_string(response_path)
        .with_context(|| format!("cannot read {}", response_path.display()))?;
    let encrypted = SeedResponse::from_json(&text)?.into_encrypted_seed()?;
    write_encrypted_seed(&settings.encrypted_seed_path, &encrypted)?;

    writeln!(
        out,
        "encrypted seed saved to {}",
        settings.encrypted_seed_path.display()
    )?;
    Ok(Outcome::Success)
}

/// Decrypt the seed (from the argument or the stored ciphertext) and
/// persist it.
///
/// # Errors
///
/// Fails on missing files or keys, and on any decryption or format error.
pub fn decrypt_seed(
    settings: &Settings,
    encrypted_seed: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let encrypted = match encrypted_seed {
        Some(text) => text.to_owned(),
        None => read_encrypted_seed(&settings.encrypted_seed_path).with_context(|| {
            format!(
                "cannot read encrypted seed {}",
                settings.encrypted_seed_path.display()
            )
        })?,
    };
    let private_key = load_private_key(&settings.private_key_path).with_context(|| {
        format!(
            "cannot load private key {}",
            settings.private_key_path.display()
        )
    })?;

    let response = seed_service(settings).decrypt_seed(
        &DecryptSeedRequest {
            encrypted_seed: Some(encrypted),
        },
        &private_key,
    )?;

    writeln!(
        out,
        "seed {} stored in {}",
        response.seed_preview,
        settings.seed_path().display()
    )?;
    Ok(Outcome::Success)
}
