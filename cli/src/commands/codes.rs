//! `generate`, `verify` and `cron`.

use std::io::Write;

use pki2fa_provisioning::{cron_tick, SeedStore, Settings, Verify2faRequest};

use super::{seed_service, Outcome};

/// Print the current code.
///
/// # Errors
///
/// Fails if no valid seed is stored.
pub fn generate(
    settings: &Settings,
    now: u64,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let reply = seed_service(settings).generate_2fa(now)?;
    if json {
        writeln!(out, "{}", serde_json::to_string(&reply)?)?;
    } else {
        writeln!(out, "{} (valid for {}s)", reply.code, reply.valid_for)?;
    }
    Ok(Outcome::Success)
}

/// Check `code`; [`Outcome::Rejected`] when it does not match.
///
/// # Errors
///
/// Fails if no valid seed is stored.
pub fn verify(
    settings: &Settings,
    code: &str,
    now: u64,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let reply = seed_service(settings).verify_2fa(
        &Verify2faRequest {
            code: Some(code.to_owned()),
        },
        now,
    )?;
    if json {
        writeln!(out, "{}", serde_json::to_string(&reply)?)?;
    } else {
        writeln!(out, "{}", if reply.valid { "valid" } else { "invalid" })?;
    }
    Ok(if reply.valid {
        Outcome::Success
    } else {
        Outcome::Rejected
    })
}

/// Print one cron line; prints nothing when no seed is resident.
///
/// # Errors
///
/// Fails if the stored seed is unreadable or corrupt.
pub fn cron(settings: &Settings, now: u64, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    if let Some(line) = cron_tick(&SeedStore::new(settings.seed_path()), now)? {
        writeln!(out, "{line}")?;
    }
    Ok(Outcome::Success)
}
