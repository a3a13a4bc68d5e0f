//! Subcommand handlers.
//!
//! Each handler writes its result to `out` (stdout in production) and
//! logs progress through `tracing` to stderr. Handlers take the wall clock
//! as `now` so they can be exercised at fixed times.

use std::io::Write;

use pki2fa_crypto_core::TotpConfig;
use pki2fa_provisioning::{SeedService, SeedStore, Settings};

use crate::cli::Command;

pub mod codes;
pub mod keys;
pub mod proof;
pub mod seed;

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran but the answer is "no" (a rejected code).
    Rejected,
}

/// Run `command` against `settings`.
///
/// # Errors
///
/// Any provisioning, storage or output failure, with context.
pub fn execute(
    command: &Command,
    settings: &Settings,
    now: u64,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    match command {
        Command::Keygen { bits, force } => {
            keys::keygen(settings, bits.unwrap_or(settings.key_bits), *force, out)
        }
        Command::RequestPayload {
            student_id,
            repo_url,
        } => keys::request_payload(settings, student_id, repo_url, out),
        Command::StoreSeedResponse { response } => {
            seed::store_seed_response(settings, response, out)
        }
        Command::DecryptSeed { encrypted_seed } => {
            seed::decrypt_seed(settings, encrypted_seed.as_deref(), out)
        }
        Command::Generate { json } => codes::generate(settings, now, *json, out),
        Command::Verify { code, json } => codes::verify(settings, code, now, *json, out),
        Command::Cron => codes::cron(settings, now, out),
        Command::Prove { commit_hash } => proof::prove(settings, commit_hash, out),
        Command::OpenProof {
            encrypted_signature,
            commit,
            signer_public,
        } => proof::open_proof(settings, encrypted_signature, commit, signer_public, out),
    }
}

/// Endpoint handlers bound to the configured seed file and window.
fn seed_service(settings: &Settings) -> SeedService {
    let totp = TotpConfig {
        window: settings.totp_window,
        ..TotpConfig::default()
    };
    SeedService::new(SeedStore::new(settings.seed_path()), totp)
}
