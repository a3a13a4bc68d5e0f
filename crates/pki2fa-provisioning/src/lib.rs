//! `pki2fa-provisioning`: business flows over `pki2fa-crypto-core`.
//!
//! Seed provisioning from the authority's ciphertext, commit proofs for a
//! verifier, PEM and seed files on disk, endpoint-shaped handlers and the
//! cron line. Network transport is left to the caller.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod authority;
pub mod config;
pub mod cron;
pub mod error;
pub mod proof;
pub mod provisioning;
pub mod service;
pub mod storage;

pub use authority::{SeedRequest, SeedResponse, STATUS_SUCCESS};
pub use config::Settings;
pub use cron::{cron_tick, format_cron_line};
pub use error::ProvisionError;
pub use proof::{
    check_key_sizes, create_commit_proof, open_commit_proof, sign_and_encrypt,
    validate_commit_hash, CommitProof, COMMIT_HASH_LEN,
};
pub use provisioning::{decode_base64, decrypt_seed};
pub use service::{
    DecryptSeedRequest, DecryptSeedResponse, ErrorResponse, Generate2faResponse, SeedService,
    Verify2faRequest, Verify2faResponse,
};
pub use storage::{
    generate_and_store_keypair, load_private_key, load_public_key, load_public_key_text,
    read_encrypted_seed, write_encrypted_seed, SeedStore,
};
