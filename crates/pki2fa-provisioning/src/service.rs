//! Transport-agnostic handlers for the three 2FA endpoints.
//!
//! `POST /decrypt-seed`, `GET /generate-2fa` and `POST /verify-2fa` map to
//! [`SeedService::decrypt_seed`], [`SeedService::generate_2fa`] and
//! [`SeedService::verify_2fa`]. Any HTTP layer only has to (de)serialize
//! the DTOs below and render [`ErrorResponse`] on failure.
//!
//! All DTOs use snake_case field names on the wire.

use pki2fa_crypto_core::{
    generate_code_at, seconds_remaining_at, verify_code_at, HexSeed, RsaPrivateKey, TotpConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ProvisionError;
use crate::provisioning;
use crate::storage::SeedStore;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /decrypt-seed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecryptSeedRequest {
    #[serde(default)]
    pub encrypted_seed: Option<String>,
}

/// Reply to a successful `POST /decrypt-seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptSeedResponse {
    pub status: String,
    /// First eight hex characters of the seed followed by `...`.
    pub seed_preview: String,
}

/// Reply to `GET /generate-2fa`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generate2faResponse {
    pub code: String,
    /// Seconds until `code` rolls over, in `[1, period]`.
    pub valid_for: u32,
}

/// Body of `POST /verify-2fa`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verify2faRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Reply to `POST /verify-2fa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verify2faResponse {
    pub valid: bool,
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ProvisionError> for ErrorResponse {
    fn from(err: ProvisionError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl From<&ProvisionError> for ErrorResponse {
    fn from(err: &ProvisionError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

const STATUS_OK: &str = "ok";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Endpoint handlers bound to one seed file and one TOTP configuration.
///
/// Holds no key material; the private key is passed to the single call
/// that needs it.
#[derive(Debug, Clone)]
pub struct SeedService {
    store: SeedStore,
    totp: TotpConfig,
}

impl SeedService {
    #[must_use]
    pub const fn new(store: SeedStore, totp: TotpConfig) -> Self {
        Self { store, totp }
    }

    #[must_use]
    pub const fn store(&self) -> &SeedStore {
        &self.store
    }

    #[must_use]
    pub const fn totp_config(&self) -> &TotpConfig {
        &self.totp
    }

    /// Decrypt the posted ciphertext and persist the seed.
    ///
    /// The seed file is written once, after every check has passed; a
    /// failed call leaves any previous seed untouched.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::MissingField`] if `encrypted_seed` is absent or blank
    /// - [`ProvisionError::Crypto`] from [`provisioning::decrypt_seed`]
    /// - [`ProvisionError::Io`] if the seed cannot be stored
    pub fn decrypt_seed(
        &self,
        request: &DecryptSeedRequest,
        private_key: &RsaPrivateKey,
    ) -> Result<DecryptSeedResponse, ProvisionError> {
        let encrypted = request
            .encrypted_seed
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ProvisionError::MissingField("encrypted_seed"))?;

        let seed = provisioning::decrypt_seed(encrypted, private_key).map_err(|e| {
            warn!(error = %e, "seed decryption rejected");
            e
        })?;
        self.store.save(&seed)?;
        info!(seed = %seed.preview(), "seed provisioned");

        Ok(DecryptSeedResponse {
            status: STATUS_OK.into(),
            seed_preview: seed.preview(),
        })
    }

    /// Current code and its remaining lifetime at Unix time `now`.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::SeedNotProvisioned`] if no seed is stored
    /// - [`ProvisionError::Crypto`] if the stored seed is corrupt
    pub fn generate_2fa(&self, now: u64) -> Result<Generate2faResponse, ProvisionError> {
        let seed = self.load_seed()?;
        let code = generate_code_at(seed.expose(), now, &self.totp)?;
        Ok(Generate2faResponse {
            code,
            valid_for: seconds_remaining_at(now, self.totp.period),
        })
    }

    /// Check a submitted code against the window around `now`.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::MissingField`] if `code` is absent
    /// - [`ProvisionError::SeedNotProvisioned`] if no seed is stored
    /// - [`ProvisionError::Crypto`] if the stored seed is corrupt
    pub fn verify_2fa(
        &self,
        request: &Verify2faRequest,
        now: u64,
    ) -> Result<Verify2faResponse, ProvisionError> {
        let candidate = request
            .code
            .as_deref()
            .ok_or(ProvisionError::MissingField("code"))?;
        let seed = self.load_seed()?;
        let valid = verify_code_at(seed.expose(), candidate.trim(), now, &self.totp)?;
        Ok(Verify2faResponse { valid })
    }

    fn load_seed(&self) -> Result<HexSeed, ProvisionError> {
        self.store.load()?.ok_or(ProvisionError::SeedNotProvisioned)
    }
}
