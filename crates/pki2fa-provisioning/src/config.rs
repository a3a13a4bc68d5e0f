//! Runtime settings: where keys, seeds and ciphertexts live on disk.
//!
//! Stored as plain JSON. Every field has a default, so a missing or
//! partial file still yields a usable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use pki2fa_crypto_core::{DEFAULT_KEY_BITS, DEFAULT_WINDOW};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::write_atomic;

/// Paths and tunables for the provisioning flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory holding durable state (the decrypted seed).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Explicit seed file; `None` means `{data_dir}/seed.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Holder's private key (PKCS#1 PEM).
    #[serde(default = "default_private_key_path")]
    pub private_key_path: PathBuf,

    /// Holder's public key (SPKI PEM), sent to the seed authority.
    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,

    /// Verifier's public key, used to encrypt commit proofs.
    #[serde(default = "default_verifier_public_key_path")]
    pub verifier_public_key_path: PathBuf,

    /// Base64 ciphertext as received from the seed authority.
    #[serde(default = "default_encrypted_seed_path")]
    pub encrypted_seed_path: PathBuf,

    /// Modulus size for `keygen`.
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,

    /// Accepted clock drift for verification, in time steps.
    #[serde(default = "default_totp_window")]
    pub totp_window: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_file: None,
            private_key_path: default_private_key_path(),
            public_key_path: default_public_key_path(),
            verifier_public_key_path: default_verifier_public_key_path(),
            encrypted_seed_path: default_encrypted_seed_path(),
            key_bits: default_key_bits(),
            totp_window: default_totp_window(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/data")
}
fn default_private_key_path() -> PathBuf {
    PathBuf::from("student_private.pem")
}
fn default_public_key_path() -> PathBuf {
    PathBuf::from("student_public.pem")
}
fn default_verifier_public_key_path() -> PathBuf {
    PathBuf::from("instructor_public.pem")
}
fn default_encrypted_seed_path() -> PathBuf {
    PathBuf::from("encrypted_seed.txt")
}
const fn default_key_bits() -> usize {
    DEFAULT_KEY_BITS
}
const fn default_totp_window() -> u32 {
    DEFAULT_WINDOW
}

const SEED_FILE_NAME: &str = "seed.txt";

impl Settings {
    /// Resolved location of the decrypted seed.
    #[must_use]
    pub fn seed_path(&self) -> PathBuf {
        self.seed_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(SEED_FILE_NAME))
    }

    /// Load settings from a JSON file.
    ///
    /// Returns [`Default::default()`] when the file is missing or does not
    /// parse; a corrupt file is logged, not fatal.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Persist settings as pretty JSON via tmp-file + rename.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the parent directory does not exist or
    /// the file system rejects the write/rename.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_atomic(path, json.as_bytes(), false)
    }
}
