//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use pki2fa_provisioning::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "pki2fa",
    version,
    about = "Public-key-seeded TOTP: provision a seed, derive codes, prove key possession"
)]
pub struct Cli {
    /// Settings file (JSON); missing or unreadable files fall back to defaults
    #[arg(long, env = "PKI2FA_CONFIG", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the decrypted seed
    #[arg(long, env = "PKI2FA_DATA_DIR", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Holder's private key (PEM)
    #[arg(long, env = "PKI2FA_PRIVATE_KEY", value_name = "PATH", global = true)]
    pub private_key: Option<PathBuf>,

    /// Holder's public key (PEM)
    #[arg(long, env = "PKI2FA_PUBLIC_KEY", value_name = "PATH", global = true)]
    pub public_key: Option<PathBuf>,

    /// Verifier's public key (PEM), used by `prove`
    #[arg(long, env = "PKI2FA_VERIFIER_PUBLIC_KEY", value_name = "PATH", global = true)]
    pub verifier_public_key: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "PKI2FA_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate the holder's RSA key pair
    Keygen {
        /// Modulus size in bits (2048..=4096)
        #[arg(long)]
        bits: Option<usize>,
        /// Overwrite an existing private key
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON body to POST to the seed authority
    RequestPayload {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        repo_url: String,
    },
    /// Save the encrypted seed from the authority's JSON reply
    StoreSeedResponse {
        /// File containing the reply
        #[arg(value_name = "JSON_FILE")]
        response: PathBuf,
    },
    /// Decrypt the encrypted seed and store it in the data directory
    DecryptSeed {
        /// Base64 ciphertext; defaults to the stored encrypted seed
        #[arg(long, value_name = "B64")]
        encrypted_seed: Option<String>,
    },
    /// Print the current code
    Generate {
        #[arg(long)]
        json: bool,
    },
    /// Check a code against the current time (exit status 2 when rejected)
    Verify {
        code: String,
        #[arg(long)]
        json: bool,
    },
    /// Print one timestamped code line, for crontab use
    Cron,
    /// Sign a commit hash and encrypt the signature to the verifier
    Prove {
        #[arg(value_name = "COMMIT_HASH")]
        commit_hash: String,
    },
    /// Verifier side: open a proof with our private key
    OpenProof {
        #[arg(value_name = "B64")]
        encrypted_signature: String,
        /// Commit hash the proof claims to sign
        #[arg(long)]
        commit: String,
        /// Signer's public key (PEM)
        #[arg(long, value_name = "PATH")]
        signer_public: PathBuf,
    },
}

impl Cli {
    /// Settings from `--config` with the path flags applied on top.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let mut settings = self
            .config
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if let Some(dir) = &self.data_dir {
            settings.data_dir.clone_from(dir);
        }
        if let Some(path) = &self.private_key {
            settings.private_key_path.clone_from(path);
        }
        if let Some(path) = &self.public_key {
            settings.public_key_path.clone_from(path);
        }
        if let Some(path) = &self.verifier_public_key {
            settings.verifier_public_key_path.clone_from(path);
        }
        settings
    }

    /// Effective `tracing` filter directive.
    #[must_use]
    pub fn log_directive(&self) -> &str {
        match self.verbose {
            0 => self.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    }
}
