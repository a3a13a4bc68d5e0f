//! On-disk state: PEM key files, the decrypted seed and the encrypted seed
//! as received from the authority.
//!
//! Every write goes through [`write_atomic`] so a crash never leaves a
//! half-written key or seed behind. Secret files are owner-only on Unix.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use pki2fa_crypto_core::{
    generate_keypair, private_key_from_pem, private_key_to_pem, public_key_from_pem,
    public_key_to_pem, HexSeed, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::error::ProvisionError;

// ---------------------------------------------------------------------------
// Atomic writes
// ---------------------------------------------------------------------------

/// Write `contents` to `path` through a sibling `.{name}.tmp` and a rename.
///
/// With `owner_only`, the file is created with mode 0600 on Unix before
/// any byte is written.
pub(crate) fn write_atomic(path: &Path, contents: &[u8], owner_only: bool) -> std::io::Result<()> {
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if owner_only { 0o600 } else { 0o644 });
    }
    #[cfg(not(unix))]
    let _ = owner_only;

    let result = write_then_rename(&options, &tmp, path, contents);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_then_rename(
    options: &fs::OpenOptions,
    tmp: &Path,
    path: &Path,
    contents: &[u8],
) -> std::io::Result<()> {
    let mut file = options.open(tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(tmp, path)
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Key files
// ---------------------------------------------------------------------------

/// Generate a key pair and persist both halves as PEM.
///
/// The private key is PKCS#1 with mode 0600; the public key is SPKI.
///
/// # Errors
///
/// - [`ProvisionError::AlreadyExists`] if `private_path` exists and `force`
///   is not set
/// - [`ProvisionError::Crypto`] if generation or PEM encoding fails
/// - [`ProvisionError::Io`] if either file cannot be written
pub fn generate_and_store_keypair(
    private_path: &Path,
    public_path: &Path,
    bits: usize,
    force: bool,
) -> Result<RsaKeyPair, ProvisionError> {
    if private_path.exists() && !force {
        return Err(ProvisionError::AlreadyExists(
            private_path.display().to_string(),
        ));
    }

    info!(bits, "generating RSA key pair");
    let pair = generate_keypair(bits)?;

    let private_pem = private_key_to_pem(pair.private_key())?;
    let public_pem = public_key_to_pem(pair.public_key())?;

    ensure_parent(private_path)?;
    ensure_parent(public_path)?;
    write_atomic(private_path, private_pem.as_bytes(), true)?;
    write_atomic(public_path, public_pem.as_bytes(), false)?;

    info!(
        private = %private_path.display(),
        public = %public_path.display(),
        "key pair stored"
    );
    Ok(pair)
}

/// Read a PKCS#1 or PKCS#8 private key.
///
/// # Errors
///
/// [`ProvisionError::Io`] if the file is unreadable, or
/// [`ProvisionError::Crypto`] if it is not a private key PEM.
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey, ProvisionError> {
    let pem = Zeroizing::new(fs::read_to_string(path)?);
    debug!(path = %path.display(), "loaded private key");
    Ok(private_key_from_pem(&pem)?)
}

/// Read an SPKI or PKCS#1 public key.
///
/// # Errors
///
/// [`ProvisionError::Io`] if the file is unreadable, or
/// [`ProvisionError::Crypto`] if it is not a public key PEM.
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey, ProvisionError> {
    let pem = fs::read_to_string(path)?;
    Ok(public_key_from_pem(&pem)?)
}

/// Raw PEM text of a public key, as sent to the seed authority.
///
/// # Errors
///
/// [`ProvisionError::Io`] if the file is unreadable.
pub fn load_public_key_text(path: &Path) -> Result<String, ProvisionError> {
    Ok(fs::read_to_string(path)?)
}

// ---------------------------------------------------------------------------
// Seed store
// ---------------------------------------------------------------------------

/// The decrypted seed, persisted as one line of lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedStore {
    path: PathBuf,
}

impl SeedStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a seed file is present (valid or not).
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and validate the stored seed; `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::Io`] for unreadable files, or
    /// [`ProvisionError::Crypto`] if the content is not a valid seed.
    pub fn load(&self) -> Result<Option<HexSeed>, ProvisionError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => Zeroizing::new(text),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(HexSeed::parse(&text)?))
    }

    /// Persist `seed` with a trailing newline, owner-only.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::Io`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, seed: &HexSeed) -> Result<(), ProvisionError> {
        ensure_parent(&self.path)?;
        let mut line = Zeroizing::new(String::with_capacity(seed.expose().len().saturating_add(1)));
        line.push_str(seed.expose());
        line.push('\n');
        write_atomic(&self.path, line.as_bytes(), true)?;
        info!(path = %self.path.display(), seed = %seed.preview(), "seed stored");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Encrypted seed
// ---------------------------------------------------------------------------

/// Base64 ciphertext from `path`, surrounding whitespace removed.
///
/// # Errors
///
/// [`ProvisionError::Io`] if the file is unreadable.
pub fn read_encrypted_seed(path: &Path) -> Result<String, ProvisionError> {
    Ok(fs::read_to_string(path)?.trim().to_owned())
}

/// Store the authority's base64 ciphertext, trimmed.
///
/// # Errors
///
/// [`ProvisionError::Io`] if the file cannot be written.
pub fn write_encrypted_seed(path: &Path, encrypted_seed: &str) -> Result<(), ProvisionError> {
    ensure_parent(path)?;
    write_atomic(path, encrypted_seed.trim().as_bytes(), false)?;
    debug!(path = %path.display(), "encrypted seed stored");
    Ok(())
}
