//! Request and response bodies exchanged with the seed authority.
//!
//! Transport is out of scope: callers POST [`SeedRequest`] as JSON with
//! whatever client they have and hand the reply to [`SeedResponse`].

use pki2fa_crypto_core::public_key_from_pem;
use serde::{Deserialize, Serialize};

use crate::error::ProvisionError;

/// Status string the authority uses for a successful issue.
pub const STATUS_SUCCESS: &str = "success";

/// Body of the seed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRequest {
    pub student_id: String,
    pub github_repo_url: String,
    /// Holder's public key as SPKI PEM text.
    pub public_key: String,
}

impl SeedRequest {
    /// Build a request, checking every field before anything is sent.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::MissingField`] for an empty id or URL
    /// - [`ProvisionError::Crypto`] if `public_key_pem` is not a public key
    pub fn new(
        student_id: &str,
        github_repo_url: &str,
        public_key_pem: String,
    ) -> Result<Self, ProvisionError> {
        let student_id = student_id.trim();
        let github_repo_url = github_repo_url.trim();
        if student_id.is_empty() {
            return Err(ProvisionError::MissingField("student_id"));
        }
        if github_repo_url.is_empty() {
            return Err(ProvisionError::MissingField("github_repo_url"));
        }
        public_key_from_pem(&public_key_pem)?;
        Ok(Self {
            student_id: student_id.to_owned(),
            github_repo_url: github_repo_url.to_owned(),
            public_key: public_key_pem,
        })
    }

    /// Serialize as the pretty JSON body of the request.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProvisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reply from the seed authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeedResponse {
    /// Parse a JSON reply.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::Json`] for malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, ProvisionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The trimmed base64 ciphertext of a successful reply.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::Authority`] when the status is not `"success"` or
    /// the ciphertext is missing, carrying the server's message if any.
    pub fn into_encrypted_seed(self) -> Result<String, ProvisionError> {
        if self.status != STATUS_SUCCESS {
            let reason = self
                .error
                .unwrap_or_else(|| format!("status {:?}", self.status));
            return Err(ProvisionError::Authority(reason));
        }
        match self.encrypted_seed.as_deref().map(str::trim) {
            Some(seed) if !seed.is_empty() => Ok(seed.to_owned()),
            _ => Err(ProvisionError::Authority(
                "response has no encrypted_seed".into(),
            )),
        }
    }
}
