//! Loading a [`CbcHandle`] from environment configuration.
//!
//! | Variable                  | Meaning                                       |
//! |---------------------------|-----------------------------------------------|
//! | `AESCBC_KEY`              | Key material. **Required.**                   |
//! | `AESCBC_IV`               | IV material. **Required.**                    |
//! | `AESCBC_MATERIAL_ENCODING`| `utf8` (default) or `base64`.                 |
//!
//! Length checks are left to [`CbcHandle::new`], so a wrong-length key fails
//! with the same typed [`common::CipherError`] as any other caller would see.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use tracing::info;

use crate::CbcHandle;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "AESCBC";

/// How the configured key and IV strings map to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialEncoding {
    /// The raw UTF-8 bytes of the string, e.g. a 32-character ASCII key.
    #[default]
    Utf8,
    /// Standard base64 with padding.
    Base64,
}

/// Handle configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Key material, encoded per [`Config::material_encoding`]. **Required.**
    pub key: String,

    /// IV material, encoded per [`Config::material_encoding`]. **Required.**
    pub iv: String,

    #[serde(default)]
    pub material_encoding: MaterialEncoding,
}

impl Config {
    /// Load and validate configuration from `AESCBC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load and validate configuration from an explicit environment source.
    pub fn from_source(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build aescbc configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise aescbc configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.key, "AESCBC_KEY")?;
        ensure_non_empty(&self.iv, "AESCBC_IV")?;
        Ok(())
    }

    /// Decode the configured key material and build a [`CbcHandle`].
    ///
    /// # Errors
    ///
    /// Returns an error if base64 material does not decode, or if the decoded
    /// key or IV has the wrong length (the typed
    /// [`common::CipherError::Validation`] is kept as the error source).
    pub fn build_handle(&self) -> Result<CbcHandle> {
        let mut key = decode_material(&self.key, self.material_encoding)
            .context("AESCBC_KEY could not be decoded")?;
        let mut iv = decode_material(&self.iv, self.material_encoding)
            .context("AESCBC_IV could not be decoded")?;

        let handle = CbcHandle::new(&key, &iv);

        key.iter_mut().for_each(|b| *b = 0);
        iv.iter_mut().for_each(|b| *b = 0);

        let handle = handle.context("configured key material rejected")?;
        info!(encoding = ?self.material_encoding, "AES-256-CBC handle ready");
        Ok(handle)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .field("material_encoding", &self.material_encoding)
            .finish()
    }
}

fn decode_material(value: &str, encoding: MaterialEncoding) -> Result<Vec<u8>> {
    match encoding {
        MaterialEncoding::Utf8 => Ok(value.as_bytes().to_vec()),
        MaterialEncoding::Base64 => STANDARD
            .decode(value.trim())
            .context("value is not valid standard base64"),
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
