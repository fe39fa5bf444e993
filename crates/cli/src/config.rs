//! Configuration loading and validation for codec-cli.

use std::fmt;

use anyhow::{Context, Result};
use codec::{BlockMode, Codec, KdfDigest, PaddingScheme, LEGACY_FIXED_IV};
use serde::Deserialize;

/// How `encrypt` renders its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line of standard base64.
    #[default]
    Base64,
    /// A JSON [`common::protocol::SealedPayload`].
    Json,
}

/// Validated codec-cli configuration, read from `CODEC_*` variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Key text; its UTF-8 bytes must be 16, 24 or 32 long. **Required.**
    pub key: String,

    #[serde(default)]
    pub mode: BlockMode,

    #[serde(default)]
    pub padding: PaddingScheme,

    /// Digest for salted-header derivation.
    #[serde(default)]
    pub kdf_digest: KdfDigest,

    /// Explicit IV text. Absent means salted-header mode.
    #[serde(default)]
    pub iv: Option<String>,

    /// Use the fixed IV older producers defaulted to.
    #[serde(default)]
    pub legacy_fixed_iv: bool,

    #[serde(default)]
    pub output_format: OutputFormat,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("key", &"<redacted>")
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("kdf_digest", &self.kdf_digest)
            .field("iv", &self.iv.as_ref().map(|_| "<set>"))
            .field("legacy_fixed_iv", &self.legacy_fixed_iv)
            .field("output_format", &self.output_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("CODEC"))
    }

    fn from_source(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build codec-cli configuration")?;

        let mut c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise codec-cli configuration")?;

        if c.iv.as_deref() == Some("") {
            c.iv = None;
        }
        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            anyhow::bail!("CODEC_KEY is required and must not be empty");
        }
        if !matches!(self.key.len(), 16 | 24 | 32) {
            anyhow::bail!(
                "CODEC_KEY must be 16, 24 or 32 bytes, got {}",
                self.key.len()
            );
        }
        if self.iv.is_some() && self.legacy_fixed_iv {
            anyhow::bail!("CODEC_IV and CODEC_LEGACY_FIXED_IV are mutually exclusive");
        }
        if let Some(iv) = self.iv_bytes() {
            codec::modes::validate_iv(self.mode, iv)
                .with_context(|| format!("IV does not suit mode {}", self.mode))?;
        }
        Ok(())
    }

    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }

    /// The explicit IV, if any. `None` selects the salted header.
    pub fn iv_bytes(&self) -> Option<&[u8]> {
        if self.legacy_fixed_iv {
            return Some(&LEGACY_FIXED_IV[..]);
        }
        self.iv.as_deref().map(str::as_bytes)
    }

    pub fn codec(&self) -> Codec {
        Codec::new(self.mode, self.padding).with_kdf_digest(self.kdf_digest)
    }
}
