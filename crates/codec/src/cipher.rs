//! Cipher orchestrator: padding, salted-header derivation and mode dispatch.
//!
//! **Envelope:** `[Salted__ || salt] || ciphertext || [GCM tag]`. The header is
//! written only when the caller supplies no IV; the tag only for GCM.
//!
//! **Absent IV is never defaulted.** With no IV, a fresh salt is drawn and both
//! key and IV are derived from the caller's key used as a password. Callers that
//! must read data written with the old fixed IV pass [`LEGACY_FIXED_IV`]
//! explicitly.

use common::{BlockMode, CodecError, KdfDigest, PaddingScheme};
use tracing::{debug, warn};

use crate::kdf::{
    build_salted_header, parse_salted_header, DerivedKeyMaterial, SaltedHeader, DERIVED_KEY_LEN,
    HEADER_LEN,
};
use crate::modes::{self, BLOCK_SIZE};
use crate::padding::{pad, unpad};

/// Fixed IV that older producers substituted when no IV was given.
///
/// Only meaningful for the 16-byte-IV modes. Never applied implicitly.
pub const LEGACY_FIXED_IV: &[u8; BLOCK_SIZE] = b"4w1Trbq#PSQE$9tx";

/// A mode, padding scheme and KDF digest bundled for repeated use.
///
/// Holds no key material; every call is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codec {
    mode: BlockMode,
    padding: PaddingScheme,
    kdf_digest: KdfDigest,
}

impl Codec {
    /// Create a codec using the default (MD5) salted-header digest.
    pub fn new(mode: BlockMode, padding: PaddingScheme) -> Self {
        Self {
            mode,
            padding,
            kdf_digest: KdfDigest::default(),
        }
    }

    /// Use `digest` for salted-header key derivation.
    pub fn with_kdf_digest(mut self, digest: KdfDigest) -> Self {
        self.kdf_digest = digest;
        self
    }

    pub fn mode(&self) -> BlockMode {
        self.mode
    }

    pub fn padding(&self) -> PaddingScheme {
        self.padding
    }

    pub fn kdf_digest(&self) -> KdfDigest {
        self.kdf_digest
    }

    /// Whether [`Codec::encrypt`] would prefix a salted header for this IV.
    pub fn writes_header(&self, iv: Option<&[u8]>) -> bool {
        iv.is_none() && self.mode != BlockMode::Ecb
    }

    /// Encrypt `plaintext` under `key`.
    ///
    /// With `iv = None` (and any mode but ECB) the output starts with a
    /// `Salted__` header and the real key/IV are derived from `key` and a fresh
    /// salt. ECB ignores `iv`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidKeySize`] unless `key` is 16, 24 or 32 bytes.
    /// - [`CodecError::InvalidIvLength`] if an explicit IV has the wrong length.
    /// - Any padding error for CBC/ECB.
    /// - [`CodecError::PlaintextTooLarge`] for oversized GCM input.
    /// - [`CodecError::RandomnessUnavailable`] if no salt or filler can be drawn.
    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>, CodecError> {
        modes::validate_key(key)?;

        let mut buf = if self.mode.uses_padding() {
            pad(self.padding, plaintext, BLOCK_SIZE)?
        } else {
            plaintext.to_vec()
        };

        let salted = if self.writes_header(iv) {
            Some(build_salted_header(
                key,
                BLOCK_SIZE,
                self.mode,
                DERIVED_KEY_LEN,
                self.kdf_digest,
            )?)
        } else {
            None
        };
        let (key, iv) = match &salted {
            Some((_, material)) => (material.key(), material.iv()),
            None => (key, iv.unwrap_or_default()),
        };

        let body = match self.mode {
            BlockMode::Cbc | BlockMode::Cfb | BlockMode::Ctr | BlockMode::Ofb => {
                modes::apply_encrypt(self.mode, key, iv, &mut buf)?;
                buf
            }
            BlockMode::Gcm => modes::gcm_seal(key, iv, &buf)?,
            BlockMode::Ecb => modes::ecb_encrypt(key, &buf)?,
        };

        debug!(
            mode = %self.mode,
            padding = %self.padding,
            salted = salted.is_some(),
            plaintext_len = plaintext.len(),
            "encrypted payload"
        );

        Ok(match salted {
            Some((header, _)) => {
                let mut out = Vec::with_capacity(HEADER_LEN + body.len());
                out.extend_from_slice(&header.to_bytes());
                out.extend_from_slice(&body);
                out
            }
            None => body,
        })
    }

    /// Decrypt `ciphertext` under `key`.
    ///
    /// With `iv = None` (and any mode but ECB) a leading `Salted__` header is
    /// required: key and IV are re-derived from `key` and the embedded salt.
    /// With an explicit IV the input is never interpreted as salted.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidKeySize`] unless `key` is 16, 24 or 32 bytes.
    /// - [`CodecError::InvalidIvLength`] if the IV is wrong for the mode, or
    ///   missing with no salted header to derive it from.
    /// - [`CodecError::BlockAlignment`] for partial blocks in CBC/ECB.
    /// - [`CodecError::AuthenticationFailure`] if the GCM tag does not verify.
    /// - Any padding error for CBC/ECB.
    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>, CodecError> {
        modes::validate_key(key)?;

        let derived: Option<DerivedKeyMaterial> = if self.writes_header(iv) {
            SaltedHeader::parse(ciphertext).map(|header| {
                parse_salted_header(
                    &header,
                    key,
                    BLOCK_SIZE,
                    self.mode,
                    DERIVED_KEY_LEN,
                    self.kdf_digest,
                )
            })
        } else {
            None
        };
        let (key, iv, body) = match &derived {
            Some(material) => (material.key(), material.iv(), &ciphertext[HEADER_LEN..]),
            None => (key, iv.unwrap_or_default(), ciphertext),
        };
        modes::validate_iv(self.mode, iv)?;

        let plaintext = match self.mode {
            BlockMode::Cbc | BlockMode::Cfb | BlockMode::Ctr | BlockMode::Ofb => {
                let mut buf = body.to_vec();
                modes::apply_decrypt(self.mode, key, iv, &mut buf)?;
                buf
            }
            BlockMode::Gcm => modes::gcm_open(key, iv, body).map_err(|e| {
                warn!(mode = %self.mode, salted = derived.is_some(), "GCM authentication failed");
                e
            })?,
            BlockMode::Ecb => modes::ecb_decrypt(key, body)?,
        };

        debug!(
            mode = %self.mode,
            padding = %self.padding,
            salted = derived.is_some(),
            ciphertext_len = ciphertext.len(),
            "decrypted payload"
        );

        if self.mode.uses_padding() {
            unpad(self.padding, &plaintext, BLOCK_SIZE)
        } else {
            Ok(plaintext)
        }
    }
}

/// Encrypt with the default KDF digest. See [`Codec::encrypt`].
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    iv: Option<&[u8]>,
    mode: BlockMode,
    padding: PaddingScheme,
) -> Result<Vec<u8>, CodecError> {
    Codec::new(mode, padding).encrypt(plaintext, key, iv)
}

/// Decrypt with the default KDF digest. See [`Codec::decrypt`].
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: Option<&[u8]>,
    mode: BlockMode,
    padding: PaddingScheme,
) -> Result<Vec<u8>, CodecError> {
    Codec::new(mode, padding).decrypt(ciphertext, key, iv)
}
