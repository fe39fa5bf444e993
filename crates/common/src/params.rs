//! Closed enumerations selecting how the codec transforms a buffer.
//!
//! Each enumeration carries a human-readable name for configuration and logging
//! consumers. Names are a display concern only and never appear in ciphertext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Block mode
// ---------------------------------------------------------------------------

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockMode {
    /// Cipher block chaining. Padded.
    #[default]
    Cbc,
    /// Full-block cipher feedback. Streaming.
    Cfb,
    /// Big-endian 128-bit counter. Streaming.
    Ctr,
    /// Output feedback. Streaming.
    Ofb,
    /// Galois/counter mode with a 96-bit nonce and 128-bit tag.
    Gcm,
    /// Electronic codebook. Padded, no IV. Legacy interoperability only.
    Ecb,
}

impl BlockMode {
    /// Every supported mode, in declaration order.
    pub const ALL: [BlockMode; 6] = [
        BlockMode::Cbc,
        BlockMode::Cfb,
        BlockMode::Ctr,
        BlockMode::Ofb,
        BlockMode::Gcm,
        BlockMode::Ecb,
    ];

    /// Canonical display name, e.g. `"CBC"`.
    pub fn name(self) -> &'static str {
        match self {
            BlockMode::Cbc => "CBC",
            BlockMode::Cfb => "CFB",
            BlockMode::Ctr => "CTR",
            BlockMode::Ofb => "OFB",
            BlockMode::Gcm => "GCM",
            BlockMode::Ecb => "ECB",
        }
    }

    /// Whether plaintext is padded to whole blocks before encryption.
    pub fn uses_padding(self) -> bool {
        match self {
            BlockMode::Cbc | BlockMode::Ecb => true,
            BlockMode::Cfb | BlockMode::Ctr | BlockMode::Ofb | BlockMode::Gcm => false,
        }
    }

    /// Required IV/nonce length for a cipher with the given block size, or
    /// `None` when the mode takes no IV.
    pub fn iv_len(self, block_size: usize) -> Option<usize> {
        match self {
            BlockMode::Cbc | BlockMode::Cfb | BlockMode::Ctr | BlockMode::Ofb => Some(block_size),
            BlockMode::Gcm => Some(crate::GCM_NONCE_LEN),
            BlockMode::Ecb => None,
        }
    }

    /// Whether the output carries an authentication tag.
    pub fn is_authenticated(self) -> bool {
        matches!(self, BlockMode::Gcm)
    }
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cbc" => Ok(BlockMode::Cbc),
            "cfb" => Ok(BlockMode::Cfb),
            "ctr" => Ok(BlockMode::Ctr),
            "ofb" => Ok(BlockMode::Ofb),
            "gcm" => Ok(BlockMode::Gcm),
            "ecb" => Ok(BlockMode::Ecb),
            _ => Err(CodecError::UnsupportedMode(s.to_owned())),
        }
    }
}

impl TryFrom<String> for BlockMode {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockMode> for String {
    fn from(mode: BlockMode) -> Self {
        mode.name().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Padding scheme
// ---------------------------------------------------------------------------

/// Reversible extension of plaintext to a whole number of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaddingScheme {
    /// N bytes of value N.
    #[default]
    Pkcs7,
    /// ISO/IEC 9797-1 padding method 2: a 0x80 marker then zero bytes.
    Iso97971,
    /// ANSI X.923: zero filler, count in the last byte.
    AnsiX923,
    /// ISO 10126 (withdrawn 2007): random filler, count in the last byte.
    Iso10126,
    /// Zero bytes up to the block boundary. Ambiguous for data ending in 0x00.
    ZeroPadding,
    /// No padding; input must already be block aligned.
    NoPadding,
}

impl PaddingScheme {
    /// Every supported scheme, in declaration order.
    pub const ALL: [PaddingScheme; 6] = [
        PaddingScheme::Pkcs7,
        PaddingScheme::Iso97971,
        PaddingScheme::AnsiX923,
        PaddingScheme::Iso10126,
        PaddingScheme::ZeroPadding,
        PaddingScheme::NoPadding,
    ];

    /// Canonical display name, e.g. `"PKCS7"`.
    pub fn name(self) -> &'static str {
        match self {
            PaddingScheme::Pkcs7 => "PKCS7",
            PaddingScheme::Iso97971 => "ISO/IEC 9797-1",
            PaddingScheme::AnsiX923 => "ANSI X.923",
            PaddingScheme::Iso10126 => "ISO10126",
            PaddingScheme::ZeroPadding => "ZeroPadding",
            PaddingScheme::NoPadding => "NoPadding",
        }
    }
}

impl fmt::Display for PaddingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaddingScheme {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalised.as_str() {
            "pkcs7" | "pkcs5" => Ok(PaddingScheme::Pkcs7),
            "iso97971" | "isoiec97971" => Ok(PaddingScheme::Iso97971),
            "ansix923" => Ok(PaddingScheme::AnsiX923),
            "iso10126" => Ok(PaddingScheme::Iso10126),
            "zero" | "zeropadding" => Ok(PaddingScheme::ZeroPadding),
            "none" | "nopadding" => Ok(PaddingScheme::NoPadding),
            _ => Err(CodecError::UnsupportedPadding(s.to_owned())),
        }
    }
}

impl TryFrom<String> for PaddingScheme {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaddingScheme> for String {
    fn from(scheme: PaddingScheme) -> Self {
        scheme.name().to_owned()
    }
}

// ---------------------------------------------------------------------------
// KDF digest
// ---------------------------------------------------------------------------

/// Hash function used by the salted-header key derivation.
///
/// `Md5` matches `openssl enc` before 1.1.0 and is the default; `Sha256`
/// matches `openssl enc -md sha256` (the default since 1.1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KdfDigest {
    #[default]
    Md5,
    Sha256,
}

impl KdfDigest {
    /// Canonical display name, e.g. `"MD5"`.
    pub fn name(self) -> &'static str {
        match self {
            KdfDigest::Md5 => "MD5",
            KdfDigest::Sha256 => "SHA-256",
        }
    }
}

impl fmt::Display for KdfDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KdfDigest {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(KdfDigest::Md5),
            "sha256" => Ok(KdfDigest::Sha256),
            _ => Err(CodecError::UnsupportedDigest(s.to_owned())),
        }
    }
}

impl TryFrom<String> for KdfDigest {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KdfDigest> for String {
    fn from(digest: KdfDigest) -> Self {
        digest.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip_through_from_str() {
        for mode in BlockMode::ALL {
            assert_eq!(mode.name().parse::<BlockMode>().unwrap(), mode);
        }
    }

    #[test]
    fn padding_names_round_trip_through_from_str() {
        for scheme in PaddingScheme::ALL {
            assert_eq!(scheme.name().parse::<PaddingScheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn padding_aliases() {
        assert_eq!("pkcs5".parse::<PaddingScheme>().unwrap(), PaddingScheme::Pkcs7);
        assert_eq!("ansix923".parse::<PaddingScheme>().unwrap(), PaddingScheme::AnsiX923);
        assert_eq!("none".parse::<PaddingScheme>().unwrap(), PaddingScheme::NoPadding);
        assert_eq!("zero".parse::<PaddingScheme>().unwrap(), PaddingScheme::ZeroPadding);
    }

    #[test]
    fn unknown_names_rejected() {
        assert!(matches!(
            "xts".parse::<BlockMode>(),
            Err(CodecError::UnsupportedMode(_))
        ));
        assert!(matches!(
            "pkcs1".parse::<PaddingScheme>(),
            Err(CodecError::UnsupportedPadding(_))
        ));
        assert!(matches!(
            "sha1".parse::<KdfDigest>(),
            Err(CodecError::UnsupportedDigest(_))
        ));
    }

    #[test]
    fn only_cbc_and_ecb_pad() {
        let padded: Vec<_> = BlockMode::ALL.into_iter().filter(|m| m.uses_padding()).collect();
        assert_eq!(padded, vec![BlockMode::Cbc, BlockMode::Ecb]);
    }

    #[test]
    fn iv_lengths() {
        assert_eq!(BlockMode::Cbc.iv_len(16), Some(16));
        assert_eq!(BlockMode::Ctr.iv_len(16), Some(16));
        assert_eq!(BlockMode::Gcm.iv_len(16), Some(12));
        assert_eq!(BlockMode::Ecb.iv_len(16), None);
        assert!(BlockMode::Gcm.is_authenticated());
        assert!(!BlockMode::Ofb.is_authenticated());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&PaddingScheme::AnsiX923).unwrap();
        assert_eq!(json, "\"ANSI X.923\"");
        let mode: BlockMode = serde_json::from_str("\"gcm\"").unwrap();
        assert_eq!(mode, BlockMode::Gcm);
        assert!(serde_json::from_str::<BlockMode>("\"xts\"").is_err());
        let digest: KdfDigest = serde_json::from_str("\"sha-256\"").unwrap();
        assert_eq!(digest, KdfDigest::Sha256);
    }
}
