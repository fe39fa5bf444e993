//! Salted-header key/IV derivation, compatible with OpenSSL `EVP_BytesToKey`.
//!
//! # Envelope format
//!
//! ```text
//! bytes[0:8]   = ASCII "Salted__"
//! bytes[8:16]  = random salt
//! bytes[16:]   = ciphertext
//! ```
//!
//! Key and IV are stretched from the password and salt with a single-iteration
//! hash chain: `D0 = H(password || salt)`, `Di = H(Di-1 || password || salt)`.

use std::fmt;

use common::{BlockMode, CodecError, KdfDigest};
use md5::Md5;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::rng::fill_random;

/// Magic prefix of a salted envelope.
pub const SALT_MAGIC: &[u8; 8] = b"Salted__";

/// Byte length of the random salt.
pub const SALT_LEN: usize = 8;

/// Byte length of the full header (magic + salt).
pub const HEADER_LEN: usize = 16;

/// Key size produced by salted-header derivation (AES-256).
pub const DERIVED_KEY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The 16-byte `Salted__` header that prefixes password-derived ciphertext.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SaltedHeader {
    salt: [u8; SALT_LEN],
}

impl SaltedHeader {
    /// Create a header with a fresh salt from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::RandomnessUnavailable`] if the OS source fails.
    pub fn generate() -> Result<Self, CodecError> {
        let mut salt = [0u8; SALT_LEN];
        fill_random(&mut salt)?;
        Ok(Self { salt })
    }

    /// Create a header around a known salt.
    pub fn from_salt(salt: [u8; SALT_LEN]) -> Self {
        Self { salt }
    }

    /// Recognise a header at the start of `data`.
    ///
    /// Returns `None` unless `data` is at least [`HEADER_LEN`] bytes and starts
    /// with [`SALT_MAGIC`].
    pub fn parse(data: &[u8]) -> Option<Self> {
        let header = data.get(..HEADER_LEN)?;
        let (magic, salt) = header.split_at(SALT_MAGIC.len());
        if magic != SALT_MAGIC {
            return None;
        }
        let mut out = [0u8; SALT_LEN];
        out.copy_from_slice(salt);
        Some(Self { salt: out })
    }

    /// The embedded salt.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Serialise to the 16-byte wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..SALT_MAGIC.len()].copy_from_slice(SALT_MAGIC);
        out[SALT_MAGIC.len()..].copy_from_slice(&self.salt);
        out
    }
}

impl fmt::Debug for SaltedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SaltedHeader([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// Derived material
// ---------------------------------------------------------------------------

/// A key and IV derived from a password. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyMaterial {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl DerivedKeyMaterial {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Empty for ECB.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.write_str("DerivedKeyMaterial([REDACTED])")
    }
}

/// Total bytes of key material a mode needs: key plus IV/nonce.
pub fn material_len(mode: BlockMode, block_size: usize, key_size: usize) -> usize {
    key_size + mode.iv_len(block_size).unwrap_or(0)
}

/// Stretch `password` and `salt` into `total_size` bytes and split them into a
/// `key_size`-byte key and an IV holding the remainder.
///
/// `total_size` smaller than `key_size` is treated as `key_size` (no IV).
pub fn derive_key_material(
    digest: KdfDigest,
    salt: &[u8; SALT_LEN],
    password: &[u8],
    key_size: usize,
    total_size: usize,
) -> DerivedKeyMaterial {
    let total_size = total_size.max(key_size);
    let mut stream = match digest {
        KdfDigest::Md5 => bytes_to_key::<Md5>(salt, password, total_size),
        KdfDigest::Sha256 => bytes_to_key::<Sha256>(salt, password, total_size),
    };
    let material = DerivedKeyMaterial {
        key: stream[..key_size].to_vec(),
        iv: stream[key_size..total_size].to_vec(),
    };
    stream.zeroize();
    material
}

/// Generate a fresh header and derive the key material it stands for.
///
/// # Errors
///
/// Returns [`CodecError::RandomnessUnavailable`] if no salt can be drawn.
pub fn build_salted_header(
    password: &[u8],
    block_size: usize,
    mode: BlockMode,
    key_size: usize,
    digest: KdfDigest,
) -> Result<(SaltedHeader, DerivedKeyMaterial), CodecError> {
    let header = SaltedHeader::generate()?;
    let material = parse_salted_header(&header, password, block_size, mode, key_size, digest);
    Ok((header, material))
}

/// Re-derive the key material for a received header.
pub fn parse_salted_header(
    header: &SaltedHeader,
    password: &[u8],
    block_size: usize,
    mode: BlockMode,
    key_size: usize,
    digest: KdfDigest,
) -> DerivedKeyMaterial {
    let total = material_len(mode, block_size, key_size);
    derive_key_material(digest, header.salt(), password, key_size, total)
}

fn bytes_to_key<D: Digest>(salt: &[u8], password: &[u8], total_size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(total_size);
    let mut prev: Vec<u8> = Vec::new();
    while out.len() < total_size {
        let mut hasher = D::new();
        hasher.update(&prev);
        hasher.update(password);
        hasher.update(salt);
        prev.zeroize();
        prev = hasher.finalize().to_vec();
        out.extend_from_slice(&prev);
    }
    prev.zeroize();
    out
}
