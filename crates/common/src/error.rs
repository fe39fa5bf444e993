//! Error taxonomy shared by the codec and its callers.

use thiserror::Error;

use crate::params::{BlockMode, PaddingScheme};

/// Every failure the codec can report.
///
/// All variants are returned, never raised as process-terminating faults.
/// Failures are deterministic: retrying with the same inputs cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The key is not a valid AES key size.
    #[error("invalid AES key size: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeySize(usize),

    /// The IV or nonce has the wrong length for the mode, or is missing.
    #[error("invalid IV length for {mode}: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        mode: BlockMode,
        expected: usize,
        actual: usize,
    },

    /// Input is not a whole number of blocks.
    #[error("input length {len} is not a multiple of the {block_size}-byte block size")]
    BlockAlignment { len: usize, block_size: usize },

    /// The block size is outside the range the padding scheme can encode.
    #[error("block size {block_size} is out of bounds for {scheme} padding")]
    BlockSizeOutOfBounds {
        scheme: PaddingScheme,
        block_size: usize,
    },

    /// Padding bytes failed validation on removal.
    #[error("invalid {scheme} padding: {reason}")]
    PaddingValidation {
        scheme: PaddingScheme,
        reason: &'static str,
    },

    /// GCM tag verification failed; no plaintext is released.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// GCM plaintext exceeds the per-nonce size bound.
    #[error("plaintext of {len} bytes exceeds the GCM limit of {max} bytes")]
    PlaintextTooLarge { len: u64, max: u64 },

    /// The block mode name is not recognised.
    #[error("unsupported block mode: {0}")]
    UnsupportedMode(String),

    /// The padding scheme name is not recognised.
    #[error("unsupported padding scheme: {0}")]
    UnsupportedPadding(String),

    /// The key derivation digest name is not recognised.
    #[error("unsupported key derivation digest: {0}")]
    UnsupportedDigest(String),

    /// The OS random source could not fill a salt or padding buffer.
    #[error("secure random source unavailable: {0}")]
    RandomnessUnavailable(String),
}

impl CodecError {
    /// Short machine-readable code for logs and JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidKeySize(_) => "invalid_key_size",
            CodecError::InvalidIvLength { .. } => "invalid_iv_length",
            CodecError::BlockAlignment { .. } => "block_alignment",
            CodecError::BlockSizeOutOfBounds { .. } => "block_size_out_of_bounds",
            CodecError::PaddingValidation { .. } => "padding_validation",
            CodecError::AuthenticationFailure => "authentication_failure",
            CodecError::PlaintextTooLarge { .. } => "plaintext_too_large",
            CodecError::UnsupportedMode(_) => "unsupported_mode",
            CodecError::UnsupportedPadding(_) => "unsupported_padding",
            CodecError::UnsupportedDigest(_) => "unsupported_digest",
            CodecError::RandomnessUnavailable(_) => "randomness_unavailable",
        }
    }
}
