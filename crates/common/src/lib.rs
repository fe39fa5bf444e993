//! Common types, protocol definitions, and errors shared across the codec crates.

pub mod error;
pub mod params;
pub mod protocol;

pub use error::CodecError;
pub use params::{BlockMode, KdfDigest, PaddingScheme};

/// Byte length of a GCM nonce (96 bits).
pub const GCM_NONCE_LEN: usize = 12;
