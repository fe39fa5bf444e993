//! Secure randomness for salts and ISO 10126 filler.
//!
//! Draws straight from the OS CSPRNG. There is no weaker fallback: if the OS
//! source fails, the caller gets [`CodecError::RandomnessUnavailable`].

use common::CodecError;
use rand::{rngs::OsRng, RngCore};

/// Fill `buf` with bytes from the OS random source.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<(), CodecError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CodecError::RandomnessUnavailable(e.to_string()))
}
