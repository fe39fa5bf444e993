//! Padding engine: six schemes that extend plaintext to whole blocks and back.
//!
//! Every padding scheme except [`PaddingScheme::NoPadding`] adds between 1 and
//! `block_size` bytes, so already-aligned input gains a full block.

use common::{CodecError, PaddingScheme};

use crate::rng::fill_random;

/// Largest block size whose pad count fits in one byte.
pub const MAX_BLOCK_SIZE: usize = 255;

/// ISO 10126 also accepts 256; a pad length of 256 is written as count byte 0x00.
pub const ISO10126_MAX_BLOCK_SIZE: usize = 256;

/// First byte of ISO/IEC 9797-1 method 2 padding.
const ISO97971_MARKER: u8 = 0x80;

/// Pad `data` to a whole number of `block_size` blocks.
///
/// # Errors
///
/// - [`CodecError::BlockSizeOutOfBounds`] if `block_size` is outside the range
///   the scheme can encode.
/// - [`CodecError::BlockAlignment`] for [`PaddingScheme::NoPadding`] on
///   unaligned input.
/// - [`CodecError::RandomnessUnavailable`] if ISO 10126 filler cannot be drawn.
pub fn pad(scheme: PaddingScheme, data: &[u8], block_size: usize) -> Result<Vec<u8>, CodecError> {
    match scheme {
        PaddingScheme::Pkcs7 => {
            let n = pad_len(data.len(), check_block_size(scheme, block_size)?);
            let mut out = data.to_vec();
            out.resize(data.len() + n, n as u8);
            Ok(out)
        }
        PaddingScheme::ZeroPadding => {
            let n = pad_len(data.len(), check_block_size(scheme, block_size)?);
            let mut out = data.to_vec();
            out.resize(data.len() + n, 0);
            Ok(out)
        }
        PaddingScheme::Iso97971 => {
            check_block_size(scheme, block_size)?;
            let mut out = Vec::with_capacity(data.len() + 1 + block_size);
            out.extend_from_slice(data);
            out.push(ISO97971_MARKER);
            let n = pad_len(out.len(), block_size);
            out.resize(out.len() + n, 0);
            Ok(out)
        }
        PaddingScheme::AnsiX923 => {
            let n = pad_len(data.len(), check_block_size(scheme, block_size)?);
            let mut out = data.to_vec();
            out.resize(data.len() + n - 1, 0);
            out.push(n as u8);
            Ok(out)
        }
        PaddingScheme::Iso10126 => {
            let n = pad_len(data.len(), check_block_size(scheme, block_size)?);
            let mut out = data.to_vec();
            out.resize(data.len() + n - 1, 0);
            fill_random(&mut out[data.len()..])?;
            // 256 wraps to 0x00; unpad maps it back.
            out.push(n as u8);
            Ok(out)
        }
        PaddingScheme::NoPadding => {
            check_alignment(data.len(), nonzero_block_size(scheme, block_size)?)?;
            Ok(data.to_vec())
        }
    }
}

/// Strip padding previously added by [`pad`].
///
/// # Errors
///
/// - [`CodecError::BlockSizeOutOfBounds`] for an unusable `block_size`.
/// - [`CodecError::BlockAlignment`] if `data` is not block aligned (all schemes
///   except [`PaddingScheme::ZeroPadding`] and [`PaddingScheme::Iso97971`]).
/// - [`CodecError::PaddingValidation`] if the padding bytes are malformed.
pub fn unpad(scheme: PaddingScheme, data: &[u8], block_size: usize) -> Result<Vec<u8>, CodecError> {
    match scheme {
        PaddingScheme::Pkcs7 => {
            let n = count_byte(scheme, data, check_block_size(scheme, block_size)?)?;
            let cut = data.len() - n;
            if data[cut..].iter().any(|&b| b as usize != n) {
                return Err(invalid(scheme, "padding bytes do not match the count byte"));
            }
            Ok(data[..cut].to_vec())
        }
        PaddingScheme::ZeroPadding => {
            check_block_size(scheme, block_size)?;
            Ok(trim_zeros(data).to_vec())
        }
        PaddingScheme::Iso97971 => {
            check_block_size(scheme, block_size)?;
            match trim_zeros(data).split_last() {
                Some((&ISO97971_MARKER, rest)) => Ok(rest.to_vec()),
                Some(_) => Err(invalid(scheme, "missing 0x80 marker byte")),
                None => Err(invalid(scheme, "no marker byte in empty input")),
            }
        }
        PaddingScheme::AnsiX923 => {
            let n = count_byte(scheme, data, check_block_size(scheme, block_size)?)?;
            let cut = data.len() - n;
            if data[cut..data.len() - 1].iter().any(|&b| b != 0) {
                return Err(invalid(scheme, "non-zero filler byte"));
            }
            Ok(data[..cut].to_vec())
        }
        PaddingScheme::Iso10126 => {
            let n = count_byte(scheme, data, check_block_size(scheme, block_size)?)?;
            Ok(data[..data.len() - n].to_vec())
        }
        PaddingScheme::NoPadding => {
            check_alignment(data.len(), nonzero_block_size(scheme, block_size)?)?;
            Ok(data.to_vec())
        }
    }
}

/// Number of padding bytes to append: always in `1..=block_size`.
fn pad_len(len: usize, block_size: usize) -> usize {
    block_size - len % block_size
}

fn check_block_size(scheme: PaddingScheme, block_size: usize) -> Result<usize, CodecError> {
    let max = match scheme {
        PaddingScheme::Iso10126 => ISO10126_MAX_BLOCK_SIZE,
        _ => MAX_BLOCK_SIZE,
    };
    if !(1..=max).contains(&block_size) {
        return Err(CodecError::BlockSizeOutOfBounds { scheme, block_size });
    }
    Ok(block_size)
}

fn nonzero_block_size(scheme: PaddingScheme, block_size: usize) -> Result<usize, CodecError> {
    if block_size == 0 {
        return Err(CodecError::BlockSizeOutOfBounds { scheme, block_size });
    }
    Ok(block_size)
}

fn check_alignment(len: usize, block_size: usize) -> Result<(), CodecError> {
    if len % block_size != 0 {
        return Err(CodecError::BlockAlignment { len, block_size });
    }
    Ok(())
}

/// Read and range-check the trailing count byte of an aligned, non-empty buffer.
fn count_byte(scheme: PaddingScheme, data: &[u8], block_size: usize) -> Result<usize, CodecError> {
    check_alignment(data.len(), block_size)?;
    let &last = data
        .last()
        .ok_or_else(|| invalid(scheme, "empty input has no count byte"))?;
    let n = match last {
        0 if block_size == ISO10126_MAX_BLOCK_SIZE => ISO10126_MAX_BLOCK_SIZE,
        b => b as usize,
    };
    if n == 0 || n > block_size {
        return Err(invalid(scheme, "count byte out of range"));
    }
    Ok(n)
}

fn trim_zeros(data: &[u8]) -> &[u8] {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &data[..end]
}

fn invalid(scheme: PaddingScheme, reason: &'static str) -> CodecError {
    CodecError::PaddingValidation { scheme, reason }
}
