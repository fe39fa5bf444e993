//! AES dispatch for each block mode.
//!
//! The key length picks AES-128, AES-192 or AES-256; every helper validates its
//! own key and IV so no length mismatch can reach a panicking constructor.

use aes::cipher::{
    generic_array::GenericArray, AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyInit,
    KeyIvInit, StreamCipher,
};
use aes_gcm::aead::{consts::U12, Aead};
use aes_gcm::AesGcm;
use common::{BlockMode, CodecError, GCM_NONCE_LEN};

use crate::ecb;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Byte length of the GCM authentication tag.
pub const GCM_TAG_LEN: usize = 16;

/// Largest GCM plaintext for one nonce: `(2^32 - 2)` blocks.
pub const GCM_MAX_PLAINTEXT: u64 = ((1u64 << 32) - 2) * BLOCK_SIZE as u64;

/// Run `$body` with `$aes` bound to the AES variant matching the key length.
macro_rules! with_aes {
    ($key:expr, |$aes:ident| $body:block) => {
        match $key.len() {
            16 => {
                type $aes = aes::Aes128;
                $body
            }
            24 => {
                type $aes = aes::Aes192;
                $body
            }
            32 => {
                type $aes = aes::Aes256;
                $body
            }
            n => Err(CodecError::InvalidKeySize(n)),
        }
    };
}

/// Reject keys that are not 16, 24 or 32 bytes.
pub fn validate_key(key: &[u8]) -> Result<(), CodecError> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        n => Err(CodecError::InvalidKeySize(n)),
    }
}

/// Reject an IV whose length does not match `mode`. ECB accepts anything.
pub fn validate_iv(mode: BlockMode, iv: &[u8]) -> Result<(), CodecError> {
    match mode.iv_len(BLOCK_SIZE) {
        Some(expected) if iv.len() != expected => Err(CodecError::InvalidIvLength {
            mode,
            expected,
            actual: iv.len(),
        }),
        _ => Ok(()),
    }
}

fn check_full_blocks(len: usize) -> Result<(), CodecError> {
    if len % BLOCK_SIZE != 0 {
        return Err(CodecError::BlockAlignment {
            len,
            block_size: BLOCK_SIZE,
        });
    }
    Ok(())
}

fn preflight(mode: BlockMode, key: &[u8], iv: &[u8]) -> Result<(), CodecError> {
    validate_key(key)?;
    validate_iv(mode, iv)
}

/// Encrypt `buf` in place with `mode`. Streaming modes only; GCM and ECB have
/// their own entry points.
pub(crate) fn apply_encrypt(mode: BlockMode, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), CodecError> {
    preflight(mode, key, iv)?;
    match mode {
        BlockMode::Cbc => {
            check_full_blocks(buf.len())?;
            with_aes!(key, |Aes| {
                let mut enc = cbc::Encryptor::<Aes>::new_from_slices(key, iv)
                    .map_err(|_| CodecError::InvalidKeySize(key.len()))?;
                for block in buf.chunks_exact_mut(BLOCK_SIZE) {
                    enc.encrypt_block_mut(GenericArray::from_mut_slice(block));
                }
                Ok(())
            })
        }
        BlockMode::Cfb => with_aes!(key, |Aes| {
            cfb_mode::Encryptor::<Aes>::new_from_slices(key, iv)
                .map_err(|_| CodecError::InvalidKeySize(key.len()))?
                .encrypt(buf);
            Ok(())
        }),
        BlockMode::Ctr | BlockMode::Ofb => apply_keystream(mode, key, iv, buf),
        BlockMode::Gcm | BlockMode::Ecb => Err(CodecError::UnsupportedMode(mode.name().to_owned())),
    }
}

/// Decrypt `buf` in place with `mode`. Streaming modes only.
pub(crate) fn apply_decrypt(mode: BlockMode, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), CodecError> {
    preflight(mode, key, iv)?;
    match mode {
        BlockMode::Cbc => {
            check_full_blocks(buf.len())?;
            with_aes!(key, |Aes| {
                let mut dec = cbc::Decryptor::<Aes>::new_from_slices(key, iv)
                    .map_err(|_| CodecError::InvalidKeySize(key.len()))?;
                for block in buf.chunks_exact_mut(BLOCK_SIZE) {
                    dec.decrypt_block_mut(GenericArray::from_mut_slice(block));
                }
                Ok(())
            })
        }
        BlockMode::Cfb => with_aes!(key, |Aes| {
            cfb_mode::Decryptor::<Aes>::new_from_slices(key, iv)
                .map_err(|_| CodecError::InvalidKeySize(key.len()))?
                .decrypt(buf);
            Ok(())
        }),
        BlockMode::Ctr | BlockMode::Ofb => apply_keystream(mode, key, iv, buf),
        BlockMode::Gcm | BlockMode::Ecb => Err(CodecError::UnsupportedMode(mode.name().to_owned())),
    }
}

/// CTR and OFB are symmetric: the same keystream XOR encrypts and decrypts.
fn apply_keystream(mode: BlockMode, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), CodecError> {
    with_aes!(key, |Aes| {
        match mode {
            BlockMode::Ctr => ctr::Ctr128BE::<Aes>::new_from_slices(key, iv)
                .map_err(|_| CodecError::InvalidKeySize(key.len()))?
                .apply_keystream(buf),
            _ => ofb::Ofb::<Aes>::new_from_slices(key, iv)
                .map_err(|_| CodecError::InvalidKeySize(key.len()))?
                .apply_keystream(buf),
        }
        Ok(())
    })
}

/// Seal `plaintext` with AES-GCM under a 12-byte nonce; returns ciphertext || tag.
pub(crate) fn gcm_seal(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
    preflight(BlockMode::Gcm, key, nonce)?;
    let len = plaintext.len() as u64;
    if len > GCM_MAX_PLAINTEXT {
        return Err(CodecError::PlaintextTooLarge {
            len,
            max: GCM_MAX_PLAINTEXT,
        });
    }
    with_aes!(key, |Aes| {
        AesGcm::<Aes, U12>::new_from_slice(key)
            .map_err(|_| CodecError::InvalidKeySize(key.len()))?
            .encrypt(GenericArray::from_slice(nonce), plaintext)
            .map_err(|_| CodecError::PlaintextTooLarge {
                len,
                max: GCM_MAX_PLAINTEXT,
            })
    })
}

/// Verify and open a GCM envelope. Nothing is returned unless the tag matches.
pub(crate) fn gcm_open(key: &[u8], nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, CodecError> {
    preflight(BlockMode::Gcm, key, nonce)?;
    with_aes!(key, |Aes| {
        AesGcm::<Aes, U12>::new_from_slice(key)
            .map_err(|_| CodecError::InvalidKeySize(key.len()))?
            .decrypt(GenericArray::from_slice(nonce), sealed)
            .map_err(|_| CodecError::AuthenticationFailure)
    })
}

/// ECB encryption through the block adapter.
pub(crate) fn ecb_encrypt(key: &[u8], buf: &[u8]) -> Result<Vec<u8>, CodecError> {
    with_aes!(key, |Aes| {
        let cipher = Aes::new_from_slice(key).map_err(|_| CodecError::InvalidKeySize(key.len()))?;
        ecb::encrypt_blocks(&cipher, buf)
    })
}

/// ECB decryption through the block adapter.
pub(crate) fn ecb_decrypt(key: &[u8], buf: &[u8]) -> Result<Vec<u8>, CodecError> {
    with_aes!(key, |Aes| {
        let cipher = Aes::new_from_slice(key).map_err(|_| CodecError::InvalidKeySize(key.len()))?;
        ecb::decrypt_blocks(&cipher, buf)
    })
}
