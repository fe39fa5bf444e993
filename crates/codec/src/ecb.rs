//! Electronic codebook over any block cipher primitive.
//!
//! Each block is transformed on its own with no chaining, so equal plaintext
//! blocks give equal ciphertext blocks. Kept for legacy interoperability only.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, BlockSizeUser};
use common::CodecError;

/// Encrypt `plaintext` block by block.
///
/// # Errors
///
/// Returns [`CodecError::BlockAlignment`] if `plaintext` is not a whole number
/// of blocks.
pub fn encrypt_blocks<C: BlockEncrypt>(cipher: &C, plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
    let block_size = <C as BlockSizeUser>::block_size();
    check_full_blocks(plaintext.len(), block_size)?;
    let mut out = plaintext.to_vec();
    for block in out.chunks_exact_mut(block_size) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(out)
}

/// Decrypt `ciphertext` block by block.
///
/// # Errors
///
/// Returns [`CodecError::BlockAlignment`] if `ciphertext` is not a whole number
/// of blocks.
pub fn decrypt_blocks<C: BlockDecrypt>(cipher: &C, ciphertext: &[u8]) -> Result<Vec<u8>, CodecError> {
    let block_size = <C as BlockSizeUser>::block_size();
    check_full_blocks(ciphertext.len(), block_size)?;
    let mut out = ciphertext.to_vec();
    for block in out.chunks_exact_mut(block_size) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(out)
}

fn check_full_blocks(len: usize, block_size: usize) -> Result<(), CodecError> {
    if len % block_size != 0 {
        return Err(CodecError::BlockAlignment { len, block_size });
    }
    Ok(())
}
