//! AES codec with six block modes, six padding schemes and OpenSSL-compatible
//! salted-header key derivation.
//!
//! This crate is intentionally free of I/O. Every operation is a synchronous,
//! stateless transformation over caller-owned buffers and is safe to call from
//! any number of threads at once.
//!
//! # Envelope
//!
//! ```text
//! [ "Salted__" | salt(8) ]   only when no IV was supplied (never for ECB)
//! ciphertext
//! [ tag(16) ]                GCM only
//! ```
//!
//! # Example
//!
//! ```
//! use codec::{decrypt, encrypt, BlockMode, PaddingScheme};
//!
//! let key = b"0123456789abcdef";
//! let iv = [0u8; 16];
//! let ct = encrypt(b"hello world", key, Some(&iv), BlockMode::Cbc, PaddingScheme::Pkcs7)?;
//! assert_eq!(ct.len(), 16);
//! let pt = decrypt(&ct, key, Some(&iv), BlockMode::Cbc, PaddingScheme::Pkcs7)?;
//! assert_eq!(pt, b"hello world");
//! # Ok::<(), codec::CodecError>(())
//! ```

pub mod cipher;
pub mod ecb;
pub mod kdf;
pub mod modes;
pub mod padding;

mod rng;

pub use cipher::{decrypt, encrypt, Codec, LEGACY_FIXED_IV};
pub use common::{BlockMode, CodecError, KdfDigest, PaddingScheme, GCM_NONCE_LEN};
pub use kdf::{DerivedKeyMaterial, SaltedHeader};
pub use modes::{BLOCK_SIZE, GCM_TAG_LEN};
pub use padding::{pad, unpad};
