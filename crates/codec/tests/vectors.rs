//! Known-answer tests from FIPS-197, NIST SP 800-38A and the McGrew-Viega GCM paper.
//!
//! Vectors go through the public `encrypt`/`decrypt` entry points with
//! `NoPadding` so the raw mode output is visible.

use codec::{decrypt, encrypt, BlockMode, CodecError, PaddingScheme};

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

// SP 800-38A, appendix F (AES-128).
const SP_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const SP_IV: &str = "000102030405060708090a0b0c0d0e0f";
const SP_PT: &str = "6bc1bee22e409f96e93d7e117393172a";

fn check(mode: BlockMode, key: &str, iv: Option<&str>, pt: &str, ct: &str) {
    let key = h(key);
    let iv = iv.map(h);
    let pt = h(pt);
    let got = encrypt(&pt, &key, iv.as_deref(), mode, PaddingScheme::NoPadding).unwrap();
    assert_eq!(hex::encode(&got), ct, "{mode} encrypt");
    let back = decrypt(&got, &key, iv.as_deref(), mode, PaddingScheme::NoPadding).unwrap();
    assert_eq!(back, pt, "{mode} decrypt");
}

#[test]
fn fips197_single_block_all_key_sizes() {
    let pt = "00112233445566778899aabbccddeeff";
    check(
        BlockMode::Ecb,
        "000102030405060708090a0b0c0d0e0f",
        None,
        pt,
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    );
    check(
        BlockMode::Ecb,
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        None,
        pt,
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    );
    check(
        BlockMode::Ecb,
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        None,
        pt,
        "8ea2b7ca516745bfeafc49904b496089",
    );
}

#[test]
fn sp800_38a_ecb() {
    check(BlockMode::Ecb, SP_KEY, None, SP_PT, "3ad77bb40d7a3660a89ecaf32466ef97");
}

#[test]
fn sp800_38a_cbc() {
    check(BlockMode::Cbc, SP_KEY, Some(SP_IV), SP_PT, "7649abac8119b246cee98e9b12e9197d");
}

#[test]
fn sp800_38a_cfb128() {
    check(BlockMode::Cfb, SP_KEY, Some(SP_IV), SP_PT, "3b3fd92eb72dad20333449f8e83cfb4a");
}

#[test]
fn sp800_38a_ofb() {
    check(BlockMode::Ofb, SP_KEY, Some(SP_IV), SP_PT, "3b3fd92eb72dad20333449f8e83cfb4a");
}

#[test]
fn sp800_38a_ctr() {
    check(
        BlockMode::Ctr,
        SP_KEY,
        Some("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff"),
        SP_PT,
        "874d6191b620e3261bef6864990db6ce",
    );
}

#[test]
fn gcm_paper_test_cases_1_and_2() {
    let key = [0u8; 16];
    let nonce = [0u8; 12];

    let tag_only = encrypt(&[], &key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding).unwrap();
    assert_eq!(hex::encode(&tag_only), "58e2fccefa7e3061367f1d57a4e7455a");

    let sealed = encrypt(&[0u8; 16], &key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding).unwrap();
    assert_eq!(
        hex::encode(&sealed),
        "0388dace60b6a392f328c2b971b2fe78ab6e47d42cec13bdf53a67b21257bddf"
    );
    assert_eq!(
        decrypt(&sealed, &key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding).unwrap(),
        vec![0u8; 16]
    );
}

#[test]
fn cbc_pkcs7_hello_world() {
    let key = b"0123456789abcdef";
    let iv = [0u8; 16];
    let ct = encrypt(b"hello world", key, Some(&iv), BlockMode::Cbc, PaddingScheme::Pkcs7).unwrap();
    assert_eq!(ct.len(), 16);

    // CBC with a zero IV on one block is ECB of the padded block.
    let mut padded = b"hello world".to_vec();
    padded.extend_from_slice(&[5u8; 5]);
    let ecb = encrypt(&padded, key, None, BlockMode::Ecb, PaddingScheme::NoPadding).unwrap();
    assert_eq!(ct, ecb);

    assert_eq!(
        decrypt(&ct, key, Some(&iv), BlockMode::Cbc, PaddingScheme::Pkcs7).unwrap(),
        b"hello world"
    );
}

#[test]
fn gcm_hello_world_nonce_off_by_one() {
    let key = b"0123456789abcdef";
    let nonce = *b"unique nonce";
    let ct = encrypt(b"hello world", key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding).unwrap();
    assert_eq!(ct.len(), b"hello world".len() + 16);

    let mut shifted = nonce;
    shifted[0] = shifted[0].wrapping_add(1);
    assert_eq!(
        decrypt(&ct, key, Some(&shifted), BlockMode::Gcm, PaddingScheme::NoPadding),
        Err(CodecError::AuthenticationFailure)
    );
}
