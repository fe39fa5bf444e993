//! Property tests for the padding engine and the cipher orchestrator.

use codec::{decrypt, encrypt, pad, unpad, BlockMode, CodecError, PaddingScheme};
use proptest::prelude::*;

const REVERSIBLE: [PaddingScheme; 4] = [
    PaddingScheme::Pkcs7,
    PaddingScheme::Iso97971,
    PaddingScheme::AnsiX923,
    PaddingScheme::Iso10126,
];

fn mode_strategy() -> impl Strategy<Value = BlockMode> {
    proptest::sample::select(BlockMode::ALL.to_vec())
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(16usize), Just(24usize), Just(32usize)]
        .prop_flat_map(|len| proptest::collection::vec(any::<u8>(), len))
}

fn iv_for(mode: BlockMode, seed: u8) -> Vec<u8> {
    vec![seed; mode.iv_len(codec::BLOCK_SIZE).unwrap_or(0)]
}

proptest! {
    #[test]
    fn reversible_schemes_round_trip(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        block_size in 1usize..=255,
        scheme in proptest::sample::select(REVERSIBLE.to_vec()),
    ) {
        let padded = pad(scheme, &data, block_size).unwrap();
        prop_assert_eq!(padded.len() % block_size, 0);
        prop_assert!(padded.len() > data.len());
        prop_assert!(padded.len() - data.len() <= block_size + usize::from(scheme == PaddingScheme::Iso97971));
        prop_assert_eq!(unpad(scheme, &padded, block_size).unwrap(), data);
    }

    #[test]
    fn no_padding_succeeds_iff_aligned(
        data in proptest::collection::vec(any::<u8>(), 0..100),
        block_size in 1usize..=32,
    ) {
        let aligned = data.len() % block_size == 0;
        let padded = pad(PaddingScheme::NoPadding, &data, block_size);
        let unpadded = unpad(PaddingScheme::NoPadding, &data, block_size);
        if aligned {
            prop_assert_eq!(padded.unwrap(), data.clone());
            prop_assert_eq!(unpadded.unwrap(), data);
        } else {
            let is_alignment_error = matches!(padded, Err(CodecError::BlockAlignment { .. }));
            prop_assert!(is_alignment_error);
            let is_alignment_error = matches!(unpadded, Err(CodecError::BlockAlignment { .. }));
            prop_assert!(is_alignment_error);
        }
    }

    #[test]
    fn pkcs7_rejects_out_of_range_count(last in prop_oneof![Just(0u8), 17u8..=255]) {
        let block = vec![last; 16];
        let rejected = matches!(
            unpad(PaddingScheme::Pkcs7, &block, 16),
            Err(CodecError::PaddingValidation { .. })
        );
        prop_assert!(rejected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn explicit_iv_round_trip(
        plaintext in proptest::collection::vec(any::<u8>(), 0..200),
        key in key_strategy(),
        mode in mode_strategy(),
        seed in any::<u8>(),
    ) {
        let iv = iv_for(mode, seed);
        let ct = encrypt(&plaintext, &key, Some(iv.as_slice()), mode, PaddingScheme::Pkcs7).unwrap();
        prop_assert_eq!(decrypt(&ct, &key, Some(iv.as_slice()), mode, PaddingScheme::Pkcs7).unwrap(), plaintext);
    }

    #[test]
    fn salted_header_round_trip(
        plaintext in proptest::collection::vec(any::<u8>(), 0..200),
        key in key_strategy(),
        mode in mode_strategy().prop_filter("ECB has no salted header", |m| *m != BlockMode::Ecb),
    ) {
        let ct = encrypt(&plaintext, &key, None, mode, PaddingScheme::Iso10126).unwrap();
        prop_assert!(ct.starts_with(b"Salted__"));
        prop_assert_eq!(decrypt(&ct, &key, None, mode, PaddingScheme::Iso10126).unwrap(), plaintext);
    }

    #[test]
    fn gcm_detects_any_bit_flip(
        plaintext in proptest::collection::vec(any::<u8>(), 0..64),
        bit in any::<proptest::sample::Index>(),
    ) {
        let key = [0x42u8; 32];
        let nonce = [0x24u8; 12];
        let mut ct = encrypt(&plaintext, &key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding).unwrap();
        let i = bit.index(ct.len() * 8);
        ct[i / 8] ^= 1 << (i % 8);
        prop_assert_eq!(
            decrypt(&ct, &key, Some(&nonce), BlockMode::Gcm, PaddingScheme::NoPadding),
            Err(CodecError::AuthenticationFailure)
        );
    }

    #[test]
    fn salted_gcm_never_yields_wrong_plaintext(
        plaintext in proptest::collection::vec(any::<u8>(), 0..64),
        bit in any::<proptest::sample::Index>(),
    ) {
        let key = [0x42u8; 16];
        let mut ct = encrypt(&plaintext, &key, None, BlockMode::Gcm, PaddingScheme::NoPadding).unwrap();
        let i = bit.index(ct.len() * 8);
        ct[i / 8] ^= 1 << (i % 8);
        // A flipped magic byte hides the header (no IV left); anything else
        // fails the tag.
        prop_assert!(decrypt(&ct, &key, None, BlockMode::Gcm, PaddingScheme::NoPadding).is_err());
    }
}
