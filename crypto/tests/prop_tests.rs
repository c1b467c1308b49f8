use proptest::prelude::*;

use hedera_crypto::{KeyError, PrivateKey, Signature};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Signatures from any 32-byte secret verify under its public key.
    #[test]
    fn sign_then_verify(
        secret in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let key = PrivateKey::from_bytes(&secret).unwrap();
        let sig = key.sign(&msg);
        prop_assert!(key.public_key().verify(&msg, &sig));
    }

    /// Flipping any bit of the message breaks verification.
    #[test]
    fn flipped_message_bit_fails(
        secret in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 1..128),
        bit in any::<prop::sample::Index>(),
    ) {
        let key = PrivateKey::from_bytes(&secret).unwrap();
        let sig = key.sign(&msg);
        let mut tampered = msg.clone();
        let i = bit.index(tampered.len() * 8);
        tampered[i / 8] ^= 1 << (i % 8);
        prop_assert!(!key.public_key().verify(&tampered, &sig));
    }

    /// Flipping any bit of the signature breaks verification.
    #[test]
    fn flipped_signature_bit_fails(
        secret in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..128),
        bit in 0usize..512,
    ) {
        let key = PrivateKey::from_bytes(&secret).unwrap();
        let mut bytes = *key.sign(&msg).as_bytes();
        bytes[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!key.public_key().verify(&msg, &Signature::from(bytes)));
    }

    /// Derivation is deterministic and the child is derivable.
    #[test]
    fn derive_is_deterministic(seed in prop::array::uniform32(any::<u8>()), index in any::<u32>()) {
        let mut rng = hedera_nullables::NullRandom::new(seed.to_vec());
        let parent = PrivateKey::generate_with(&mut rng);
        let a = parent.derive(index).unwrap();
        let b = parent.derive(index).unwrap();
        prop_assert_eq!(*a.to_bytes(), *b.to_bytes());
        prop_assert_eq!(a.chain_code(), b.chain_code());
        prop_assert!(a.is_derivable());
    }

    /// Keys without a chain code refuse every index.
    #[test]
    fn non_derivable_keys_refuse(
        secret in prop::array::uniform32(any::<u8>()),
        index in any::<u32>(),
    ) {
        let key = PrivateKey::from_bytes(&secret).unwrap();
        prop_assert_eq!(key.derive(index).unwrap_err(), KeyError::NotDerivable);
    }

    /// Legacy keys are never derivable.
    #[test]
    fn legacy_keys_never_derive(entropy in prop::collection::vec(any::<u8>(), 0..40)) {
        let key = PrivateKey::from_legacy_entropy(&entropy);
        prop_assert!(!key.is_derivable());
        prop_assert_eq!(key.derive(0).unwrap_err(), KeyError::NotDerivable);
    }
}
