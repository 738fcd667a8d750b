//! ECDSA signing and verification through the public API.

use k256_batch::{
    ecdsa::{Signature, SigningKey, VerifyingKey},
    Context,
};
use proptest::prelude::*;
use rand_core::{OsRng, RngCore};

#[test]
fn random_round_trips() {
    let ctx = Context::new();
    for _ in 0..16 {
        let sk = SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key(&ctx);

        let mut msg = [0u8; 32];
        OsRng.fill_bytes(&mut msg);
        let sig = sk.sign_prehash(&ctx, &msg).unwrap();
        assert!(sig.is_low_s());

        let vk = VerifyingKey::from_sec1_bytes(&vk.to_sec1_bytes(false)).unwrap();
        let sig = Signature::from_der(&sig.to_der().unwrap()).unwrap();
        assert!(vk.verify_prehash(&msg, &sig));

        let high = Signature::from_scalars(sig.r(), -sig.s()).unwrap();
        assert!(vk.verify_prehash(&msg, &high));
        assert_eq!(high.normalize_s(), sig);
    }
}

#[test]
fn extra_entropy_changes_the_signature() {
    let ctx = Context::new();
    let sk = SigningKey::from_bytes(&[0x21; 32]).unwrap();
    let msg = [0x99; 32];

    let plain = sk.sign_prehash(&ctx, &msg).unwrap();
    let salted = sk
        .sign_prehash_with(&ctx, &msg, &k256_batch::nonce::Rfc6979, Some(&[7u8; 32]))
        .unwrap();
    assert_ne!(plain, salted);
    assert!(sk.verifying_key(&ctx).verify_prehash(&msg, &salted));
}

#[test]
fn wrong_key_fails() {
    let ctx = Context::new();
    let sk = SigningKey::from_bytes(&[0x21; 32]).unwrap();
    let other = SigningKey::from_bytes(&[0x22; 32]).unwrap();
    let msg = [0x99; 32];
    let sig = sk.sign_prehash(&ctx, &msg).unwrap();
    assert!(!other.verifying_key(&ctx).verify_prehash(&msg, &sig));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_then_verify(key in any::<[u8; 32]>(), msg in any::<[u8; 32]>(), bit in 0usize..512) {
        let sk = match SigningKey::from_bytes(&key) {
            Ok(sk) => sk,
            Err(_) => return Ok(()),
        };
        let ctx = Context::new();
        let vk = sk.verifying_key(&ctx);
        let sig = sk.sign_prehash(&ctx, &msg).unwrap();
        prop_assert!(vk.verify_prehash(&msg, &sig));

        let mut bytes = sig.to_bytes();
        bytes[bit / 8] ^= 1 << (bit % 8);
        if let Ok(tampered) = Signature::from_bytes(&bytes) {
            prop_assert!(!vk.verify_prehash(&msg, &tampered));
        }

        let mut tampered_msg = msg;
        tampered_msg[bit % 32] ^= 0x01;
        prop_assert!(!vk.verify_prehash(&tampered_msg, &sig));
    }
}
