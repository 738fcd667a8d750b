//! Pluggable nonce derivation.
//!
//! Signing asks a nonce function for 32 bytes; a function may also refuse by
//! returning `None`. [`Rfc6979`] and [`Bip340`] are the defaults for ECDSA and
//! Schnorr signing. Any closure with the same signature can stand in for
//! either (for tests, or for alternative determinism requirements).

use crate::{
    hash::{tagged_hash, AUX_TAG},
    FieldBytes, Scalar,
};
use elliptic_curve::zeroize::Zeroize;
use rfc6979::HmacDrbg;
use sha2::{Digest, Sha256};

/// Nonce source for ECDSA signing.
pub trait EcdsaNonceFunction {
    /// Returns the nonce for the given signing attempt, or `None` to abort.
    ///
    /// - `msg32`: the message hash being signed.
    /// - `key32`: the secret key.
    /// - `algo16`: optional algorithm identifier mixed into the derivation.
    /// - `data`: optional extra entropy.
    /// - `attempt`: starts at 0 and increases each time the previous nonce
    ///   was rejected.
    fn nonce(
        &self,
        msg32: &[u8; 32],
        key32: &[u8; 32],
        algo16: Option<&[u8; 16]>,
        data: Option<&[u8; 32]>,
        attempt: u32,
    ) -> Option<[u8; 32]>;
}

impl<F> EcdsaNonceFunction for F
where
    F: Fn(&[u8; 32], &[u8; 32], Option<&[u8; 16]>, Option<&[u8; 32]>, u32) -> Option<[u8; 32]>,
{
    fn nonce(
        &self,
        msg32: &[u8; 32],
        key32: &[u8; 32],
        algo16: Option<&[u8; 16]>,
        data: Option<&[u8; 32]>,
        attempt: u32,
    ) -> Option<[u8; 32]> {
        self(msg32, key32, algo16, data, attempt)
    }
}

/// Nonce source for BIP-340 Schnorr signing.
pub trait SchnorrNonceFunction {
    /// Returns the nonce, or `None` to abort signing.
    ///
    /// - `msg`: the message being signed (any length).
    /// - `key32`: the secret key, already adjusted for an even-y public key.
    /// - `xonly_pk32`: the x-only public key.
    /// - `algo`: the algorithm tag, `BIP0340/nonce` by default.
    /// - `aux`: optional auxiliary randomness.
    fn nonce(
        &self,
        msg: &[u8],
        key32: &[u8; 32],
        xonly_pk32: &[u8; 32],
        algo: &[u8],
        aux: Option<&[u8; 32]>,
    ) -> Option<[u8; 32]>;
}

impl<F> SchnorrNonceFunction for F
where
    F: Fn(&[u8], &[u8; 32], &[u8; 32], &[u8], Option<&[u8; 32]>) -> Option<[u8; 32]>,
{
    fn nonce(
        &self,
        msg: &[u8],
        key32: &[u8; 32],
        xonly_pk32: &[u8; 32],
        algo: &[u8],
        aux: Option<&[u8; 32]>,
    ) -> Option<[u8; 32]> {
        self(msg, key32, xonly_pk32, algo, aux)
    }
}

/// [RFC 6979] deterministic nonces using HMAC-SHA256.
///
/// The DRBG is seeded with `key32 ‖ (msg32 mod n) ‖ data? ‖ algo16?`, and
/// attempt `i` returns the `(i + 1)`-th 32-byte output.
///
/// [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979#section-3.2
#[derive(Copy, Clone, Debug, Default)]
pub struct Rfc6979;

impl EcdsaNonceFunction for Rfc6979 {
    fn nonce(
        &self,
        msg32: &[u8; 32],
        key32: &[u8; 32],
        algo16: Option<&[u8; 16]>,
        data: Option<&[u8; 32]>,
        attempt: u32,
    ) -> Option<[u8; 32]> {
        let msg = Scalar::from_bytes_reduced(&FieldBytes::from(*msg32)).to_bytes();

        // Personalization string: data? ‖ algo16?
        let mut extra = [0u8; 48];
        let mut extra_len = 0;
        for part in [data.map(|d| &d[..]), algo16.map(|a| &a[..])].into_iter().flatten() {
            extra[extra_len..extra_len + part.len()].copy_from_slice(part);
            extra_len += part.len();
        }

        let mut drbg = HmacDrbg::<Sha256>::new(key32, &msg, &extra[..extra_len]);
        extra.zeroize();
        let mut out = [0u8; 32];
        for _ in 0..=attempt {
            drbg.fill_bytes(&mut out);
        }
        Some(out)
    }
}

/// The default BIP-340 nonce derivation.
///
/// Computes `t = key32 ⊕ TaggedHash("BIP0340/aux", aux)` (absent `aux` counts
/// as 32 zero bytes), then `TaggedHash(algo, t ‖ xonly_pk32 ‖ msg)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bip340;

impl SchnorrNonceFunction for Bip340 {
    fn nonce(
        &self,
        msg: &[u8],
        key32: &[u8; 32],
        xonly_pk32: &[u8; 32],
        algo: &[u8],
        aux: Option<&[u8; 32]>,
    ) -> Option<[u8; 32]> {
        let aux = aux.copied().unwrap_or([0u8; 32]);
        let mask = tagged_hash(AUX_TAG).chain_update(aux).finalize();

        let mut masked_key = [0u8; 32];
        for ((t, k), m) in masked_key.iter_mut().zip(key32).zip(mask.iter()) {
            *t = k ^ m;
        }

        let nonce = tagged_hash(algo)
            .chain_update(masked_key)
            .chain_update(xonly_pk32)
            .chain_update(msg)
            .finalize();
        masked_key.zeroize();
        Some(nonce.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Bip340, EcdsaNonceFunction, Rfc6979, SchnorrNonceFunction};
    use crate::hash::NONCE_TAG;
    use hex_literal::hex;

    const KEY: [u8; 32] = hex!("0000000000000000000000000000000000000000000000000000000000000001");
    // SHA-256("Satoshi Nakamoto")
    const MSG: [u8; 32] = hex!("A0DC65FFCA799873CBEA0AC274015B9526505DAAAED385155425F7337704883E");

    #[test]
    fn rfc6979_first_output() {
        let k = Rfc6979.nonce(&MSG, &KEY, None, None, 0).unwrap();
        assert_eq!(
            k,
            hex!("8F8A276C19F4149656B280621E358CCE24F5F52542772691EE69063B74F15D15")
        );
    }

    #[test]
    fn rfc6979_attempts_differ() {
        let k0 = Rfc6979.nonce(&MSG, &KEY, None, None, 0).unwrap();
        let k1 = Rfc6979.nonce(&MSG, &KEY, None, None, 1).unwrap();
        let k1_again = Rfc6979.nonce(&MSG, &KEY, None, None, 1).unwrap();
        assert_ne!(k0, k1);
        assert_eq!(k1, k1_again);
    }

    #[test]
    fn rfc6979_extra_inputs_change_output() {
        let plain = Rfc6979.nonce(&MSG, &KEY, None, None, 0).unwrap();
        let with_data = Rfc6979.nonce(&MSG, &KEY, None, Some(&[1u8; 32]), 0).unwrap();
        let with_algo = Rfc6979.nonce(&MSG, &KEY, Some(&[2u8; 16]), None, 0).unwrap();
        assert_ne!(plain, with_data);
        assert_ne!(plain, with_algo);
        assert_ne!(with_data, with_algo);
    }

    #[test]
    fn bip340_absent_aux_is_zero_aux() {
        let pk = [7u8; 32];
        let none = Bip340.nonce(b"msg", &KEY, &pk, NONCE_TAG, None).unwrap();
        let zero = Bip340.nonce(b"msg", &KEY, &pk, NONCE_TAG, Some(&[0u8; 32])).unwrap();
        let one = Bip340.nonce(b"msg", &KEY, &pk, NONCE_TAG, Some(&[1u8; 32])).unwrap();
        assert_eq!(none, zero);
        assert_ne!(zero, one);
    }

    #[test]
    fn closures_are_nonce_functions() {
        fn constant_ecdsa<N: EcdsaNonceFunction>(f: N) -> Option<[u8; 32]> {
            f.nonce(&MSG, &KEY, None, None, 3)
        }
        let f =
            |_: &[u8; 32], _: &[u8; 32], _: Option<&[u8; 16]>, _: Option<&[u8; 32]>, n: u32| {
                Some([n as u8; 32])
            };
        assert_eq!(constant_ecdsa(f), Some([3u8; 32]));

        let refuse = |_: &[u8], _: &[u8; 32], _: &[u8; 32], _: &[u8], _: Option<&[u8; 32]>| {
            None::<[u8; 32]>
        };
        assert_eq!(
            SchnorrNonceFunction::nonce(&refuse, b"", &KEY, &KEY, NONCE_TAG, None),
            None
        );
    }
}
