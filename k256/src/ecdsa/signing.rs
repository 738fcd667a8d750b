//! ECDSA signing.

use super::{Signature, VerifyingKey};
use crate::{
    nonce::{EcdsaNonceFunction, Rfc6979},
    Context, Error, FieldBytes, Result, Scalar,
};
use core::fmt;
use elliptic_curve::{
    rand_core::CryptoRngCore,
    subtle::{Choice, ConstantTimeEq},
    zeroize::{Zeroize, ZeroizeOnDrop},
};

/// Number of nonces tried before signing gives up.
const MAX_ATTEMPTS: u32 = 1024;

/// ECDSA/secp256k1 secret key.
///
/// The scalar is zeroized on drop.
#[derive(Clone)]
pub struct SigningKey {
    secret: Scalar,
}

impl SigningKey {
    /// Parses a 32-byte big-endian secret key, rejecting zero and values
    /// `≥ n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Option::<Scalar>::from(Scalar::from_nonzero_bytes(&FieldBytes::from(*bytes)))
            .map(|secret| Self { secret })
            .ok_or(Error::InvalidSecretKey)
    }

    /// Generates a uniformly random key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = FieldBytes::default();
        loop {
            rng.fill_bytes(&mut bytes);
            let secret = Option::<Scalar>::from(Scalar::from_nonzero_bytes(&bytes));
            if let Some(secret) = secret {
                bytes.zeroize();
                return Self { secret };
            }
        }
    }

    /// Serializes the secret key.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret.to_bytes()
    }

    /// The public key `d·G`.
    pub fn verifying_key(&self, ctx: &Context) -> VerifyingKey {
        VerifyingKey::from_affine_unchecked(ctx.mul_generator(&self.secret).to_affine())
    }

    /// Signs a 32-byte message hash with [`Rfc6979`] nonces.
    pub fn sign_prehash(&self, ctx: &Context, msg_hash: &[u8; 32]) -> Result<Signature> {
        self.sign_prehash_with(ctx, msg_hash, &Rfc6979, None)
    }

    /// Signs a 32-byte message hash using `nonce_fn`.
    ///
    /// `extra_data` is passed to the nonce function as additional entropy.
    /// Nonces that are zero or `≥ n`, or that lead to `r = 0` or `s = 0`, are
    /// skipped by asking for the next attempt. Fails with
    /// [`Error::NonceGeneration`] if the nonce function returns `None` or no
    /// usable nonce turns up.
    pub fn sign_prehash_with<N: EcdsaNonceFunction + ?Sized>(
        &self,
        ctx: &Context,
        msg_hash: &[u8; 32],
        nonce_fn: &N,
        extra_data: Option<&[u8; 32]>,
    ) -> Result<Signature> {
        let z = Scalar::from_bytes_reduced(&FieldBytes::from(*msg_hash));
        let mut key: [u8; 32] = self.secret.to_bytes().into();

        let mut result = Err(Error::NonceGeneration);
        for attempt in 0..MAX_ATTEMPTS {
            let nonce = match nonce_fn.nonce(msg_hash, &key, None, extra_data, attempt) {
                Some(nonce) => nonce,
                None => break,
            };
            if let Some(signature) = self.try_sign(ctx, &z, &nonce) {
                result = Ok(signature);
                break;
            }
        }

        key.zeroize();
        result
    }

    /// One signing attempt with a candidate nonce.
    fn try_sign(&self, ctx: &Context, z: &Scalar, nonce: &[u8; 32]) -> Option<Signature> {
        let mut k = Option::<Scalar>::from(Scalar::from_nonzero_bytes(&FieldBytes::from(*nonce)))?;
        let k_inv = Option::<Scalar>::from(k.invert());
        let big_r = ctx.mul_generator(&k).to_affine();
        k.zeroize();

        let r = Scalar::from_bytes_reduced(&big_r.x());
        let s = k_inv? * &(r * &self.secret + z);
        Signature::from_scalars(r, s).ok().map(|sig| sig.normalize_s())
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret.ct_eq(&other.secret)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SigningKey {}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl TryFrom<&[u8]> for SigningKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; 32] = bytes.try_into().map_err(|_| Error::InvalidSecretKey)?;
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::{nonce::Rfc6979, test_vectors::ecdsa::ECDSA_TEST_VECTORS, Context, Error};
    use hex_literal::hex;

    #[test]
    fn rfc6979_vectors() {
        let ctx = Context::new();
        for vector in ECDSA_TEST_VECTORS {
            let key = SigningKey::from_bytes(&vector.secret_key).unwrap();
            let vk = key.verifying_key(&ctx);
            assert_eq!(vk.to_sec1_bytes(true).as_slice(), &vector.public_key[..]);

            let sig = key
                .sign_prehash_with(
                    &ctx,
                    &vector.message_hash,
                    &Rfc6979,
                    vector.extra_entropy.as_ref(),
                )
                .unwrap();
            assert_eq!(sig.to_bytes(), vector.signature, "{}", vector.message);
            assert!(vk.verify_prehash(&vector.message_hash, &sig));
        }
    }

    #[test]
    fn rejects_invalid_secret_keys() {
        assert_eq!(
            SigningKey::from_bytes(&[0u8; 32]).unwrap_err(),
            Error::InvalidSecretKey
        );
        let n = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
        assert_eq!(
            SigningKey::from_bytes(&n).unwrap_err(),
            Error::InvalidSecretKey
        );
        assert!(SigningKey::try_from(&[1u8; 31][..]).is_err());
    }

    #[test]
    fn out_of_range_nonces_are_retried() {
        let ctx = Context::new();
        let key = SigningKey::from_bytes(&[0x42; 32]).unwrap();
        let msg = [0x11; 32];

        // Attempts 0 and 1 yield zero and n; attempt 2 falls through to RFC 6979.
        let picky = |m: &[u8; 32],
                     k: &[u8; 32],
                     a: Option<&[u8; 16]>,
                     d: Option<&[u8; 32]>,
                     attempt: u32| match attempt {
            0 => Some([0u8; 32]),
            1 => Some(hex!(
                "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"
            )),
            _ => crate::nonce::EcdsaNonceFunction::nonce(&Rfc6979, m, k, a, d, attempt),
        };
        let sig = key.sign_prehash_with(&ctx, &msg, &picky, None).unwrap();
        assert!(key.verifying_key(&ctx).verify_prehash(&msg, &sig));
    }

    #[test]
    fn failing_nonce_function() {
        let ctx = Context::new();
        let key = SigningKey::from_bytes(&[0x42; 32]).unwrap();
        fn refuse(
            _: &[u8; 32],
            _: &[u8; 32],
            _: Option<&[u8; 16]>,
            _: Option<&[u8; 32]>,
            _: u32,
        ) -> Option<[u8; 32]> {
            None
        }
        fn zero(
            _: &[u8; 32],
            _: &[u8; 32],
            _: Option<&[u8; 16]>,
            _: Option<&[u8; 32]>,
            _: u32,
        ) -> Option<[u8; 32]> {
            Some([0u8; 32])
        }

        assert_eq!(
            key.sign_prehash_with(&ctx, &[0u8; 32], &refuse, None).unwrap_err(),
            Error::NonceGeneration
        );
        assert_eq!(
            key.sign_prehash_with(&ctx, &[0u8; 32], &zero, None).unwrap_err(),
            Error::NonceGeneration
        );
    }

    #[test]
    fn deterministic_and_low_s() {
        let ctx = Context::new();
        let key = SigningKey::from_bytes(&[0x42; 32]).unwrap();
        for i in 0..16u8 {
            let msg = [i; 32];
            let a = key.sign_prehash(&ctx, &msg).unwrap();
            let b = key.sign_prehash(&ctx, &msg).unwrap();
            assert_eq!(a, b);
            assert!(a.is_low_s());
        }
    }

    #[test]
    fn debug_is_redacted() {
        let key = SigningKey::from_bytes(&[0x42; 32]).unwrap();
        let debug = alloc::format!("{:?}", key);
        assert!(!debug.contains("42"));
    }
}
