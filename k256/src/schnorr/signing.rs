//! BIP-340 keypairs and signing.

use super::{challenge, Signature, VerifyingKey};
use crate::{
    hash::NONCE_TAG,
    nonce::{Bip340, SchnorrNonceFunction},
    AffinePoint, Context, Error, FieldBytes, Result, Scalar,
};
use core::fmt;
use elliptic_curve::{
    rand_core::CryptoRngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
    zeroize::{Zeroize, ZeroizeOnDrop},
};

/// BIP-340 keypair.
///
/// The secret is stored negated when needed so that its public key has an
/// even y-coordinate; [`SigningKey::public_key_is_odd`] reports whether that
/// happened. The secret is zeroized on drop.
#[derive(Clone)]
pub struct SigningKey {
    secret: Scalar,
    verifying_key: VerifyingKey,
    odd: bool,
}

impl SigningKey {
    /// Parses a 32-byte secret key, rejecting zero and values `≥ n`.
    pub fn from_bytes(ctx: &Context, bytes: &[u8; 32]) -> Result<Self> {
        let secret = Option::<Scalar>::from(Scalar::from_nonzero_bytes(&FieldBytes::from(*bytes)))
            .ok_or(Error::InvalidSecretKey)?;
        Ok(Self::from_scalar(ctx, secret))
    }

    /// Generates a uniformly random keypair.
    pub fn random(ctx: &Context, rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = FieldBytes::default();
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(secret) = Option::<Scalar>::from(Scalar::from_nonzero_bytes(&bytes)) {
                bytes.zeroize();
                return Self::from_scalar(ctx, secret);
            }
        }
    }

    fn from_scalar(ctx: &Context, mut secret: Scalar) -> Self {
        let point = ctx.mul_generator(&secret).to_affine();
        let odd = point.y_is_odd();
        secret = Scalar::conditional_select(&secret, &-secret, odd);
        let even = AffinePoint::conditional_select(&point, &-point, odd);
        Self {
            secret,
            verifying_key: VerifyingKey::from_affine_unchecked(even),
            odd: odd.into(),
        }
    }

    /// The secret key matching the even-y public key.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret.to_bytes()
    }

    /// The x-only public key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Did the full public key of the original secret have an odd y?
    pub fn public_key_is_odd(&self) -> bool {
        self.odd
    }

    /// Signs `msg` with the default nonce function and no auxiliary
    /// randomness.
    pub fn sign(&self, ctx: &Context, msg: &[u8]) -> Result<Signature> {
        self.sign_with(ctx, msg, &Bip340, NONCE_TAG, None)
    }

    /// Signs `msg` with the default nonce function, mixing in 32 bytes of
    /// auxiliary randomness.
    pub fn sign_with_aux(
        &self,
        ctx: &Context,
        msg: &[u8],
        aux_rand: &[u8; 32],
    ) -> Result<Signature> {
        self.sign_with(ctx, msg, &Bip340, NONCE_TAG, Some(aux_rand))
    }

    /// Signs `msg` with a custom nonce function and algorithm tag.
    ///
    /// The nonce is reduced modulo `n`. Fails with [`Error::NonceGeneration`]
    /// if the nonce function returns `None` or a nonce that reduces to zero.
    pub fn sign_with<N: SchnorrNonceFunction + ?Sized>(
        &self,
        ctx: &Context,
        msg: &[u8],
        nonce_fn: &N,
        algo: &[u8],
        aux_rand: Option<&[u8; 32]>,
    ) -> Result<Signature> {
        let public_key = self.verifying_key.to_bytes();
        let mut key: [u8; 32] = self.secret.to_bytes().into();
        let nonce = nonce_fn.nonce(msg, &key, &public_key, algo, aux_rand);
        key.zeroize();

        let mut nonce = nonce.ok_or(Error::NonceGeneration)?;
        let mut k = Scalar::from_bytes_reduced(&FieldBytes::from(nonce));
        nonce.zeroize();
        if bool::from(k.is_zero()) {
            return Err(Error::NonceGeneration);
        }

        let big_r = ctx.mul_generator(&k).to_affine();
        k = Scalar::conditional_select(&k, &-k, big_r.y_is_odd());

        let r: [u8; 32] = big_r.x().into();
        let e = challenge(&r, &public_key, msg);
        let s = k + &(e * &self.secret);
        k.zeroize();

        Ok(Signature::from_parts(r, s))
    }

    /// Adds `tweak·G` to the x-only public key and the matching amount to the
    /// secret (BIP-341 key tweaking).
    ///
    /// Fails with [`Error::InvalidTweak`] if the tweak is `≥ n` or the
    /// tweaked secret is zero.
    pub fn tweak_add(&self, ctx: &Context, tweak: &[u8; 32]) -> Result<Self> {
        let t = Option::<Scalar>::from(Scalar::from_bytes(&FieldBytes::from(*tweak)))
            .ok_or(Error::InvalidTweak)?;
        let tweaked = self.secret + &t;
        if bool::from(tweaked.is_zero()) {
            return Err(Error::InvalidTweak);
        }
        Ok(Self::from_scalar(ctx, tweaked))
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
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}
