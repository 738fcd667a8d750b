//! x-only public keys and BIP-340 verification.

use super::{challenge, Signature};
use crate::{
    arithmetic::mul::lincomb2_vartime, AffinePoint, Error, FieldBytes, ProjectivePoint, Result,
    Scalar,
};
use elliptic_curve::subtle::ConditionallySelectable;

/// BIP-340 x-only public key: a curve point with even y, identified by its
/// x-coordinate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    point: AffinePoint,
}

impl VerifyingKey {
    /// Parses a 32-byte x-only key.
    ///
    /// Fails with [`Error::InvalidPublicKey`] if `x ≥ p` or no curve point
    /// has this x-coordinate.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Option::<AffinePoint>::from(AffinePoint::lift_x(&FieldBytes::from(*bytes)))
            .map(|point| Self { point })
            .ok_or(Error::InvalidPublicKey)
    }

    /// `point` must be finite with even y.
    pub(crate) fn from_affine_unchecked(point: AffinePoint) -> Self {
        debug_assert!(!bool::from(point.y_is_odd()));
        Self { point }
    }

    /// Serializes the x-coordinate.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.point.x().into()
    }

    /// The underlying (even-y) curve point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Verifies a BIP-340 signature over `msg`. Runs in variable time.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        let e = challenge(signature.r_bytes(), &self.to_bytes(), msg);

        // R = s·G - e·P
        let big_r = lincomb2_vartime(&-e, &ProjectivePoint::from(self.point), signature.s());
        if bool::from(big_r.is_identity()) {
            return false;
        }

        let big_r = big_r.to_affine();
        !bool::from(big_r.y_is_odd()) && big_r.x().as_slice() == signature.r_bytes()
    }

    /// Computes `Q = P + tweak·G` (BIP-341 key tweaking).
    ///
    /// Returns the x-only form of `Q` and whether `Q` has an odd y. Fails with
    /// [`Error::InvalidTweak`] if the tweak is `≥ n` or `Q` is the identity.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<(Self, bool)> {
        let q = self.tweaked_point(tweak)?;
        let odd = q.y_is_odd();
        let even = AffinePoint::conditional_select(&q, &-q, odd);
        Ok((Self { point: even }, odd.into()))
    }

    /// Checks that `tweaked` with y-parity `odd` equals `P + tweak·G`.
    pub fn tweak_add_check(&self, tweaked: &[u8; 32], odd: bool, tweak: &[u8; 32]) -> bool {
        match self.tweaked_point(tweak) {
            Ok(q) => q.x().as_slice() == tweaked && bool::from(q.y_is_odd()) == odd,
            Err(_) => false,
        }
    }

    fn tweaked_point(&self, tweak: &[u8; 32]) -> Result<AffinePoint> {
        let t = Option::<Scalar>::from(Scalar::from_bytes(&FieldBytes::from(*tweak)))
            .ok_or(Error::InvalidTweak)?;
        let q = lincomb2_vartime(&Scalar::ONE, &ProjectivePoint::from(self.point), &t);
        if bool::from(q.is_identity()) {
            return Err(Error::InvalidTweak);
        }
        Ok(q.to_affine())
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; 32] = bytes.try_into().map_err(|_| Error::InvalidPublicKey)?;
        Self::from_bytes(bytes)
    }
}
