//! Jacobian points

use super::{affine::AffinePoint, field::FieldElement, mul};
use crate::Scalar;
use core::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
    zeroize::Zeroize,
};

/// A point on the secp256k1 curve in Jacobian coordinates.
///
/// `(X, Y, Z)` stands for the affine point `(X / Z², Y / Z³)`; any value with
/// `Z = 0` is the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: AffinePoint::GENERATOR.x,
        y: AffinePoint::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Returns the additive identity of SECP256k1, also known as the "neutral
    /// element" or "point at infinity".
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the base point of SECP256k1.
    pub const fn generator() -> Self {
        Self::GENERATOR
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        self.z.normalizes_to_zero()
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint {
        let zinv = self.z.invert().unwrap_or(FieldElement::ZERO);
        let zinv2 = zinv.square();
        let point = AffinePoint::new(self.x * &zinv2, self.y * &(zinv2 * &zinv));
        AffinePoint::conditional_select(&point, &AffinePoint::IDENTITY, self.is_identity())
    }

    /// Converts many points to affine form with a single field inversion.
    ///
    /// Entries at infinity map to [`AffinePoint::IDENTITY`].
    ///
    /// # Panics
    ///
    /// Panics if `points` and `out` differ in length.
    pub fn batch_normalize(points: &[Self], out: &mut [AffinePoint]) {
        assert_eq!(points.len(), out.len());

        // out[i].x temporarily holds the product of the (non-zero) Z values
        // of the points before i.
        let mut acc = FieldElement::ONE;
        for (point, slot) in points.iter().zip(out.iter_mut()) {
            slot.x = acc;
            acc = acc * &point.z_or_one();
        }

        let mut inv = acc.invert().unwrap_or(FieldElement::ZERO);
        for (point, slot) in points.iter().zip(out.iter_mut()).rev() {
            let zinv = inv * &slot.x;
            inv = inv * &point.z_or_one();

            let zinv2 = zinv.square();
            let affine = AffinePoint::new(point.x * &zinv2, point.y * &(zinv2 * &zinv));
            *slot = AffinePoint::conditional_select(
                &affine,
                &AffinePoint::IDENTITY,
                point.is_identity(),
            );
        }
    }

    fn z_or_one(&self) -> FieldElement {
        FieldElement::conditional_select(&self.z, &FieldElement::ONE, self.is_identity())
    }

    /// Returns `-self`.
    fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.negate(),
            z: self.z,
        }
    }

    /// Doubles this point. The identity doubles to itself.
    pub fn double(&self) -> Self {
        // dbl-2009-l for a = 0; Z3 = 2·Y1·Z1 keeps Z = 0 at infinity.
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + &b).square() - &a - &c).double();
        let e = a.mul_single(3);
        let f = e.square();

        let x3 = f - &d.double();
        let y3 = e * &(d - &x3) - &c.mul_single(8);
        let z3 = (self.y * &self.z).double();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Generic Jacobian addition together with the values that classify the
    /// degenerate cases: `h = 0` means equal x coordinates, and then `r = 0`
    /// means equal points.
    fn add_generic(
        u1: &FieldElement,
        s1: &FieldElement,
        u2: &FieldElement,
        s2: &FieldElement,
        z: &FieldElement,
    ) -> (Self, FieldElement, FieldElement) {
        let h = *u2 - u1;
        let r = *s2 - s1;
        let h2 = h.square();
        let h3 = h2 * &h;
        let u1h2 = *u1 * &h2;

        let x3 = r.square() - &h3 - &u1h2.double();
        let y3 = r * &(u1h2 - &x3) - &(*s1 * &h3);
        let z3 = *z * &h;

        (
            Self {
                x: x3,
                y: y3,
                z: z3,
            },
            h,
            r,
        )
    }

    /// Returns `self + other` in constant time.
    fn add(&self, other: &Self) -> Self {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * &z2z2;
        let u2 = other.x * &z1z1;
        let s1 = self.y * &(z2z2 * &other.z);
        let s2 = other.y * &(z1z1 * &self.z);

        let (sum, h, r) = Self::add_generic(&u1, &s1, &u2, &s2, &(self.z * &other.z));
        self.select_degenerate(sum, &h, &r, other.is_identity(), other)
    }

    /// Returns `self + other` in constant time, where `other` is affine.
    pub fn add_mixed(&self, other: &AffinePoint) -> Self {
        let z1z1 = self.z.square();
        let u2 = other.x * &z1z1;
        let s2 = other.y * &(z1z1 * &self.z);

        let (sum, h, r) = Self::add_generic(&self.x, &self.y, &u2, &s2, &self.z);
        self.select_degenerate(sum, &h, &r, other.is_identity(), &Self::from(*other))
    }

    /// Resolves the cases the generic formula gets wrong, without branching.
    fn select_degenerate(
        &self,
        sum: Self,
        h: &FieldElement,
        r: &FieldElement,
        other_is_identity: Choice,
        other: &Self,
    ) -> Self {
        // h = 0 with r != 0 (P + -P) already yields Z3 = 0.
        let same = h.normalizes_to_zero() & r.normalizes_to_zero();
        let mut out = Self::conditional_select(&sum, &self.double(), same);
        out.conditional_assign(self, other_is_identity);
        out.conditional_assign(other, self.is_identity());
        out
    }

    /// Returns `self + other`, branching on the degenerate cases.
    ///
    /// Only for public inputs.
    pub fn add_vartime(&self, other: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *other;
        }
        if bool::from(other.is_identity()) {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * &z2z2;
        let u2 = other.x * &z1z1;
        let s1 = self.y * &(z2z2 * &other.z);
        let s2 = other.y * &(z1z1 * &self.z);

        self.finish_vartime(&u1, &s1, &u2, &s2, &(self.z * &other.z))
    }

    /// Returns `self + other` for an affine `other`, branching on the
    /// degenerate cases.
    ///
    /// Only for public inputs.
    pub fn add_mixed_vartime(&self, other: &AffinePoint) -> Self {
        if bool::from(other.is_identity()) {
            return *self;
        }
        if bool::from(self.is_identity()) {
            return Self::from(*other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x * &z1z1;
        let s2 = other.y * &(z1z1 * &self.z);

        self.finish_vartime(&self.x, &self.y, &u2, &s2, &self.z)
    }

    fn finish_vartime(
        &self,
        u1: &FieldElement,
        s1: &FieldElement,
        u2: &FieldElement,
        s2: &FieldElement,
        z: &FieldElement,
    ) -> Self {
        let (sum, h, r) = Self::add_generic(u1, s1, u2, s2, z);
        if bool::from(h.normalizes_to_zero()) {
            if bool::from(r.normalizes_to_zero()) {
                return self.double();
            }
            return Self::IDENTITY;
        }
        sum
    }

    /// Returns `self - other`.
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`, where `other` is affine.
    fn sub_mixed(&self, other: &AffinePoint) -> Self {
        self.add_mixed(&-*other)
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from(*p)
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Cross-multiply so both sides share the denominator Z1²·Z2² (Z1³·Z2³).
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * &z2z2).ct_eq(&(other.x * &z1z1));
        let y_eq = (self.y * &(z2z2 * &other.z)).ct_eq(&(other.y * &(z1z1 * &self.z)));

        let lhs_inf = self.is_identity();
        let rhs_inf = other.is_identity();
        (lhs_inf & rhs_inf) | (!lhs_inf & !rhs_inf & x_eq & y_eq)
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ProjectivePoint {}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl Add<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, other)
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, &other)
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl AddAssign<AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, &rhs);
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl Sum for ProjectivePoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ProjectivePoint::IDENTITY, |a, b| a + b)
    }
}

impl<'a> Sum<&'a ProjectivePoint> for ProjectivePoint {
    fn sum<I: Iterator<Item = &'a ProjectivePoint>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl Sub<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, other)
    }
}

impl Sub<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(self, other)
    }
}

impl SubAssign<ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl SubAssign<&ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::sub(self, rhs);
    }
}

impl Sub<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, &other)
    }
}

impl Sub<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: Scalar) -> ProjectivePoint {
        mul::mul(&self, &other)
    }
}

impl Mul<&Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        mul::mul(&self, other)
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        mul::mul(self, other)
    }
}

impl MulAssign<Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = mul::mul(self, &rhs);
    }
}

impl MulAssign<&Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = mul::mul(self, rhs);
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl<'a> Neg for &'a ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, ProjectivePoint};
    use crate::{test_vectors::group::MUL_TEST_VECTORS, Scalar};
    use elliptic_curve::subtle::ConstantTimeEq;

    /// Small multiples `k·G` for k = 1, 2, ...
    fn small_multiples() -> impl Iterator<Item = ProjectivePoint> {
        let mut p = ProjectivePoint::IDENTITY;
        core::iter::repeat_with(move || {
            p += ProjectivePoint::GENERATOR;
            p
        })
    }

    #[test]
    fn affine_to_projective() {
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(ProjectivePoint::from(basepoint_affine), basepoint_projective);
        assert_eq!(basepoint_projective.to_affine(), basepoint_affine);
        assert!(!bool::from(basepoint_projective.to_affine().is_identity()));

        assert!(bool::from(ProjectivePoint::IDENTITY.to_affine().is_identity()));
    }

    #[test]
    fn projective_identity_addition() {
        let identity = ProjectivePoint::IDENTITY;
        let generator = ProjectivePoint::GENERATOR;

        assert_eq!(identity + &generator, generator);
        assert_eq!(generator + &identity, generator);
        assert_eq!(identity + &identity, identity);
        assert_eq!(identity.double(), identity);
    }

    #[test]
    fn test_vector_repeated_add() {
        let generator = ProjectivePoint::GENERATOR;
        let mut p = generator;

        for (i, (x, y)) in MUL_TEST_VECTORS.iter().enumerate() {
            let affine = p.to_affine();
            assert_eq!(affine.x.to_bytes().as_slice(), &x[..], "k = {}", i + 1);
            assert_eq!(affine.y.to_bytes().as_slice(), &y[..], "k = {}", i + 1);

            p += &generator;
        }
    }

    #[test]
    fn test_vector_repeated_add_mixed() {
        let generator = AffinePoint::GENERATOR;
        let mut p = ProjectivePoint::GENERATOR;

        for (x, y) in MUL_TEST_VECTORS.iter() {
            let affine = p.to_affine();
            assert_eq!(affine.x.to_bytes().as_slice(), &x[..]);
            assert_eq!(affine.y.to_bytes().as_slice(), &y[..]);

            p += &generator;
        }
    }

    #[test]
    fn test_vector_add_mixed_identity() {
        let generator = ProjectivePoint::GENERATOR;
        let p0 = generator + AffinePoint::IDENTITY;
        let p1 = generator + ProjectivePoint::IDENTITY;
        assert_eq!(p0, p1);
    }

    #[test]
    fn test_vector_double_generator() {
        let generator = ProjectivePoint::GENERATOR;
        let mut p = generator;

        for i in 0..2 {
            let affine = p.to_affine();
            let (x, y) = MUL_TEST_VECTORS[(1 << i) - 1];
            assert_eq!(affine.x.to_bytes().as_slice(), &x[..]);
            assert_eq!(affine.y.to_bytes().as_slice(), &y[..]);

            p = p.double();
        }
    }

    #[test]
    fn projective_add_vs_double() {
        let generator = ProjectivePoint::GENERATOR;
        let r1 = generator + &generator;
        let r2 = generator.double();
        assert_eq!(r1, r2);

        let r1 = (generator + &generator) + &(generator + &generator);
        let r2 = generator.double().double();
        assert_eq!(r1, r2);
    }

    #[test]
    fn projective_add_and_sub() {
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(
            (basepoint_projective + &basepoint_projective) - &basepoint_projective,
            basepoint_projective
        );
        assert_eq!(
            (basepoint_projective + &basepoint_affine) - &basepoint_affine,
            basepoint_projective
        );
    }

    #[test]
    fn projective_double_and_sub() {
        let generator = ProjectivePoint::GENERATOR;
        assert_eq!(generator.double() - &generator, generator);
    }

    #[test]
    fn add_negation_is_identity() {
        for p in small_multiples().take(8) {
            assert!(bool::from((p + &-p).is_identity()));
            assert!(bool::from((p + -p.to_affine()).is_identity()));
            assert!(bool::from(p.add_vartime(&-p).is_identity()));
            assert!(bool::from(p.add_mixed_vartime(&-p.to_affine()).is_identity()));
        }
    }

    #[test]
    fn vartime_addition_matches_constant_time() {
        let points: alloc::vec::Vec<_> = small_multiples().take(6).collect();
        for a in &points {
            for b in &points {
                let expected = a + b;
                assert_eq!(a.add_vartime(b), expected);
                assert_eq!(a.add_mixed_vartime(&b.to_affine()), expected);
                assert_eq!(a.add_mixed(&b.to_affine()), expected);
            }
            assert_eq!(a.add_vartime(&ProjectivePoint::IDENTITY), *a);
            assert_eq!(ProjectivePoint::IDENTITY.add_vartime(a), *a);
            assert_eq!(a.add_mixed_vartime(&AffinePoint::IDENTITY), *a);
        }
    }

    #[test]
    fn equality_ignores_representation() {
        // 2G computed by doubling and by addition have different Z.
        let a = ProjectivePoint::GENERATOR.double();
        let b = ProjectivePoint::GENERATOR + ProjectivePoint::GENERATOR.to_affine();
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&ProjectivePoint::IDENTITY)));
        assert!(!bool::from(ProjectivePoint::IDENTITY.ct_eq(&a)));
    }

    #[test]
    fn batch_normalize_with_identity() {
        let mut points: alloc::vec::Vec<_> = small_multiples().take(5).collect();
        points.insert(2, ProjectivePoint::IDENTITY);

        let mut affine = [AffinePoint::IDENTITY; 6];
        ProjectivePoint::batch_normalize(&points, &mut affine);

        for (p, a) in points.iter().zip(affine.iter()) {
            assert_eq!(p.to_affine(), *a);
        }
        assert!(bool::from(affine[2].is_identity()));
    }

    #[test]
    fn scalar_multiplication_by_order_minus_one() {
        let minus_one = -Scalar::ONE;
        assert_eq!(ProjectivePoint::GENERATOR * minus_one, -ProjectivePoint::GENERATOR);
    }
}
