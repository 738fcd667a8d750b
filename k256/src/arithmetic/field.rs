//! Field arithmetic modulo p = 2^256 - 2^32 - 977

use super::util::{
    adc, add_with_carry, fold, limbs_from_be_bytes, limbs_to_be_bytes, mul_wide, sbb,
    sub_with_borrow,
};
use crate::FieldBytes;
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::Zeroize,
};

/// Field modulus as little-endian limbs.
const MODULUS: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// `2^256 mod p`.
const R: u64 = 0x1_0000_03D1;

/// An element in the finite field modulo p = 2^256 - 2^32 - 977.
///
/// The limbs may hold any 256-bit value, including values in `[p, 2^256)`:
/// arithmetic results are only weakly reduced. Equality, parity, zero tests
/// and serialization operate on [`FieldElement::normalize`]d values, so the
/// redundant representation is never observable.
#[derive(Clone, Copy)]
pub struct FieldElement([u64; 4]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Returns the zero element.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the multiplicative identity.
    pub const fn one() -> Self {
        Self::ONE
    }

    /// Creates a field element from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Parses big-endian bytes without checking that the value is below `p`.
    ///
    /// The result is still a valid (weakly reduced) element.
    pub(crate) const fn from_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        Self(limbs_from_be_bytes(bytes))
    }

    /// Attempts to parse the given byte array as an SEC1-encoded field element.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in
    /// the range `[0, p)`.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let limbs = limbs_from_be_bytes(&buf);
        let (_, borrow) = sub_with_borrow(&limbs, &MODULUS);
        CtOption::new(Self(limbs), Choice::from(borrow as u8))
    }

    /// Returns the SEC1 encoding of this field element.
    pub fn to_bytes(&self) -> FieldBytes {
        let bytes = limbs_to_be_bytes(&self.normalize().0);
        FieldBytes::clone_from_slice(&bytes)
    }

    /// Returns the canonical representative in `[0, p)`.
    pub fn normalize(&self) -> Self {
        // A 256-bit value is below 2p, so at most one subtraction is needed.
        let (reduced, borrow) = sub_with_borrow(&self.0, &MODULUS);
        let mut out = *self;
        out.conditional_assign(&Self(reduced), Choice::from((borrow ^ 1) as u8));
        out
    }

    /// Determine if this `FieldElement` is zero.
    ///
    /// # Returns
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        self.normalizes_to_zero()
    }

    /// Checks if the field element becomes zero when normalized.
    pub fn normalizes_to_zero(&self) -> Choice {
        let n = self.normalize().0;
        (n[0] | n[1] | n[2] | n[3]).ct_eq(&0)
    }

    /// Determine if this `FieldElement` is odd in the SEC1 sense: `self mod 2 == 1`.
    ///
    /// # Returns
    ///
    /// If odd, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.normalize().0[0] & 1) as u8)
    }

    /// Returns `self + rhs mod p`.
    pub const fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = add_with_carry(&self.0, &rhs.0);
        Self::fold_carry(sum, carry)
    }

    /// Returns `2 * self mod p`.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - rhs mod p`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let (w0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (w1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (w2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (w3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

        // A wrap added 2^256; subtracting R turns that into +p. The second
        // pass only triggers when the first one wraps again.
        let (w0, b) = sbb(w0, borrow * R, 0);
        let (w1, b) = sbb(w1, 0, b);
        let (w2, b) = sbb(w2, 0, b);
        let (w3, b) = sbb(w3, 0, b);
        let (w0, b2) = sbb(w0, b * R, 0);
        let (w1, b2) = sbb(w1, 0, b2);
        let (w2, b2) = sbb(w2, 0, b2);
        let (w3, _) = sbb(w3, 0, b2);
        Self([w0, w1, w2, w3])
    }

    /// Returns `-self mod p`.
    pub const fn negate(&self) -> Self {
        Self::sub(&Self::ZERO, self)
    }

    /// Returns `self * rhs mod p`.
    pub const fn mul(&self, rhs: &Self) -> Self {
        Self::reduce_wide(mul_wide(&self.0, &rhs.0))
    }

    /// Multiplies by a small integer.
    pub const fn mul_single(&self, rhs: u32) -> Self {
        self.mul(&Self::from_u64(rhs as u64))
    }

    /// Returns `self * self mod p`.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Squares `k` times.
    const fn pow2k(&self, k: usize) -> Self {
        let mut x = *self;
        let mut i = 0;
        while i < k {
            x = x.square();
            i += 1;
        }
        x
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        // x^(p - 2) via the addition chain shared with `sqrt`:
        // (p - 2) = 2^256 - 2^32 - 979, i.e. 223 ones, a zero, 22 ones,
        // then 0000101101.
        let (x2, x22, x223) = self.pow_chain();

        let res = x223.pow2k(23).mul(&x22);
        let res = res.pow2k(5).mul(self);
        let res = res.pow2k(3).mul(&x2);
        let res = res.pow2k(2).mul(self);

        CtOption::new(res, !self.normalizes_to_zero())
    }

    /// Returns the square root of self mod p, or `None` if no square root exists.
    pub fn sqrt(&self) -> CtOption<Self> {
        // p ≡ 3 (mod 4), so a root (if any) is x^((p + 1) / 4).
        let (x2, x22, x223) = self.pow_chain();

        let res = x223.pow2k(23).mul(&x22);
        let res = res.pow2k(6).mul(&x2);
        let res = res.pow2k(2);

        let is_root = res.square().ct_eq(self);
        CtOption::new(res, is_root)
    }

    /// Is this element a quadratic residue (a square) modulo p?
    pub fn is_square(&self) -> Choice {
        self.sqrt().is_some()
    }

    /// Computes `x^(2^k - 1)` for `k ∈ {2, 22, 223}`.
    fn pow_chain(&self) -> (Self, Self, Self) {
        let x2 = self.pow2k(1).mul(self);
        let x3 = x2.pow2k(1).mul(self);
        let x6 = x3.pow2k(3).mul(&x3);
        let x9 = x6.pow2k(3).mul(&x3);
        let x11 = x9.pow2k(2).mul(&x2);
        let x22 = x11.pow2k(11).mul(&x11);
        let x44 = x22.pow2k(22).mul(&x22);
        let x88 = x44.pow2k(44).mul(&x44);
        let x176 = x88.pow2k(88).mul(&x88);
        let x220 = x176.pow2k(44).mul(&x44);
        let x223 = x220.pow2k(3).mul(&x3);
        (x2, x22, x223)
    }

    /// Reduces a 512-bit product below 2^256.
    const fn reduce_wide(w: [u64; 8]) -> Self {
        let c = [R, 0, 0, 0];
        // < 2^290, then < 2^256 + 2^67, then < 2^256.
        let w = fold(&w, &c);
        let w = fold(&w, &c);
        let w = fold(&w, &c);
        Self([w[0], w[1], w[2], w[3]])
    }

    /// Folds a carry bit at 2^256 back into the limbs.
    const fn fold_carry(w: [u64; 4], carry: u64) -> Self {
        let (w0, c) = adc(w[0], carry * R, 0);
        let (w1, c) = adc(w[1], 0, c);
        let (w2, c) = adc(w[2], 0, c);
        let (w3, c) = adc(w[3], 0, c);
        // Only reachable when the limbs wrapped to a value below R.
        let (w0, c2) = adc(w0, c * R, 0);
        let (w1, c2) = adc(w1, 0, c2);
        let (w2, c2) = adc(w2, 0, c2);
        let (w3, _) = adc(w3, 0, c2);
        Self([w0, w1, w2, w3])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = self.normalize().0;
        let b = other.normalize().0;
        a[0].ct_eq(&b[0]) & a[1].ct_eq(&b[1]) & a[2].ct_eq(&b[2]) & a[3].ct_eq(&b[3])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Add<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: FieldElement) -> FieldElement {
        FieldElement::add(&self, &other)
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(&self, other)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(self, other)
    }
}

impl AddAssign<FieldElement> for FieldElement {
    fn add_assign(&mut self, other: FieldElement) {
        *self = FieldElement::add(self, &other);
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::add(self, other);
    }
}

impl Sub<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &other)
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::sub(&self, other)
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::sub(self, other)
    }
}

impl SubAssign<FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: FieldElement) {
        *self = FieldElement::sub(self, &other);
    }
}

impl SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::sub(self, other);
    }
}

impl Mul<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: FieldElement) -> FieldElement {
        FieldElement::mul(&self, &other)
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::mul(&self, other)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::mul(self, other)
    }
}

impl MulAssign<FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: FieldElement) {
        *self = FieldElement::mul(self, &other);
    }
}

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::mul(self, other);
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldElement, MODULUS};
    use crate::FieldBytes;
    use elliptic_curve::subtle::ConstantTimeEq;
    use hex_literal::hex;
    use proptest::prelude::*;

    /// p - 1
    const P_MINUS_ONE: [u8; 32] =
        hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2E");

    fn fe(bytes: [u8; 32]) -> FieldElement {
        FieldElement::from_bytes(&FieldBytes::from(bytes)).unwrap()
    }

    #[test]
    fn zero_is_additive_identity() {
        let zero = FieldElement::zero();
        let one = FieldElement::one();
        assert_eq!(zero + &zero, zero);
        assert_eq!(one + &zero, one);
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let one = FieldElement::one();
        assert_eq!(one * &one, one);
    }

    #[test]
    fn from_bytes_rejects_modulus() {
        let p = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
        assert!(bool::from(
            FieldElement::from_bytes(&FieldBytes::from(p)).is_none()
        ));
        assert!(bool::from(
            FieldElement::from_bytes(&FieldBytes::from(P_MINUS_ONE)).is_some()
        ));
    }

    #[test]
    fn wraparound() {
        let p_minus_one = fe(P_MINUS_ONE);
        assert!(bool::from((p_minus_one + &FieldElement::one()).is_zero()));
        assert_eq!(FieldElement::zero() - &FieldElement::one(), p_minus_one);
        assert_eq!(-FieldElement::one(), p_minus_one);
        // (p - 1)^2 = 1
        assert_eq!(p_minus_one.square(), FieldElement::one());
    }

    #[test]
    fn negate_in_const_context() {
        const MINUS_ONE: FieldElement = FieldElement::ONE.negate();
        assert_eq!(MINUS_ONE, fe(P_MINUS_ONE));
        assert!(bool::from(FieldElement::ZERO.negate().is_zero()));
    }

    #[test]
    fn redundant_limbs_normalize() {
        // p + 5 is held as raw limbs and must compare equal to 5.
        let p = MODULUS;
        let raw = FieldElement([p[0] + 5, p[1], p[2], p[3]]);
        assert_eq!(raw, FieldElement::from_u64(5));
        assert_eq!(raw.to_bytes(), FieldElement::from_u64(5).to_bytes());
        assert!(bool::from(raw.is_odd()));

        let raw_p = FieldElement(p);
        assert!(bool::from(raw_p.normalizes_to_zero()));
    }

    #[test]
    fn subtraction_across_the_top() {
        // 0 - (2^256 - 1) = -(R - 1 + p) ≡ -(R - 1) mod p
        let max = FieldElement([u64::MAX; 4]);
        let expected = -FieldElement::from_u64(0x1_0000_03D0);
        assert_eq!(FieldElement::zero() - &max, expected);
    }

    #[test]
    fn invert() {
        assert!(bool::from(FieldElement::zero().invert().is_none()));

        let one = FieldElement::one();
        assert_eq!(one.invert().unwrap(), one);

        let two = one + &one;
        let inv_two = two.invert().unwrap();
        assert_eq!(two * &inv_two, one);
    }

    #[test]
    fn sqrt() {
        let one = FieldElement::one();
        let two = one + &one;
        let four = two.square();
        assert_eq!(four.sqrt().unwrap().square(), four);

        // 7 is not a square modulo p (there is no point with x = 0).
        assert!(bool::from(FieldElement::from_u64(7).sqrt().is_none()));
        assert!(!bool::from(FieldElement::from_u64(7).is_square()));
    }

    #[test]
    fn mul_single_matches_mul() {
        let x = fe(hex!(
            "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"
        ));
        assert_eq!(x.mul_single(21), x * &FieldElement::from_u64(21));
        assert_eq!(x.double(), x + &x);
    }

    prop_compose! {
        fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
            // Raw limbs may exceed p on purpose.
            FieldElement::from_bytes_unchecked(&bytes)
        }
    }

    proptest! {
        #[test]
        fn bytes_roundtrip(a in field_element()) {
            let bytes = a.to_bytes();
            let b = FieldElement::from_bytes(&bytes).unwrap();
            prop_assert!(bool::from(a.ct_eq(&b)));
            prop_assert_eq!(b.to_bytes(), bytes);
        }

        #[test]
        fn add_then_sub(a in field_element(), b in field_element()) {
            prop_assert_eq!((a + &b) - &b, a);
        }

        #[test]
        fn mul_distributes(a in field_element(), b in field_element(), c in field_element()) {
            prop_assert_eq!(a * &(b + &c), a * &b + &(a * &c));
        }

        #[test]
        fn invert_is_inverse(a in field_element()) {
            prop_assume!(!bool::from(a.is_zero()));
            prop_assert_eq!(a * &a.invert().unwrap(), FieldElement::one());
        }

        #[test]
        fn sqrt_of_square(a in field_element()) {
            let root = a.square().sqrt().unwrap();
            prop_assert!(root == a || root == -a);
        }
    }
}
