//! Scalar field arithmetic modulo
//! n = 115792089237316195423570985008687907852837564279074904382605163141518161494337

use super::util::{
    add_with_carry, fold, limbs_from_be_bytes, limbs_to_be_bytes, mul_wide, select_limbs,
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

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub(crate) const MODULUS: [u64; 4] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// Limbs of 2^256 minus the secp256k1 order.
const NEG_MODULUS: [u64; 4] = [0x402D_A173_2FC9_BEBF, 0x4551_2319_50B7_5FC4, 1, 0];

/// Constant representing the modulus / 2
const FRAC_MODULUS_2: [u64; 4] = [
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
];

/// Public exponent `n - 2` used for inversion.
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xBFD2_5E8C_D036_413F,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// Number of digits produced by [`Scalar::to_wnaf`]: one per bit plus a
/// final carry position.
pub(crate) const WNAF_LEN: usize = 257;

/// Scalars are elements in the finite field modulo n.
///
/// The internal value is always fully reduced, so `Scalar`s compare and
/// serialize without a normalization step.
#[derive(Clone, Copy, Default)]
pub struct Scalar([u64; 4]);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Returns the zero scalar.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the multiplicative identity.
    pub const fn one() -> Self {
        Self::ONE
    }

    /// Creates a scalar from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Attempts to parse the given byte array as a scalar.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in
    /// the range `[0, n)`.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let limbs = limbs_from_be_bytes(&to_array(bytes));
        let (_, borrow) = sub_with_borrow(&limbs, &MODULUS);
        CtOption::new(Self(limbs), Choice::from(borrow as u8))
    }

    /// Parses a secret key: the value must be in `[1, n)`.
    pub fn from_nonzero_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        Self::from_bytes(bytes).and_then(|s| CtOption::new(s, !s.is_zero()))
    }

    /// Parses big-endian bytes, reducing the value modulo n.
    ///
    /// Used for hash outputs and ECDSA message digests, which may exceed n.
    pub fn from_bytes_reduced(bytes: &FieldBytes) -> Self {
        let limbs = limbs_from_be_bytes(&to_array(bytes));
        // 2^256 < 2n, so one conditional subtraction suffices.
        let (reduced, borrow) = sub_with_borrow(&limbs, &MODULUS);
        Self(select_limbs(&reduced, &limbs, 0u64.wrapping_sub(borrow)))
    }

    /// Returns the SEC1 encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        FieldBytes::clone_from_slice(&limbs_to_be_bytes(&self.0))
    }

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is this scalar greater than `n / 2`?
    pub fn is_high(&self) -> Choice {
        let (_, borrow) = sub_with_borrow(&FRAC_MODULUS_2, &self.0);
        Choice::from(borrow as u8)
    }

    /// Is the integer representative of this scalar odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Returns `self + rhs mod n`.
    pub const fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = add_with_carry(&self.0, &rhs.0);
        let (reduced, borrow) = sub_with_borrow(&sum, &MODULUS);
        // Keep the reduced value when the sum overflowed 2^256 or is >= n.
        let use_reduced = carry | (borrow ^ 1);
        Self(select_limbs(&sum, &reduced, 0u64.wrapping_sub(use_reduced)))
    }

    /// Returns `2 * self mod n`.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - rhs mod n`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = sub_with_borrow(&self.0, &rhs.0);
        let (wrapped, _) = add_with_carry(&diff, &MODULUS);
        Self(select_limbs(&diff, &wrapped, 0u64.wrapping_sub(borrow)))
    }

    /// Returns `-self mod n`.
    pub const fn negate(&self) -> Self {
        Self::sub(&Self::ZERO, self)
    }

    /// Returns `self * rhs mod n`.
    pub const fn mul(&self, rhs: &Self) -> Self {
        let w = mul_wide(&self.0, &rhs.0);
        // Each fold shrinks the high half: < 2^385, < 2^260, < 2^256 + 2^133,
        // then < 2^256.
        let w = fold(&w, &NEG_MODULUS);
        let w = fold(&w, &NEG_MODULUS);
        let w = fold(&w, &NEG_MODULUS);
        let w = fold(&w, &NEG_MODULUS);
        let limbs = [w[0], w[1], w[2], w[3]];
        let (reduced, borrow) = sub_with_borrow(&limbs, &MODULUS);
        Self(select_limbs(&reduced, &limbs, 0u64.wrapping_sub(borrow)))
    }

    /// Returns `self * self mod n`.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    ///
    /// Computes `self^(n - 2)` with a fixed 4-bit window over the public
    /// exponent, so the operation sequence does not depend on `self`.
    pub fn invert(&self) -> CtOption<Self> {
        let mut table = [Self::ONE; 16];
        table[1] = *self;
        for i in 2..16 {
            table[i] = table[i - 1].mul(self);
        }

        let mut res = Self::ONE;
        for limb in MODULUS_MINUS_TWO.iter().rev() {
            for nibble in (0..16).rev() {
                res = res.square().square().square().square();
                res = res.mul(&table[((limb >> (nibble * 4)) & 0xf) as usize]);
            }
        }

        CtOption::new(res, !self.is_zero())
    }

    /// Extracts `count` bits starting at bit `offset` (little-endian bit
    /// order). `offset` is public; the bits themselves are read without
    /// branching.
    ///
    /// # Panics
    ///
    /// Panics unless `1 ≤ count ≤ 32` and `offset + count ≤ 256`.
    pub fn bits(&self, offset: usize, count: usize) -> u32 {
        assert!(
            (1..=32).contains(&count) && offset + count <= 256,
            "bit range out of bounds"
        );
        let limb = offset >> 6;
        let shift = offset & 63;
        let mut v = self.0[limb] >> shift;
        if shift + count > 64 {
            v |= self.0[limb + 1] << (64 - shift);
        }
        (v & ((1u64 << count) - 1)) as u32
    }

    /// Recodes this scalar in width-`w` non-adjacent form.
    ///
    /// Every non-zero digit is odd with absolute value below `2^(w-1)`, and
    /// any `w` consecutive digits hold at most one non-zero digit. Runs in
    /// variable time: only call this on public scalars.
    ///
    /// # Panics
    ///
    /// Panics unless `2 ≤ w ≤ 8`, the widths whose digits fit in an `i8`.
    pub fn to_wnaf(&self, w: usize) -> [i8; WNAF_LEN] {
        assert!((2..=8).contains(&w), "wNAF width must be in 2..=8");
        let mut wnaf = [0i8; WNAF_LEN];

        // Scalars with the top bit set are recoded as -(n - s) so the final
        // carry stays inside the digit array.
        let (s, sign) = if self.0[3] >> 63 == 1 {
            (self.negate(), -1i32)
        } else {
            (*self, 1i32)
        };

        let mut carry = 0u32;
        let mut bit = 0usize;
        while bit < 256 {
            if s.bits(bit, 1) == carry {
                bit += 1;
                continue;
            }

            let now = core::cmp::min(w, 256 - bit);
            let mut word = (s.bits(bit, now) + carry) as i32;
            carry = ((word >> (w - 1)) & 1) as u32;
            word -= (carry << w) as i32;

            wnaf[bit] = (sign * word) as i8;
            bit += now;
        }
        wnaf[256] = (sign * carry as i32) as i8;
        wnaf
    }
}

fn to_array(bytes: &FieldBytes) -> [u8; 32] {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(bytes);
    buf
}

impl From<u64> for Scalar {
    fn from(k: u64) -> Self {
        Self::from_u64(k)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar::add(&self, &other)
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(&self, other)
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(self, other)
    }
}

impl AddAssign<Scalar> for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = Scalar::add(self, &rhs);
    }
}

impl AddAssign<&Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::add(self, rhs);
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: Scalar) -> Scalar {
        Scalar::sub(&self, &other)
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(&self, other)
    }
}

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(self, other)
    }
}

impl SubAssign<Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = Scalar::sub(self, &rhs);
    }
}

impl SubAssign<&Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::sub(self, rhs);
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: Scalar) -> Scalar {
        Scalar::mul(&self, &other)
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(&self, other)
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(self, other)
    }
}

impl MulAssign<Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = Scalar::mul(self, &rhs);
    }
}

impl MulAssign<&Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::mul(self, rhs);
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}
