//! Helper functions for 64-bit limb arithmetic.
//!
//! Everything here runs in time independent of the limb values: loop bounds
//! are constants and carries are propagated arithmetically.

/// Computes `a + b + carry`, returning the result along with the new carry.
/// `carry` must be 0 or 1.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
/// `borrow` must be 0 or 1.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as u64, (ret >> 127) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Schoolbook product of two 256-bit little-endian limb arrays.
pub(crate) const fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut w = [0u64; 8];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (lo, hi) = mac(w[i + j], a[i], b[j], carry);
            w[i + j] = lo;
            carry = hi;
            j += 1;
        }
        w[i + 4] = carry;
        i += 1;
    }
    w
}

/// Replaces `hi * 2^256 + lo` by `hi * c + lo`, where `2^256 ≡ c` modulo the
/// working modulus.
///
/// The caller guarantees the result fits in 512 bits; any carry out of the
/// top limb is discarded.
pub(crate) const fn fold(w: &[u64; 8], c: &[u64; 4]) -> [u64; 8] {
    let mut r = [w[0], w[1], w[2], w[3], 0, 0, 0, 0];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (lo, hi) = mac(r[i + j], w[4 + i], c[j], carry);
            r[i + j] = lo;
            carry = hi;
            j += 1;
        }
        let mut k = i + 4;
        while k < 8 {
            let (sum, cy) = adc(r[k], 0, carry);
            r[k] = sum;
            carry = cy;
            k += 1;
        }
        i += 1;
    }
    r
}

/// Computes `a - b` over 256 bits, returning the difference and the final
/// borrow (1 when `a < b`).
#[inline(always)]
pub(crate) const fn sub_with_borrow(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (w0, borrow) = sbb(a[0], b[0], 0);
    let (w1, borrow) = sbb(a[1], b[1], borrow);
    let (w2, borrow) = sbb(a[2], b[2], borrow);
    let (w3, borrow) = sbb(a[3], b[3], borrow);
    ([w0, w1, w2, w3], borrow)
}

/// Computes `a + b` over 256 bits, returning the sum and the final carry.
#[inline(always)]
pub(crate) const fn add_with_carry(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (w0, carry) = adc(a[0], b[0], 0);
    let (w1, carry) = adc(a[1], b[1], carry);
    let (w2, carry) = adc(a[2], b[2], carry);
    let (w3, carry) = adc(a[3], b[3], carry);
    ([w0, w1, w2, w3], carry)
}

/// Picks `b` when `mask` is all ones and `a` when it is zero.
#[inline(always)]
pub(crate) const fn select_limbs(a: &[u64; 4], b: &[u64; 4], mask: u64) -> [u64; 4] {
    [
        a[0] ^ (mask & (a[0] ^ b[0])),
        a[1] ^ (mask & (a[1] ^ b[1])),
        a[2] ^ (mask & (a[2] ^ b[2])),
        a[3] ^ (mask & (a[3] ^ b[3])),
    ]
}

/// Decodes 32 big-endian bytes into little-endian 64-bit limbs.
pub(crate) const fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        let mut j = 0;
        let mut limb = 0u64;
        while j < 8 {
            limb = (limb << 8) | (bytes[(3 - i) * 8 + j] as u64);
            j += 1;
        }
        limbs[i] = limb;
        i += 1;
    }
    limbs
}

/// Encodes little-endian 64-bit limbs as 32 big-endian bytes.
pub(crate) fn limbs_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().rev().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbb_reports_borrow() {
        assert_eq!(sbb(0, 1, 0), (u64::MAX, 1));
        assert_eq!(sbb(5, 2, 1), (2, 0));
        assert_eq!(sbb(0, u64::MAX, 1), (0, 1));
    }

    #[test]
    fn mul_wide_of_max_values() {
        let max = [u64::MAX; 4];
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let w = mul_wide(&max, &max);
        assert_eq!(w, [1, 0, 0, 0, u64::MAX - 1, u64::MAX, u64::MAX, u64::MAX]);
    }

    #[test]
    fn be_bytes_roundtrip() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let limbs = limbs_from_be_bytes(&bytes);
        assert_eq!(limbs[3] >> 56, 0x00);
        assert_eq!(limbs[0] & 0xff, 0x1f);
        assert_eq!(limbs_to_be_bytes(&limbs), bytes);
    }
}
