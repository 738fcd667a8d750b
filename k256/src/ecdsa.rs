//! Elliptic Curve Digital Signature Algorithm (ECDSA) over secp256k1.
//!
//! Signing takes a 32-byte message hash and derives its nonce with
//! [RFC 6979] by default ([`Rfc6979`](crate::nonce::Rfc6979)); any
//! [`EcdsaNonceFunction`](crate::nonce::EcdsaNonceFunction) can be
//! substituted.
//!
//! ## Low-s policy
//!
//! Signing always produces a signature whose `s` is in the lower half of the
//! scalar range. Verification accepts both `s` and `n - s`; callers that need
//! strict (BIP-146 style) verification can check [`Signature::is_low_s`]
//! first.
//!
//! ## Usage
//!
//! ```
//! use k256_batch::{
//!     ecdsa::{Signature, SigningKey, VerifyingKey},
//!     Context,
//! };
//!
//! let ctx = Context::new();
//! let signing_key = SigningKey::from_bytes(&[0x42; 32])?;
//! let msg_hash = [0x11; 32];
//! let signature = signing_key.sign_prehash(&ctx, &msg_hash)?;
//! assert!(signature.is_low_s());
//!
//! let verifying_key = signing_key.verifying_key(&ctx);
//! let encoded = verifying_key.to_sec1_bytes(true);
//! let verifying_key = VerifyingKey::from_sec1_bytes(&encoded)?;
//! let signature = Signature::from_der(&signature.to_der()?)?;
//! assert!(verifying_key.verify_prehash(&msg_hash, &signature));
//! # Ok::<(), k256_batch::Error>(())
//! ```
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

mod signing;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{Error, FieldBytes, Result, Scalar, Secp256k1};
use alloc::vec::Vec;
use core::fmt;
use elliptic_curve::subtle::ConditionallySelectable;

/// Fixed-size `r ‖ s` encoding of an ECDSA signature.
pub type SignatureBytes = [u8; 64];

/// ECDSA/secp256k1 signature: a pair of non-zero scalars `(r, s)`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Builds a signature from its components. Both must be non-zero.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Result<Self> {
        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::InvalidSignature);
        }
        Ok(Self { r, s })
    }

    /// Parses the 64-byte compact encoding `r ‖ s`.
    ///
    /// Each half must be a canonical, non-zero scalar (`0 < x < n`).
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r, s) = bytes.split_at(32);
        let r = Option::<Scalar>::from(Scalar::from_bytes(FieldBytes::from_slice(r)))
            .ok_or(Error::InvalidSignature)?;
        let s = Option::<Scalar>::from(Scalar::from_bytes(FieldBytes::from_slice(s)))
            .ok_or(Error::InvalidSignature)?;
        Self::from_scalars(r, s)
    }

    /// Serializes as the 64-byte compact encoding `r ‖ s`.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Parses an ASN.1 DER encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let sig = ecdsa_core::Signature::<Secp256k1>::from_der(bytes)?;
        let (r, s) = sig.split_bytes();
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&r);
        compact[32..].copy_from_slice(&s);
        Self::from_bytes(&compact)
    }

    /// Serializes as ASN.1 DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let sig = ecdsa_core::Signature::<Secp256k1>::from_scalars(
            self.r.to_bytes(),
            self.s.to_bytes(),
        )?;
        Ok(sig.to_der().as_bytes().to_vec())
    }

    /// The `r` component.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// The `s` component.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Is `s` in the lower half of the scalar range (`s ≤ n/2`)?
    pub fn is_low_s(&self) -> bool {
        !bool::from(self.s.is_high())
    }

    /// Returns the equivalent signature with `s` replaced by `n - s` when `s`
    /// is high, and `self` unchanged otherwise.
    pub fn normalize_s(&self) -> Self {
        let s = Scalar::conditional_select(&self.s, &-self.s, self.s.is_high());
        Self { r: self.r, s }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ecdsa::Signature(")?;
        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }
        write!(f, ")")
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &SignatureBytes = bytes.try_into().map_err(|_| Error::InvalidSignature)?;
        Self::from_bytes(bytes)
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::{Error, Scalar};
    use hex_literal::hex;

    const SIG: [u8; 64] = hex!(
        "934B1EA10A4B3C1757E2B0C017D0B6143CE3C9A7E6A4A49860D7A6AB210EE3D8
         2442CE9D2B916064108014783E923EC36B49743E2FFA1C4496F01A512AAFD9E5"
    );

    #[test]
    fn compact_encoding() {
        let sig = Signature::from_bytes(&SIG).unwrap();
        assert_eq!(sig.to_bytes(), SIG);
        assert_eq!(Signature::try_from(&SIG[..]).unwrap(), sig);
        assert_eq!(
            Signature::try_from(&SIG[..63]).unwrap_err(),
            Error::InvalidSignature
        );
    }

    #[test]
    fn der_encoding() {
        let sig = Signature::from_bytes(&SIG).unwrap();
        let der = sig.to_der().unwrap();
        assert_eq!(der[0], 0x30);
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
        assert_eq!(
            Signature::from_der(&der[..der.len() - 1]).unwrap_err(),
            Error::InvalidSignature
        );
    }

    #[test]
    fn rejects_out_of_range_components() {
        let mut zero_r = SIG;
        zero_r[..32].fill(0);
        assert!(Signature::from_bytes(&zero_r).is_err());

        let mut big_s = SIG;
        big_s[32..].fill(0xFF);
        assert!(Signature::from_bytes(&big_s).is_err());

        assert!(Signature::from_scalars(Scalar::ONE, Scalar::ZERO).is_err());
    }

    #[test]
    fn normalize_s() {
        let low = Signature::from_bytes(&SIG).unwrap();
        assert!(low.is_low_s());
        assert_eq!(low.normalize_s(), low);

        let high = Signature::from_scalars(low.r(), -low.s()).unwrap();
        assert!(!high.is_low_s());
        assert_eq!(high.normalize_s(), low);
    }
}
