//! Taproot Schnorr signatures as defined in [BIP340].
//!
//! Public keys are x-only: a 32-byte x-coordinate standing for the curve
//! point with that x and an even y. Messages may be of any length.
//!
//! ## Usage
//!
//! ```
//! use k256_batch::{
//!     schnorr::{SigningKey, VerifyingKey},
//!     Context,
//! };
//!
//! let ctx = Context::new();
//! let signing_key = SigningKey::from_bytes(&ctx, &[0x42; 32])?;
//! let message = b"Schnorr signatures prove knowledge of a secret in the random oracle model";
//! let signature = signing_key.sign_with_aux(&ctx, message, &[0x07; 32])?;
//!
//! let verifying_key = VerifyingKey::from_bytes(&signing_key.verifying_key().to_bytes())?;
//! assert!(verifying_key.verify(message, &signature));
//! # Ok::<(), k256_batch::Error>(())
//! ```
//!
//! [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

mod signing;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{
    hash::{tagged_hash, CHALLENGE_TAG},
    Error, FieldBytes, FieldElement, Result, Scalar,
};
use core::fmt;
use sha2::Digest;

/// Size of a Schnorr signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Schnorr signature serialized as bytes: `R.x ‖ s`.
pub type SignatureBytes = [u8; SIGNATURE_SIZE];

/// BIP-340 Schnorr signature.
///
/// `r` is the x-coordinate of the nonce point, checked to be below `p` when
/// parsed; whether it lies on the curve is only known after verification.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: [u8; 32],
    s: Scalar,
}

impl Signature {
    /// Parses `R.x ‖ s`, rejecting `R.x ≥ p` and `s ≥ n`.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(32);

        if bool::from(FieldElement::from_bytes(FieldBytes::from_slice(r_bytes)).is_none()) {
            return Err(Error::InvalidSignature);
        }
        let s = Option::<Scalar>::from(Scalar::from_bytes(FieldBytes::from_slice(s_bytes)))
            .ok_or(Error::InvalidSignature)?;

        let mut r = [0u8; 32];
        r.copy_from_slice(r_bytes);
        Ok(Self { r, s })
    }

    pub(crate) fn from_parts(r: [u8; 32], s: Scalar) -> Self {
        Self { r, s }
    }

    /// Serializes as `R.x ‖ s`.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// The x-coordinate of the nonce point `R`.
    pub fn r_bytes(&self) -> &[u8; 32] {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schnorr::Signature(")?;
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

/// `e = TaggedHash("BIP0340/challenge", R.x ‖ P.x ‖ msg) mod n`
pub(crate) fn challenge(r: &[u8; 32], public_key: &[u8; 32], msg: &[u8]) -> Scalar {
    let e = tagged_hash(CHALLENGE_TAG)
        .chain_update(r)
        .chain_update(public_key)
        .chain_update(msg)
        .finalize();
    Scalar::from_bytes_reduced(&e)
}

#[cfg(test)]
mod tests {
    use super::{Signature, SigningKey, VerifyingKey};
    use crate::{
        hash::NONCE_TAG, nonce::Bip340, test_vectors::bip340::BIP340_TEST_VECTORS, Context,
    };

    #[test]
    fn bip340_signing_vectors() {
        let ctx = Context::new();
        for vector in BIP340_TEST_VECTORS {
            let secret_key = match vector.secret_key {
                Some(secret_key) => secret_key,
                None => continue,
            };
            let sk = SigningKey::from_bytes(&ctx, &secret_key).unwrap();
            assert_eq!(
                sk.verifying_key().to_bytes(),
                vector.public_key,
                "vector {}",
                vector.index
            );

            let sig = sk
                .sign_with(&ctx, vector.message, &Bip340, NONCE_TAG, vector.aux_rand.as_ref())
                .unwrap();
            assert_eq!(sig.to_bytes(), vector.signature, "vector {}", vector.index);
        }
    }

    #[test]
    fn bip340_verification_vectors() {
        for vector in BIP340_TEST_VECTORS {
            let verified = VerifyingKey::from_bytes(&vector.public_key)
                .ok()
                .and_then(|pk| {
                    Signature::from_bytes(&vector.signature)
                        .ok()
                        .map(|sig| pk.verify(vector.message, &sig))
                })
                .unwrap_or(false);
            assert_eq!(
                verified, vector.verifies,
                "vector {}: {}",
                vector.index, vector.comment
            );
        }
    }

    #[test]
    fn signature_parsing() {
        let sig = BIP340_TEST_VECTORS[0].signature;
        let parsed = Signature::try_from(&sig[..]).unwrap();
        assert_eq!(parsed.to_bytes(), sig);
        assert!(Signature::try_from(&sig[..63]).is_err());

        let mut big_r = sig;
        big_r[..32].fill(0xFF);
        assert!(Signature::from_bytes(&big_r).is_err());

        let mut big_s = sig;
        big_s[32..].fill(0xFF);
        assert!(Signature::from_bytes(&big_s).is_err());
    }
}
