//! ECDSA verification.

use super::Signature;
use crate::{
    arithmetic::mul::lincomb2_vartime, AffinePoint, EncodedPoint, Error, FieldBytes,
    ProjectivePoint, Result, Scalar,
};
use alloc::vec::Vec;

/// ECDSA/secp256k1 public key: any curve point other than the identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    point: AffinePoint,
}

impl VerifyingKey {
    /// Wraps a point, rejecting the identity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if bool::from(point.is_identity()) {
            return Err(Error::InvalidPublicKey);
        }
        Ok(Self { point })
    }

    pub(crate) fn from_affine_unchecked(point: AffinePoint) -> Self {
        Self { point }
    }

    /// Parses a SEC1 encoded key (33-byte compressed or 65-byte
    /// uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        let point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(Error::InvalidPublicKey)?;
        Self::from_affine(point)
    }

    /// Serializes in SEC1 form, compressed (33 bytes) or uncompressed
    /// (65 bytes).
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        self.to_encoded_point(compress).as_bytes().to_vec()
    }

    /// SEC1 encoding as an [`EncodedPoint`].
    pub fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        self.point.to_encoded_point(compress)
    }

    /// The underlying curve point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Verifies `signature` over a 32-byte message hash.
    ///
    /// Accepts both low-s and high-s signatures. Runs in variable time.
    pub fn verify_prehash(&self, msg_hash: &[u8; 32], signature: &Signature) -> bool {
        let s_inv = match Option::<Scalar>::from(signature.s().invert()) {
            Some(s_inv) => s_inv,
            None => return false,
        };
        let z = Scalar::from_bytes_reduced(&FieldBytes::from(*msg_hash));
        let r = signature.r();

        let u1 = z * &s_inv;
        let u2 = r * &s_inv;
        let big_r = lincomb2_vartime(&u2, &ProjectivePoint::from(self.point), &u1);
        if bool::from(big_r.is_identity()) {
            return false;
        }

        Scalar::from_bytes_reduced(&big_r.to_affine().x()) == r
    }
}

impl From<&VerifyingKey> for EncodedPoint {
    fn from(key: &VerifyingKey) -> EncodedPoint {
        key.to_encoded_point(true)
    }
}

impl TryFrom<&EncodedPoint> for VerifyingKey {
    type Error = Error;

    fn try_from(encoded: &EncodedPoint) -> Result<Self> {
        Self::from_sec1_bytes(encoded.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::VerifyingKey;
    use crate::{
        ecdsa::{Signature, SigningKey},
        test_vectors::ecdsa::ECDSA_TEST_VECTORS,
        AffinePoint, Context, Error,
    };
    use hex_literal::hex;

    #[test]
    fn sec1_round_trip() {
        let vector = &ECDSA_TEST_VECTORS[0];
        let key = VerifyingKey::from_sec1_bytes(&vector.public_key).unwrap();
        assert_eq!(key.to_sec1_bytes(true), vector.public_key.to_vec());

        let uncompressed = key.to_sec1_bytes(false);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(VerifyingKey::from_sec1_bytes(&uncompressed).unwrap(), key);
    }

    #[test]
    fn rejects_bad_keys() {
        assert_eq!(
            VerifyingKey::from_sec1_bytes(&[0x00]).unwrap_err(),
            Error::InvalidPublicKey
        );
        assert!(VerifyingKey::from_affine(AffinePoint::IDENTITY).is_err());

        // x = 5 has no point on the curve.
        let off_curve = hex!("020000000000000000000000000000000000000000000000000000000000000005");
        assert!(VerifyingKey::from_sec1_bytes(&off_curve).is_err());
        assert!(VerifyingKey::from_sec1_bytes(&off_curve[..32]).is_err());
    }

    #[test]
    fn accepts_high_s() {
        for vector in ECDSA_TEST_VECTORS {
            let key = VerifyingKey::from_sec1_bytes(&vector.public_key).unwrap();
            let sig = Signature::from_bytes(&vector.signature).unwrap();
            let high = Signature::from_scalars(sig.r(), -sig.s()).unwrap();
            assert!(key.verify_prehash(&vector.message_hash, &sig));
            assert!(key.verify_prehash(&vector.message_hash, &high));
        }
    }

    #[test]
    fn bit_flips_fail() {
        let ctx = Context::new();
        let key = SigningKey::from_bytes(&[0x42; 32]).unwrap();
        let vk = key.verifying_key(&ctx);
        let msg = [0x5A; 32];
        let sig = key.sign_prehash(&ctx, &msg).unwrap().to_bytes();

        for bit in [0usize, 7, 100, 255, 256, 300, 511] {
            let mut tampered = sig;
            tampered[bit / 8] ^= 1 << (bit % 8);
            if let Ok(tampered) = Signature::from_bytes(&tampered) {
                assert!(!vk.verify_prehash(&msg, &tampered), "bit {}", bit);
            }
        }

        let sig = Signature::from_bytes(&sig).unwrap();
        for bit in [0usize, 128, 255] {
            let mut msg = msg;
            msg[bit / 8] ^= 1 << (bit % 8);
            assert!(!vk.verify_prehash(&msg, &sig));
        }
    }
}
