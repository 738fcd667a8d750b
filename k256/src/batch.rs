//! Randomized batch verification.
//!
//! A [`BatchContext`] collects BIP-340 signatures and x-only tweak checks.
//! Each term is an equation `0 = Eqᵢ`; the context checks
//! `0 = Σ aᵢ·Eqᵢ` with one multi-scalar multiplication, where every `aᵢ`
//! is derived from a tagged-hash transcript of all public inputs added so
//! far.
//!
//! ```
//! use k256_batch::{batch::BatchContext, schnorr::SigningKey, Context};
//!
//! let ctx = Context::new();
//! let mut batch = BatchContext::new(8)?;
//! for i in 0..8u8 {
//!     let sk = SigningKey::from_bytes(&ctx, &[i + 1; 32])?;
//!     let msg = [i; 32];
//!     let sig = sk.sign(&ctx, &msg)?;
//!     batch.add_schnorr(&sig.to_bytes(), &msg, sk.verifying_key())?;
//! }
//! assert!(batch.verify());
//! # Ok::<(), k256_batch::Error>(())
//! ```

use crate::{
    hash::{tagged_hash, BATCH_TAG},
    lincomb_vartime,
    schnorr::{self, VerifyingKey},
    AffinePoint, Arena, Error, FieldBytes, ProjectivePoint, Result, Scalar, StraussScratch,
};
use elliptic_curve::subtle::Choice;
use sha2::{Digest, Sha256};

/// Points contributed by every term.
const POINTS_PER_TERM: usize = 2;

/// Accumulator for batch verification of Schnorr signatures and tweak checks.
///
/// Created with a fixed capacity; all scratch memory is reserved up front
/// and released when the context is dropped. [`BatchContext::verify`]
/// consumes the context.
#[derive(Debug)]
pub struct BatchContext {
    terms: Arena<(Scalar, ProjectivePoint)>,
    scratch: StraussScratch,
    generator: Scalar,
    transcript: Sha256,
    len: usize,
    capacity: usize,
    valid: bool,
}

impl BatchContext {
    /// Reserves scratch space for `max_terms` terms.
    ///
    /// Returns [`Error::Allocation`] if the memory cannot be reserved; any
    /// partial reservation is released.
    pub fn new(max_terms: usize) -> Result<Self> {
        let max_points = max_terms
            .checked_mul(POINTS_PER_TERM)
            .ok_or(Error::Allocation)?;

        Ok(Self {
            terms: Arena::with_capacity(max_points)?,
            scratch: StraussScratch::new(max_points)?,
            generator: Scalar::ZERO,
            transcript: tagged_hash(BATCH_TAG),
            len: 0,
            capacity: max_terms,
            valid: true,
        })
    }

    /// Number of terms added so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Have no terms been added?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of terms.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds a BIP-340 signature `sig` by `public_key` over `msg`.
    ///
    /// Errors:
    /// - [`Error::BatchFull`] if the context is at capacity. Nothing is
    ///   recorded.
    /// - [`Error::InvalidSignature`] if `s ≥ n` or `R.x` is not the
    ///   x-coordinate of a curve point. The batch will then fail to verify.
    pub fn add_schnorr(
        &mut self,
        sig: &schnorr::SignatureBytes,
        msg: &[u8],
        public_key: &VerifyingKey,
    ) -> Result<()> {
        if self.len == self.capacity {
            return Err(Error::BatchFull);
        }

        let (r_bytes, s_bytes) = sig.split_at(32);
        let s = Option::<Scalar>::from(Scalar::from_bytes(FieldBytes::from_slice(s_bytes)));
        let big_r =
            Option::<AffinePoint>::from(AffinePoint::lift_x(FieldBytes::from_slice(r_bytes)));
        let (s, big_r) = match (s, big_r) {
            (Some(s), Some(big_r)) => (s, big_r),
            _ => return self.poison(Error::InvalidSignature),
        };

        let pk = public_key.to_bytes();
        self.transcript.update(sig);
        self.transcript.update(msg);
        self.transcript.update(compressed(&pk, Choice::from(0)));
        let a = self.randomizer();

        let mut r = [0u8; 32];
        r.copy_from_slice(r_bytes);
        let e = schnorr::challenge(&r, &pk, msg);

        // a·(R + e·P - s·G) = 0
        self.push(
            (a, ProjectivePoint::from(big_r)),
            (a * &e, ProjectivePoint::from(*public_key.as_affine())),
        )?;
        self.generator -= a * &s;
        Ok(())
    }

    /// Adds the check that `tweaked_key` (with y-parity `odd`) equals
    /// `internal_key + tweak·G`.
    ///
    /// Errors:
    /// - [`Error::BatchFull`] if the context is at capacity. Nothing is
    ///   recorded.
    /// - [`Error::InvalidTweak`] if `tweak ≥ n` or `tweaked_key` is not the
    ///   x-coordinate of a curve point. The batch will then fail to verify.
    pub fn add_xonly_tweak_check(
        &mut self,
        tweaked_key: &[u8; 32],
        odd: bool,
        internal_key: &VerifyingKey,
        tweak: &[u8; 32],
    ) -> Result<()> {
        if self.len == self.capacity {
            return Err(Error::BatchFull);
        }

        let t = Option::<Scalar>::from(Scalar::from_bytes(&FieldBytes::from(*tweak)));
        let q = Option::<AffinePoint>::from(AffinePoint::decompress(
            &FieldBytes::from(*tweaked_key),
            Choice::from(odd as u8),
        ));
        let (t, q) = match (t, q) {
            (Some(t), Some(q)) => (t, q),
            _ => return self.poison(Error::InvalidTweak),
        };

        self.transcript.update(tweaked_key);
        self.transcript.update([odd as u8]);
        self.transcript
            .update(compressed(&internal_key.to_bytes(), Choice::from(0)));
        self.transcript.update(tweak);
        let a = self.randomizer();

        // a·(P + t·G - Q) = 0
        self.push(
            (a, ProjectivePoint::from(*internal_key.as_affine())),
            (-a, ProjectivePoint::from(q)),
        )?;
        self.generator += a * &t;
        Ok(())
    }

    /// Checks every added term at once.
    ///
    /// Returns `true` for an empty batch, and `false` if any term was
    /// rejected when it was added.
    pub fn verify(mut self) -> bool {
        if !self.valid {
            return false;
        }
        if self.len == 0 {
            return true;
        }

        match lincomb_vartime(self.terms.allocated(), &self.generator, &mut self.scratch) {
            Ok(sum) => sum.is_identity().into(),
            Err(_) => false,
        }
    }

    /// Scalar from the digest of the transcript so far.
    fn randomizer(&self) -> Scalar {
        Scalar::from_bytes_reduced(&self.transcript.clone().finalize())
    }

    fn push(
        &mut self,
        first: (Scalar, ProjectivePoint),
        second: (Scalar, ProjectivePoint),
    ) -> Result<()> {
        let range = self
            .terms
            .alloc(POINTS_PER_TERM)
            .map_err(|_| Error::BatchFull)?;
        let slots = self.terms.get_mut(range);
        slots[0] = first;
        slots[1] = second;
        self.len += 1;
        Ok(())
    }

    fn poison(&mut self, err: Error) -> Result<()> {
        self.valid = false;
        Err(err)
    }
}

/// SEC1 compressed encoding of an x-coordinate with the given y-parity.
fn compressed(x: &[u8; 32], odd: Choice) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[0] = 0x02 | odd.unwrap_u8();
    out[1..].copy_from_slice(x);
    out
}
