//! Pure Rust implementation of the [secp256k1] (K-256) elliptic curve
//! signature kernel, including
//! [Elliptic Curve Digital Signature Algorithm (ECDSA)][ECDSA] signing and
//! verification, [BIP-340] Schnorr signatures, and randomized batch
//! verification of many Schnorr signatures (or x-only tweak checks) with a
//! single multi-scalar multiplication.
//!
//! ## About secp256k1 (K-256)
//!
//! secp256k1 is a Koblitz curve commonly used in cryptocurrency applications.
//! The "K-256" name follows NIST notation where P = prime fields,
//! B = binary fields, and K = Koblitz curves.
//!
//! The curve is specified as `secp256k1` by Certicom's SECG in
//! "SEC 2: Recommended Elliptic Curve Domain Parameters":
//!
//! <https://www.secg.org/sec2-v2.pdf>
//!
//! ## Layers
//!
//! - [`FieldElement`] and [`Scalar`]: arithmetic modulo `p` and `n`.
//! - [`AffinePoint`] and [`ProjectivePoint`] (Jacobian): the group law.
//! - [`GeneratorTable`], [`lincomb_vartime`] and the `Mul` operators:
//!   constant-time and variable-time scalar multiplication.
//! - [`batch::BatchContext`]: accumulates Schnorr/tweak equations and checks
//!   them with one Strauss multi-scalar multiplication.
//! - [`ecdsa`] and [`schnorr`]: the signature protocols.
//!
//! ## ⚠️ Security Warning
//!
//! The elliptic curve arithmetic contained in this crate has never been
//! independently audited!
//!
//! This crate has been designed with the goal of ensuring that secret-dependent
//! operations are performed in constant time (using the `subtle` crate and
//! constant-time formulas). However, it has not been thoroughly assessed to ensure
//! that generated assembly is constant time on common CPU architectures.
//!
//! Verification and batching run in variable time and must only be given
//! public inputs.
//!
//! USE AT YOUR OWN RISK!
//!
//! ## Minimum Supported Rust Version
//!
//! Rust **1.65** or higher.
//!
//! Minimum supported Rust version may be changed in the future, but it will be
//! accompanied with a minor version bump.
//!
//! [secp256k1]: https://en.bitcoin.it/wiki/Secp256k1
//! [ECDSA]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
//! [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod arithmetic;
mod context;
mod error;

pub mod batch;
pub mod ecdsa;
pub mod hash;
pub mod nonce;
pub mod schnorr;

#[cfg(any(feature = "test-vectors", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-vectors")))]
pub mod test_vectors;

pub use arithmetic::{
    affine::AffinePoint,
    field::FieldElement,
    lincomb_vartime,
    mul::GeneratorTable,
    projective::ProjectivePoint,
    scalar::Scalar,
    scratch::{Arena, Checkpoint, StraussScratch},
};
pub use context::Context;
pub use error::{Error, Result};

pub use elliptic_curve::{self, generic_array, subtle, zeroize};

use elliptic_curve::{
    bigint::U256,
    generic_array::{
        typenum::{U32, U33, U65},
        GenericArray,
    },
    FieldBytesEncoding,
};

/// K-256 (secp256k1) elliptic curve.
///
/// Specified in Certicom's SECG in "SEC 2: Recommended Elliptic Curve Domain Parameters":
///
/// <https://www.secg.org/sec2-v2.pdf>
///
/// The curve's equation is `y² = x³ + 7` over a ~256-bit prime field.
///
/// It's primarily notable for usage in Bitcoin and other cryptocurrencies,
/// particularly in conjunction with the Elliptic Curve Digital Signature
/// Algorithm (ECDSA) and BIP-340 Schnorr signatures.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Secp256k1;

impl elliptic_curve::Curve for Secp256k1 {
    /// 32-byte serialized field elements.
    type FieldBytesSize = U32;

    /// 256-bit field modulus.
    type Uint = U256;

    /// Curve order.
    const ORDER: U256 =
        U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
}

impl elliptic_curve::PrimeCurve for Secp256k1 {}

impl FieldBytesEncoding<Secp256k1> for U256 {}

/// Compressed SEC1-encoded secp256k1 (K-256) curve point.
pub type CompressedPoint = GenericArray<u8, U33>;

/// Uncompressed SEC1-encoded secp256k1 (K-256) curve point.
pub type UncompressedPoint = GenericArray<u8, U65>;

/// SEC1-encoded secp256k1 (K-256) curve point.
pub type EncodedPoint = elliptic_curve::sec1::EncodedPoint<Secp256k1>;

/// secp256k1 (K-256) field element serialized as bytes.
///
/// Byte array containing a serialized field element value (base field or scalar).
pub type FieldBytes = elliptic_curve::FieldBytes<Secp256k1>;

/// secp256k1 (K-256) scalar serialized as bytes.
///
/// Inner byte value is within range of [`Secp256k1::ORDER`] when produced by
/// [`Scalar::to_bytes`].
///
/// [`Secp256k1::ORDER`]: ./struct.Secp256k1.html#associatedconstant.ORDER
pub type ScalarBytes = GenericArray<u8, U32>;
