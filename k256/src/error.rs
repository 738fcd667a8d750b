//! Error types.

use core::fmt;

/// Result type with the `k256-batch` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by parsing, signing and batching.
///
/// Variants are grouped by cause: malformed inputs, signing failures, and
/// resource exhaustion. Signature *verification* never produces an `Error`;
/// it returns `false`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Secret key is zero or not below the curve order.
    InvalidSecretKey,

    /// Public key encoding is malformed, off the curve, or the identity.
    InvalidPublicKey,

    /// Signature encoding is malformed or has an out-of-range component.
    InvalidSignature,

    /// Tweak is not below the curve order, or tweaking produced the identity.
    InvalidTweak,

    /// The nonce function failed or produced no usable nonce.
    NonceGeneration,

    /// The batch context already holds as many terms as it was created for.
    BatchFull,

    /// A scratch arena has no room left for the requested allocation.
    ScratchExhausted,

    /// Reserving heap memory for scratch space failed.
    Allocation,
}

impl Error {
    /// Is this a resource error (as opposed to invalid input)?
    ///
    /// Callers may retry resource errors with a larger batch or more memory.
    pub fn is_resource_error(self) -> bool {
        matches!(
            self,
            Error::BatchFull | Error::ScratchExhausted | Error::Allocation
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidSecretKey => "invalid secret key",
            Error::InvalidPublicKey => "invalid public key",
            Error::InvalidSignature => "invalid signature encoding",
            Error::InvalidTweak => "invalid tweak",
            Error::NonceGeneration => "nonce generation failed",
            Error::BatchFull => "batch context capacity exceeded",
            Error::ScratchExhausted => "scratch space exhausted",
            Error::Allocation => "scratch space allocation failed",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ecdsa_core::Error> for Error {
    fn from(_: ecdsa_core::Error) -> Error {
        Error::InvalidSignature
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn resource_errors_are_distinct_from_invalid_input() {
        assert!(Error::BatchFull.is_resource_error());
        assert!(Error::Allocation.is_resource_error());
        assert!(Error::ScratchExhausted.is_resource_error());
        assert!(!Error::InvalidSignature.is_resource_error());
        assert!(!Error::InvalidPublicKey.is_resource_error());
    }
}
