//! BIP-340 tagged hashes.
//!
//! `TaggedHash(tag, m) = SHA256(SHA256(tag) ‖ SHA256(tag) ‖ m)`. Distinct tags
//! keep hashes computed for one purpose from being valid for another.

use sha2::{Digest, Sha256};

/// Tag for masking the secret key with auxiliary randomness.
pub const AUX_TAG: &[u8] = b"BIP0340/aux";

/// Tag for deriving the BIP-340 nonce.
pub const NONCE_TAG: &[u8] = b"BIP0340/nonce";

/// Tag for the BIP-340 challenge `e`.
pub const CHALLENGE_TAG: &[u8] = b"BIP0340/challenge";

/// Tag for the batch verification randomizer transcript.
pub const BATCH_TAG: &[u8] = b"BIP0340/batch";

/// Returns a SHA-256 state that has already absorbed `SHA256(tag)` twice.
///
/// Feed the message with [`Digest::update`] and finish with
/// [`Digest::finalize`].
pub fn tagged_hash(tag: &[u8]) -> Sha256 {
    let tag_hash = Sha256::digest(tag);
    let mut digest = Sha256::new();
    digest.update(tag_hash);
    digest.update(tag_hash);
    digest
}

#[cfg(test)]
mod tests {
    use super::{tagged_hash, AUX_TAG, BATCH_TAG, CHALLENGE_TAG, NONCE_TAG};
    use hex_literal::hex;
    use sha2::{Digest, Sha256};

    #[test]
    fn aux_hash_of_zero_bytes() {
        let mask = tagged_hash(AUX_TAG).chain_update([0u8; 32]).finalize();
        assert_eq!(
            mask.as_slice(),
            hex!("54F169CFC9E2E5727480441F90BA25C488F461C70B5EA5DCAAF7AF69270AA514")
        );
    }

    #[test]
    fn matches_definition() {
        let msg = b"tagged hash message";
        for tag in [AUX_TAG, NONCE_TAG, CHALLENGE_TAG, BATCH_TAG] {
            let tag_hash = Sha256::digest(tag);
            let expected = Sha256::new()
                .chain_update(tag_hash)
                .chain_update(tag_hash)
                .chain_update(msg)
                .finalize();
            assert_eq!(tagged_hash(tag).chain_update(msg).finalize(), expected);
        }
    }

    #[test]
    fn tags_separate_domains() {
        let a = tagged_hash(NONCE_TAG).chain_update([1u8; 32]).finalize();
        let b = tagged_hash(CHALLENGE_TAG).chain_update([1u8; 32]).finalize();
        assert_ne!(a, b);
    }
}
