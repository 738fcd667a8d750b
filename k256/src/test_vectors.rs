//! secp256k1 test vectors

pub mod bip340;
pub mod ecdsa;
pub mod group;
