//! secp256k1 test vectors

pub mod field;
pub mod group;
pub mod privkey;
