#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! use secp256k1_tweak::{Capabilities, Context, Error};
//!
//! let ctx = Context::new(Capabilities::SIGN | Capabilities::VERIFY)?;
//!
//! let mut key = [0x11u8; 32];
//! assert!(ctx.validate_private_key(&key));
//!
//! ctx.tweak_add_private_key(&mut key, &[0xaa; 32])?;
//! ctx.tweak_mul_private_key(&mut key, &[0xaa; 32])?;
//! assert!(ctx.validate_private_key(&key));
//!
//! // Sizes are checked before the key's value.
//! assert_eq!(
//!     ctx.tweak_add_private_key(&mut [0u8; 33], &[0xaa; 32]),
//!     Err(Error::PrivateKeySize)
//! );
//! # Ok::<(), Error>(())
//! ```

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;

#[cfg(any(feature = "test-vectors", test))]
pub mod test_vectors;

mod context;
mod error;
mod tweak;

pub use crate::{
    arithmetic::{AffinePoint, FieldElement, ProjectivePoint, Scalar},
    context::{Capabilities, Context},
    error::{Error, Result},
};
pub use elliptic_curve::{self, bigint::U256, subtle, zeroize};

use elliptic_curve::{
    FieldBytesEncoding,
    consts::{U32, U33},
    generic_array::GenericArray,
};

/// Order of the secp256k1 group of points.
const ORDER_HEX: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// secp256k1 (K-256) elliptic curve.
///
/// Specified in Certicom's SECG in "SEC 2: Recommended Elliptic Curve Domain
/// Parameters": <https://www.secg.org/sec2-v2.pdf>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Secp256k1;

impl elliptic_curve::Curve for Secp256k1 {
    /// 32-byte serialized field elements.
    type FieldBytesSize = U32;

    /// 256-bit field modulus.
    type Uint = U256;

    /// Curve order.
    const ORDER: U256 = U256::from_be_hex(ORDER_HEX);
}

impl elliptic_curve::PrimeCurve for Secp256k1 {}

impl FieldBytesEncoding<Secp256k1> for U256 {}

/// Big-endian encoding of a field element or scalar: 32 bytes.
pub type FieldBytes = elliptic_curve::FieldBytes<Secp256k1>;

/// SEC1 compressed point encoding: a parity tag followed by `x`.
pub type CompressedPoint = GenericArray<u8, U33>;

/// Non-zero secp256k1 scalar.
pub type NonZeroScalar = elliptic_curve::NonZeroScalar<Secp256k1>;

/// secp256k1 secret key: a scalar in `[1, n - 1]`, zeroized on drop.
pub type SecretKey = elliptic_curve::SecretKey<Secp256k1>;

/// secp256k1 public key: a curve point other than the identity.
pub type PublicKey = elliptic_curve::PublicKey<Secp256k1>;
