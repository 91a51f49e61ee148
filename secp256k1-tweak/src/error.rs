//! Error type

use core::fmt::{self, Display};

/// Result type with the `secp256k1-tweak` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Private key and context errors.
///
/// When an operation could fail for several reasons, the first one in this
/// order is reported: [`Error::PrivateKeySize`], [`Error::TweakSize`],
/// [`Error::InvalidPrivateKey`], [`Error::TweakResultInvalid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// Private key buffer is not exactly 32 bytes.
    PrivateKeySize,

    /// Tweak buffer is not exactly 32 bytes.
    TweakSize,

    /// Private key is zero or not less than the group order.
    InvalidPrivateKey,

    /// Tweaked private key would be zero.
    TweakResultInvalid,

    /// Context could not be created.
    ContextCreation,

    /// Encoded integer is not less than its modulus.
    OutOfRange,

    /// Context lacks the capability required by the operation.
    MissingCapability,

    /// Public key is not a point on the curve, or is the identity.
    InvalidPublicKey,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::PrivateKeySize => "private key must be 32 bytes",
            Error::TweakSize => "tweak must be 32 bytes",
            Error::InvalidPrivateKey => "invalid private key",
            Error::TweakResultInvalid => "tweak produced an invalid private key",
            Error::ContextCreation => "context creation failed",
            Error::OutOfRange => "value out of range",
            Error::MissingCapability => "context lacks the required capability",
            Error::InvalidPublicKey => "invalid public key",
        })
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;
    use alloc::string::ToString;

    #[test]
    fn display() {
        assert_eq!(Error::TweakSize.to_string(), "tweak must be 32 bytes");
        assert_eq!(
            Error::PrivateKeySize.to_string(),
            "private key must be 32 bytes"
        );
    }
}
