//! Private and public key tweaking over caller-provided buffers.
//!
//! Every private-key operation checks its inputs in this order, reporting the
//! first failure: key length ([`Error::PrivateKeySize`]), tweak length
//! ([`Error::TweakSize`]), key range ([`Error::InvalidPrivateKey`]) and finally
//! a zero result ([`Error::TweakResultInvalid`]).
//!
//! Once both lengths are known the arithmetic and the write-back into the key
//! buffer always run, whatever the key's value. The buffer ends up holding the
//! tweaked key on success and 32 zero bytes on a range or result failure. A
//! length failure leaves it untouched.

use crate::{
    Capabilities, Context, Error, FieldBytes, NonZeroScalar, PublicKey, Result, SecretKey,
    arithmetic::Scalar,
};
use elliptic_curve::{
    bigint::U256,
    ops::Reduce,
    subtle::{Choice, ConditionallySelectable},
    zeroize::Zeroize,
};

impl Context {
    /// Is `key` a valid private key: exactly 32 bytes encoding an integer in
    /// `[1, n - 1]`?
    pub fn validate_private_key(&self, key: &[u8]) -> bool {
        match <&[u8; 32]>::try_from(key) {
            Ok(bytes) => {
                let (mut scalar, is_valid) = decode_secret(FieldBytes::from_slice(bytes));
                scalar.zeroize();
                is_valid.into()
            }
            Err(_) => false,
        }
    }

    /// Replace `key` with `key + tweak mod n`.
    ///
    /// The tweak is reduced modulo the group order rather than rejected.
    pub fn tweak_add_private_key(&self, key: &mut [u8], tweak: &[u8]) -> Result<()> {
        tweak_private_key(key, tweak, |k, t| k + t)
    }

    /// Replace `key` with `key * tweak mod n`.
    ///
    /// The tweak is reduced modulo the group order rather than rejected.
    pub fn tweak_mul_private_key(&self, key: &mut [u8], tweak: &[u8]) -> Result<()> {
        tweak_private_key(key, tweak, |k, t| k * t)
    }

    /// Replace `key` with `n - key`.
    pub fn negate_private_key(&self, key: &mut [u8]) -> Result<()> {
        let key = <&mut [u8; 32]>::try_from(key).map_err(|_| Error::PrivateKeySize)?;

        let (mut scalar, is_valid) = decode_secret(FieldBytes::from_slice(key));
        let mut result = -scalar;
        write_back(key, &result, is_valid);
        scalar.zeroize();
        result.zeroize();

        if bool::from(is_valid) {
            Ok(())
        } else {
            Err(Error::InvalidPrivateKey)
        }
    }

    /// Returns `secret_key + tweak mod n`.
    ///
    /// The tweak is reduced modulo the group order rather than rejected.
    pub fn tweak_add_secret_key(
        &self,
        secret_key: &SecretKey,
        tweak: &FieldBytes,
    ) -> Result<SecretKey> {
        tweak_secret_key(secret_key, tweak, |k, t| k + t)
    }

    /// Returns `secret_key * tweak mod n`.
    ///
    /// The tweak is reduced modulo the group order rather than rejected.
    pub fn tweak_mul_secret_key(
        &self,
        secret_key: &SecretKey,
        tweak: &FieldBytes,
    ) -> Result<SecretKey> {
        tweak_secret_key(secret_key, tweak, |k, t| k * t)
    }

    /// Compute the public key of `secret_key` with the blinded generator table.
    ///
    /// Requires [`Capabilities::SIGN`].
    pub fn public_key(&self, secret_key: &SecretKey) -> Result<PublicKey> {
        let mut k: Scalar = *secret_key.to_nonzero_scalar();
        let point = self.mul_generator(&k);
        k.zeroize();

        PublicKey::from_affine(point?.to_affine()).map_err(|_| Error::InvalidPublicKey)
    }

    /// Compute the public key of the private key `key`.
    ///
    /// Requires [`Capabilities::SIGN`].
    pub fn create_public_key(&self, key: &[u8]) -> Result<PublicKey> {
        self.require(Capabilities::SIGN)?;
        let key = <&[u8; 32]>::try_from(key).map_err(|_| Error::PrivateKeySize)?;
        let secret_key = SecretKey::from_bytes(FieldBytes::from_slice(key))
            .map_err(|_| Error::InvalidPrivateKey)?;
        self.public_key(&secret_key)
    }

    /// Replace `public_key` with `public_key + tweak * G`.
    ///
    /// Requires [`Capabilities::VERIFY`]. On failure `public_key` is left
    /// untouched.
    pub fn tweak_add_public_key(
        &self,
        public_key: &mut PublicKey,
        tweak: &[u8],
    ) -> Result<()> {
        self.require(Capabilities::VERIFY)?;
        let tweak = decode_tweak(tweak)?;

        let point = public_key.to_projective() + &self.mul_generator_vartime(&tweak)?;
        *public_key =
            PublicKey::from_affine(point.to_affine()).map_err(|_| Error::TweakResultInvalid)?;
        Ok(())
    }

    /// Replace `public_key` with `tweak * public_key`.
    ///
    /// Requires [`Capabilities::VERIFY`]. On failure `public_key` is left
    /// untouched.
    pub fn tweak_mul_public_key(
        &self,
        public_key: &mut PublicKey,
        tweak: &[u8],
    ) -> Result<()> {
        self.require(Capabilities::VERIFY)?;
        let tweak = decode_tweak(tweak)?;

        if bool::from(tweak.is_zero()) {
            return Err(Error::TweakResultInvalid);
        }

        let point = public_key.to_projective() * &tweak;
        *public_key =
            PublicKey::from_affine(point.to_affine()).map_err(|_| Error::TweakResultInvalid)?;
        Ok(())
    }
}

/// Decode `bytes` as a scalar, flagging whether it is a valid secret key.
///
/// Runs in constant time; an out-of-range encoding decodes to zero.
fn decode_secret(bytes: &FieldBytes) -> (Scalar, Choice) {
    let scalar = Scalar::from_bytes(bytes);
    let is_canonical = scalar.is_some();
    let scalar = scalar.unwrap_or(Scalar::ZERO);
    (scalar, is_canonical & !scalar.is_zero())
}

fn reduce_tweak(tweak: &FieldBytes) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(tweak)
}

fn decode_tweak(tweak: &[u8]) -> Result<Scalar> {
    <&[u8; 32]>::try_from(tweak)
        .map(|bytes| reduce_tweak(FieldBytes::from_slice(bytes)))
        .map_err(|_| Error::TweakSize)
}

fn tweak_private_key(
    key: &mut [u8],
    tweak: &[u8],
    op: impl FnOnce(&Scalar, &Scalar) -> Scalar,
) -> Result<()> {
    let key = <&mut [u8; 32]>::try_from(key).map_err(|_| Error::PrivateKeySize)?;
    let mut tweak = decode_tweak(tweak)?;

    let (mut scalar, key_is_valid) = decode_secret(FieldBytes::from_slice(key));
    let mut result = op(&scalar, &tweak);
    let result_is_valid = !result.is_zero();

    write_back(key, &result, key_is_valid & result_is_valid);
    scalar.zeroize();
    tweak.zeroize();
    result.zeroize();

    if !bool::from(key_is_valid) {
        Err(Error::InvalidPrivateKey)
    } else if !bool::from(result_is_valid) {
        Err(Error::TweakResultInvalid)
    } else {
        Ok(())
    }
}

fn tweak_secret_key(
    secret_key: &SecretKey,
    tweak: &FieldBytes,
    op: impl FnOnce(&Scalar, &Scalar) -> Scalar,
) -> Result<SecretKey> {
    let mut k: Scalar = *secret_key.to_nonzero_scalar();
    let mut t = reduce_tweak(tweak);
    let mut result = op(&k, &t);
    let tweaked = Option::<NonZeroScalar>::from(NonZeroScalar::new(result));

    k.zeroize();
    t.zeroize();
    result.zeroize();

    tweaked
        .map(SecretKey::from)
        .ok_or(Error::TweakResultInvalid)
}

/// Overwrite `key` with `result` if `is_valid`, else with zeros.
fn write_back(key: &mut [u8; 32], result: &Scalar, is_valid: Choice) {
    let mut bytes = result.to_bytes();
    for (dst, src) in key.iter_mut().zip(bytes.iter()) {
        *dst = u8::conditional_select(&0, src, is_valid);
    }
    bytes.as_mut_slice().zeroize();
}
