//! Scalar arithmetic modulo the secp256k1 group order n.

use super::util::{
    adc, add_mod, limbs_from_be_bytes, limbs_to_be_bytes, mac, mul_wide, select4, sub_mod, sub4,
};
use crate::{Error, FieldBytes, Secp256k1};
use core::{cmp::Ordering, ops::ShrAssign};
use elliptic_curve::{
    NonZeroScalar, ScalarPrimitive,
    bigint::{ArrayEncoding, U256},
    ff::{self, Field, PrimeField},
    ops::{Invert, Reduce},
    rand_core::RngCore,
    scalar::{FromUintUnchecked, IsHigh},
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub(crate) const MODULUS: [u64; 4] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 - n, a 129-bit value.
const NEG_MODULUS: [u64; 3] = [0x402D_A173_2FC9_BEBF, 0x4551_2319_50B7_5FC4, 0x1];

/// floor(n / 2)
const FRAC_MODULUS_2: [u64; 4] = [
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
];

/// n - 2, the inversion exponent.
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xBFD2_5E8C_D036_413F,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// (t - 1) / 2 where n - 1 = 2^6 * t, for Tonelli-Shanks.
const T_MINUS_ONE_DIV_TWO: [u64; 4] = [
    0x777F_A4BD_19A0_6C82,
    0xFD75_5DB9_CD5E_9140,
    0xFFFF_FFFF_FFFF_FFFF,
    0x01FF_FFFF_FFFF_FFFF,
];

/// An element of the scalar field modulo n: private keys, tweaks and
/// multipliers of curve points.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Creates a scalar from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Attempts to parse a big-endian 32-byte integer as a scalar.
    ///
    /// Returns None if the integer is not in the range [0, n).
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let limbs = limbs_from_be_bytes(bytes);
        let (_, borrow) = sub4(&limbs, &MODULUS);
        CtOption::new(Self(limbs), Choice::from(borrow as u8))
    }

    /// Returns the canonical big-endian encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        limbs_to_be_bytes(&self.0)
    }

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is this scalar odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Is this scalar greater than n / 2?
    pub fn is_high(&self) -> Choice {
        let (_, borrow) = sub4(&FRAC_MODULUS_2, &self.0);
        Choice::from(borrow as u8)
    }

    /// Returns the 4-bit window of this scalar starting at bit `4 * index`.
    #[inline(always)]
    pub(crate) fn nibble(&self, index: usize) -> u8 {
        ((self.0[index / 16] >> ((index % 16) * 4)) & 0xf) as u8
    }

    /// Returns `self + rhs mod n`.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Returns `2 * self mod n`.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - rhs mod n`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Returns `-self mod n`.
    pub const fn negate(&self) -> Self {
        Self::ZERO.sub(self)
    }

    /// Returns `self * rhs mod n`.
    pub const fn mul(&self, rhs: &Self) -> Self {
        Self(reduce_wide(&mul_wide(&self.0, &rhs.0)))
    }

    /// Returns `self * self mod n`.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow_vartime(MODULUS_MINUS_TWO), !self.is_zero())
    }

    /// Right shift by `shift` bits.
    ///
    /// Variable time with respect to `shift`.
    pub fn shr_vartime(&self, shift: usize) -> Self {
        let mut res = [0u64; 4];
        if shift >= 256 {
            return Self(res);
        }

        let (limbs, bits) = (shift / 64, shift % 64);
        for (i, limb) in res.iter_mut().enumerate().take(4 - limbs) {
            let lo = self.0[i + limbs] >> bits;
            let hi = if bits > 0 && i + limbs + 1 < 4 {
                self.0[i + limbs + 1] << (64 - bits)
            } else {
                0
            };
            *limb = lo | hi;
        }

        Self(res)
    }
}

/// Computes `lo + hi * (2^256 - n)` for the two halves of `w`, which is congruent
/// to `w` modulo n.
const fn fold(w: &[u64; 8]) -> [u64; 8] {
    let mut r = [w[0], w[1], w[2], w[3], 0, 0, 0, 0];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 3 {
            let (lo, hi) = mac(r[i + j], w[4 + i], NEG_MODULUS[j], carry);
            r[i + j] = lo;
            carry = hi;
            j += 1;
        }
        let mut k = i + 3;
        while k < 8 {
            let (lo, hi) = adc(r[k], carry, 0);
            r[k] = lo;
            carry = hi;
            k += 1;
        }
        i += 1;
    }
    r
}

/// Reduces a 512-bit product modulo n.
///
/// Each fold shrinks the excess above 2^256 by roughly 127 bits. After four folds the
/// value fits in 256 bits, and one masked subtraction brings it below n.
const fn reduce_wide(w: &[u64; 8]) -> [u64; 4] {
    let w = fold(w); // < 2^386
    let w = fold(&w); // < 2^260
    let w = fold(&w); // < 2^256 + 2^133
    let w = fold(&w); // < 2^256
    let r = [w[0], w[1], w[2], w[3]];
    let (reduced, borrow) = sub4(&r, &MODULUS);
    select4(&reduced, &r, 0u64.wrapping_sub(borrow))
}

impl Field for Scalar {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = FieldBytes::default();

        // Rejection sampling; n is close enough to 2^256 that this rarely loops.
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(scalar) = Option::<Self>::from(Self::from_bytes(&bytes)) {
                return scalar;
            }
        }
    }

    fn is_zero(&self) -> Choice {
        Self::is_zero(self)
    }

    #[must_use]
    fn square(&self) -> Self {
        Self::square(self)
    }

    #[must_use]
    fn double(&self) -> Self {
        Self::double(self)
    }

    fn invert(&self) -> CtOption<Self> {
        Self::invert(self)
    }

    fn sqrt(&self) -> CtOption<Self> {
        ff::helpers::sqrt_tonelli_shanks(self, T_MINUS_ONE_DIV_TWO)
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl PrimeField for Scalar {
    type Repr = FieldBytes;

    const MODULUS: &'static str =
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self = Self([
        0xDFE9_2F46_681B_20A1,
        0x5D57_6E73_57A4_501D,
        0xFFFF_FFFF_FFFF_FFFF,
        0x7FFF_FFFF_FFFF_FFFF,
    ]);
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(7);
    const S: u32 = 6;
    const ROOT_OF_UNITY: Self = Self([
        0x992F_4B54_02B0_52F2,
        0x98BD_EAB6_8075_6045,
        0xDF98_79A3_FBC4_83A8,
        0x0C1D_C060_E7A9_1986,
    ]);
    const ROOT_OF_UNITY_INV: Self = Self([
        0xB6FB_30A0_884F_0D1C,
        0x77A2_7591_0AA4_13C3,
        0xEFC7_B0C7_5B8C_BB72,
        0xFD3A_E181_F12D_7096,
    ]);
    const DELTA: Self = Self([
        0x1994_17C8_C0BB_7601,
        0xD63B_78E7_80E1_341E,
        0x000C_BC21_FE45_61C8,
        0x0000_0000_0000_0000,
    ]);

    fn from_repr(repr: FieldBytes) -> CtOption<Self> {
        Self::from_bytes(&repr)
    }

    fn to_repr(&self) -> FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        Self::is_odd(self)
    }
}

impl Reduce<U256> for Scalar {
    type Bytes = FieldBytes;

    fn reduce(n: U256) -> Self {
        Self::reduce_bytes(&n.to_be_byte_array())
    }

    /// Reduces a big-endian integer modulo n. Any value in [n, 2^256) maps to
    /// `value - n`.
    fn reduce_bytes(bytes: &FieldBytes) -> Self {
        let limbs = limbs_from_be_bytes(bytes);
        let (reduced, borrow) = sub4(&limbs, &MODULUS);
        Self(select4(&reduced, &limbs, 0u64.wrapping_sub(borrow)))
    }
}

impl IsHigh for Scalar {
    fn is_high(&self) -> Choice {
        Self::is_high(self)
    }
}

impl Invert for Scalar {
    type Output = CtOption<Self>;

    fn invert(&self) -> CtOption<Self> {
        Self::invert(self)
    }
}

impl ShrAssign<usize> for Scalar {
    fn shr_assign(&mut self, shift: usize) {
        *self = self.shr_vartime(shift);
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl AsRef<Scalar> for Scalar {
    fn as_ref(&self) -> &Scalar {
        self
    }
}

impl DefaultIsZeroes for Scalar {}

impl From<u64> for Scalar {
    fn from(k: u64) -> Self {
        Self::from_u64(k)
    }
}

impl From<NonZeroScalar<Secp256k1>> for Scalar {
    fn from(scalar: NonZeroScalar<Secp256k1>) -> Self {
        *scalar.as_ref()
    }
}

impl From<ScalarPrimitive<Secp256k1>> for Scalar {
    fn from(scalar: ScalarPrimitive<Secp256k1>) -> Self {
        // Always below n.
        Self(limbs_from_be_bytes(&scalar.as_uint().to_be_byte_array()))
    }
}

impl FromUintUnchecked for Scalar {
    type Uint = U256;

    fn from_uint_unchecked(uint: U256) -> Self {
        Self(limbs_from_be_bytes(&uint.to_be_byte_array()))
    }
}

impl From<Scalar> for ScalarPrimitive<Secp256k1> {
    fn from(scalar: Scalar) -> ScalarPrimitive<Secp256k1> {
        ScalarPrimitive::new(scalar.into()).unwrap_or(ScalarPrimitive::ZERO)
    }
}

impl From<Scalar> for FieldBytes {
    fn from(scalar: Scalar) -> Self {
        scalar.to_bytes()
    }
}

impl From<&Scalar> for FieldBytes {
    fn from(scalar: &Scalar) -> Self {
        scalar.to_bytes()
    }
}

impl From<Scalar> for U256 {
    fn from(scalar: Scalar) -> Self {
        U256::from_be_byte_array(scalar.to_bytes())
    }
}

impl TryFrom<FieldBytes> for Scalar {
    type Error = Error;

    fn try_from(bytes: FieldBytes) -> Result<Self, Error> {
        Option::from(Self::from_bytes(&bytes)).ok_or(Error::OutOfRange)
    }
}

impl_binops!(Scalar);
impl_sum_product!(Scalar);

#[cfg(test)]
mod tests {
    use super::{FRAC_MODULUS_2, MODULUS, Scalar};
    use crate::{
        FieldBytes, Secp256k1,
        arithmetic::util::test_util::{biguint_to_bytes, bytes_to_biguint},
    };
    use elliptic_curve::{
        Curve, NonZeroScalar, ScalarPrimitive,
        bigint::{ArrayEncoding, U256},
        ff::{Field, PrimeField},
        ops::Reduce,
    };
    use hex_literal::hex;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    const ORDER_BYTES: [u8; 32] =
        hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

    fn reduce(bytes: &[u8; 32]) -> Scalar {
        <Scalar as Reduce<U256>>::reduce_bytes(&(*bytes).into())
    }

    fn order() -> BigUint {
        BigUint::from_bytes_be(&ORDER_BYTES)
    }

    fn to_biguint(s: &Scalar) -> BigUint {
        bytes_to_biguint(&s.to_bytes())
    }

    fn from_biguint(x: &BigUint) -> Scalar {
        Scalar::from_bytes(&biguint_to_bytes(x)).unwrap()
    }

    #[test]
    fn from_bytes_rejects_order() {
        assert!(bool::from(Scalar::from_bytes(&ORDER_BYTES.into()).is_none()));
        assert!(bool::from(Scalar::from_bytes(&[0xff; 32].into()).is_none()));

        let mut n_minus_one = ORDER_BYTES;
        n_minus_one[31] -= 1;
        let s = Scalar::from_bytes(&n_minus_one.into()).unwrap();
        assert_eq!(s + Scalar::ONE, Scalar::ZERO);
    }

    #[test]
    fn order_matches_curve() {
        assert_eq!(
            Secp256k1::ORDER.to_be_byte_array(),
            FieldBytes::from(ORDER_BYTES)
        );
        assert_eq!(U256::from(-Scalar::ONE), Secp256k1::ORDER.wrapping_sub(&U256::ONE));
    }

    #[test]
    fn reduce_wraps() {
        assert_eq!(reduce(&ORDER_BYTES), Scalar::ZERO);

        let mut n_plus_five = ORDER_BYTES;
        n_plus_five[31] += 5;
        assert_eq!(reduce(&n_plus_five), Scalar::from(5));

        // 2^256 - 1 reduces to 2^256 - 1 - n
        let max = reduce(&[0xff; 32]);
        let expected = (BigUint::from(1u8) << 256u32) - 1u8 - order();
        assert_eq!(to_biguint(&max), expected);

        assert_eq!(<Scalar as Reduce<U256>>::reduce(U256::MAX), max);
        assert_eq!(<Scalar as Reduce<U256>>::reduce(Secp256k1::ORDER), Scalar::ZERO);
    }

    #[test]
    fn primitive_conversions() {
        let s = Scalar::from(0xdead_beef);
        let primitive = ScalarPrimitive::<Secp256k1>::from(s);
        assert_eq!(Scalar::from(primitive), s);

        let nonzero = NonZeroScalar::<Secp256k1>::new(s).unwrap();
        assert_eq!(Scalar::from(nonzero), s);
        assert!(bool::from(NonZeroScalar::<Secp256k1>::new(Scalar::ZERO).is_none()));

        assert_eq!(FieldBytes::from(s), s.to_repr());
    }

    #[test]
    fn prime_field_constants() {
        assert_eq!(Scalar::TWO_INV * Scalar::from(2), Scalar::ONE);

        // ROOT_OF_UNITY has order exactly 2^S.
        let mut root = Scalar::ROOT_OF_UNITY;
        for _ in 0..Scalar::S - 1 {
            root = root.square();
        }
        assert_eq!(root, -Scalar::ONE);
        assert_eq!(root.square(), Scalar::ONE);
        assert_eq!(Scalar::ROOT_OF_UNITY * Scalar::ROOT_OF_UNITY_INV, Scalar::ONE);

        let mut delta = Scalar::MULTIPLICATIVE_GENERATOR;
        for _ in 0..Scalar::S {
            delta = delta.square();
        }
        assert_eq!(delta, Scalar::DELTA);
    }

    #[test]
    fn sqrt() {
        for k in [0u64, 1, 4, 9, 1234567] {
            let s = Scalar::from(k).square();
            let root = s.sqrt().unwrap();
            assert_eq!(root.square(), s);
        }
        assert!(bool::from(Scalar::MULTIPLICATIVE_GENERATOR.sqrt().is_none()));
    }

    #[test]
    fn shift_right() {
        let s = reduce(&hex!(
            "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF"
        ));
        let mut shifted = s;
        shifted >>= 4;
        assert_eq!(
            shifted,
            reduce(&hex!(
                "00123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDE"
            ))
        );
        assert_eq!(s.shr_vartime(64).0, [s.0[1], s.0[2], s.0[3], 0]);
        assert_eq!(s.shr_vartime(256), Scalar::ZERO);
        assert_eq!(s.shr_vartime(0), s);
    }

    #[test]
    fn ordering() {
        assert!(Scalar::ZERO < Scalar::ONE);
        assert!(Scalar::from(u64::MAX) < Scalar([0, 1, 0, 0]));
        assert!(-Scalar::ONE > Scalar::from(u64::MAX));
    }

    #[test]
    fn random_is_canonical() {
        let s = Scalar::random(&mut rand_core::OsRng);
        assert_eq!(Scalar::from_repr(s.to_repr()).unwrap(), s);
    }

    #[test]
    fn is_high() {
        assert!(!bool::from(Scalar::ZERO.is_high()));
        assert!(!bool::from(Scalar(FRAC_MODULUS_2).is_high()));
        assert!(bool::from((Scalar(FRAC_MODULUS_2) + Scalar::ONE).is_high()));
        assert!(bool::from((-Scalar::ONE).is_high()));
    }

    #[test]
    fn negate() {
        assert_eq!(-Scalar::ZERO, Scalar::ZERO);

        let mut n_minus_one = MODULUS;
        n_minus_one[0] -= 1;
        assert_eq!((-Scalar::ONE).0, n_minus_one);
        assert_eq!(-Scalar(n_minus_one), Scalar::ONE);
    }

    #[test]
    fn mul_wraps_at_order() {
        // (n - 1)^2 = 1 mod n
        let minus_one = -Scalar::ONE;
        assert_eq!(minus_one * minus_one, Scalar::ONE);
        assert_eq!(minus_one.square(), Scalar::ONE);
    }

    #[test]
    fn invert() {
        assert!(bool::from(Scalar::ZERO.invert().is_none()));
        let three = Scalar::from(3);
        assert_eq!(three * three.invert().unwrap(), Scalar::ONE);
    }

    #[test]
    fn nibbles_cover_encoding() {
        let s = reduce(&hex!(
            "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF"
        ));
        assert_eq!(s.nibble(0), 0xF);
        assert_eq!(s.nibble(1), 0xE);
        assert_eq!(s.nibble(63), 0x0);
        assert_eq!(s.nibble(62), 0x1);
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
            reduce(&bytes)
        }
    }

    proptest! {
        #[test]
        fn fuzzy_add(a in scalar(), b in scalar()) {
            let res_bi = (to_biguint(&a) + to_biguint(&b)) % order();
            prop_assert_eq!(a + b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_sub(a in scalar(), b in scalar()) {
            let n = order();
            let res_bi = (&n + to_biguint(&a) - to_biguint(&b)) % &n;
            prop_assert_eq!(a - b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_mul(a in scalar(), b in scalar()) {
            let res_bi = (to_biguint(&a) * to_biguint(&b)) % order();
            prop_assert_eq!(a * b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_reduction(bytes in any::<[u8; 32]>()) {
            let res_bi = bytes_to_biguint(&bytes) % order();
            prop_assert_eq!(reduce(&bytes), from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_invert(a in scalar()) {
            let a = if bool::from(a.is_zero()) { Scalar::ONE } else { a };
            prop_assert_eq!(a * a.invert().unwrap(), Scalar::ONE);
        }

        #[test]
        fn fuzzy_encoding_round_trip(a in scalar()) {
            prop_assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
        }
    }
}
