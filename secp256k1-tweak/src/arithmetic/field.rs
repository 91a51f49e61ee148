//! Field arithmetic modulo p = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1
//!
//! Elements are kept fully reduced at all times: every operation returns the
//! canonical representative in `[0, p)`, so equality and encoding never need a
//! separate normalization step.

use super::util::{
    adc, add_mod, limbs_from_be_bytes, limbs_to_be_bytes, mac, mul_wide, select4, sub_mod, sub4,
};
use crate::{Error, FieldBytes};
use elliptic_curve::{
    ff::{self, Field, PrimeField},
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

/// p = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
const MODULUS: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 mod p = 2^32 + 977
const REDUCTION: u64 = 0x1_0000_03D1;

/// p - 2, the inversion exponent.
const P_MINUS_TWO: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2D,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// (p + 1) / 4, the square root exponent (p = 3 mod 4).
const P_PLUS_ONE_DIV_FOUR: [u64; 4] = [
    0xFFFF_FFFF_BFFF_FF0C,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x3FFF_FFFF_FFFF_FFFF,
];

/// An element in the finite field used for curve coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Creates a field element from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Attempts to parse the given byte array as an SEC1-encoded field element.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in the range
    /// [0, p).
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let limbs = limbs_from_be_bytes(bytes);
        let (_, borrow) = sub4(&limbs, &MODULUS);
        CtOption::new(Self(limbs), Choice::from(borrow as u8))
    }

    /// Returns the canonical big-endian encoding of this field element.
    pub fn to_bytes(self) -> FieldBytes {
        limbs_to_be_bytes(&self.0)
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Determine if this element is odd in the SEC1 sense: `self mod 2 == 1`.
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Returns `self + rhs mod p`.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Returns `2 * self mod p`.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - rhs mod p`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Returns `-self mod p`.
    pub const fn negate(&self) -> Self {
        Self::ZERO.sub(self)
    }

    /// Returns `self * rhs mod p`.
    pub const fn mul(&self, rhs: &Self) -> Self {
        Self(reduce_wide(&mul_wide(&self.0, &rhs.0)))
    }

    /// Returns `self * self mod p`.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    ///
    /// Computed as `self^(p - 2)` (Fermat's little theorem), with no data-dependent
    /// branches.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow_vartime(P_MINUS_TWO), !self.is_zero())
    }

    /// Returns the square root of self mod p, or `None` if no square root exists.
    pub fn sqrt(&self) -> CtOption<Self> {
        let root = self.pow_vartime(P_PLUS_ONE_DIV_FOUR);
        CtOption::new(root, root.square().ct_eq(self))
    }
}

/// Reduces a 512-bit product modulo p.
///
/// Folds the high half twice using 2^256 = 2^32 + 977 (mod p), then performs a
/// final masked subtraction of the modulus.
const fn reduce_wide(w: &[u64; 8]) -> [u64; 4] {
    // t = lo + hi * (2^32 + 977) < 2^256 + 2^289
    let (t0, carry) = mac(w[0], w[4], REDUCTION, 0);
    let (t1, carry) = mac(w[1], w[5], REDUCTION, carry);
    let (t2, carry) = mac(w[2], w[6], REDUCTION, carry);
    let (t3, t4) = mac(w[3], w[7], REDUCTION, carry);

    // r = t_lo + t4 * (2^32 + 977) < 2^256 + 2^67
    let (r0, carry) = mac(t0, t4, REDUCTION, 0);
    let (r1, carry) = adc(t1, 0, carry);
    let (r2, carry) = adc(t2, 0, carry);
    let (r3, carry) = adc(t3, 0, carry);

    // A final carry implies the low limbs are tiny, so this cannot overflow again.
    let (r0, k) = adc(r0, REDUCTION & 0u64.wrapping_sub(carry), 0);
    let (r1, k) = adc(r1, 0, k);
    let (r2, k) = adc(r2, 0, k);
    let (r3, _) = adc(r3, 0, k);

    let r = [r0, r1, r2, r3];
    let (reduced, borrow) = sub4(&r, &MODULUS);
    select4(&reduced, &r, 0u64.wrapping_sub(borrow))
}

impl Field for FieldElement {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = FieldBytes::default();

        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(fe) = Option::<Self>::from(Self::from_bytes(&bytes)) {
                return fe;
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
        Self::sqrt(self)
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl PrimeField for FieldElement {
    type Repr = FieldBytes;

    const MODULUS: &'static str =
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self = Self([
        0xFFFF_FFFF_7FFF_FE18,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0x7FFF_FFFF_FFFF_FFFF,
    ]);
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 1;
    const ROOT_OF_UNITY: Self = Self([
        0xFFFF_FFFE_FFFF_FC2E,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
    ]);
    const ROOT_OF_UNITY_INV: Self = Self::ROOT_OF_UNITY;
    const DELTA: Self = Self::from_u64(9);

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

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl TryFrom<FieldBytes> for FieldElement {
    type Error = Error;

    fn try_from(bytes: FieldBytes) -> Result<Self, Error> {
        Option::from(Self::from_bytes(&bytes)).ok_or(Error::OutOfRange)
    }
}

impl From<u64> for FieldElement {
    fn from(w: u64) -> Self {
        Self::from_u64(w)
    }
}

impl_binops!(FieldElement);
impl_sum_product!(FieldElement);

#[cfg(test)]
mod tests {
    use super::{FieldElement, MODULUS};
    use crate::{
        Error, FieldBytes,
        arithmetic::util::test_util::{biguint_to_bytes, bytes_to_biguint},
        test_vectors::field::DBL_TEST_VECTORS,
    };
    use elliptic_curve::ff::{Field, PrimeField};
    use hex_literal::hex;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn modulus() -> BigUint {
        BigUint::from_bytes_be(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F"
        ))
    }

    fn to_biguint(fe: &FieldElement) -> BigUint {
        bytes_to_biguint(&fe.to_bytes())
    }

    fn from_biguint(x: &BigUint) -> FieldElement {
        FieldElement::from_bytes(&biguint_to_bytes(x)).unwrap()
    }

    #[test]
    fn zero_is_additive_identity() {
        let zero = FieldElement::ZERO;
        let one = FieldElement::ONE;
        assert_eq!(zero + zero, zero);
        assert_eq!(one + zero, one);
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let one = FieldElement::ONE;
        assert_eq!(one * one, one);
    }

    #[test]
    fn from_bytes() {
        assert_eq!(
            FieldElement::from_bytes(&FieldBytes::default()).unwrap(),
            FieldElement::ZERO
        );

        let mut one = FieldBytes::default();
        one[31] = 1;
        assert_eq!(FieldElement::from_bytes(&one).unwrap(), FieldElement::ONE);

        let p_bytes = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
        assert!(bool::from(FieldElement::from_bytes(&p_bytes.into()).is_none()));
        assert!(bool::from(
            FieldElement::from_bytes(&[0xff; 32].into()).is_none()
        ));
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        let p_bytes = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
        assert_eq!(
            FieldElement::try_from(FieldBytes::from(p_bytes)),
            Err(Error::OutOfRange)
        );

        let p_minus_one = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2E");
        let fe = FieldElement::try_from(FieldBytes::from(p_minus_one)).unwrap();
        assert_eq!(fe + FieldElement::ONE, FieldElement::ZERO);
    }

    #[test]
    fn repeated_add() {
        let mut r = FieldElement::ONE;
        for item in DBL_TEST_VECTORS {
            assert_eq!(r.to_bytes().as_slice(), item);
            r = r + r;
        }
    }

    #[test]
    fn repeated_double() {
        let mut r = FieldElement::ONE;
        for item in DBL_TEST_VECTORS {
            assert_eq!(r.to_bytes().as_slice(), item);
            r = r.double();
        }
    }

    #[test]
    fn repeated_mul() {
        let mut r = FieldElement::ONE;
        let two = r + r;
        for item in DBL_TEST_VECTORS {
            assert_eq!(r.to_bytes().as_slice(), item);
            r = r * two;
        }
    }

    #[test]
    fn negation() {
        let two = FieldElement::ONE.double();
        let neg_two = -two;
        assert_eq!(two + neg_two, FieldElement::ZERO);
        assert_eq!(-neg_two, two);
        assert_eq!(-FieldElement::ZERO, FieldElement::ZERO);
    }

    #[test]
    fn sub_wraps_around_modulus() {
        let r = FieldElement::ZERO - FieldElement::ONE;
        let mut expected = MODULUS;
        expected[0] -= 1;
        assert_eq!(r.0, expected);
    }

    #[test]
    fn invert() {
        assert!(bool::from(FieldElement::ZERO.invert().is_none()));

        let one = FieldElement::ONE;
        assert_eq!(one.invert().unwrap(), one);

        let two = one + one;
        let inv_two = two.invert().unwrap();
        assert_eq!(two * inv_two, one);
    }

    #[test]
    fn sqrt() {
        let one = FieldElement::ONE;
        let two = one + one;
        let four = two.square();
        assert_eq!(four.sqrt().unwrap().square(), four);

        // 7 is not a square modulo p, so x = 0 is not on the curve.
        assert!(bool::from(FieldElement::from_u64(7).sqrt().is_none()));
    }

    #[test]
    fn prime_field_constants() {
        let two = FieldElement::from_u64(2);
        assert_eq!(FieldElement::TWO_INV * two, FieldElement::ONE);

        // ROOT_OF_UNITY = -1 has order 2^S = 2.
        let root = FieldElement::ROOT_OF_UNITY;
        assert_eq!(root, -FieldElement::ONE);
        assert_eq!(root.square(), FieldElement::ONE);
        assert_eq!(root * FieldElement::ROOT_OF_UNITY_INV, FieldElement::ONE);

        let generator = FieldElement::MULTIPLICATIVE_GENERATOR;
        assert_eq!(generator.square(), FieldElement::DELTA);
        // A generator of the multiplicative group is not a square.
        assert!(bool::from(generator.sqrt().is_none()));
    }

    #[test]
    fn repr_round_trip() {
        let g = FieldElement::from_u64(0x1234_5678);
        assert_eq!(FieldElement::from_repr(g.to_repr()).unwrap(), g);
        assert!(bool::from(<FieldElement as PrimeField>::is_odd(&FieldElement::ONE)));
    }

    #[test]
    fn sqrt_ratio() {
        let four = FieldElement::from_u64(4);
        let nine = FieldElement::from_u64(9);
        let (is_square, root) = FieldElement::sqrt_ratio(&four, &nine);
        assert!(bool::from(is_square));
        assert_eq!(root.square() * nine, four);

        let seven = FieldElement::from_u64(7);
        let (is_square, _) = FieldElement::sqrt_ratio(&seven, &FieldElement::ONE);
        assert!(!bool::from(is_square));
    }

    #[test]
    fn random_is_canonical() {
        let fe = FieldElement::random(&mut rand_core::OsRng);
        assert_eq!(FieldElement::from_bytes(&fe.to_bytes()).unwrap(), fe);
    }

    #[test]
    fn sum_and_product() {
        let elems = [2, 3, 7].map(FieldElement::from_u64);
        assert_eq!(elems.iter().sum::<FieldElement>(), FieldElement::from_u64(12));
        assert_eq!(elems.iter().product::<FieldElement>(), FieldElement::from_u64(42));
    }

    #[test]
    fn parity() {
        assert!(!bool::from(FieldElement::ZERO.is_odd()));
        assert!(bool::from(FieldElement::ONE.is_odd()));
        // p - 1 is even
        assert!(!bool::from((-FieldElement::ONE).is_odd()));
    }

    prop_compose! {
        fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
            let mut res = bytes_to_biguint(&bytes);
            let m = modulus();
            if res >= m {
                res -= m;
            }
            from_biguint(&res)
        }
    }

    proptest! {
        #[test]
        fn fuzzy_add(a in field_element(), b in field_element()) {
            let res_bi = (to_biguint(&a) + to_biguint(&b)) % modulus();
            prop_assert_eq!(a + b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_sub(a in field_element(), b in field_element()) {
            let m = modulus();
            let res_bi = (&m + to_biguint(&a) - to_biguint(&b)) % &m;
            prop_assert_eq!(a - b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_mul(a in field_element(), b in field_element()) {
            let res_bi = (to_biguint(&a) * to_biguint(&b)) % modulus();
            prop_assert_eq!(a * b, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_square(a in field_element()) {
            let a_bi = to_biguint(&a);
            let res_bi = (&a_bi * &a_bi) % modulus();
            prop_assert_eq!(a.square(), from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_negate(a in field_element()) {
            let m = modulus();
            let res_bi = (&m - to_biguint(&a)) % &m;
            prop_assert_eq!(-a, from_biguint(&res_bi));
        }

        #[test]
        fn fuzzy_invert(a in field_element()) {
            let a = if bool::from(a.is_zero()) { FieldElement::ONE } else { a };
            let a_inv = a.invert().unwrap();
            prop_assert_eq!(a * a_inv, FieldElement::ONE);
        }

        #[test]
        fn fuzzy_encoding_round_trip(a in field_element()) {
            prop_assert_eq!(FieldElement::from_bytes(&a.to_bytes()).unwrap(), a);
        }
    }
}
