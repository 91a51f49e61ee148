//! Affine points

use super::{CURVE_EQUATION_B, FieldElement, ProjectivePoint, Scalar};
use crate::{CompressedPoint, FieldBytes};
use core::ops::Neg;
use elliptic_curve::{
    group::{GroupEncoding, prime::PrimeCurveAffine},
    point::AffineCoordinates,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// SEC1 tag of a compressed point with an even y-coordinate. The odd tag is
/// this plus one.
const TAG_COMPRESSED_EVEN: u8 = 0x02;

/// A point on the secp256k1 curve in affine coordinates, or the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    /// `1` for the point at infinity, `0` otherwise.
    pub(crate) infinity: u8,
}

impl AffinePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of secp256k1.
    ///
    /// ```text
    /// x = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// y = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    pub const GENERATOR: Self = Self {
        x: FieldElement([
            0x59F2_815B_16F8_1798,
            0x029B_FCDB_2DCE_28D9,
            0x55A0_6295_CE87_0B07,
            0x79BE_667E_F9DC_BBAC,
        ]),
        y: FieldElement([
            0x9C47_D08F_FB10_D4B8,
            0xFD17_B448_A685_5419,
            0x5DA4_FBFC_0E11_08A8,
            0x483A_DA77_26A3_C465,
        ]),
        infinity: 0,
    };

    /// Creates a point from affine coordinates, returning `None` unless they
    /// satisfy the curve equation.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> CtOption<Self> {
        let point = Self { x, y, infinity: 0 };
        CtOption::new(point, point.is_on_curve())
    }

    /// Recovers the point with x-coordinate `x` and the given y parity, if
    /// `x³ + 7` is a square.
    pub(crate) fn decompress(x: &FieldBytes, y_is_odd: Choice) -> CtOption<Self> {
        FieldElement::from_bytes(x).and_then(|x| {
            let alpha = x.square() * x + CURVE_EQUATION_B;
            alpha.sqrt().map(|beta| {
                let y = FieldElement::conditional_select(&beta, &-beta, beta.is_odd() ^ y_is_odd);
                Self { x, y, infinity: 0 }
            })
        })
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Checks `y² = x³ + 7`. The identity is considered to be on the curve.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + CURVE_EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }
}

impl AffineCoordinates for AffinePoint {
    type FieldRepr = FieldBytes;

    fn x(&self) -> FieldBytes {
        self.x.to_bytes()
    }

    fn y_is_odd(&self) -> Choice {
        self.y.is_odd()
    }
}

impl PrimeCurveAffine for AffinePoint {
    type Scalar = Scalar;
    type Curve = ProjectivePoint;

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        Self::GENERATOR
    }

    fn is_identity(&self) -> Choice {
        Self::is_identity(self)
    }

    fn to_curve(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self)
    }
}

/// SEC1 compressed encoding. The identity encodes as 33 zero bytes.
impl GroupEncoding for AffinePoint {
    type Repr = CompressedPoint;

    fn from_bytes(bytes: &CompressedPoint) -> CtOption<Self> {
        let tag = bytes[0];
        let y_is_odd = tag.ct_eq(&(TAG_COMPRESSED_EVEN + 1));
        let is_compressed = tag.ct_eq(&TAG_COMPRESSED_EVEN) | y_is_odd;
        let is_identity = bytes.as_slice().ct_eq(CompressedPoint::default().as_slice());

        let decompressed = Self::decompress(FieldBytes::from_slice(&bytes[1..]), y_is_odd);
        let point = Self::conditional_select(
            &decompressed.unwrap_or(Self::IDENTITY),
            &Self::IDENTITY,
            is_identity,
        );
        CtOption::new(point, (is_compressed & decompressed.is_some()) | is_identity)
    }

    fn from_bytes_unchecked(bytes: &CompressedPoint) -> CtOption<Self> {
        Self::from_bytes(bytes)
    }

    fn to_bytes(&self) -> CompressedPoint {
        let mut bytes = CompressedPoint::default();
        bytes[0] = TAG_COMPRESSED_EVEN | self.y.is_odd().unwrap_u8();
        bytes[1..].copy_from_slice(&self.x.to_bytes());

        for byte in bytes.iter_mut() {
            byte.conditional_assign(&0, self.is_identity());
        }
        bytes
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DefaultIsZeroes for AffinePoint {}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let neither_identity = !self.is_identity() & !other.is_identity();
        both_identity | (neither_identity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

impl Neg for AffinePoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}
