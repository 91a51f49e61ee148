//! Projective points

use super::{AffinePoint, CURVE_EQUATION_B, CURVE_EQUATION_B3, FieldElement, Scalar};
use crate::CompressedPoint;
use core::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    ff::Field,
    group::{
        Curve, Group, GroupEncoding,
        prime::{PrimeCurve, PrimeGroup},
    },
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// A point on the secp256k1 curve in homogeneous projective coordinates
/// `(X : Y : Z)`, representing the affine point `(X / Z, Y / Z)`.
///
/// The identity is `(0 : 1 : 0)`.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: AffinePoint::GENERATOR.x,
        y: AffinePoint::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Checks `Y²Z = X³ + 7Z³`.
    pub fn is_on_curve(&self) -> Choice {
        let zz = self.z.square();
        let lhs = self.y.square() * self.z;
        let rhs = self.x.square() * self.x + CURVE_EQUATION_B * zz * self.z;
        lhs.ct_eq(&rhs)
    }

    /// Returns the affine representation of this point.
    ///
    /// The identity maps to [`AffinePoint::IDENTITY`]; no branch depends on it.
    pub fn to_affine(&self) -> AffinePoint {
        let zinv = self.z.invert().unwrap_or(FieldElement::ZERO);
        AffinePoint {
            x: self.x * zinv,
            y: self.y * zinv,
            infinity: self.is_identity().unwrap_u8(),
        }
    }

    /// `z`, or one for the identity.
    fn z_or_one(&self) -> FieldElement {
        FieldElement::conditional_select(&self.z, &FieldElement::ONE, self.is_identity())
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self + other`.
    ///
    /// Complete addition formula for `a = 0` from Renes-Costello-Batina 2015
    /// (<https://eprint.iacr.org/2015/1060> Algorithm 7). Valid for all inputs,
    /// including `self == other` and the identity.
    pub fn add(&self, other: &Self) -> Self {
        let t0 = self.x * other.x; // 1
        let t1 = self.y * other.y; // 2
        let t2 = self.z * other.z; // 3
        let t3 = (self.x + self.y) * (other.x + other.y); // 4, 5, 6
        let t4 = t0 + t1; // 7
        let t3 = t3 - t4; // 8
        let t4 = (self.y + self.z) * (other.y + other.z); // 9, 10, 11
        let x3 = t1 + t2; // 12
        let t4 = t4 - x3; // 13
        let x3 = (self.x + self.z) * (other.x + other.z); // 14, 15, 16
        let y3 = t0 + t2; // 17
        let y3 = x3 - y3; // 18
        let x3 = t0.double(); // 19
        let t0 = x3 + t0; // 20
        let t2 = CURVE_EQUATION_B3 * t2; // 21
        let z3 = t1 + t2; // 22
        let t1 = t1 - t2; // 23
        let y3 = CURVE_EQUATION_B3 * y3; // 24
        let x3 = t4 * y3; // 25
        let t2 = t3 * t1; // 26
        let x3 = t2 - x3; // 27
        let y3 = y3 * t0; // 28
        let t1 = t1 * z3; // 29
        let y3 = t1 + y3; // 30
        let t0 = t0 * t3; // 31
        let z3 = z3 * t4; // 32
        let z3 = z3 + t0; // 33

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`.
    ///
    /// Mixed addition formula for `a = 0` (Renes-Costello-Batina 2015, Algorithm 8).
    /// The formula itself does not cover an affine identity, which is handled by
    /// a constant-time select.
    pub fn add_mixed(&self, other: &AffinePoint) -> Self {
        let t0 = self.x * other.x; // 1
        let t1 = self.y * other.y; // 2
        let t3 = (other.x + other.y) * (self.x + self.y); // 3, 4, 5
        let t4 = t0 + t1; // 6
        let t3 = t3 - t4; // 7
        let t4 = other.y * self.z + self.y; // 8, 9
        let y3 = other.x * self.z + self.x; // 10, 11
        let x3 = t0.double(); // 12
        let t0 = x3 + t0; // 13
        let t2 = CURVE_EQUATION_B3 * self.z; // 14
        let z3 = t1 + t2; // 15
        let t1 = t1 - t2; // 16
        let y3 = CURVE_EQUATION_B3 * y3; // 17
        let x3 = t4 * y3; // 18
        let t2 = t3 * t1; // 19
        let x3 = t2 - x3; // 20
        let y3 = y3 * t0; // 21
        let t1 = t1 * z3; // 22
        let y3 = t1 + y3; // 23
        let t0 = t0 * t3; // 24
        let z3 = z3 * t4; // 25
        let z3 = z3 + t0; // 26

        let mut ret = Self {
            x: x3,
            y: y3,
            z: z3,
        };
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Doubles this point.
    ///
    /// Exception-free doubling for `a = 0` (Renes-Costello-Batina 2015, Algorithm 9).
    pub fn double(&self) -> Self {
        let t0 = self.y.square(); // 1
        let z3 = t0.double().double().double(); // 2, 3, 4
        let t1 = self.y * self.z; // 5
        let t2 = self.z.square(); // 6
        let t2 = CURVE_EQUATION_B3 * t2; // 7
        let x3 = t2 * z3; // 8
        let y3 = t0 + t2; // 9
        let z3 = t1 * z3; // 10
        let t1 = t2.double(); // 11
        let t2 = t1 + t2; // 12
        let t0 = t0 - t2; // 13
        let y3 = t0 * y3; // 14
        let y3 = x3 + y3; // 15
        let t1 = self.x * self.y; // 16
        let x3 = t0 * t1; // 17
        let x3 = x3.double(); // 18

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    pub fn sub_mixed(&self, other: &AffinePoint) -> Self {
        self.add_mixed(&-*other)
    }
}

impl Group for ProjectivePoint {
    type Scalar = Scalar;

    fn random(mut rng: impl RngCore) -> Self {
        Self::GENERATOR * Scalar::random(&mut rng)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        Self::GENERATOR
    }

    fn is_identity(&self) -> Choice {
        Self::is_identity(self)
    }

    #[must_use]
    fn double(&self) -> Self {
        Self::double(self)
    }
}

impl Curve for ProjectivePoint {
    type AffineRepr = AffinePoint;

    fn to_affine(&self) -> AffinePoint {
        Self::to_affine(self)
    }

    /// Converts a batch of points to affine coordinates using a single field
    /// inversion (Montgomery's trick).
    ///
    /// # Panics
    ///
    /// If `p` and `q` differ in length.
    fn batch_normalize(p: &[Self], q: &mut [AffinePoint]) {
        assert_eq!(p.len(), q.len());

        // Running products of the z-coordinates, with the identity's zero
        // replaced by one so that the chain stays invertible.
        let mut acc = FieldElement::ONE;
        for (point, slot) in p.iter().zip(q.iter_mut()) {
            slot.x = acc;
            acc *= point.z_or_one();
        }

        let mut inv = acc.invert().unwrap_or(FieldElement::ZERO);

        for (point, slot) in p.iter().zip(q.iter_mut()).rev() {
            let zinv = inv * slot.x;
            inv *= point.z_or_one();

            *slot = AffinePoint::conditional_select(
                &AffinePoint {
                    x: point.x * zinv,
                    y: point.y * zinv,
                    infinity: 0,
                },
                &AffinePoint::IDENTITY,
                point.is_identity(),
            );
        }
    }
}

impl PrimeGroup for ProjectivePoint {}

impl PrimeCurve for ProjectivePoint {
    type Affine = AffinePoint;
}

impl GroupEncoding for ProjectivePoint {
    type Repr = CompressedPoint;

    fn from_bytes(bytes: &CompressedPoint) -> CtOption<Self> {
        AffinePoint::from_bytes(bytes).map(Self::from)
    }

    fn from_bytes_unchecked(bytes: &CompressedPoint) -> CtOption<Self> {
        Self::from_bytes(bytes)
    }

    fn to_bytes(&self) -> CompressedPoint {
        self.to_affine().to_bytes()
    }
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DefaultIsZeroes for ProjectivePoint {}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        let projective = Self {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from(*p)
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // (X1 / Z1, Y1 / Z1) == (X2 / Z2, Y2 / Z2), cross-multiplied. Two
        // identities compare equal since both sides vanish.
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;
        let y1 = self.y * other.z;
        let y2 = other.y * self.z;
        x1.ct_eq(&x2) & y1.ct_eq(&y2)
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ProjectivePoint {}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl Add<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, other)
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, &other)
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl AddAssign<AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, &rhs);
    }
}

impl Sub<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, other)
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl SubAssign<&ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::sub(self, rhs);
    }
}

impl SubAssign<ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl Sub<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl Sub<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, &other)
    }
}

impl SubAssign<&AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, rhs);
    }
}

impl SubAssign<AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, &rhs);
    }
}

impl Sum for ProjectivePoint {
    fn sum<I: Iterator<Item = ProjectivePoint>>(iter: I) -> ProjectivePoint {
        iter.fold(ProjectivePoint::IDENTITY, |acc, p| ProjectivePoint::add(&acc, &p))
    }
}

impl<'a> Sum<&'a ProjectivePoint> for ProjectivePoint {
    fn sum<I: Iterator<Item = &'a ProjectivePoint>>(iter: I) -> ProjectivePoint {
        iter.fold(ProjectivePoint::IDENTITY, |acc, p| ProjectivePoint::add(&acc, p))
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl Neg for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(self)
    }
}
