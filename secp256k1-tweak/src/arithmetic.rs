//! A pure-Rust implementation of group operations on secp256k1.

/// Implements the `core::ops` operator traits required by `ff::Field` in terms of
/// the type's inherent `add`, `sub`, `mul` and `negate` methods.
macro_rules! impl_binops {
    ($ty:ident) => {
        impl core::ops::Add<$ty> for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty::add(&self, &rhs)
            }
        }

        impl core::ops::Add<&$ty> for $ty {
            type Output = $ty;

            fn add(self, rhs: &$ty) -> $ty {
                $ty::add(&self, rhs)
            }
        }

        impl core::ops::Add<&$ty> for &$ty {
            type Output = $ty;

            fn add(self, rhs: &$ty) -> $ty {
                $ty::add(self, rhs)
            }
        }

        impl core::ops::AddAssign<$ty> for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                *self = $ty::add(self, &rhs);
            }
        }

        impl core::ops::AddAssign<&$ty> for $ty {
            fn add_assign(&mut self, rhs: &$ty) {
                *self = $ty::add(self, rhs);
            }
        }

        impl core::ops::Sub<$ty> for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> $ty {
                $ty::sub(&self, &rhs)
            }
        }

        impl core::ops::Sub<&$ty> for $ty {
            type Output = $ty;

            fn sub(self, rhs: &$ty) -> $ty {
                $ty::sub(&self, rhs)
            }
        }

        impl core::ops::Sub<&$ty> for &$ty {
            type Output = $ty;

            fn sub(self, rhs: &$ty) -> $ty {
                $ty::sub(self, rhs)
            }
        }

        impl core::ops::SubAssign<$ty> for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                *self = $ty::sub(self, &rhs);
            }
        }

        impl core::ops::SubAssign<&$ty> for $ty {
            fn sub_assign(&mut self, rhs: &$ty) {
                *self = $ty::sub(self, rhs);
            }
        }

        impl core::ops::Mul<$ty> for $ty {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                $ty::mul(&self, &rhs)
            }
        }

        impl core::ops::Mul<&$ty> for $ty {
            type Output = $ty;

            fn mul(self, rhs: &$ty) -> $ty {
                $ty::mul(&self, rhs)
            }
        }

        impl core::ops::Mul<&$ty> for &$ty {
            type Output = $ty;

            fn mul(self, rhs: &$ty) -> $ty {
                $ty::mul(self, rhs)
            }
        }

        impl core::ops::MulAssign<$ty> for $ty {
            fn mul_assign(&mut self, rhs: $ty) {
                *self = $ty::mul(self, &rhs);
            }
        }

        impl core::ops::MulAssign<&$ty> for $ty {
            fn mul_assign(&mut self, rhs: &$ty) {
                *self = $ty::mul(self, rhs);
            }
        }

        impl core::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty::negate(&self)
            }
        }

        impl core::ops::Neg for &$ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty::negate(self)
            }
        }
    };
}

/// Implements `Sum` and `Product` for an arithmetic type with `ZERO` and `ONE`.
macro_rules! impl_sum_product {
    ($ty:ident) => {
        impl core::iter::Sum for $ty {
            fn sum<I: Iterator<Item = $ty>>(iter: I) -> $ty {
                iter.fold($ty::ZERO, |acc, x| $ty::add(&acc, &x))
            }
        }

        impl<'a> core::iter::Sum<&'a $ty> for $ty {
            fn sum<I: Iterator<Item = &'a $ty>>(iter: I) -> $ty {
                iter.fold($ty::ZERO, |acc, x| $ty::add(&acc, x))
            }
        }

        impl core::iter::Product for $ty {
            fn product<I: Iterator<Item = $ty>>(iter: I) -> $ty {
                iter.fold($ty::ONE, |acc, x| $ty::mul(&acc, &x))
            }
        }

        impl<'a> core::iter::Product<&'a $ty> for $ty {
            fn product<I: Iterator<Item = &'a $ty>>(iter: I) -> $ty {
                iter.fold($ty::ONE, |acc, x| $ty::mul(&acc, x))
            }
        }
    };
}

mod affine;
mod field;
pub(crate) mod mul;
mod projective;
mod scalar;
pub(crate) mod util;

pub use self::{
    affine::AffinePoint, field::FieldElement, projective::ProjectivePoint, scalar::Scalar,
};

use crate::Secp256k1;
use elliptic_curve::{
    CurveArithmetic,
    ops::{LinearCombination, MulByGenerator},
};

impl CurveArithmetic for Secp256k1 {
    type AffinePoint = AffinePoint;
    type ProjectivePoint = ProjectivePoint;
    type Scalar = Scalar;
}

impl LinearCombination for ProjectivePoint {}

impl MulByGenerator for ProjectivePoint {}

/// The `b` coefficient of the curve equation `y² = x³ + 7`.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u64(7);

/// `3 * b`, used by the complete addition formulas.
pub(crate) const CURVE_EQUATION_B3: FieldElement = FieldElement::from_u64(21);
