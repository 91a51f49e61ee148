//! Scalar multiplication.
//!
//! Secret scalars go through [`ProjectivePoint::mul`] (fixed 4-bit windows, one
//! table scan and one addition per window whatever the digit) or through
//! [`select_affine`] on a precomputed generator table. Public scalars may use
//! the faster [`mul_odd_multiples_vartime`].

use super::{AffinePoint, ProjectivePoint, Scalar};
use core::ops::{Mul, MulAssign};
use elliptic_curve::subtle::{ConditionallySelectable, ConstantTimeEq};

/// Number of entries in a window table: every 4-bit digit.
pub(crate) const WINDOW_SIZE: usize = 16;

/// Number of 4-bit windows in a 256-bit scalar.
pub(crate) const WINDOWS: usize = 64;

/// Lookup table containing precomputed values `[0p, 1p, 2p, ..., 15p]`
struct LookupTable([ProjectivePoint; WINDOW_SIZE]);

impl From<&ProjectivePoint> for LookupTable {
    fn from(p: &ProjectivePoint) -> Self {
        let mut points = [ProjectivePoint::IDENTITY; WINDOW_SIZE];
        for j in 1..WINDOW_SIZE {
            points[j] = points[j - 1] + p;
        }
        LookupTable(points)
    }
}

impl LookupTable {
    /// Given `0 <= digit < 16`, returns `digit * p` in constant time.
    fn select(&self, digit: u8) -> ProjectivePoint {
        debug_assert!((digit as usize) < WINDOW_SIZE);

        let mut t = ProjectivePoint::IDENTITY;
        for (j, point) in self.0.iter().enumerate() {
            t.conditional_assign(point, digit.ct_eq(&(j as u8)));
        }
        t
    }
}

/// Given `0 <= digit < 16`, returns `table[digit]` in constant time.
pub(crate) fn select_affine(table: &[AffinePoint; WINDOW_SIZE], digit: u8) -> AffinePoint {
    debug_assert!((digit as usize) < WINDOW_SIZE);

    let mut t = AffinePoint::IDENTITY;
    for (j, point) in table.iter().enumerate() {
        t.conditional_assign(point, digit.ct_eq(&(j as u8)));
    }
    t
}

impl ProjectivePoint {
    /// Returns `self * k` in constant time with respect to `k`.
    pub fn mul(&self, k: &Scalar) -> ProjectivePoint {
        let table = LookupTable::from(self);
        let mut acc = ProjectivePoint::IDENTITY;

        for i in (0..WINDOWS).rev() {
            acc = acc.double().double().double().double();
            acc += &table.select(k.nibble(i));
        }

        acc
    }
}

/// Width-`w` non-adjacent form of `k`: `k = sum(digits[i] * 2^i)`, where every
/// nonzero digit is odd, `|digit| < 2^(w - 1)`, and any `w` consecutive digits
/// hold at most one nonzero value.
///
/// Variable time: only for public scalars.
pub(crate) fn wnaf_vartime(k: &Scalar, w: u32) -> [i8; 257] {
    debug_assert!((2..=8).contains(&w));

    let mut digits = [0i8; 257];

    // One spare limb so that adding back a negative digit cannot overflow.
    let mut x = [k.0[0], k.0[1], k.0[2], k.0[3], 0u64];
    let width = 1i64 << w;
    let mut pos = 0;

    while x.iter().any(|&limb| limb != 0) {
        debug_assert!(pos < digits.len());

        if x[0] & 1 == 1 {
            let mut d = (x[0] & (width as u64 - 1)) as i64;
            if d >= width / 2 {
                d -= width;
            }
            digits[pos] = d as i8;

            if d > 0 {
                sub_small(&mut x, d as u64);
            } else {
                add_small(&mut x, (-d) as u64);
            }
        }

        shr1(&mut x);
        pos += 1;
    }

    digits
}

fn add_small(x: &mut [u64; 5], v: u64) {
    let mut carry = v;
    for limb in x.iter_mut() {
        let (sum, overflow) = limb.overflowing_add(carry);
        *limb = sum;
        carry = overflow as u64;
    }
}

fn sub_small(x: &mut [u64; 5], v: u64) {
    let mut borrow = v;
    for limb in x.iter_mut() {
        let (diff, underflow) = limb.overflowing_sub(borrow);
        *limb = diff;
        borrow = underflow as u64;
    }
}

fn shr1(x: &mut [u64; 5]) {
    for i in 0..4 {
        x[i] = (x[i] >> 1) | (x[i + 1] << 63);
    }
    x[4] >>= 1;
}

/// Computes `k * P` given `table[i] = (2i + 1) * P` for a wNAF window `w` with
/// `table.len() == 2^(w - 2)`.
///
/// Variable time: only for public scalars.
pub(crate) fn mul_odd_multiples_vartime(
    table: &[AffinePoint],
    w: u32,
    k: &Scalar,
) -> ProjectivePoint {
    debug_assert_eq!(table.len(), 1 << (w - 2));

    let digits = wnaf_vartime(k, w);
    let mut acc = ProjectivePoint::IDENTITY;

    let top = match digits.iter().rposition(|&d| d != 0) {
        Some(top) => top,
        None => return acc,
    };

    for &d in digits[..=top].iter().rev() {
        acc = acc.double();
        if d > 0 {
            acc += &table[(d as usize) / 2];
        } else if d < 0 {
            acc -= &table[(-(d as i16) as usize) / 2];
        }
    }

    acc
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        ProjectivePoint::mul(self, scalar)
    }
}

impl Mul<&Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        ProjectivePoint::mul(&self, scalar)
    }
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: Scalar) -> ProjectivePoint {
        ProjectivePoint::mul(&self, &scalar)
    }
}

impl MulAssign<&Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, scalar: &Scalar) {
        *self = ProjectivePoint::mul(self, scalar);
    }
}

impl MulAssign<Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, scalar: Scalar) {
        *self = ProjectivePoint::mul(self, &scalar);
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        ProjectivePoint::mul(&ProjectivePoint::from(self), scalar)
    }
}

impl Mul<Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: Scalar) -> ProjectivePoint {
        ProjectivePoint::mul(&ProjectivePoint::from(self), &scalar)
    }
}
