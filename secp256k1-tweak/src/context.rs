//! Precomputation context.

use crate::{
    Error, FieldBytes, Result,
    arithmetic::{
        AffinePoint, ProjectivePoint, Scalar,
        mul::{WINDOW_SIZE, WINDOWS, mul_odd_multiples_vartime, select_affine},
    },
};
use alloc::vec::Vec;
use core::{
    fmt,
    ops::{BitOr, BitOrAssign},
};
use elliptic_curve::{bigint::U256, group::Curve, ops::Reduce, zeroize::Zeroize};

/// wNAF window width of the verification table.
const ODD_MULTIPLES_WINDOW: u32 = 8;

/// Capabilities a [`Context`] is created with.
///
/// Bit values follow the libsecp256k1 context flag layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u32);

impl Capabilities {
    /// No precomputation.
    pub const NONE: Self = Self(0);

    /// Variable-time generator multiplication on public scalars.
    pub const VERIFY: Self = Self(1 << 8);

    /// Blinded constant-time generator multiplication on secret scalars.
    pub const SIGN: Self = Self(1 << 9);

    const ALL: u32 = Self::SIGN.0 | Self::VERIFY.0;

    /// Type marker libsecp256k1 sets in every context flag.
    const TYPE_CONTEXT: u32 = 1 << 0;

    /// Parse capabilities from their flag bits.
    ///
    /// The libsecp256k1 context type bit (`1 << 0`) is accepted and ignored.
    /// Returns [`Error::ContextCreation`] if any other unknown bit is set.
    pub const fn from_bits(bits: u32) -> Result<Self> {
        let bits = bits & !Self::TYPE_CONTEXT;
        if bits & !Self::ALL != 0 {
            Err(Error::ContextCreation)
        } else {
            Ok(Self(bits))
        }
    }

    /// Flag bits of these capabilities.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Does `self` include every capability in `other`?
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Fixed-base table for secret generator multiples: `windows[i][j] = j * 16^i * G`.
///
/// The scalar is offset by a blinding value `b` before the lookups, and the
/// accumulator starts from `-b * G`, so intermediate points never depend on
/// the secret alone.
#[derive(Clone)]
struct GeneratorTable {
    windows: Vec<[AffinePoint; WINDOW_SIZE]>,
    blind: Scalar,
    initial: ProjectivePoint,
}

impl GeneratorTable {
    fn new() -> Result<Self> {
        let mut points = Vec::with_capacity(WINDOWS * WINDOW_SIZE);
        let mut base = ProjectivePoint::GENERATOR;

        for _ in 0..WINDOWS {
            let mut p = ProjectivePoint::IDENTITY;
            for _ in 0..WINDOW_SIZE {
                points.push(p);
                p += &base;
            }
            base = base.double().double().double().double();
        }

        let mut affine = alloc::vec![AffinePoint::IDENTITY; points.len()];
        ProjectivePoint::batch_normalize(&points, &mut affine);

        let windows = affine
            .chunks_exact(WINDOW_SIZE)
            .map(|row| <[AffinePoint; WINDOW_SIZE]>::try_from(row))
            .collect::<core::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::ContextCreation)?;

        // Entry 0 of each window is the identity; 15 * 16^63 < n keeps every
        // other entry off it.
        let well_formed = windows.iter().all(|row| {
            bool::from(row[0].is_identity())
                && row[1..]
                    .iter()
                    .all(|p| bool::from(p.is_on_curve() & !p.is_identity()))
        });
        if !well_formed {
            return Err(Error::ContextCreation);
        }

        Ok(Self {
            windows,
            blind: Scalar::ZERO,
            initial: ProjectivePoint::IDENTITY,
        })
    }

    fn blind(&mut self, seed: &FieldBytes) {
        let blind = <Scalar as Reduce<U256>>::reduce_bytes(seed);
        self.initial = -(ProjectivePoint::GENERATOR * &blind);
        self.blind.zeroize();
        self.blind = blind;
    }

    /// Returns `k * G` in constant time with respect to `k`.
    fn mul(&self, k: &Scalar) -> ProjectivePoint {
        let mut s = k + &self.blind;
        let mut acc = self.initial;

        for (i, row) in self.windows.iter().enumerate() {
            acc += &select_affine(row, s.nibble(i));
        }

        s.zeroize();
        acc
    }
}

impl Drop for GeneratorTable {
    fn drop(&mut self) {
        self.blind.zeroize();
        self.initial = ProjectivePoint::IDENTITY;
    }
}

/// Odd generator multiples `[1G, 3G, 5G, ..., 127G]` for wNAF multiplication
/// of public scalars.
#[derive(Clone)]
struct OddMultiplesTable(Vec<AffinePoint>);

impl OddMultiplesTable {
    fn new() -> Result<Self> {
        let g = ProjectivePoint::GENERATOR;
        let g2 = g.double();

        let len = 1 << (ODD_MULTIPLES_WINDOW - 2);
        let mut points = Vec::with_capacity(len);
        let mut p = g;
        for _ in 0..len {
            points.push(p);
            p += &g2;
        }

        let mut affine = alloc::vec![AffinePoint::IDENTITY; points.len()];
        ProjectivePoint::batch_normalize(&points, &mut affine);

        if !affine
            .iter()
            .all(|p| bool::from(p.is_on_curve() & !p.is_identity()))
        {
            return Err(Error::ContextCreation);
        }

        Ok(Self(affine))
    }

    fn mul_vartime(&self, k: &Scalar) -> ProjectivePoint {
        mul_odd_multiples_vartime(&self.0, ODD_MULTIPLES_WINDOW, k)
    }
}

/// Precomputed state for secp256k1 key operations.
///
/// A context is immutable once created, apart from [`Context::randomize`], and
/// may be shared between threads.
#[derive(Clone)]
pub struct Context {
    capabilities: Capabilities,
    gen_table: Option<GeneratorTable>,
    odd_multiples: Option<OddMultiplesTable>,
}

impl Context {
    /// Create a context, building the tables `capabilities` requires.
    pub fn new(capabilities: Capabilities) -> Result<Self> {
        let gen_table = if capabilities.contains(Capabilities::SIGN) {
            Some(GeneratorTable::new()?)
        } else {
            None
        };

        let odd_multiples = if capabilities.contains(Capabilities::VERIFY) {
            Some(OddMultiplesTable::new()?)
        } else {
            None
        };

        Ok(Self {
            capabilities,
            gen_table,
            odd_multiples,
        })
    }

    /// Capabilities this context was created with.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Re-derive the blinding applied to secret generator multiplication from
    /// `seed`, reduced modulo the group order.
    pub fn randomize(&mut self, seed: &FieldBytes) -> Result<()> {
        let table = self.gen_table.as_mut().ok_or(Error::MissingCapability)?;
        table.blind(seed);
        Ok(())
    }

    /// `k * G` for a secret `k`. Requires [`Capabilities::SIGN`].
    pub(crate) fn mul_generator(&self, k: &Scalar) -> Result<ProjectivePoint> {
        self.gen_table
            .as_ref()
            .map(|table| table.mul(k))
            .ok_or(Error::MissingCapability)
    }

    /// `k * G` for a public `k`. Requires [`Capabilities::VERIFY`].
    pub(crate) fn mul_generator_vartime(&self, k: &Scalar) -> Result<ProjectivePoint> {
        self.odd_multiples
            .as_ref()
            .map(|table| table.mul_vartime(k))
            .ok_or(Error::MissingCapability)
    }

    pub(crate) fn require(&self, capabilities: Capabilities) -> Result<()> {
        if self.capabilities.contains(capabilities) {
            Ok(())
        } else {
            Err(Error::MissingCapability)
        }
    }

    #[cfg(test)]
    fn is_blinded(&self) -> bool {
        self.gen_table
            .as_ref()
            .is_some_and(|table| !bool::from(table.blind.is_zero()))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
