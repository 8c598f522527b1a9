//! Cartesian geometry: `Vec3` and the axis-aligned `BoundaryBox`.
//!
//! Positions and velocities use `f64`.  Acoustic deployments span kilometres
//! while per-tick displacements are millimetres (1 ms updates at ~1 m/s), so
//! single precision would lose the motion entirely after a few minutes.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::{UwError, UwResult};

// ── Axis ──────────────────────────────────────────────────────────────────────

/// One of the three Cartesian axes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A 3-D vector used for both positions (metres) and velocities (m/s).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        (other - self).norm()
    }

    /// `true` if every component is finite (not NaN, not ±∞).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Same as [`get_mut`](Self::get_mut) but on two vectors at once, so the
    /// boundary reflector can borrow a coordinate and its velocity component
    /// together.
    #[inline]
    pub fn pair_mut<'a>(a: &'a mut Vec3, b: &'a mut Vec3, axis: Axis) -> (&'a mut f64, &'a mut f64) {
        (a.get_mut(axis), b.get_mut(axis))
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── BoundaryBox ───────────────────────────────────────────────────────────────

/// The axis-aligned deployment volume a mobile node must stay inside.
///
/// Construct through [`BoundaryBox::new`], which guarantees a finite, strictly
/// positive extent on every axis.  Reflection off the faces only converges
/// under that guarantee.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryBox {
    min: Vec3,
    max: Vec3,
}

impl BoundaryBox {
    /// Build a box from its two opposite corners.
    ///
    /// # Errors
    ///
    /// [`UwError::Config`] if any bound is non-finite or `max <= min` on any axis.
    pub fn new(min: Vec3, max: Vec3) -> UwResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(UwError::Config(format!("boundary box {min}..{max} has a non-finite bound")));
        }
        for axis in Axis::ALL {
            if max.get(axis) <= min.get(axis) {
                return Err(UwError::Config(format!(
                    "boundary box {min}..{max} has no extent on {axis:?}"
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// A cube `[0, side]` on every axis.
    pub fn cube(side: f64) -> UwResult<Self> {
        Self::new(Vec3::ZERO, Vec3::new(side, side, side))
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Closed containment test (points on a face are inside).
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| p.get(a) >= self.min.get(a) && p.get(a) <= self.max.get(a))
    }

    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl fmt::Display for BoundaryBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
