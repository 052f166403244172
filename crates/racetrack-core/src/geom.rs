//! Geometry primitives: [`Point`] and [`Axis`].
//!
//! A [`Point`] is used both as an absolute cell position and as a relative
//! displacement (velocity, acceleration). Rows grow downward, columns grow
//! to the right, matching the layout of a track file.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two grid axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    /// Both axes, row first.
    pub const ALL: [Axis; 2] = [Axis::Row, Axis::Col];

    /// The perpendicular axis.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Axis::Row => Axis::Col,
            Axis::Col => Axis::Row,
        }
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point or displacement, in (row, col) order.
///
/// The operators use plain `i32` arithmetic, so sums and differences must
/// stay within board-sized coordinates. [`rasterize`](crate::rasterize)
/// accepts any pair of points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Origin, and the null displacement.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The component on the given axis.
    #[inline]
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::Row => self.row,
            Axis::Col => self.col,
        }
    }

    /// Return a copy with the component on `axis` replaced by `value`.
    #[inline]
    pub const fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::Row => Self::new(value, self.col),
            Axis::Col => Self::new(self.row, value),
        }
    }

    /// Whether both components are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.row == 0 && self.col == 0
    }

    /// Component-wise sign, each in {-1, 0, 1}.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.row.signum(), self.col.signum())
    }

    /// Clamp each component to [-1, 1].
    #[inline]
    pub fn clamp_unit(self) -> Self {
        Self::new(self.row.clamp(-1, 1), self.col.clamp(-1, 1))
    }

    /// Integer dot product.
    #[inline]
    pub const fn dot(self, other: Self) -> i32 {
        self.row * other.row + self.col * other.col
    }

    /// Squared Euclidean length.
    #[inline]
    pub const fn norm_sq(self) -> i32 {
        self.dot(self)
    }

    /// Dot product of the two unit vectors pointing along `self` and
    /// `other`, i.e. the cosine of the angle between them.
    ///
    /// A zero vector has no direction; the result is `0.0` if either
    /// operand is zero.
    pub fn unit_dot(self, other: Self) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        let len = (f64::from(self.norm_sq()) * f64::from(other.norm_sq())).sqrt();
        f64::from(self.dot(other)) / len
    }

    /// All eight neighbours (cardinal + diagonal), clockwise from "up".
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row - 1, self.col + 1),
            Self::new(self.row, self.col + 1),
            Self::new(self.row + 1, self.col + 1),
            Self::new(self.row + 1, self.col),
            Self::new(self.row + 1, self.col - 1),
            Self::new(self.row, self.col - 1),
            Self::new(self.row - 1, self.col - 1),
        ]
    }
}

// --- trait impls for Point ---

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Point {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.row, -self.col)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.row * rhs, self.col * rhs)
    }
}
