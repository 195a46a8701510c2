//! Point type for scene geometry.

use serde::{Deserialize, Serialize};

/// Id carried by points that were computed rather than imported.
pub const UNDEFINED_ID: i64 = -1;

/// A 3D-tagged scene point with an identity.
///
/// Points are immutable once built. A point with a non-finite `x` or `y`
/// is invalid and stands for "no point" (no intersection, nothing visible).
/// The default point has id `-1` and every coordinate set to `+∞`.
///
/// `z` is carried along but never used by the 2D queries, so it may be
/// non-finite on an otherwise valid point.
///
/// There is deliberately no `PartialEq`: two points are "the same" only by
/// id inside their owning container. Use [`Point::same_position`] to
/// compare coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    id: i64,
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            id: UNDEFINED_ID,
            x: f64::INFINITY,
            y: f64::INFINITY,
            z: f64::INFINITY,
        }
    }
}

impl Point {
    /// Create a point with id and coordinates.
    #[inline]
    pub fn new(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// Create a computed point (id `-1`, `z = 0`).
    #[inline]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(UNDEFINED_ID, x, y, 0.0)
    }

    /// The invalid sentinel point.
    #[inline]
    pub fn invalid() -> Self {
        Self::default()
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// A point is valid when `x` and `y` are finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Same point with a different id.
    #[inline]
    pub fn with_id(&self, id: i64) -> Self {
        Self::new(id, self.x, self.y, self.z)
    }

    /// 2D Euclidean distance, `+∞` if either point is invalid.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        if !self.is_valid() || !other.is_valid() {
            return f64::INFINITY;
        }
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bearing from this point to another (radians, CCW from +X).
    ///
    /// Returns `+∞` if either point is invalid.
    #[inline]
    pub fn bearing_to(&self, other: &Point) -> f64 {
        if !self.is_valid() || !other.is_valid() {
            return f64::INFINITY;
        }
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Compare x/y coordinates, ignoring id and z.
    #[inline]
    pub fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}
