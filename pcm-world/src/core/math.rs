//! Angle and coordinate-frame utilities.
//!
//! All angles are in radians, counter-clockwise positive from +X.
//! Angles are normalized into `(-π, π]` before any comparison.

use std::f64::consts::{FRAC_PI_2, PI};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::point::Point;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Tolerance for angular comparisons and parametric positions.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Normalize angle to `(-π, π]`.
///
/// Non-finite input is returned unchanged so `+∞` sentinels survive.
///
/// # Example
/// ```
/// use pcm_world::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-9);
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut a = angle % TWO_PI;
    if a > PI {
        a -= TWO_PI;
    } else if a <= -PI {
        a += TWO_PI;
    }
    a
}

/// Check whether `angle` lies in the closed window of full width `range`
/// centred on `centre`.
///
/// A non-positive range only admits `centre` itself; a range of `2π` or
/// more admits every finite angle.
#[inline]
pub fn angle_in_window(angle: f64, centre: f64, range: f64) -> bool {
    if !angle.is_finite() || !centre.is_finite() {
        return false;
    }
    if range >= TWO_PI {
        return true;
    }
    let half = range.max(0.0) * 0.5;
    normalize_angle(angle - centre).abs() <= half + GEOMETRY_EPSILON
}

/// Rotate `(x, y)` around the origin by `angle`.
#[inline]
pub fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin_a, cos_a) = angle.sin_cos();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// Express a global point in the frame of `origin` heading `yaw`.
///
/// Translate first, then rotate by `-yaw`. Id and z are preserved.
#[inline]
pub fn to_local_frame(point: &Point, origin: &Point, yaw: f64) -> Point {
    let (x, y) = rotate(point.x() - origin.x(), point.y() - origin.y(), -yaw);
    Point::new(point.id(), x, y, point.z())
}

/// Inverse of [`to_local_frame`]: rotate by `yaw`, then translate.
#[inline]
pub fn to_global_frame(point: &Point, origin: &Point, yaw: f64) -> Point {
    let (x, y) = rotate(point.x(), point.y(), yaw);
    Point::new(point.id(), x + origin.x(), y + origin.y(), point.z())
}

/// Discrete view direction of a driver relative to its heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentViewDirection {
    /// No direction constraint.
    #[default]
    None,
    Front,
    Left,
    Back,
    Right,
}

impl AgentViewDirection {
    /// Radian value used by the queries (`+∞` means unconstrained).
    pub fn to_radians(self) -> f64 {
        match self {
            Self::None => f64::INFINITY,
            Self::Front => 0.0,
            Self::Left => FRAC_PI_2,
            Self::Back => PI,
            Self::Right => -FRAC_PI_2,
        }
    }

    /// View direction in the global frame for an agent heading `yaw`.
    pub fn to_global_radians(self, yaw: f64) -> f64 {
        match self {
            Self::None => f64::INFINITY,
            other => normalize_angle(other.to_radians() + yaw),
        }
    }
}

impl std::str::FromStr for AgentViewDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "front" => Ok(Self::Front),
            "left" => Ok(Self::Left),
            "back" => Ok(Self::Back),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown view direction '{}'", other)),
        }
    }
}
