//! View window classification and segment clipping.
//!
//! Every nearest-feature query takes a `(view_direction, view_range)` pair
//! of raw radians. [`ViewWindow::new`] classifies it once:
//!
//! ```text
//! view_direction non-finite              -> Unconstrained
//! view_range 0, negative, NaN or ∞       -> SightLine (zero-width ray)
//! view_range >= 2π                       -> Unconstrained
//! otherwise                              -> Cone of width view_range
//! ```
//!
//! Clipping works in the observer frame: observer at the origin, view
//! direction along +X. A segment is then `a + s * (b - a)` for `s ∈ [0, 1]`.

use std::ops::{Add, Mul, Sub};

use crate::core::math::{GEOMETRY_EPSILON, TWO_PI, angle_in_window, normalize_angle};

/// Angular restriction applied to a nearest-feature query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewWindow {
    /// No direction constraint.
    Unconstrained,
    /// Zero-width sight line in `direction`.
    SightLine {
        /// Normalized direction in `(-π, π]`.
        direction: f64,
    },
    /// Closed cone `[direction - half_width, direction + half_width]`.
    Cone {
        /// Normalized centre direction in `(-π, π]`.
        direction: f64,
        /// Half of the view range, in `(0, π)`.
        half_width: f64,
    },
}

impl ViewWindow {
    /// Classify raw query angles.
    pub fn new(view_direction: f64, view_range: f64) -> Self {
        if !view_direction.is_finite() {
            return Self::Unconstrained;
        }
        let direction = normalize_angle(view_direction);
        if view_range.is_nan() || view_range.is_infinite() || view_range <= 0.0 {
            return Self::SightLine { direction };
        }
        if view_range >= TWO_PI {
            return Self::Unconstrained;
        }
        Self::Cone {
            direction,
            half_width: view_range * 0.5,
        }
    }

    /// Centre direction, `None` when unconstrained.
    pub fn direction(&self) -> Option<f64> {
        match *self {
            Self::Unconstrained => None,
            Self::SightLine { direction } | Self::Cone { direction, .. } => Some(direction),
        }
    }

    /// Check whether a global bearing lies inside the window.
    pub fn contains_bearing(&self, bearing: f64) -> bool {
        match *self {
            Self::Unconstrained => bearing.is_finite(),
            Self::SightLine { direction } => angle_in_window(bearing, direction, 0.0),
            Self::Cone {
                direction,
                half_width,
            } => angle_in_window(bearing, direction, 2.0 * half_width),
        }
    }
}

/// Minimal 2D vector for observer-frame computations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(cos_a, sin_a)
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

/// Parametric sub-range `[start, end]` of a segment (`start == end` for a
/// single visible point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Piece {
    pub start: f64,
    pub end: f64,
}

impl Piece {
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, s: f64) -> bool {
        s >= self.start && s <= self.end
    }
}

/// Parameter of the point on `a + s * (b - a)` nearest to `target`,
/// clamped to `piece`.
#[inline]
pub(crate) fn nearest_parameter(a: Vec2, b: Vec2, target: Vec2, piece: Piece) -> f64 {
    let e = b - a;
    let len_sq = e.length_squared();
    if len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return piece.start;
    }
    ((target - a).dot(e) / len_sq).clamp(piece.start, piece.end)
}

#[inline]
fn point_on(a: Vec2, b: Vec2, s: f64) -> Vec2 {
    a + (b - a) * s
}

/// Parameter where a ray from the origin along +X first meets the segment.
///
/// `a` and `b` are in the observer frame. Returns `None` if the ray misses
/// the finite segment or only meets it behind the observer.
pub(crate) fn sight_line_hit(a: Vec2, b: Vec2) -> Option<f64> {
    let e = b - a;

    if e.y.abs() < GEOMETRY_EPSILON {
        // Parallel to the ray: only a collinear segment can be hit.
        if a.y.abs() > GEOMETRY_EPSILON {
            return None;
        }
        let (near_s, near_x, far_x) = if a.x <= b.x {
            (0.0, a.x, b.x)
        } else {
            (1.0, b.x, a.x)
        };
        if far_x < -GEOMETRY_EPSILON {
            return None;
        }
        if near_x >= 0.0 || e.x.abs() < GEOMETRY_EPSILON {
            return Some(near_s);
        }
        // Observer sits on the segment.
        return Some((-a.x / e.x).clamp(0.0, 1.0));
    }

    let s = -a.y / e.y;
    if !(-GEOMETRY_EPSILON..=1.0 + GEOMETRY_EPSILON).contains(&s) {
        return None;
    }
    let s = s.clamp(0.0, 1.0);
    if point_on(a, b, s).x < -GEOMETRY_EPSILON {
        return None;
    }
    Some(s)
}

/// Check whether an observer-frame point lies inside the cone.
///
/// The origin itself is always visible.
#[inline]
fn in_cone(p: Vec2, half_width: f64) -> bool {
    if p.length() < GEOMETRY_EPSILON {
        return true;
    }
    angle_in_window(p.y.atan2(p.x), 0.0, 2.0 * half_width)
}

/// Parameter where the segment crosses the boundary ray at `angle`,
/// strictly inside the segment and strictly ahead of the observer.
fn boundary_crossing(a: Vec2, b: Vec2, angle: f64) -> Option<f64> {
    let u = Vec2::from_angle(angle);
    let e = b - a;
    let denom = u.cross(e);
    if denom.abs() < GEOMETRY_EPSILON {
        return None;
    }
    let s = -u.cross(a) / denom;
    if s <= GEOMETRY_EPSILON || s >= 1.0 - GEOMETRY_EPSILON {
        return None;
    }
    if point_on(a, b, s).dot(u) <= GEOMETRY_EPSILON {
        return None;
    }
    Some(s)
}

/// Visible parts of the segment `a -> b` for a cone of `half_width`
/// centred on +X, in ascending parameter order.
///
/// Interior boundary crossings split the segment. Without any, the whole
/// segment is visible when both endpoints are inside the closed cone; with
/// only one inside, that endpoint sits on a boundary ray and is the only
/// visible point. With crossings, each sub-piece is tested at its midpoint and every
/// crossing point is kept as a single-point piece after the intervals.
///
/// An observer lying on the segment splits it there and always sees the
/// contact point.
pub(crate) fn visible_pieces(a: Vec2, b: Vec2, half_width: f64) -> Vec<Piece> {
    let mut breaks: Vec<f64> = [half_width, -half_width]
        .iter()
        .filter_map(|&angle| boundary_crossing(a, b, angle))
        .collect();

    let origin = Vec2::new(0.0, 0.0);
    let contact = nearest_parameter(a, b, origin, Piece::new(0.0, 1.0));
    let touches_observer = point_on(a, b, contact).length() < GEOMETRY_EPSILON;
    if touches_observer && contact > GEOMETRY_EPSILON && contact < 1.0 - GEOMETRY_EPSILON {
        breaks.push(contact);
    }

    breaks.sort_by(|l, r| l.total_cmp(r));
    breaks.dedup_by(|l, r| (*l - *r).abs() <= GEOMETRY_EPSILON);

    let mut pieces = Vec::with_capacity(breaks.len() * 2 + 1);
    if breaks.is_empty() {
        match (in_cone(a, half_width), in_cone(b, half_width)) {
            (true, true) => pieces.push(Piece::new(0.0, 1.0)),
            (true, false) => pieces.push(Piece::new(0.0, 0.0)),
            (false, true) => pieces.push(Piece::new(1.0, 1.0)),
            (false, false) => {}
        }
    } else {
        let mut start = 0.0;
        for &end in breaks.iter().chain(std::iter::once(&1.0)) {
            let mid = point_on(a, b, (start + end) * 0.5);
            if in_cone(mid, half_width) {
                pieces.push(Piece::new(start, end));
            }
            start = end;
        }
        pieces.extend(breaks.iter().map(|&s| Piece::new(s, s)));
    }

    if touches_observer && !pieces.iter().any(|p| p.contains(contact)) {
        pieces.push(Piece::new(contact, contact));
    }

    pieces
}

/// Nearest visible point to the origin over `pieces`.
///
/// Returns the winning piece and parameter; the first piece wins ties.
pub(crate) fn nearest_visible(a: Vec2, b: Vec2, pieces: &[Piece]) -> Option<(Piece, f64)> {
    let origin = Vec2::new(0.0, 0.0);
    let mut best: Option<(Piece, f64)> = None;
    let mut best_distance = f64::INFINITY;

    for piece in pieces {
        let s = nearest_parameter(a, b, origin, *piece);
        let distance = point_on(a, b, s).length();
        if distance < best_distance {
            best_distance = distance;
            best = Some((*piece, s));
        }
    }

    best
}
