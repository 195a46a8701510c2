//! Line segment type and nearest-point queries.
//!
//! A segment holds copies of its two endpoints. Every query is answered
//! from those values only, never from the identity of the points it was
//! built from.
//!
//! # Sentinels
//!
//! Invalid input never panics. Point results come back as
//! [`Point::invalid`], scalar results as `+∞`, so callers can min-reduce
//! over many segments without special cases.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use super::view::{
    Piece, Vec2, ViewWindow, nearest_parameter, nearest_visible, sight_line_hit, visible_pieces,
};
use crate::core::math::to_local_frame;
use crate::core::{Point, UNDEFINED_ID};

/// A 2D line segment between two points.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct LineSegment {
    first: Point,
    second: Point,
}

impl LineSegment {
    /// Create a segment from two endpoints.
    #[inline]
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    /// The invalid sentinel segment.
    #[inline]
    pub fn invalid() -> Self {
        Self::default()
    }

    #[inline]
    pub fn first(&self) -> &Point {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &Point {
        &self.second
    }

    /// A segment is valid when both endpoints are valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.first.is_valid() && self.second.is_valid()
    }

    /// Point at parameter `s` (`0` = first, `1` = second).
    ///
    /// The exact endpoints keep their ids; interior points get id `-1`.
    pub fn point_at(&self, s: f64) -> Point {
        if s <= 0.0 {
            return self.first;
        }
        if s >= 1.0 {
            return self.second;
        }
        let z = if self.first.z().is_finite() && self.second.z().is_finite() {
            self.first.z() + s * (self.second.z() - self.first.z())
        } else {
            self.first.z()
        };
        Point::new(
            UNDEFINED_ID,
            self.first.x() + s * (self.second.x() - self.first.x()),
            self.first.y() + s * (self.second.y() - self.first.y()),
            z,
        )
    }

    /// Sub-segment between parameters `start` and `end`.
    fn piece(&self, piece: Piece) -> LineSegment {
        LineSegment::new(self.point_at(piece.start), self.point_at(piece.end))
    }

    /// Endpoints expressed in the frame of `observer` looking along `direction`.
    fn local_endpoints(&self, observer: &Point, direction: f64) -> (Vec2, Vec2) {
        let a = to_local_frame(&self.first, observer, direction);
        let b = to_local_frame(&self.second, observer, direction);
        (Vec2::new(a.x(), a.y()), Vec2::new(b.x(), b.y()))
    }

    /// Nearest parameter and the visible piece containing it.
    fn locate(&self, observer: &Point, window: ViewWindow) -> Option<(Piece, f64)> {
        if !self.is_valid() || !observer.is_valid() {
            return None;
        }

        match window {
            ViewWindow::Unconstrained => {
                let whole = Piece::new(0.0, 1.0);
                let s = nearest_parameter(
                    Vec2::new(self.first.x(), self.first.y()),
                    Vec2::new(self.second.x(), self.second.y()),
                    Vec2::new(observer.x(), observer.y()),
                    whole,
                );
                Some((whole, s))
            }
            ViewWindow::SightLine { direction } => {
                let (a, b) = self.local_endpoints(observer, direction);
                sight_line_hit(a, b).map(|s| (Piece::new(s, s), s))
            }
            ViewWindow::Cone {
                direction,
                half_width,
            } => {
                let (a, b) = self.local_endpoints(observer, direction);
                let pieces = visible_pieces(a, b, half_width);
                nearest_visible(a, b, &pieces)
            }
        }
    }

    /// Nearest point on the segment as seen from `observer`.
    ///
    /// # Arguments
    /// * `observer` - Query position
    /// * `view_direction` - Global view direction; non-finite means unconstrained
    /// * `view_range` - Full width of the view window; `0` or `∞` means a
    ///   zero-width sight line, `>= 2π` means unconstrained
    ///
    /// # Returns
    /// The nearest visible point, or an invalid point when nothing is visible.
    pub fn nearest_point_from_point(
        &self,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> Point {
        self.nearest_point_in_window(observer, ViewWindow::new(view_direction, view_range))
    }

    /// [`Self::nearest_point_from_point`] with a pre-classified window.
    pub fn nearest_point_in_window(&self, observer: &Point, window: ViewWindow) -> Point {
        match self.locate(observer, window) {
            Some((_, s)) => self.point_at(s),
            None => Point::invalid(),
        }
    }

    /// Distance from `observer` to the nearest visible point, `+∞` if none.
    pub fn distance_from_point(&self, observer: &Point, view_direction: f64, view_range: f64) -> f64 {
        self.distance_in_window(observer, ViewWindow::new(view_direction, view_range))
    }

    /// [`Self::distance_from_point`] with a pre-classified window.
    pub fn distance_in_window(&self, observer: &Point, window: ViewWindow) -> f64 {
        observer.distance_to(&self.nearest_point_in_window(observer, window))
    }

    /// Bearing from `observer` to the unconstrained nearest point.
    ///
    /// Returns `+∞` on invalid input.
    pub fn view_direction_from_point(&self, observer: &Point) -> f64 {
        let nearest = self.nearest_point_in_window(observer, ViewWindow::Unconstrained);
        observer.bearing_to(&nearest)
    }

    /// Orientation of the segment folded into `(-π/2, π/2]`.
    ///
    /// A line has no forward direction, so `θ` and `θ ± π` are the same
    /// orientation. Returns `+∞` for an invalid segment.
    pub fn angle(&self) -> f64 {
        if !self.is_valid() {
            return f64::INFINITY;
        }
        let angle = (self.second.y() - self.first.y()).atan2(self.second.x() - self.first.x());
        if angle > FRAC_PI_2 {
            angle - PI
        } else if angle <= -FRAC_PI_2 {
            angle + PI
        } else {
            angle
        }
    }

    /// Euclidean length over x, y and z.
    ///
    /// An axis on which both endpoints are non-finite is left out; if that
    /// applies to all three axes the length is `+∞`. Any other non-finite
    /// difference also yields `+∞`.
    pub fn length(&self) -> f64 {
        let axes = [
            (self.first.x(), self.second.x()),
            (self.first.y(), self.second.y()),
            (self.first.z(), self.second.z()),
        ];

        let mut sum = 0.0;
        let mut used = 0;
        for (from, to) in axes {
            if !from.is_finite() && !to.is_finite() {
                continue;
            }
            let d = to - from;
            if !d.is_finite() {
                return f64::INFINITY;
            }
            sum += d * d;
            used += 1;
        }

        if used == 0 {
            f64::INFINITY
        } else {
            sum.sqrt()
        }
    }

    /// Part of the segment visible within the view window.
    ///
    /// Returns the visible piece that contains the nearest point: the whole
    /// segment when unconstrained, a zero-length segment at the hit point
    /// for a sight line, or an invalid segment when nothing is visible.
    pub fn sub_segment_in_view_range(
        &self,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> LineSegment {
        self.sub_segment_in_window(observer, ViewWindow::new(view_direction, view_range))
    }

    /// [`Self::sub_segment_in_view_range`] with a pre-classified window.
    pub fn sub_segment_in_window(&self, observer: &Point, window: ViewWindow) -> LineSegment {
        match self.locate(observer, window) {
            Some((piece, _)) => self.piece(piece),
            None => LineSegment::invalid(),
        }
    }
}
