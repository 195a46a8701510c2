//! Ordered point collection forming a polyline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::geometry::{LineSegment, ViewWindow};

/// Mapping `id -> Point`, iterated in ascending id order.
///
/// Consecutive points (by id) form the segments of a polyline. Ids are
/// unique: inserting an existing id fails and keeps the stored point.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointContainer {
    points: BTreeMap<i64, Point>,
}

impl PointContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a polyline from points, keyed by their own ids.
    ///
    /// Later duplicates are dropped.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut container = Self::new();
        for point in points {
            container.add_point(point.id(), point);
        }
        container
    }

    /// Polyline through `(x, y)` coordinates, ids counting from 0.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::from_points(
            coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Point::new(i as i64, x, y, 0.0)),
        )
    }

    /// Insert a point under `id`.
    ///
    /// Returns `false` without touching the container if `id` is taken.
    pub fn add_point(&mut self, id: i64, point: Point) -> bool {
        if self.points.contains_key(&id) {
            log::debug!("Point id {} already present, insert ignored", id);
            return false;
        }
        self.points.insert(id, point);
        true
    }

    #[inline]
    pub fn point(&self, id: i64) -> Option<&Point> {
        self.points.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: i64) -> bool {
        self.points.contains_key(&id)
    }

    /// All points in id order.
    #[inline]
    pub fn points(&self) -> &BTreeMap<i64, Point> {
        &self.points
    }

    #[inline]
    pub fn first_point(&self) -> Option<&Point> {
        self.points.values().next()
    }

    #[inline]
    pub fn last_point(&self) -> Option<&Point> {
        self.points.values().next_back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Segments between consecutive points in id order.
    pub fn line_segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points
            .values()
            .zip(self.points.values().skip(1))
            .map(|(first, second)| LineSegment::new(*first, *second))
    }

    /// Total polyline length (sum of segment lengths).
    pub fn length(&self) -> f64 {
        self.line_segments().map(|segment| segment.length()).sum()
    }

    /// Nearest segment and its distance for a pre-classified window.
    ///
    /// Segments with a non-finite distance are skipped; the first segment
    /// in id order wins ties.
    pub fn nearest_segment_in_window(
        &self,
        observer: &Point,
        window: ViewWindow,
    ) -> Option<(LineSegment, f64)> {
        let mut best: Option<(LineSegment, f64)> = None;
        let mut best_distance = f64::INFINITY;

        for segment in self.line_segments() {
            let distance = segment.distance_in_window(observer, window);
            if distance.is_finite() && distance < best_distance {
                best_distance = distance;
                best = Some((segment, distance));
            }
        }

        best
    }

    /// Nearest segment of the polyline as seen from `observer`.
    ///
    /// Returns an invalid segment when no segment is visible.
    pub fn nearest_line_segment(
        &self,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> LineSegment {
        self.nearest_segment_in_window(observer, ViewWindow::new(view_direction, view_range))
            .map(|(segment, _)| segment)
            .unwrap_or_default()
    }

    /// Nearest visible point of the polyline, invalid when none.
    pub fn nearest_point(&self, observer: &Point, view_direction: f64, view_range: f64) -> Point {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_segment_in_window(observer, window)
            .map(|(segment, _)| segment.nearest_point_in_window(observer, window))
            .unwrap_or_default()
    }
}
