//! Collection of polylines (marks, objects, agent outlines).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::point_container::PointContainer;
use crate::core::Point;
use crate::geometry::{LineSegment, ViewWindow};

/// Mapping `id -> line`, where every line is a [`PointContainer`].
///
/// Lane marks, static objects, view-occlusion objects and agent outlines
/// all use this type; the owner keeps the type tag.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineContainer {
    lines: BTreeMap<i64, PointContainer>,
}

impl LineContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line under `id`.
    ///
    /// Returns `false` without touching the container if `id` is taken.
    pub fn add_line(&mut self, id: i64, line: PointContainer) -> bool {
        if self.lines.contains_key(&id) {
            log::debug!("Line id {} already present, insert ignored", id);
            return false;
        }
        self.lines.insert(id, line);
        true
    }

    #[inline]
    pub fn line(&self, id: i64) -> Option<&PointContainer> {
        self.lines.get(&id)
    }

    /// All lines in id order.
    #[inline]
    pub fn lines(&self) -> &BTreeMap<i64, PointContainer> {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Every segment of every line, lines in id order.
    pub fn line_segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.lines.values().flat_map(|line| line.line_segments())
    }

    /// Number of segments over all lines.
    pub fn segment_count(&self) -> usize {
        self.lines.values().map(|line| line.len().saturating_sub(1)).sum()
    }

    /// Nearest segment over all lines and its distance.
    ///
    /// Same reduction as [`PointContainer::nearest_segment_in_window`]:
    /// non-finite distances are skipped and the first line wins ties.
    pub fn nearest_segment_in_window(
        &self,
        observer: &Point,
        window: ViewWindow,
    ) -> Option<(LineSegment, f64)> {
        let mut best: Option<(LineSegment, f64)> = None;
        let mut best_distance = f64::INFINITY;

        for line in self.lines.values() {
            if let Some((segment, distance)) = line.nearest_segment_in_window(observer, window) {
                if distance < best_distance {
                    best_distance = distance;
                    best = Some((segment, distance));
                }
            }
        }

        best
    }

    /// Nearest segment over all lines as seen from `observer`.
    ///
    /// With `calculate_sub_line` the result is clipped to the part inside
    /// the view window; otherwise the full segment is returned. Returns an
    /// invalid segment when nothing is visible.
    pub fn nearest_line_segment(
        &self,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
        calculate_sub_line: bool,
    ) -> LineSegment {
        let window = ViewWindow::new(view_direction, view_range);
        match self.nearest_segment_in_window(observer, window) {
            Some((segment, _)) if calculate_sub_line => segment.sub_segment_in_window(observer, window),
            Some((segment, _)) => segment,
            None => LineSegment::invalid(),
        }
    }

    /// Nearest visible point over all lines, invalid when none.
    pub fn nearest_point(&self, observer: &Point, view_direction: f64, view_range: f64) -> Point {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_segment_in_window(observer, window)
            .map(|(segment, _)| segment.nearest_point_in_window(observer, window))
            .unwrap_or_default()
    }

    /// Distance to the nearest visible segment, `+∞` when none.
    pub fn distance_from_point(&self, observer: &Point, view_direction: f64, view_range: f64) -> f64 {
        self.nearest_segment_in_window(observer, ViewWindow::new(view_direction, view_range))
            .map_or(f64::INFINITY, |(_, distance)| distance)
    }
}
