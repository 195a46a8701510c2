//! Agent-to-agent occlusion.
//!
//! Measures how much of an opposing agent an observer can actually see.
//! The target's nearest outline segment is clipped to the view window and
//! turned into an angular interval around the observer. Nearer view
//! objects and other agents shadow parts of that interval; what remains is
//! the visible fraction.
//!
//! ```text
//!                 target
//!            ┌───────────────┐
//!            │ ░░░░░░ │      │   ░ shadowed by occluder
//!            └───────────────┘
//!                ══════          occluder
//!                   ◉            observer
//! ```
//!
//! Depth is compared along the ray through the middle of each overlap, so
//! an occluder that crosses the target's segment counts as fully in front
//! or fully behind over that overlap.

use crate::core::math::{GEOMETRY_EPSILON, normalize_angle};
use crate::core::Point;
use crate::geometry::{LineSegment, ViewWindow};
use crate::scene::PcmData;

/// Angular sector `[start, start + width]` seen from an observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularInterval {
    /// Bearing of the counter-clockwise start, in `(-π, π]`.
    pub start: f64,
    /// Angular width, in `[0, π)`.
    pub width: f64,
}

impl AngularInterval {
    /// Bearing of the counter-clockwise end, normalized.
    #[inline]
    pub fn end(&self) -> f64 {
        normalize_angle(self.start + self.width)
    }

    /// Check whether a bearing lies inside the sector.
    pub fn contains(&self, bearing: f64) -> bool {
        if !bearing.is_finite() {
            return false;
        }
        let offset = normalize_angle(bearing - self.start);
        (-GEOMETRY_EPSILON..=self.width + GEOMETRY_EPSILON).contains(&offset)
    }

    /// Overlap of `other` with this sector, as offsets from `self.start`.
    fn overlap_offsets(&self, other: &AngularInterval) -> Option<(f64, f64)> {
        // Both widths are below π, so shifting by one normalization covers
        // every overlap.
        let offset = normalize_angle(other.start - self.start);
        let lo = offset.max(0.0);
        let hi = (offset + other.width).min(self.width);
        (hi - lo > GEOMETRY_EPSILON).then_some((lo, hi))
    }
}

/// Angular sector covered by `segment` as seen from `observer`.
///
/// Returns `None` for invalid input or when the observer lies on the
/// segment, where the sector is not defined.
pub fn angular_extent(observer: &Point, segment: &LineSegment) -> Option<AngularInterval> {
    if !observer.is_valid() || !segment.is_valid() {
        return None;
    }
    if segment.distance_in_window(observer, ViewWindow::Unconstrained) < GEOMETRY_EPSILON {
        return None;
    }

    let first = observer.bearing_to(segment.first());
    let second = observer.bearing_to(segment.second());
    let sweep = normalize_angle(second - first);

    Some(if sweep >= 0.0 {
        AngularInterval {
            start: first,
            width: sweep,
        }
    } else {
        AngularInterval {
            start: second,
            width: -sweep,
        }
    })
}

/// Segments that can hide other agents from `observer`.
fn occluders<'a>(
    scene: &'a PcmData,
    ego_id: i64,
    target_id: i64,
) -> impl Iterator<Item = LineSegment> + 'a {
    let view_objects = scene
        .view_object()
        .into_iter()
        .flat_map(|lines| lines.line_segments());
    let agents = scene
        .agent_ids()
        .filter(move |&id| id != ego_id && id != target_id)
        .filter_map(move |id| scene.agent(id))
        .flat_map(|outline| outline.line_segments());
    view_objects.chain(agents)
}

/// Distance along the ray from `observer` at `bearing` to `segment`.
#[inline]
fn depth_along(observer: &Point, segment: &LineSegment, bearing: f64) -> f64 {
    segment.distance_in_window(observer, ViewWindow::SightLine {
        direction: normalize_angle(bearing),
    })
}

/// Total length of the union of `intervals`.
fn union_length(mut intervals: Vec<(f64, f64)>) -> f64 {
    intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut total = 0.0;
    let mut current: Option<(f64, f64)> = None;
    for (lo, hi) in intervals {
        current = match current {
            Some((c_lo, c_hi)) if lo <= c_hi => Some((c_lo, c_hi.max(hi))),
            Some((c_lo, c_hi)) => {
                total += c_hi - c_lo;
                Some((lo, hi))
            }
            None => Some((lo, hi)),
        };
    }
    if let Some((lo, hi)) = current {
        total += hi - lo;
    }
    total
}

/// Share of agent `target_id` visible from `observer`, in `[0, 1]`.
///
/// Only the target's nearest outline segment inside the view window is
/// considered. Occluders are the view objects and the outlines of every
/// agent other than `ego_id` and `target_id`. Returns `0` when the target
/// is unknown or outside the window.
pub fn visible_fraction(
    scene: &PcmData,
    ego_id: i64,
    observer: &Point,
    view_direction: f64,
    view_range: f64,
    target_id: i64,
) -> f64 {
    let Some(outline) = scene.agent(target_id) else {
        log::trace!("Visibility of unknown agent {} requested", target_id);
        return 0.0;
    };
    let window = ViewWindow::new(view_direction, view_range);
    let Some((segment, distance)) = outline.nearest_segment_in_window(observer, window) else {
        return 0.0;
    };
    let visible = segment.sub_segment_in_window(observer, window);

    let Some(extent) = angular_extent(observer, &visible) else {
        // Observer touches the target.
        return 1.0;
    };

    if extent.width <= GEOMETRY_EPSILON {
        let blocked = occluders(scene, ego_id, target_id)
            .any(|occluder| depth_along(observer, &occluder, extent.start) < distance);
        return if blocked { 0.0 } else { 1.0 };
    }

    let mut shadowed = Vec::new();
    for occluder in occluders(scene, ego_id, target_id) {
        let Some(occluder_extent) = angular_extent(observer, &occluder) else {
            continue;
        };
        let Some((lo, hi)) = extent.overlap_offsets(&occluder_extent) else {
            continue;
        };
        let bearing = extent.start + 0.5 * (lo + hi);
        if depth_along(observer, &occluder, bearing) < depth_along(observer, &visible, bearing) {
            shadowed.push((lo, hi));
        }
    }

    let fraction = 1.0 - union_length(shadowed) / extent.width;
    log::trace!(
        "Agent {} visible fraction {:.3} from agent {}",
        target_id,
        fraction,
        ego_id
    );
    fraction.clamp(0.0, 1.0)
}
