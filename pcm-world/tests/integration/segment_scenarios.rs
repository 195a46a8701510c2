//! Reference scenarios on the segment (0, 0) -> (0, 10).
//!
//! Each scenario runs against the bare segment and against the same
//! segment wrapped in a line container, which must agree.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use pcm_world::{AgentViewDirection, LineContainer, LineSegment, Point, PointContainer};

fn reference_segment() -> LineSegment {
    LineSegment::new(Point::new(0, 0.0, 0.0, 0.0), Point::new(1, 0.0, 10.0, 0.0))
}

fn reference_container() -> LineContainer {
    let mut lines = LineContainer::new();
    lines.add_line(
        0,
        PointContainer::from_points([Point::new(0, 0.0, 0.0, 0.0), Point::new(1, 0.0, 10.0, 0.0)]),
    );
    lines
}

/// Check segment and container answers against an expected nearest point.
fn check(observer: Point, direction: f64, range: f64, expected: Option<(f64, f64)>) {
    let segment = reference_segment();
    let container = reference_container();

    let point = segment.nearest_point_from_point(&observer, direction, range);
    let distance = segment.distance_from_point(&observer, direction, range);
    let container_point = container.nearest_point(&observer, direction, range);
    let container_distance = container.distance_from_point(&observer, direction, range);

    match expected {
        Some((x, y)) => {
            assert!(point.is_valid());
            assert_relative_eq!(point.x(), x, epsilon = 1e-9);
            assert_relative_eq!(point.y(), y, epsilon = 1e-9);
            assert_relative_eq!(distance, observer.distance_to(&point), epsilon = 1e-12);
            assert!(container_point.same_position(&point));
            assert_relative_eq!(container_distance, distance, epsilon = 1e-12);
        }
        None => {
            assert!(!point.is_valid());
            assert!(distance.is_infinite());
            assert!(!container_point.is_valid());
            assert!(container_distance.is_infinite());
        }
    }
}

#[test]
fn test_unconstrained_perpendicular_foot() {
    check(Point::xy(5.0, 5.0), f64::INFINITY, f64::INFINITY, Some((0.0, 5.0)));
    assert_relative_eq!(
        reference_segment().distance_from_point(&Point::xy(5.0, 5.0), f64::INFINITY, 0.0),
        5.0
    );
}

#[test]
fn test_unconstrained_endpoint_clamp() {
    check(Point::xy(5.0, 12.0), f64::INFINITY, f64::INFINITY, Some((0.0, 10.0)));
    let nearest =
        reference_segment().nearest_point_from_point(&Point::xy(5.0, 12.0), f64::INFINITY, 0.0);
    assert_eq!(nearest.id(), 1);
}

#[test]
fn test_back_sight_line_hits() {
    let back = AgentViewDirection::Back.to_radians();
    check(Point::xy(5.0, 5.0), back, f64::INFINITY, Some((0.0, 5.0)));
    check(Point::xy(5.0, 5.0), back, 0.0, Some((0.0, 5.0)));
}

#[test]
fn test_back_sight_line_misses() {
    check(Point::xy(5.0, 12.0), PI, f64::INFINITY, None);
}

#[test]
fn test_back_half_plane_sees_near_endpoint() {
    check(Point::xy(5.0, -5.0), PI, PI, Some((0.0, 0.0)));
}

#[test]
fn test_wide_back_window_sees_segment() {
    check(Point::xy(-5.0, 5.0), PI, 1.5 * PI, Some((0.0, 5.0)));
}

#[test]
fn test_global_view_direction_follows_heading() {
    // Agent heading north: its left is west, where the segment lies
    let observer = Point::xy(5.0, 5.0);
    let direction = AgentViewDirection::Left.to_global_radians(PI / 2.0);
    check(observer, direction, 0.0, Some((0.0, 5.0)));
    let direction = AgentViewDirection::Right.to_global_radians(PI / 2.0);
    check(observer, direction, 0.0, None);
    assert!(AgentViewDirection::None.to_global_radians(1.0).is_infinite());
}
