//! Scene queries against the two-lane road fixture.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI, SQRT_2};

use approx::assert_relative_eq;
use pcm_world::query::visible_fraction;
use pcm_world::{MarkType, ObjectType, PcmError, Point};

use crate::fixtures::two_lane_road;

/// Driver eye point of the ego vehicle in lane 1.
fn driver() -> Point {
    Point::xy(0.0, 1.5)
}

/// Front bumper centre of agent 1.
fn front_bumper() -> Point {
    Point::xy(2.25, 1.75)
}

#[test]
fn test_mark_type_of_nearest_line_segment() {
    let scene = two_lane_road();
    assert_eq!(
        scene.mark_type_of_nearest_line_segment(&driver(), f64::INFINITY, 0.0),
        MarkType::Continuous
    );
    assert_eq!(
        scene.mark_type_of_nearest_line_segment(&driver(), FRAC_PI_2, 0.0),
        MarkType::InterruptedLong
    );
    assert_eq!(
        scene.mark_type_of_nearest_line_segment(&driver(), -FRAC_PI_2, 0.0),
        MarkType::Continuous
    );
    // Straight ahead along the lane nothing is crossed
    assert_eq!(
        scene.mark_type_of_nearest_line_segment(&driver(), 0.0, 0.0),
        MarkType::None
    );
}

#[test]
fn test_nearest_marks_by_type() {
    let scene = two_lane_road();
    let roadside =
        scene.nearest_line_segment_of_marks(MarkType::Roadside, &driver(), -FRAC_PI_2, 0.0);
    assert_relative_eq!(roadside.first().y(), -1.0);
    assert_relative_eq!(
        scene.distance_to_nearest_mark(MarkType::Roadside, &driver(), -FRAC_PI_2, 0.0),
        2.5,
        epsilon = 1e-12
    );

    let absent =
        scene.nearest_line_segment_of_marks(MarkType::InterruptedShort, &driver(), f64::INFINITY, 0.0);
    assert!(!absent.is_valid());
}

#[test]
fn test_forward_cone_sees_edge_at_boundary() {
    let scene = two_lane_road();
    // 90° window ahead: the right boundary meets the lane edge at x = 1.5
    let distance = scene.distance_to_nearest_mark(MarkType::None, &driver(), 0.0, FRAC_PI_2);
    assert_relative_eq!(distance, 1.5 * SQRT_2, epsilon = 1e-9);
    let segment = scene.nearest_line_segment_of_marks(MarkType::None, &driver(), 0.0, FRAC_PI_2);
    assert_relative_eq!(segment.first().y(), 0.0);
    let point = segment.nearest_point_from_point(&driver(), 0.0, FRAC_PI_2);
    assert_relative_eq!(point.x(), 1.5, epsilon = 1e-9);
}

#[test]
fn test_nearest_agent_ahead_and_behind() {
    let scene = two_lane_road();

    let ahead = scene.nearest_agent(1, &front_bumper(), 0.0, FRAC_PI_3);
    assert_eq!(ahead.agent_id, 2);
    assert_relative_eq!(ahead.distance, 20.5, epsilon = 1e-9);
    assert_relative_eq!(ahead.line_segment.length(), 1.8, epsilon = 1e-9);
    assert_relative_eq!(ahead.sub_line_segment.length(), 1.8, epsilon = 1e-9);

    let behind = scene.nearest_agent(1, &front_bumper(), PI, FRAC_PI_3);
    assert_eq!(behind.agent_id, 4);
    assert_relative_eq!(behind.distance, 20.0, epsilon = 1e-9);

    assert_eq!(scene.nearest_agent_id(1, &front_bumper(), FRAC_PI_2, 0.0), -1);
    assert!(scene
        .distance_to_nearest_agent(1, &front_bumper(), FRAC_PI_2, 0.0)
        .is_infinite());
    assert!(!scene.nearest_agent(1, &front_bumper(), FRAC_PI_2, 0.0).is_detected());
}

#[test]
fn test_nearest_agent_segment_with_exclusions() {
    let scene = two_lane_road();
    let observer = front_bumper();

    // Without agent 2 the oncoming agent 3 is next; its nearest corner is (37.75, 4.35)
    let full = scene.nearest_line_segment_of_agents(1, &[2], &observer, 0.0, FRAC_PI_3, false);
    assert!(full.is_valid());
    let expected = (35.5_f64 * 35.5 + 2.6 * 2.6).sqrt();
    assert_relative_eq!(
        full.distance_from_point(&observer, f64::INFINITY, 0.0),
        expected,
        epsilon = 1e-9
    );

    let clipped = scene.nearest_line_segment_of_agents(1, &[2], &observer, 0.0, FRAC_PI_3, true);
    assert!(clipped.is_valid());
    assert!(clipped.length() <= full.length() + 1e-9);

    assert!(!scene
        .nearest_line_segment_of_agents(1, &[2, 3], &observer, 0.0, FRAC_PI_3, false)
        .is_valid());
}

#[test]
fn test_object_queries() {
    let scene = two_lane_road();

    let post = scene
        .nearest_line_segment_of_object(ObjectType::Object, &driver(), f64::INFINITY, 0.0)
        .unwrap();
    assert_eq!(post.first().id(), 100);
    assert_relative_eq!(post.second().z(), 2.5);

    let wall = scene
        .nearest_line_segment_of_object(ObjectType::ViewObject, &driver(), f64::INFINITY, 0.0)
        .unwrap();
    assert_relative_eq!(wall.first().x(), 10.0);

    let nearest = scene
        .nearest_line_segment_of_object(ObjectType::None, &driver(), f64::INFINITY, 0.0)
        .unwrap();
    assert_relative_eq!(nearest.first().y(), 9.0);

    let ahead = scene
        .nearest_line_segment_of_object(ObjectType::Object, &driver(), 0.0, 0.0)
        .unwrap();
    assert!(!ahead.is_valid());
}

#[test]
fn test_object_not_configured_after_clear() {
    let mut scene = two_lane_road();
    scene.clear();
    let result =
        scene.nearest_line_segment_of_object(ObjectType::ViewObject, &driver(), f64::INFINITY, 0.0);
    assert!(matches!(result, Err(PcmError::NotConfigured(ObjectType::ViewObject))));
    assert_eq!(
        scene.mark_type_of_nearest_line_segment(&driver(), f64::INFINITY, 0.0),
        MarkType::None
    );
}

#[test]
fn test_courses_and_global_data() {
    let scene = two_lane_road();
    assert_eq!(scene.global_data().participants, 4);
    assert_eq!(scene.courses().len(), 2);
    assert_relative_eq!(scene.course(1).unwrap().points.length(), 200.0);
    let westbound = scene.course(2).unwrap();
    assert_relative_eq!(westbound.points.first_point().unwrap().x(), 100.0);
}

#[test]
fn test_visible_fraction_on_open_road() {
    let scene = two_lane_road();
    let observer = front_bumper();
    assert_relative_eq!(visible_fraction(&scene, 1, &observer, 0.0, FRAC_PI_3, 2), 1.0);
    assert_relative_eq!(visible_fraction(&scene, 1, &observer, 0.0, FRAC_PI_3, 3), 1.0);
    assert_eq!(visible_fraction(&scene, 1, &observer, PI, FRAC_PI_3, 2), 0.0);
}

#[test]
fn test_next_tick_replaces_agents() {
    let mut scene = two_lane_road();
    assert_eq!(scene.tick(), 1);
    assert_eq!(scene.agent_count(), 4);

    {
        let mut tick = scene.begin_tick();
        assert!(tick.add_agent(1, 0.0, 1.75, 0.0, 4.5, 1.8));
        assert!(tick.add_agent(2, 25.0, 1.75, 0.0, 4.5, 1.8));
        // Directly behind agent 2 as seen from agent 1
        assert!(tick.add_agent(5, 45.0, 1.75, 0.0, 4.5, 1.8));
    }

    assert_eq!(scene.tick(), 2);
    assert!(scene.agent(3).is_none());
    let observer = front_bumper();
    assert_eq!(visible_fraction(&scene, 1, &observer, 0.0, FRAC_PI_3, 5), 0.0);
    assert_eq!(scene.nearest_agent_id(1, &observer, 0.0, FRAC_PI_3), 2);
}
