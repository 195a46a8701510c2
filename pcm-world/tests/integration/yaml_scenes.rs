//! Scene file loading.

use std::io::Write;

use pcm_world::scene::SceneDescription;
use pcm_world::{MarkType, PcmData, PcmError};

use crate::fixtures::scene_path;

#[test]
fn test_fixture_description() {
    env_logger::try_init().ok();
    let contents = std::fs::read_to_string(scene_path("two_lane_road")).unwrap();
    let description = SceneDescription::from_yaml_str(&contents).unwrap();
    assert_eq!(description.marks.len(), 3);
    assert_eq!(description.agents.len(), 4);
    assert!(description.object.is_some());

    let scene = description.into_scene().unwrap();
    let types: Vec<MarkType> = scene.mark_types().collect();
    assert_eq!(
        types,
        vec![MarkType::Continuous, MarkType::InterruptedLong, MarkType::Roadside]
    );
    assert_eq!(scene.marks(MarkType::Continuous).unwrap().segment_count(), 3);
}

#[test]
fn test_round_trip_through_file() {
    env_logger::try_init().ok();
    let contents = std::fs::read_to_string(scene_path("two_lane_road")).unwrap();
    let description = SceneDescription::from_yaml_str(&contents).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    std::fs::write(&path, description.to_yaml_string().unwrap()).unwrap();

    let scene = PcmData::from_yaml_file(&path).unwrap();
    assert_eq!(scene.agent_count(), 4);
    assert_eq!(scene.courses().len(), 2);
    assert_eq!(scene.global_data().format_version, "1.0");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PcmData::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, PcmError::Io(_)));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "marks:\n  - type: dotted\n    lines: []").unwrap();
    let err = PcmData::from_yaml_file(file.path()).unwrap_err();
    assert_eq!(err.code(), "PARSE");
}

#[test]
fn test_duplicate_course_is_invalid() {
    let yaml = r#"
courses:
  - number: 7
    points: []
  - number: 7
    points: []
"#;
    let err = PcmData::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, PcmError::InvalidScene(_)));
    assert!(err.to_string().contains("duplicate course number 7"));
}

#[test]
fn test_duplicate_agent_is_invalid() {
    let yaml = r#"
agents:
  - { id: 1, x: 0.0, y: 0.0, width: 4.0, height: 2.0 }
  - { id: 1, x: 10.0, y: 0.0, width: 4.0, height: 2.0 }
"#;
    assert!(matches!(
        PcmData::from_yaml_str(yaml),
        Err(PcmError::InvalidScene(_))
    ));
}
