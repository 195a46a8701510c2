//! Shared scene fixtures.

use std::path::PathBuf;

use pcm_world::PcmData;

/// Path of a scene file in `tests/integration/scenes`.
pub fn scene_path(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/integration/scenes/{}.yaml",
        env!("CARGO_MANIFEST_DIR"),
        name
    ))
}

/// Load a scene fixture, panicking with the error on failure.
pub fn load_scene(name: &str) -> PcmData {
    env_logger::try_init().ok();
    let path = scene_path(name);
    match PcmData::from_yaml_file(&path) {
        Ok(scene) => scene,
        Err(e) => panic!("Scene {} failed to load: {}", path.display(), e),
    }
}

/// Two-lane road with four agents, see `scenes/two_lane_road.yaml`.
pub fn two_lane_road() -> PcmData {
    load_scene("two_lane_road")
}
