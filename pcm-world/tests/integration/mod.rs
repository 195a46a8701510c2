//! Integration tests for pcm-world
//!
//! Exercise the public API end to end: segment queries on the reference
//! segment, scene queries against a two-lane road loaded from YAML, scene
//! file handling and randomized geometric properties.
//!
//! # Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test --test integration -- --nocapture
//!
//! # Run one group
//! cargo test --test integration properties
//! ```

mod fixtures;
mod scene_queries;
mod segment_scenarios;
mod yaml_scenes;
