//! Core types for the PCM world model.
//!
//! - [`Point`]: 3D-tagged point with an identity and an invalid sentinel
//! - [`math`]: angle normalization, frame transforms and view directions

pub mod math;
mod point;

pub use math::{AgentViewDirection, angle_in_window, normalize_angle};
pub use point::{Point, UNDEFINED_ID};
