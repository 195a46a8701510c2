//! Derived queries built on top of a scene.
//!
//! - **Occlusion**: visible share of an opposing agent behind view
//!   objects and other agents
//!
//! # Example
//!
//! ```rust,ignore
//! use pcm_world::query::visible_fraction;
//!
//! let detection = scene.nearest_agent(ego_id, &position, heading, fov);
//! if detection.is_detected() {
//!     let share = visible_fraction(&scene, ego_id, &position, heading, fov, detection.agent_id);
//! }
//! ```

pub mod occlusion;

pub use occlusion::{AngularInterval, angular_extent, visible_fraction};
