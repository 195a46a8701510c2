//! # PCM-World: Geometric World Model for Traffic Simulation
//!
//! Holds the static and dynamic geometry of a driving scene (lane marks,
//! obstacles, view-occluding objects, intended courses and the rectangular
//! outlines of every agent) and answers the nearest-feature questions
//! driver and sensor models ask each simulation step.
//!
//! ## Quick Start
//!
//! ```rust
//! use pcm_world::container::{LineContainer, PointContainer};
//! use pcm_world::core::Point;
//! use pcm_world::scene::{MarkType, PcmData};
//!
//! let mut edge = LineContainer::new();
//! edge.add_line(0, PointContainer::from_xy(&[(-50.0, 0.0), (50.0, 0.0)]));
//!
//! let mut scene = PcmData::new();
//! scene.add_marks(MarkType::Continuous, edge);
//! {
//!     let mut tick = scene.begin_tick();
//!     tick.add_agent(1, 10.0, 1.75, 0.0, 4.5, 1.8);
//! }
//!
//! let position = Point::xy(0.0, 1.75);
//! let mark = scene.mark_type_of_nearest_line_segment(&position, f64::INFINITY, 0.0);
//! assert_eq!(mark, MarkType::Continuous);
//! assert_eq!(scene.nearest_agent_id(0, &position, 0.0, 1.0), 1);
//! ```
//!
//! ## Coordinate Frame
//!
//! - **X/Y**: scene plane in meters, `z` carried along but unused by queries
//! - **Angles**: radians, counter-clockwise positive, `0` along +X
//!
//! ## View Windows
//!
//! Every query takes a `view_direction` and a `view_range`:
//!
//! ```text
//! view_direction = ±∞ / NaN      -> no restriction
//! view_range = 0 or ∞            -> zero-width sight line along view_direction
//! 0 < view_range < 2π            -> cone centred on view_direction
//! view_range >= 2π               -> no restriction
//! ```
//!
//! ## Sentinels
//!
//! Missing results are values, not errors: `+∞` distances, id `-1`,
//! [`MarkType::None`](scene::MarkType::None) and invalid points or
//! segments. They reduce correctly under `min`, so results over many
//! containers combine without special cases.
//!
//! ## Architecture
//!
//! - [`core`]: points, angles and frame transforms
//! - [`geometry`]: line segments and view-window clipping
//! - [`container`]: polylines and line collections
//! - [`scene`]: the world snapshot, per-tick agent updates and YAML scenes
//! - [`query`]: occlusion between agents

pub mod container;
pub mod core;
pub mod geometry;
pub mod query;
pub mod scene;

// Re-export main types at crate root
pub use crate::container::{LineContainer, PointContainer};
pub use crate::core::{AgentViewDirection, Point};
pub use crate::geometry::{LineSegment, ViewWindow};
pub use crate::scene::{AgentDetection, MarkType, ObjectType, PcmData, PcmError, TickUpdate};
