//! World snapshot: marks, objects, courses and agents.
//!
//! - [`PcmData`]: the scene and its nearest-feature queries
//! - [`TickUpdate`]: per-tick agent update guard
//! - [`SceneDescription`]: YAML scene files

mod data;
mod error;
mod tick;
mod types;
mod yaml;

pub use data::PcmData;
pub use error::{PcmError, Result};
pub use tick::{AGENT_OUTLINE_LINE_ID, TickUpdate};
pub use types::{AgentDetection, Course, GlobalData, MarkType, ObjectType};
pub use yaml::{
    AgentDescription, CourseDescription, LineDescription, MarksDescription, PointDescription,
    SceneDescription,
};
