//! Type tags and value types of a PCM scene.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::container::PointContainer;
use crate::core::UNDEFINED_ID;
use crate::geometry::LineSegment;

/// Lane mark classification.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MarkType {
    /// No mark / every mark type, depending on context.
    #[default]
    None,
    Continuous,
    InterruptedLong,
    InterruptedShort,
    Roadside,
}

impl MarkType {
    /// Every concrete mark type, in query order.
    pub const ALL: [MarkType; 4] = [
        MarkType::Continuous,
        MarkType::InterruptedLong,
        MarkType::InterruptedShort,
        MarkType::Roadside,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Continuous => "continuous",
            Self::InterruptedLong => "interrupted_long",
            Self::InterruptedShort => "interrupted_short",
            Self::Roadside => "roadside",
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "continuous" => Ok(Self::Continuous),
            "interrupted_long" => Ok(Self::InterruptedLong),
            "interrupted_short" => Ok(Self::InterruptedShort),
            "roadside" => Ok(Self::Roadside),
            other => Err(format!("unknown mark type '{}'", other)),
        }
    }
}

/// Static geometry classification.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Both object kinds.
    #[default]
    None,
    /// Static obstacles.
    Object,
    /// Geometry relevant for view occlusion.
    ViewObject,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Object => "object",
            Self::ViewObject => "view_object",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "object" => Ok(Self::Object),
            "view_object" | "viewobject" => Ok(Self::ViewObject),
            other => Err(format!("unknown object type '{}'", other)),
        }
    }
}

/// Intended course of a participant, tagged with its course number.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Course {
    pub number: i64,
    pub points: PointContainer,
}

impl Course {
    pub fn new(number: i64, points: PointContainer) -> Self {
        Self { number, points }
    }
}

/// Scene-wide metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalData {
    /// Coordinate offset applied by the importer (m).
    pub offset_x: f64,
    /// Coordinate offset applied by the importer (m).
    pub offset_y: f64,
    /// Number of participants in the scene.
    pub participants: u32,
    /// Version string of the source file format.
    pub format_version: String,
}

/// Result of a nearest-agent query.
///
/// Bundles what visibility computations need: the opposing agent, its full
/// nearest outline segment, the part of that segment inside the view
/// window, and the distance. [`AgentDetection::none`] is the sentinel.
#[derive(Clone, Copy, Debug)]
pub struct AgentDetection {
    /// Id of the detected agent, `-1` if none.
    pub agent_id: i64,
    /// Full nearest outline segment.
    pub line_segment: LineSegment,
    /// `line_segment` clipped to the view window.
    pub sub_line_segment: LineSegment,
    /// Distance to the nearest visible point, `+∞` if none.
    pub distance: f64,
}

impl AgentDetection {
    /// Sentinel for "no agent detected".
    pub fn none() -> Self {
        Self {
            agent_id: UNDEFINED_ID,
            line_segment: LineSegment::invalid(),
            sub_line_segment: LineSegment::invalid(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.agent_id != UNDEFINED_ID && self.distance.is_finite()
    }
}

impl Default for AgentDetection {
    fn default() -> Self {
        Self::none()
    }
}
