//! YAML scene files.
//!
//! A compact stand-in for the scenery importers, used by the command line
//! tool and by tests to set up scenes without building them in code.
//!
//! ```yaml
//! global_data:
//!   participants: 2
//! marks:
//!   - type: continuous
//!     lines:
//!       - id: 0
//!         points:
//!           - { x: -50.0, y: 0.0 }
//!           - { x: 50.0, y: 0.0 }
//! object:
//!   - id: 0
//!     points: [{ x: 20.0, y: -1.0 }, { x: 20.0, y: 1.0 }]
//! agents:
//!   - { id: 1, x: 10.0, y: 1.75, yaw: 0.0, width: 4.5, height: 1.8 }
//! ```
//!
//! Point ids default to the position in the list; `z` defaults to `0`.
//! Agents in the file are added as the first tick of the scene.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::container::{LineContainer, PointContainer};
use crate::core::Point;

use super::data::PcmData;
use super::error::{PcmError, Result};
use super::types::{Course, GlobalData, MarkType};

/// Serialized form of a complete scene.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub global_data: GlobalData,
    pub marks: Vec<MarksDescription>,
    pub object: Option<Vec<LineDescription>>,
    pub view_object: Option<Vec<LineDescription>>,
    pub courses: Vec<CourseDescription>,
    pub agents: Vec<AgentDescription>,
}

/// All lines of one mark type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarksDescription {
    #[serde(rename = "type")]
    pub mark_type: MarkType,
    #[serde(default)]
    pub lines: Vec<LineDescription>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineDescription {
    pub id: i64,
    #[serde(default)]
    pub points: Vec<PointDescription>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PointDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourseDescription {
    pub number: i64,
    #[serde(default)]
    pub points: Vec<PointDescription>,
}

/// Agent pose and extents, see [`super::TickUpdate::add_agent`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AgentDescription {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub yaw: f64,
    pub width: f64,
    pub height: f64,
}

fn build_polyline(context: &str, points: &[PointDescription]) -> Result<PointContainer> {
    let mut line = PointContainer::new();
    for (index, p) in points.iter().enumerate() {
        let id = p.id.unwrap_or(index as i64);
        if !line.add_point(id, Point::new(id, p.x, p.y, p.z)) {
            return Err(PcmError::InvalidScene(format!(
                "{}: duplicate point id {}",
                context, id
            )));
        }
    }
    Ok(line)
}

fn build_lines(context: &str, lines: &[LineDescription]) -> Result<LineContainer> {
    let mut container = LineContainer::new();
    for line in lines {
        let points = build_polyline(&format!("{} line {}", context, line.id), &line.points)?;
        if !container.add_line(line.id, points) {
            return Err(PcmError::InvalidScene(format!(
                "{}: duplicate line id {}",
                context, line.id
            )));
        }
    }
    Ok(container)
}

impl SceneDescription {
    /// Parse a scene description without building it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize the description to a YAML string.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build and validate the scene.
    ///
    /// # Errors
    /// [`PcmError::InvalidScene`] for duplicate ids, marks of type `none`
    /// or agents with non-finite or negative pose or extents.
    pub fn into_scene(self) -> Result<PcmData> {
        let mut data = PcmData::new();
        data.set_global_data(self.global_data);

        for marks in &self.marks {
            if marks.mark_type == MarkType::None {
                return Err(PcmError::InvalidScene(
                    "marks must not use mark type none".to_string(),
                ));
            }
            let context = format!("{} marks", marks.mark_type);
            let lines = build_lines(&context, &marks.lines)?;
            if !data.add_marks(marks.mark_type, lines) {
                return Err(PcmError::InvalidScene(format!(
                    "mark type {} listed twice",
                    marks.mark_type
                )));
            }
        }

        if let Some(object) = &self.object {
            data.set_object(build_lines("object", object)?);
        }
        if let Some(view_object) = &self.view_object {
            data.set_view_object(build_lines("view object", view_object)?);
        }

        for course in &self.courses {
            let points = build_polyline(&format!("course {}", course.number), &course.points)?;
            if !data.add_course(Course::new(course.number, points)) {
                return Err(PcmError::InvalidScene(format!(
                    "duplicate course number {}",
                    course.number
                )));
            }
        }

        if !self.agents.is_empty() {
            let mut tick = data.begin_tick();
            for agent in &self.agents {
                if !tick.add_agent(agent.id, agent.x, agent.y, agent.yaw, agent.width, agent.height) {
                    return Err(PcmError::InvalidScene(format!(
                        "agent {} is a duplicate or has invalid pose or extents",
                        agent.id
                    )));
                }
            }
        }

        log::debug!(
            "Loaded scene: {} mark types, {} courses, {} agents",
            data.mark_types().count(),
            data.courses().len(),
            data.agent_count()
        );
        Ok(data)
    }
}

impl PcmData {
    /// Load a scene from a YAML string.
    ///
    /// # Errors
    /// Returns `PcmError` if the string cannot be parsed or the scene is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        SceneDescription::from_yaml_str(yaml)?.into_scene()
    }

    /// Load a scene from a YAML file.
    ///
    /// # Example
    /// ```rust,ignore
    /// let scene = PcmData::from_yaml_file("scene.yaml")?;
    /// let mark = scene.mark_type_of_nearest_line_segment(&Point::xy(0.0, 1.0), f64::INFINITY, 0.0);
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading scene from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
