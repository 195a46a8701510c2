//! Scene aggregator and typed nearest-feature queries.

use std::collections::BTreeMap;

use crate::container::LineContainer;
use crate::core::{Point, UNDEFINED_ID};
use crate::geometry::{LineSegment, ViewWindow};

use super::error::{PcmError, Result};
use super::types::{AgentDetection, Course, GlobalData, MarkType, ObjectType};

/// World snapshot queried by driver and sensor models.
///
/// # Lifecycle
///
/// ```text
/// Build   add_marks / set_object / set_view_object / add_course / set_global_data
///   │
///   ▼
/// Update  begin_tick() -> TickUpdate::add_agent ...   (agent outlines rebuilt)
///   │
///   ▼
/// Query   nearest_* / mark_type_of_nearest_line_segment   (&self only)
///   │
///   └──► next tick: Update again; teardown: clear()
/// ```
///
/// Static geometry is set once. Agent outlines are cleared and rebuilt
/// every simulation step through [`PcmData::begin_tick`]; the returned
/// guard borrows the scene mutably, so no query can observe a half-built
/// tick.
///
/// # Sentinels
///
/// Absent features produce `MarkType::None`, id `-1`, `+∞` distances and
/// invalid segments. Only querying an object type that was never
/// configured is reported as an error.
#[derive(Clone, Debug, Default)]
pub struct PcmData {
    marks: BTreeMap<MarkType, LineContainer>,
    object: Option<LineContainer>,
    view_object: Option<LineContainer>,
    courses: Vec<Course>,
    global_data: GlobalData,
    pub(super) agents: BTreeMap<i64, LineContainer>,
    pub(super) tick: u64,
}

impl PcmData {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Build
    // ─────────────────────────────────────────────────────────────────────

    /// Register the marks of one type.
    ///
    /// Returns `false` for `MarkType::None` or if the type is already present.
    pub fn add_marks(&mut self, mark_type: MarkType, lines: LineContainer) -> bool {
        if mark_type == MarkType::None {
            log::warn!("Marks cannot be registered under mark type none");
            return false;
        }
        if self.marks.contains_key(&mark_type) {
            log::warn!("Marks of type {} already present", mark_type);
            return false;
        }
        log::debug!("Adding {} {} mark lines", lines.len(), mark_type);
        self.marks.insert(mark_type, lines);
        true
    }

    /// Set the static object geometry, replacing any previous one.
    pub fn set_object(&mut self, lines: LineContainer) {
        log::debug!("Setting object with {} lines", lines.len());
        self.object = Some(lines);
    }

    /// Set the view-occlusion geometry, replacing any previous one.
    pub fn set_view_object(&mut self, lines: LineContainer) {
        log::debug!("Setting view object with {} lines", lines.len());
        self.view_object = Some(lines);
    }

    /// Add an intended course. Returns `false` if the number is taken.
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.course(course.number).is_some() {
            log::warn!("Course {} already present", course.number);
            return false;
        }
        self.courses.push(course);
        true
    }

    pub fn set_global_data(&mut self, global_data: GlobalData) {
        self.global_data = global_data;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn marks(&self, mark_type: MarkType) -> Option<&LineContainer> {
        self.marks.get(&mark_type)
    }

    /// Mark types present in the scene, in query order.
    pub fn mark_types(&self) -> impl Iterator<Item = MarkType> + '_ {
        self.marks.keys().copied()
    }

    pub fn object(&self) -> Option<&LineContainer> {
        self.object.as_ref()
    }

    pub fn view_object(&self) -> Option<&LineContainer> {
        self.view_object.as_ref()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, number: i64) -> Option<&Course> {
        self.courses.iter().find(|course| course.number == number)
    }

    pub fn global_data(&self) -> &GlobalData {
        &self.global_data
    }

    /// Outline of an agent in the current tick.
    pub fn agent(&self, id: i64) -> Option<&LineContainer> {
        self.agents.get(&id)
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.agents.keys().copied()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of ticks started since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mark queries
    // ─────────────────────────────────────────────────────────────────────

    /// Nearest mark segment over the given types, with its type and distance.
    fn nearest_mark_in_window(
        &self,
        mark_type: MarkType,
        observer: &Point,
        window: ViewWindow,
    ) -> Option<(MarkType, LineSegment, f64)> {
        if mark_type != MarkType::None {
            let Some(marks) = self.marks.get(&mark_type) else {
                log::trace!("No marks of type {} in scene", mark_type);
                return None;
            };
            return marks
                .nearest_segment_in_window(observer, window)
                .map(|(segment, distance)| (mark_type, segment, distance));
        }

        let mut best: Option<(MarkType, LineSegment, f64)> = None;
        let mut best_distance = f64::INFINITY;
        for (&kind, marks) in &self.marks {
            if let Some((segment, distance)) = marks.nearest_segment_in_window(observer, window) {
                if distance < best_distance {
                    best_distance = distance;
                    best = Some((kind, segment, distance));
                }
            }
        }
        best
    }

    /// Type of the globally nearest mark segment.
    ///
    /// Returns `MarkType::None` when the scene has no marks or none is visible.
    pub fn mark_type_of_nearest_line_segment(
        &self,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> MarkType {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_mark_in_window(MarkType::None, observer, window)
            .map_or(MarkType::None, |(kind, _, _)| kind)
    }

    /// Nearest mark segment of `mark_type`.
    ///
    /// `MarkType::None` searches every type present. A type without marks
    /// in this scene yields an invalid segment.
    pub fn nearest_line_segment_of_marks(
        &self,
        mark_type: MarkType,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> LineSegment {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_mark_in_window(mark_type, observer, window)
            .map_or_else(LineSegment::invalid, |(_, segment, _)| segment)
    }

    /// Distance to the nearest mark of `mark_type`, `+∞` if none.
    pub fn distance_to_nearest_mark(
        &self,
        mark_type: MarkType,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> f64 {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_mark_in_window(mark_type, observer, window)
            .map_or(f64::INFINITY, |(_, _, distance)| distance)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Object queries
    // ─────────────────────────────────────────────────────────────────────

    fn object_container(&self, object_type: ObjectType) -> Result<&LineContainer> {
        let container = match object_type {
            ObjectType::Object => self.object.as_ref(),
            ObjectType::ViewObject => self.view_object.as_ref(),
            ObjectType::None => None,
        };
        container.ok_or(PcmError::NotConfigured(object_type))
    }

    /// Nearest segment of the object geometry of `object_type`.
    ///
    /// `ObjectType::None` searches whichever of Object and ViewObject are
    /// configured (Object wins ties) and yields an invalid segment if
    /// neither is.
    ///
    /// # Errors
    /// [`PcmError::NotConfigured`] when a specific object type was never set.
    pub fn nearest_line_segment_of_object(
        &self,
        object_type: ObjectType,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> Result<LineSegment> {
        let window = ViewWindow::new(view_direction, view_range);

        if object_type != ObjectType::None {
            let container = self.object_container(object_type)?;
            return Ok(container
                .nearest_segment_in_window(observer, window)
                .map_or_else(LineSegment::invalid, |(segment, _)| segment));
        }

        let mut best = LineSegment::invalid();
        let mut best_distance = f64::INFINITY;
        for container in [&self.object, &self.view_object].into_iter().flatten() {
            if let Some((segment, distance)) = container.nearest_segment_in_window(observer, window) {
                if distance < best_distance {
                    best_distance = distance;
                    best = segment;
                }
            }
        }
        Ok(best)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Agent queries
    // ─────────────────────────────────────────────────────────────────────

    /// Nearest agent outline segment, skipping `ego_id` and `exclude_ids`.
    fn nearest_agent_in_window(
        &self,
        ego_id: i64,
        exclude_ids: &[i64],
        observer: &Point,
        window: ViewWindow,
    ) -> Option<(i64, LineSegment, f64)> {
        let mut best: Option<(i64, LineSegment, f64)> = None;
        let mut best_distance = f64::INFINITY;

        for (&id, outline) in &self.agents {
            if id == ego_id || exclude_ids.contains(&id) {
                continue;
            }
            if let Some((segment, distance)) = outline.nearest_segment_in_window(observer, window) {
                if distance < best_distance {
                    best_distance = distance;
                    best = Some((id, segment, distance));
                }
            }
        }

        best
    }

    /// Nearest outline segment of any agent other than the excluded ones.
    ///
    /// With `calculate_sub_line` the segment is clipped to the view window
    /// (the input of occlusion computations); otherwise the full outline
    /// segment is returned.
    pub fn nearest_line_segment_of_agents(
        &self,
        ego_id: i64,
        exclude_ids: &[i64],
        observer: &Point,
        view_direction: f64,
        view_range: f64,
        calculate_sub_line: bool,
    ) -> LineSegment {
        let window = ViewWindow::new(view_direction, view_range);
        match self.nearest_agent_in_window(ego_id, exclude_ids, observer, window) {
            Some((_, segment, _)) if calculate_sub_line => segment.sub_segment_in_window(observer, window),
            Some((_, segment, _)) => segment,
            None => LineSegment::invalid(),
        }
    }

    /// Nearest opposing agent with full and clipped outline segment.
    pub fn nearest_agent(
        &self,
        ego_id: i64,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> AgentDetection {
        let window = ViewWindow::new(view_direction, view_range);
        match self.nearest_agent_in_window(ego_id, &[], observer, window) {
            Some((agent_id, segment, distance)) => AgentDetection {
                agent_id,
                line_segment: segment,
                sub_line_segment: segment.sub_segment_in_window(observer, window),
                distance,
            },
            None => AgentDetection::none(),
        }
    }

    /// Id of the nearest opposing agent, `-1` if none is visible.
    pub fn nearest_agent_id(
        &self,
        ego_id: i64,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> i64 {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_agent_in_window(ego_id, &[], observer, window)
            .map_or(UNDEFINED_ID, |(id, _, _)| id)
    }

    /// Distance to the nearest opposing agent, `+∞` if none is visible.
    pub fn distance_to_nearest_agent(
        &self,
        ego_id: i64,
        observer: &Point,
        view_direction: f64,
        view_range: f64,
    ) -> f64 {
        let window = ViewWindow::new(view_direction, view_range);
        self.nearest_agent_in_window(ego_id, &[], observer, window)
            .map_or(f64::INFINITY, |(_, _, distance)| distance)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Teardown
    // ─────────────────────────────────────────────────────────────────────

    /// Drop every agent outline.
    pub fn clear_agent_data(&mut self) {
        self.agents.clear();
    }

    /// Drop all geometry and metadata.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.object = None;
        self.view_object = None;
        self.courses.clear();
        self.global_data = GlobalData::default();
        self.agents.clear();
        self.tick = 0;
    }
}
