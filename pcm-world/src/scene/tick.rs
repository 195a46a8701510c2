//! Per-tick agent update phase.
//!
//! Agent outlines change every simulation step. [`PcmData::begin_tick`]
//! drops the previous outlines and hands out a [`TickUpdate`] guard that
//! holds the scene mutably until it is dropped, so queries only ever see a
//! complete tick.

use crate::container::{LineContainer, PointContainer};
use crate::core::Point;
use crate::core::math::to_global_frame;

use super::data::PcmData;

/// Line id of an agent's outline inside its [`LineContainer`].
pub const AGENT_OUTLINE_LINE_ID: i64 = 0;

/// Exclusive update access to a scene for one tick.
#[derive(Debug)]
pub struct TickUpdate<'a> {
    data: &'a mut PcmData,
    added: usize,
}

impl PcmData {
    /// Start a new tick: clear every agent outline and return the update guard.
    pub fn begin_tick(&mut self) -> TickUpdate<'_> {
        self.clear_agent_data();
        self.tick += 1;
        log::trace!("Tick {} started", self.tick);
        TickUpdate {
            data: self,
            added: 0,
        }
    }
}

impl TickUpdate<'_> {
    /// Add an agent outline for this tick.
    ///
    /// The outline is a centred rectangle, `width` along the heading and
    /// `height` across it, rotated by `yaw` and moved to `(x, y)`. Corners
    /// get ids 0..3 (rear right, front right, front left, rear left) and a
    /// closing point with id 4 repeats corner 0.
    ///
    /// Returns `false` for a duplicate id or non-finite or negative input.
    pub fn add_agent(&mut self, id: i64, x: f64, y: f64, yaw: f64, width: f64, height: f64) -> bool {
        let finite = [x, y, yaw, width, height].iter().all(|v| v.is_finite());
        if !finite || width < 0.0 || height < 0.0 {
            log::warn!(
                "Rejecting agent {}: pose ({}, {}, {}) extents {} x {}",
                id,
                x,
                y,
                yaw,
                width,
                height
            );
            return false;
        }
        if self.data.agents.contains_key(&id) {
            log::warn!("Agent {} already added in tick {}", id, self.data.tick);
            return false;
        }

        let mut lines = LineContainer::new();
        lines.add_line(AGENT_OUTLINE_LINE_ID, agent_outline(x, y, yaw, width, height));
        self.data.agents.insert(id, lines);
        self.added += 1;
        true
    }

    /// Number of agents added so far in this tick.
    pub fn agent_count(&self) -> usize {
        self.added
    }

    /// End the tick explicitly. Dropping the guard has the same effect.
    pub fn finish(self) {}
}

impl Drop for TickUpdate<'_> {
    fn drop(&mut self) {
        log::trace!("Tick {} finished with {} agents", self.data.tick, self.added);
    }
}

/// Closed rectangular outline of an agent in global coordinates.
fn agent_outline(x: f64, y: f64, yaw: f64, width: f64, height: f64) -> PointContainer {
    let half_w = width * 0.5;
    let half_h = height * 0.5;
    let corners = [
        (-half_w, -half_h),
        (half_w, -half_h),
        (half_w, half_h),
        (-half_w, half_h),
        (-half_w, -half_h),
    ];

    let origin = Point::xy(x, y);
    PointContainer::from_points(corners.iter().enumerate().map(|(i, &(cx, cy))| {
        to_global_frame(&Point::new(i as i64, cx, cy, 0.0), &origin, yaw)
    }))
}
