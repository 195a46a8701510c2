//! Segment geometry and view-window clipping.
//!
//! - [`LineSegment`]: nearest point, distance, bearing, orientation, length
//!   and visible sub-segment queries
//! - [`ViewWindow`]: classification of `(view_direction, view_range)` pairs

mod line_segment;
mod view;

pub use line_segment::LineSegment;
pub use view::ViewWindow;
