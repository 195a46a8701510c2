//! Geometry containers.
//!
//! - [`PointContainer`]: ordered `id -> Point` polyline
//! - [`LineContainer`]: `id -> PointContainer` collection
//!
//! Containers own their geometry outright; dropping or clearing a
//! container releases everything it holds.

mod line_container;
mod point_container;

pub use line_container::LineContainer;
pub use point_container::PointContainer;
