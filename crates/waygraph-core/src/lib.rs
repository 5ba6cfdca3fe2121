//! **waygraph-core** — core types for waypoint-graph pathfinding.
//!
//! This crate provides the data the search engine reads: geometry
//! primitives, waypoints and the graph that owns them, the scene hierarchy
//! graphs are discovered from, and the cancellation token shared between a
//! running search and whoever requested it.

pub mod context;
pub mod geom;
pub mod graph;
pub mod scene;

pub use context::Context;
pub use geom::Vec3;
pub use graph::{Graph, Waypoint, WaypointId};
pub use scene::{SceneNode, WaypointSpec};
