//! Incremental best-first pathfinding over waypoint graphs.
//!
//! A search walks a directed graph of waypoints from a start to a goal,
//! always expanding the open node with the lowest heuristic score. The
//! scoring function is one of nine interchangeable [`HeuristicMode`]s.
//!
//! Searches are resumable: [`Search::step`] performs one pop-and-expand
//! cycle and hands control back, so the work can be spread across frames or
//! scheduler ticks. [`Pathfinder`] drives many such searches at once and
//! delivers each result through a callback exactly once, unless the
//! requester cancels it through its [`SearchHandle`].
//!
//! ```
//! use waygraph_core::{Graph, Vec3, Waypoint};
//! use waygraph_paths::{HeuristicMode, find_path};
//!
//! let mut g = Graph::new();
//! let a = g.add(Waypoint::new("a", Vec3::new(0.0, 0.0, 0.0)));
//! let b = g.add(Waypoint::new("b", Vec3::new(1.0, 0.0, 0.0)));
//! g.connect(a, b);
//!
//! let path = find_path(&g, a, b, HeuristicMode::Geometric, false).unwrap();
//! assert_eq!(path.waypoints, vec![a, b]);
//! ```

mod config;
mod error;
mod heuristic;
mod open;
mod path;
mod pathfinder;
mod search;
mod traits;

pub use config::SearchConfig;
pub use error::SearchError;
pub use heuristic::{HeuristicMode, ParseModeError, Sample};
pub use path::{Path, PathStatus};
pub use pathfinder::{PathCallback, Pathfinder, SearchHandle};
pub use search::{Search, Step, find_path};
pub use traits::WaypointGraph;
