use std::fmt;

use waygraph_core::WaypointId;

/// Reasons a search cannot be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start id does not name a live waypoint.
    InvalidStart(WaypointId),
    /// The goal id does not name a live waypoint.
    InvalidGoal(WaypointId),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(id) => write!(f, "search start {id} is not a live waypoint"),
            Self::InvalidGoal(id) => write!(f, "search goal {id} is not a live waypoint"),
        }
    }
}

impl std::error::Error for SearchError {}
