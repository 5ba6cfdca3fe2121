use std::fmt;

use waygraph_core::{Vec3, WaypointId};

use crate::traits::WaypointGraph;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// The goal was reached.
    Found,
    /// The open set ran dry without reaching the goal.
    Unreachable,
    /// The configured expansion cap was hit first.
    StepLimit,
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "found",
            Self::Unreachable => "unreachable",
            Self::StepLimit => "step limit",
        })
    }
}

/// Result of a search: the waypoints from start to goal inclusive, or an
/// empty sequence when no path was found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub status: PathStatus,
    pub waypoints: Vec<WaypointId>,
}

impl Path {
    pub(crate) fn found(waypoints: Vec<WaypointId>) -> Self {
        Self {
            status: PathStatus::Found,
            waypoints,
        }
    }

    pub(crate) fn not_found(status: PathStatus) -> Self {
        Self {
            status,
            waypoints: Vec::new(),
        }
    }

    /// Whether the goal was reached.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == PathStatus::Found
    }

    /// Number of waypoints on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Current positions of the path's waypoints, in order.
    ///
    /// Waypoints destroyed since the search finished are left out.
    pub fn positions<G: WaypointGraph + ?Sized>(&self, graph: &G) -> Vec<Vec3> {
        self.waypoints
            .iter()
            .filter_map(|&id| graph.position(id))
            .collect()
    }

    /// Total straight-line length along the path.
    pub fn length<G: WaypointGraph + ?Sized>(&self, graph: &G) -> f32 {
        self.positions(graph)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
