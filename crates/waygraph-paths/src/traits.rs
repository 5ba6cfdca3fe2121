use waygraph_core::{Graph, Vec3, WaypointId};

/// Read-only view of a waypoint graph, as consumed by the search engine.
///
/// Accessors return `None` for stale ids; the engine treats a stale id the
/// same as an absent connection.
pub trait WaypointGraph {
    /// Current world position of `id`.
    fn position(&self, id: WaypointId) -> Option<Vec3>;

    /// Static heuristic bias of `id`.
    fn bias(&self, id: WaypointId) -> Option<f32>;

    /// Append the ordered outgoing connections of `id` into `buf`.
    /// The caller clears `buf` before calling. `None` entries are allowed.
    fn connections(&self, id: WaypointId, buf: &mut Vec<Option<WaypointId>>);

    /// Human-readable label for logs.
    fn label(&self, id: WaypointId) -> String {
        id.to_string()
    }
}

impl WaypointGraph for Graph {
    fn position(&self, id: WaypointId) -> Option<Vec3> {
        self.get(id).map(|w| w.position)
    }

    fn bias(&self, id: WaypointId) -> Option<f32> {
        self.get(id).map(|w| w.bias)
    }

    fn connections(&self, id: WaypointId, buf: &mut Vec<Option<WaypointId>>) {
        if let Some(w) = self.get(id) {
            buf.extend_from_slice(&w.connections);
        }
    }

    fn label(&self, id: WaypointId) -> String {
        Graph::label(self, id)
    }
}
