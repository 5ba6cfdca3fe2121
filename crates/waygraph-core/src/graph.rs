//! Waypoints and the [`Graph`] that owns them.
//!
//! Waypoints live in a slot vector indexed by [`WaypointId`]. Removing a
//! waypoint vacates its slot without shifting the others, so ids held
//! elsewhere (connections, in-flight searches) stay valid or become
//! detectably stale, never silently re-targeted.

use std::fmt;

use crate::geom::Vec3;

/// Stable handle to a waypoint inside a [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointId(pub u32);

impl WaypointId {
    /// Slot index of this id.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph node: a position, a heuristic bias and ordered outgoing
/// connections.
///
/// Connections are directional and may contain `None` entries for
/// references that could not be resolved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
    pub bias: f32,
    pub connections: Vec<Option<WaypointId>>,
}

impl Waypoint {
    /// Create an unconnected waypoint with zero bias.
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            bias: 0.0,
            connections: Vec::new(),
        }
    }

    /// Builder-style bias setter.
    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }
}

/// A collection of waypoints.
///
/// The graph is the owner of waypoint lifetimes. Nothing in this crate
/// validates connectivity; disconnected graphs are legal.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    slots: Vec<Option<Waypoint>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a waypoint and return its id.
    pub fn add(&mut self, waypoint: Waypoint) -> WaypointId {
        let id = WaypointId(self.slots.len() as u32);
        self.slots.push(Some(waypoint));
        id
    }

    /// Append a directional connection `from -> to`.
    ///
    /// Returns `false` if `from` is not a live waypoint. `to` is not
    /// checked: a dangling target is tolerated like any stale reference.
    pub fn connect(&mut self, from: WaypointId, to: WaypointId) -> bool {
        match self.get_mut(from) {
            Some(w) => {
                w.connections.push(Some(to));
                true
            }
            None => false,
        }
    }

    /// Connect `a -> b` and `b -> a`.
    pub fn connect_both(&mut self, a: WaypointId, b: WaypointId) -> bool {
        self.connect(a, b) && self.connect(b, a)
    }

    /// Look up a live waypoint.
    #[inline]
    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable access to a live waypoint.
    #[inline]
    pub fn get_mut(&mut self, id: WaypointId) -> Option<&mut Waypoint> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Whether `id` refers to a live waypoint.
    #[inline]
    pub fn contains(&self, id: WaypointId) -> bool {
        self.get(id).is_some()
    }

    /// Move a waypoint. Returns `false` if `id` is stale.
    pub fn set_position(&mut self, id: WaypointId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(w) => {
                w.position = position;
                true
            }
            None => false,
        }
    }

    /// Change a waypoint's bias. Returns `false` if `id` is stale.
    pub fn set_bias(&mut self, id: WaypointId, bias: f32) -> bool {
        match self.get_mut(id) {
            Some(w) => {
                w.bias = bias;
                true
            }
            None => false,
        }
    }

    /// Destroy a waypoint, leaving its id stale.
    ///
    /// Connections pointing at it are left in place.
    pub fn remove(&mut self, id: WaypointId) -> Option<Waypoint> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Find the first live waypoint with the given name.
    pub fn find(&self, name: &str) -> Option<WaypointId> {
        self.waypoints()
            .find(|(_, w)| w.name == name)
            .map(|(id, _)| id)
    }

    /// Iterate over live waypoints in id order.
    pub fn waypoints(&self) -> impl Iterator<Item = (WaypointId, &Waypoint)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.as_ref().map(|w| (WaypointId(i as u32), w)))
    }

    /// Ids of live waypoints in id order.
    pub fn ids(&self) -> Vec<WaypointId> {
        self.waypoints().map(|(id, _)| id).collect()
    }

    /// Number of live waypoints.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|w| w.is_some()).count()
    }

    /// Whether the graph has no live waypoints.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of a waypoint, or its id rendered as `#n` when stale.
    pub fn label(&self, id: WaypointId) -> String {
        match self.get(id) {
            Some(w) => w.name.clone(),
            None => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Graph, [WaypointId; 3]) {
        let mut g = Graph::new();
        let a = g.add(Waypoint::new("a", Vec3::new(0.0, 0.0, 0.0)));
        let b = g.add(Waypoint::new("b", Vec3::new(1.0, 0.0, 0.0)).with_bias(2.0));
        let c = g.add(Waypoint::new("c", Vec3::new(2.0, 0.0, 0.0)));
        g.connect(a, b);
        g.connect(b, c);
        (g, [a, b, c])
    }

    #[test]
    fn add_and_lookup() {
        let (g, [a, b, c]) = line();
        assert_eq!(g.len(), 3);
        assert_eq!(g.get(b).map(|w| w.bias), Some(2.0));
        assert_eq!(g.get(a).map(|w| w.connections.clone()), Some(vec![Some(b)]));
        assert!(g.get(c).is_some_and(|w| w.connections.is_empty()));
        assert_eq!(g.find("c"), Some(c));
        assert_eq!(g.find("nope"), None);
    }

    #[test]
    fn connections_are_directional() {
        let (g, [a, b, _]) = line();
        assert!(g.get(b).is_some_and(|w| !w.connections.contains(&Some(a))));
    }

    #[test]
    fn remove_leaves_stale_id() {
        let (mut g, [a, b, c]) = line();
        let removed = g.remove(b);
        assert_eq!(removed.map(|w| w.name), Some("b".to_string()));
        assert!(!g.contains(b));
        assert_eq!(g.len(), 2);
        // Ids of the other waypoints do not shift.
        assert_eq!(g.find("c"), Some(c));
        // The dangling connection is still recorded.
        assert_eq!(g.get(a).map(|w| w.connections.len()), Some(1));
        assert_eq!(g.label(b), "#1");
        assert!(!g.set_position(b, Vec3::ZERO));
        assert!(g.remove(b).is_none());
    }

    #[test]
    fn edit_position_and_bias() {
        let (mut g, [a, _, _]) = line();
        assert!(g.set_position(a, Vec3::new(5.0, 5.0, 5.0)));
        assert!(g.set_bias(a, -1.5));
        let w = g.get(a).unwrap();
        assert_eq!(w.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(w.bias, -1.5);
    }

    #[test]
    fn waypoints_iterates_in_id_order() {
        let (mut g, [a, b, c]) = line();
        g.remove(b);
        assert_eq!(g.ids(), vec![a, c]);
    }

    #[test]
    fn connect_from_stale_fails() {
        let (mut g, [a, b, _]) = line();
        g.remove(a);
        assert!(!g.connect(a, b));
        assert!(!g.connect_both(b, a));
    }
}
