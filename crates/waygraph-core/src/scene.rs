//! Scene hierarchy that graphs are discovered from.
//!
//! A [`SceneNode`] tree stands in for the host world's object hierarchy.
//! Each node carries a local translation relative to its parent; nodes with a
//! [`WaypointSpec`] become waypoints when the tree is scanned by
//! [`Graph::from_scene`].

use std::collections::HashMap;

use crate::geom::Vec3;
use crate::graph::{Graph, Waypoint, WaypointId};

/// Waypoint data attached to a scene node.
///
/// Connections refer to other waypoints by scene-node name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointSpec {
    pub bias: f32,
    pub connections: Vec<String>,
}

/// A named node in a scene hierarchy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNode {
    pub name: String,
    /// Translation relative to the parent node.
    pub translation: Vec3,
    pub waypoint: Option<WaypointSpec>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// A plain container node with no waypoint.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A waypoint node at the given local translation.
    pub fn waypoint(name: impl Into<String>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            translation,
            waypoint: Some(WaypointSpec::default()),
            children: Vec::new(),
        }
    }

    /// Builder-style translation setter.
    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Builder-style bias setter. Turns the node into a waypoint if needed.
    pub fn bias(mut self, bias: f32) -> Self {
        self.waypoint.get_or_insert_with(WaypointSpec::default).bias = bias;
        self
    }

    /// Append a connection by name. Turns the node into a waypoint if needed.
    pub fn connect(mut self, target: impl Into<String>) -> Self {
        self.waypoint
            .get_or_insert_with(WaypointSpec::default)
            .connections
            .push(target.into());
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

impl Graph {
    /// Build a graph from every waypoint in the tree rooted at `root`,
    /// the root included.
    ///
    /// Nodes are visited depth-first in pre-order and ids are assigned in
    /// visit order. World positions accumulate parent translations.
    /// Connection names are resolved once all waypoints are known; names
    /// that match nothing become `None` connections. When names repeat,
    /// the first waypoint visited wins.
    pub fn from_scene(root: &SceneNode) -> Self {
        let mut found: Vec<(&SceneNode, Vec3)> = Vec::new();
        let mut stack: Vec<(&SceneNode, Vec3)> = vec![(root, Vec3::ZERO)];
        while let Some((node, parent_pos)) = stack.pop() {
            let pos = parent_pos + node.translation;
            if node.waypoint.is_some() {
                found.push((node, pos));
            }
            // Reverse so the first child is visited first.
            for child in node.children.iter().rev() {
                stack.push((child, pos));
            }
        }

        let mut by_name: HashMap<&str, WaypointId> = HashMap::with_capacity(found.len());
        for (i, (node, _)) in found.iter().enumerate() {
            by_name
                .entry(node.name.as_str())
                .or_insert(WaypointId(i as u32));
        }

        let mut graph = Graph::new();
        for (node, pos) in &found {
            let Some(spec) = node.waypoint.as_ref() else {
                continue;
            };
            let connections = spec
                .connections
                .iter()
                .map(|target| {
                    let id = by_name.get(target.as_str()).copied();
                    if id.is_none() {
                        log::warn!(
                            "waypoint {:?}: connection to unknown waypoint {:?}",
                            node.name,
                            target
                        );
                    }
                    id
                })
                .collect();
            graph.add(Waypoint {
                name: node.name.clone(),
                position: *pos,
                bias: spec.bias,
                connections,
            });
        }
        log::debug!("scanned scene {:?}: {} waypoints", root.name, graph.len());
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneNode {
        SceneNode::group("world")
            .at(Vec3::new(10.0, 0.0, 0.0))
            .child(
                SceneNode::waypoint("a", Vec3::new(0.0, 0.0, 0.0))
                    .connect("b")
                    .child(SceneNode::waypoint("b", Vec3::new(1.0, 0.0, 0.0)).connect("c")),
            )
            .child(
                SceneNode::group("props")
                    .at(Vec3::new(0.0, 5.0, 0.0))
                    .child(
                        SceneNode::waypoint("c", Vec3::new(2.0, 0.0, 0.0))
                            .bias(3.0)
                            .connect("ghost")
                            .connect("a"),
                    ),
            )
    }

    #[test]
    fn preorder_ids_and_world_positions() {
        let g = Graph::from_scene(&scene());
        assert_eq!(g.len(), 3);
        let names: Vec<&str> = g.waypoints().map(|(_, w)| w.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let b = g.get(g.find("b").unwrap()).unwrap();
        assert_eq!(b.position, Vec3::new(11.0, 0.0, 0.0));
        let c = g.get(g.find("c").unwrap()).unwrap();
        assert_eq!(c.position, Vec3::new(12.0, 5.0, 0.0));
        assert_eq!(c.bias, 3.0);
    }

    #[test]
    fn unresolved_connections_become_none() {
        let g = Graph::from_scene(&scene());
        let a = g.find("a").unwrap();
        let c = g.get(g.find("c").unwrap()).unwrap();
        assert_eq!(c.connections, vec![None, Some(a)]);
    }

    #[test]
    fn root_can_be_a_waypoint() {
        let root = SceneNode::waypoint("root", Vec3::new(1.0, 1.0, 1.0))
            .child(SceneNode::waypoint("leaf", Vec3::new(1.0, 0.0, 0.0)).connect("root"));
        let g = Graph::from_scene(&root);
        assert_eq!(g.len(), 2);
        let leaf = g.get(g.find("leaf").unwrap()).unwrap();
        assert_eq!(leaf.position, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(leaf.connections, vec![g.find("root")]);
    }

    #[test]
    fn duplicate_names_resolve_to_first() {
        let root = SceneNode::group("root")
            .child(SceneNode::waypoint("dup", Vec3::ZERO))
            .child(SceneNode::waypoint("dup", Vec3::new(1.0, 0.0, 0.0)))
            .child(SceneNode::waypoint("src", Vec3::ZERO).connect("dup"));
        let g = Graph::from_scene(&root);
        let src = g.get(g.find("src").unwrap()).unwrap();
        assert_eq!(src.connections, vec![Some(WaypointId(0))]);
    }

    #[test]
    fn empty_scene() {
        let g = Graph::from_scene(&SceneNode::group("empty"));
        assert!(g.is_empty());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn scene_from_json() {
        let json = r#"{
            "name": "root",
            "translation": {"x": 0.0, "y": 0.0, "z": 0.0},
            "waypoint": null,
            "children": [
                {
                    "name": "a",
                    "translation": {"x": 1.0, "y": 2.0, "z": 3.0},
                    "waypoint": {"bias": 0.5, "connections": ["a"]},
                    "children": []
                }
            ]
        }"#;
        let scene: SceneNode = serde_json::from_str(json).unwrap();
        let g = Graph::from_scene(&scene);
        let a = g.find("a").unwrap();
        let w = g.get(a).unwrap();
        assert_eq!(w.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(w.bias, 0.5);
        assert_eq!(w.connections, vec![Some(a)]);
    }
}
