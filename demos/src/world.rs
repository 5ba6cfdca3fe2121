//! The sample world: a small terrain map laid out as a scene hierarchy.
//!
//! Each map character becomes one waypoint connected to its four
//! neighbours in both directions. Terrain only shows up as waypoint bias;
//! there is no movement cost model.

use waygraph_core::{Graph, SceneNode, Vec3};

/// Distance between neighbouring waypoints.
pub const SPACING: f32 = 2.0;

pub const MAP: &str = "\
..~~..^^
..~~.^^^
.==~..^.
..~~....
#.~~..##
..~=...#";

/// Heuristic bias for a terrain character.
pub fn terrain_bias(c: char) -> f32 {
    match c {
        '~' => 4.0, // water
        '^' => 2.5, // mountain
        '=' => 0.5, // bridge
        '#' => 0.0, // town
        _ => 1.0,   // grass
    }
}

/// Scene-node name of the waypoint at column `x`, row `y`.
pub fn waypoint_name(x: usize, y: usize) -> String {
    format!("{x}-{y}")
}

/// Build the scene tree for `map`: one group per row, one waypoint per
/// character.
pub fn scene(map: &str) -> SceneNode {
    let rows: Vec<Vec<char>> = map.lines().map(|l| l.chars().collect()).collect();
    let mut world = SceneNode::group("world");
    for (y, row) in rows.iter().enumerate() {
        let mut group =
            SceneNode::group(format!("row-{y}")).at(Vec3::new(0.0, 0.0, y as f32 * SPACING));
        for (x, &c) in row.iter().enumerate() {
            let local = Vec3::new(x as f32 * SPACING, 0.0, 0.0);
            let mut node = SceneNode::waypoint(waypoint_name(x, y), local).bias(terrain_bias(c));
            let neighbours = [
                (x.checked_sub(1), Some(y)),
                (Some(x + 1), Some(y)),
                (Some(x), y.checked_sub(1)),
                (Some(x), Some(y + 1)),
            ];
            for (nx, ny) in neighbours {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                if rows.get(ny).is_some_and(|r| nx < r.len()) {
                    node = node.connect(waypoint_name(nx, ny));
                }
            }
            group = group.child(node);
        }
        world = world.child(group);
    }
    world
}

/// Scan the default map into a graph.
pub fn build() -> Graph {
    Graph::from_scene(&scene(MAP))
}
