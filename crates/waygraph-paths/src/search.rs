use std::collections::HashSet;

use rand::{RngExt, SeedableRng};
use rand::rngs::StdRng;
use waygraph_core::WaypointId;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::heuristic::{HeuristicMode, Sample};
use crate::open::OpenSet;
use crate::path::{Path, PathStatus};
use crate::traits::WaypointGraph;

/// Per-search wrapper around a waypoint. Parent links index into the
/// owning search's node arena.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    waypoint: WaypointId,
    parent: Option<usize>,
    score: f32,
}

/// Outcome of a single [`Search::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The search expanded one node and should be resumed later.
    Pending,
    /// The search has finished. Further steps return the same path.
    Done(Path),
}

/// A resumable best-first search from `start` to `goal`.
///
/// Each [`step`](Self::step) pops the best open node and expands its
/// connections, then returns control to the caller. The graph is borrowed
/// only for the duration of a step, so its owner may move waypoints between
/// steps; positions are re-read whenever a node is scored.
///
/// The open set may hold several entries for one waypoint. Only the first
/// one popped is expanded; later ones are discarded once the waypoint is
/// closed. There is no decrease-key.
pub struct Search {
    start: WaypointId,
    goal: WaypointId,
    mode: HeuristicMode,
    ignore_bias: bool,
    max_steps: Option<usize>,
    nodes: Vec<SearchNode>,
    open: OpenSet,
    closed: HashSet<WaypointId>,
    rng: StdRng,
    steps: usize,
    result: Option<Path>,
    // scratch buffer for connection queries
    cbuf: Vec<Option<WaypointId>>,
}

impl Search {
    /// Prepare a search. The start node is scored and enqueued but not
    /// expanded.
    ///
    /// Fails if `start` or `goal` is not a live waypoint of `graph`.
    pub fn new<G: WaypointGraph + ?Sized>(
        graph: &G,
        start: WaypointId,
        goal: WaypointId,
        mode: HeuristicMode,
        ignore_bias: bool,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let start_sample = sample(graph, start).ok_or(SearchError::InvalidStart(start))?;
        let goal_sample = sample(graph, goal).ok_or(SearchError::InvalidGoal(goal))?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let score = mode.score(None, start_sample, goal_sample, ignore_bias, &mut rng);

        let mut open = OpenSet::new();
        open.push(0, score);

        log::debug!(
            "search {} -> {} ({mode}, ignore_bias={ignore_bias})",
            graph.label(start),
            graph.label(goal)
        );

        Ok(Self {
            start,
            goal,
            mode,
            ignore_bias,
            max_steps: config.max_steps,
            nodes: vec![SearchNode {
                waypoint: start,
                parent: None,
                score,
            }],
            open,
            closed: HashSet::new(),
            rng,
            steps: 0,
            result: None,
            cbuf: Vec::new(),
        })
    }

    pub fn start(&self) -> WaypointId {
        self.start
    }

    pub fn goal(&self) -> WaypointId {
        self.goal
    }

    pub fn mode(&self) -> HeuristicMode {
        self.mode
    }

    /// Number of nodes expanded so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of entries currently in the open set, stale ones included.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Whether the search has produced its final path.
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Advance the search by one open-set pop and expansion.
    pub fn step<G: WaypointGraph + ?Sized>(&mut self, graph: &G) -> Step {
        if let Some(path) = &self.result {
            return Step::Done(path.clone());
        }

        // The goal may have been destroyed since the last step.
        let Some(goal_sample) = sample(graph, self.goal) else {
            return self.finish(graph, Path::not_found(PathStatus::Unreachable));
        };

        let (current, node) = loop {
            let Some(entry) = self.open.pop() else {
                return self.finish(graph, Path::not_found(PathStatus::Unreachable));
            };
            let node = self.nodes[entry.node];
            if self.closed.contains(&node.waypoint) {
                continue;
            }
            break (entry.node, node);
        };

        if node.waypoint == self.goal {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("{}", self.trace(graph, current));
            }
            let path = Path::found(self.reconstruct(current));
            return self.finish(graph, path);
        }
        if self.max_steps.is_some_and(|max| self.steps >= max) {
            return self.finish(graph, Path::not_found(PathStatus::StepLimit));
        }

        self.closed.insert(node.waypoint);

        let mut cbuf = std::mem::take(&mut self.cbuf);
        cbuf.clear();
        graph.connections(node.waypoint, &mut cbuf);

        for &next in cbuf.iter() {
            let Some(next) = next else {
                continue;
            };
            if self.closed.contains(&next) {
                continue;
            }
            let Some(next_sample) = sample(graph, next) else {
                log::trace!("skipping stale connection {next}");
                continue;
            };
            let score = self.mode.score(
                Some(node.score),
                next_sample,
                goal_sample,
                self.ignore_bias,
                &mut self.rng,
            );
            let idx = self.nodes.len();
            self.nodes.push(SearchNode {
                waypoint: next,
                parent: Some(current),
                score,
            });
            self.open.push(idx, score);
        }

        self.cbuf = cbuf;
        self.steps += 1;
        Step::Pending
    }

    /// Step until the search finishes and return its path.
    pub fn run<G: WaypointGraph + ?Sized>(&mut self, graph: &G) -> Path {
        loop {
            if let Step::Done(path) = self.step(graph) {
                return path;
            }
        }
    }

    fn finish<G: WaypointGraph + ?Sized>(&mut self, graph: &G, path: Path) -> Step {
        log::debug!(
            "search {} -> {} {} after {} steps ({} waypoints)",
            graph.label(self.start),
            graph.label(self.goal),
            path.status,
            self.steps,
            path.len()
        );
        self.result = Some(path.clone());
        Step::Done(path)
    }

    /// Follow parent links back from `node` and return start-to-goal order.
    fn reconstruct(&self, node: usize) -> Vec<WaypointId> {
        let mut waypoints = Vec::new();
        let mut cur = Some(node);
        while let Some(i) = cur {
            waypoints.push(self.nodes[i].waypoint);
            cur = self.nodes[i].parent;
        }
        waypoints.reverse();
        waypoints
    }

    /// Render the parent chain of `node`, e.g.
    /// `Node(C, 2) <- Node(B, 1) <- Node(A, 0) <- START`.
    fn trace<G: WaypointGraph + ?Sized>(&self, graph: &G, node: usize) -> String {
        let mut out = String::new();
        let mut cur = Some(node);
        while let Some(i) = cur {
            let n = &self.nodes[i];
            out.push_str(&format!("Node({}, {}) <- ", graph.label(n.waypoint), n.score));
            cur = n.parent;
        }
        out.push_str("START");
        out
    }
}

/// Run a search to completion with the default configuration.
pub fn find_path<G: WaypointGraph + ?Sized>(
    graph: &G,
    start: WaypointId,
    goal: WaypointId,
    mode: HeuristicMode,
    ignore_bias: bool,
) -> Result<Path, SearchError> {
    let mut search = Search::new(graph, start, goal, mode, ignore_bias, &SearchConfig::default())?;
    Ok(search.run(graph))
}

fn sample<G: WaypointGraph + ?Sized>(graph: &G, id: WaypointId) -> Option<Sample> {
    Some(Sample::new(graph.position(id)?, graph.bias(id)?))
}
