//! Agents that repeatedly request paths from a shared [`Pathfinder`].
//!
//! Wanderers pick a random destination each time they arrive; chasers
//! target whatever waypoint their quarry currently occupies. Agents jump
//! straight to the end of each delivered path.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use waygraph_core::{Graph, WaypointId};
use waygraph_paths::{HeuristicMode, Path, Pathfinder, SearchConfig, SearchError, SearchHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Wander,
    /// Chase the agent with this index.
    Chase(usize),
}

#[derive(Debug)]
pub struct Agent {
    pub name: String,
    pub role: Role,
    pub at: WaypointId,
    pub arrivals: usize,
    pub misses: usize,
    pending: Option<SearchHandle>,
}

type Inbox = Rc<RefCell<Vec<(usize, Path)>>>;

pub struct Sim {
    pub graph: Graph,
    pub agents: Vec<Agent>,
    pathfinder: Pathfinder,
    inbox: Inbox,
    rng: StdRng,
    mode: HeuristicMode,
    ignore_bias: bool,
    ticks: usize,
}

impl Sim {
    /// Place `agents` agents on random waypoints. Agent 0 wanders; every
    /// other agent alternates between wandering and chasing agent 0.
    pub fn new(
        graph: Graph,
        agents: usize,
        config: SearchConfig,
        mode: HeuristicMode,
        ignore_bias: bool,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let ids = graph.ids();
        let agents = (0..agents)
            .filter(|_| !ids.is_empty())
            .map(|i| Agent {
                name: if i % 2 == 1 {
                    format!("knight-{i}")
                } else {
                    format!("dragon-{i}")
                },
                role: if i % 2 == 1 { Role::Chase(0) } else { Role::Wander },
                at: ids[rng.random_range(0..ids.len())],
                arrivals: 0,
                misses: 0,
                pending: None,
            })
            .collect();
        Self {
            graph,
            agents,
            pathfinder: Pathfinder::new(config),
            inbox: Rc::default(),
            rng,
            mode,
            ignore_bias,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Pick a target for agent `i` and schedule its search.
    fn request(&mut self, i: usize) -> Result<(), SearchError> {
        let at = self.agents[i].at;
        let target = match self.agents[i].role {
            Role::Wander => {
                let ids = self.graph.ids();
                let pick = ids[self.rng.random_range(0..ids.len())];
                // Never ask for a zero-length trip.
                if pick == at { self.neighbour_or_self(at) } else { pick }
            }
            Role::Chase(quarry) => self.agents[quarry].at,
        };

        let inbox = Rc::clone(&self.inbox);
        let handle = self.pathfinder.find_path(
            &self.graph,
            at,
            target,
            move |path| inbox.borrow_mut().push((i, path)),
            self.mode,
            self.ignore_bias,
        )?;
        log::debug!(
            "{} requests {} -> {} (search {})",
            self.agents[i].name,
            self.graph.label(at),
            self.graph.label(target),
            handle.id()
        );
        self.agents[i].pending = Some(handle);
        Ok(())
    }

    fn neighbour_or_self(&self, at: WaypointId) -> WaypointId {
        self.graph
            .get(at)
            .and_then(|w| w.connections.iter().flatten().next().copied())
            .unwrap_or(at)
    }

    /// Schedule searches for idle agents, advance the pathfinder, and apply
    /// delivered paths.
    pub fn tick(&mut self) -> Result<(), SearchError> {
        for i in 0..self.agents.len() {
            if self.agents[i].pending.is_none() {
                self.request(i)?;
            }
        }

        self.pathfinder.tick(&self.graph);
        self.ticks += 1;

        let delivered = std::mem::take(&mut *self.inbox.borrow_mut());
        for (i, path) in delivered {
            self.arrive(i, &path);
        }
        Ok(())
    }

    fn arrive(&mut self, i: usize, path: &Path) {
        let agent = &mut self.agents[i];
        agent.pending = None;
        match path.waypoints.last() {
            Some(&end) if path.is_found() => {
                log::info!(
                    "tick {:>4}: {} {} ({} hops, {:.1} units)",
                    self.ticks,
                    agent.name,
                    describe(&self.graph, path),
                    path.len().saturating_sub(1),
                    path.length(&self.graph)
                );
                log::debug!("  line: {:?}", path.positions(&self.graph));
                agent.at = end;
                agent.arrivals += 1;
            }
            _ => {
                log::warn!(
                    "tick {:>4}: {} found no path ({})",
                    self.ticks,
                    agent.name,
                    path.status
                );
                agent.misses += 1;
            }
        }
    }

    /// Cancel every in-flight search.
    pub fn stop(&mut self) {
        for agent in &mut self.agents {
            if let Some(handle) = agent.pending.take() {
                handle.cancel();
            }
        }
        self.pathfinder.cancel_all();
    }
}

/// `a -> b -> c` using waypoint names.
pub fn describe(graph: &Graph, path: &Path) -> String {
    path.waypoints
        .iter()
        .map(|&id| graph.label(id))
        .collect::<Vec<_>>()
        .join(" -> ")
}
