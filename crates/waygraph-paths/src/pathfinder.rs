//! Tick-driven scheduler for concurrent searches.
//!
//! A [`Pathfinder`] owns any number of independent [`Search`]es and
//! advances each of them a bounded number of steps per [`tick`]. When a
//! search finishes, its callback is invoked exactly once with the resulting
//! [`Path`]. A cancelled search is dropped at the next tick and its callback
//! never runs.
//!
//! [`tick`]: Pathfinder::tick

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use waygraph_core::{Context, WaypointId};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::heuristic::HeuristicMode;
use crate::path::Path;
use crate::search::{Search, Step};
use crate::traits::WaypointGraph;

/// Completion callback for a scheduled search.
pub type PathCallback = Box<dyn FnOnce(Path)>;

/// Requester-side handle to a scheduled search.
#[derive(Clone, Debug)]
pub struct SearchHandle {
    id: u64,
    ctx: Context,
    delivered: Arc<AtomicBool>,
}

impl SearchHandle {
    /// Scheduler-assigned id, unique per [`Pathfinder`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the search. Its callback will not be invoked, even if the
    /// search would have finished on the next tick. Has no effect once the
    /// path has been delivered.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Whether the callback has received the search's path.
    pub fn is_delivered(&self) -> bool {
        self.delivered.load(Ordering::Acquire)
    }

    /// Whether the search was cancelled before it could deliver.
    pub fn is_cancelled(&self) -> bool {
        !self.is_delivered() && self.ctx.is_cancelled()
    }

    /// Whether the search will make no further progress, either way.
    pub fn is_done(&self) -> bool {
        self.is_delivered() || self.ctx.is_cancelled()
    }
}

struct Task {
    id: u64,
    search: Search,
    ctx: Context,
    delivered: Arc<AtomicBool>,
    callback: Option<PathCallback>,
}

/// Cooperative scheduler for incremental searches.
pub struct Pathfinder {
    config: SearchConfig,
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Pathfinder {
    /// Create an idle scheduler.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// The configuration applied to newly scheduled searches.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Schedule a search from `start` to `goal`.
    ///
    /// Nothing is expanded until the next [`tick`](Self::tick). Returns an
    /// error without scheduling anything if either endpoint is not a live
    /// waypoint; `callback` is then dropped unused.
    pub fn find_path<G, F>(
        &mut self,
        graph: &G,
        start: WaypointId,
        goal: WaypointId,
        callback: F,
        mode: HeuristicMode,
        ignore_bias: bool,
    ) -> Result<SearchHandle, SearchError>
    where
        G: WaypointGraph + ?Sized,
        F: FnOnce(Path) + 'static,
    {
        let id = self.next_id;
        // Give every search its own stream while keeping seeded runs
        // reproducible.
        let config = SearchConfig {
            seed: self.config.seed.map(|s| s.wrapping_add(id)),
            ..self.config.clone()
        };
        let search = Search::new(graph, start, goal, mode, ignore_bias, &config)?;
        self.next_id += 1;

        let ctx = Context::new();
        let delivered = Arc::new(AtomicBool::new(false));
        self.tasks.push(Task {
            id,
            search,
            ctx: ctx.clone(),
            delivered: Arc::clone(&delivered),
            callback: Some(Box::new(callback)),
        });
        Ok(SearchHandle { id, ctx, delivered })
    }

    /// Advance every active search by up to `steps_per_tick` steps, in the
    /// order they were scheduled. Returns the number of callbacks invoked.
    pub fn tick<G: WaypointGraph + ?Sized>(&mut self, graph: &G) -> usize {
        let steps = self.config.steps_per_tick.max(1);
        let mut delivered = 0;
        self.tasks.retain_mut(|task| {
            for _ in 0..steps {
                if task.ctx.is_cancelled() {
                    log::debug!("search {} cancelled", task.id);
                    return false;
                }
                if let Step::Done(path) = task.search.step(graph) {
                    task.delivered.store(true, Ordering::Release);
                    if let Some(callback) = task.callback.take() {
                        callback(path);
                        delivered += 1;
                    }
                    return false;
                }
            }
            true
        });
        delivered
    }

    /// Tick until no search remains. Returns the number of ticks taken.
    pub fn run_until_idle<G: WaypointGraph + ?Sized>(&mut self, graph: &G) -> usize {
        let mut ticks = 0;
        while !self.is_idle() {
            self.tick(graph);
            ticks += 1;
        }
        ticks
    }

    /// Cancel every scheduled search.
    pub fn cancel_all(&mut self) {
        for task in &self.tasks {
            task.ctx.cancel();
        }
        self.tasks.clear();
    }

    /// Number of searches still scheduled, including cancelled ones that
    /// have not been swept by a tick yet.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no search is scheduled.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }
}
