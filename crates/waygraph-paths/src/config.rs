/// Tuning knobs shared by every search a [`Pathfinder`](crate::Pathfinder)
/// schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Search steps (open-set pop + expansion) run per tick. Values below 1
    /// are treated as 1.
    pub steps_per_tick: usize,
    /// Maximum number of expansions before a search gives up with
    /// [`PathStatus::StepLimit`](crate::PathStatus::StepLimit). `None` means
    /// unbounded.
    pub max_steps: Option<usize>,
    /// Seed for the random source used by
    /// [`HeuristicMode::Drunk`](crate::HeuristicMode::Drunk). `None` seeds
    /// from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            steps_per_tick: 1,
            max_steps: None,
            seed: None,
        }
    }
}
