//! Heuristic scoring functions.
//!
//! Every mode scores a candidate waypoint `w1` against the search goal `w2`;
//! lower scores are expanded first. Several modes fold in the per-waypoint
//! bias, which `ignore_bias` forces to zero.
//!
//! | Mode | Score |
//! |---|---|
//! | [`Geometric`](HeuristicMode::Geometric) | `dist(w1, w2) + bias(w1)` |
//! | [`Manhattan`](HeuristicMode::Manhattan) | `Δx + Δy + Δz + bias(w1)` |
//! | [`CostOfMovement`](HeuristicMode::CostOfMovement) | `dist(w1, w2) + max(abs(b2 - b1), abs(b1 - b2))` |
//! | [`InverseCostOfMovement`](HeuristicMode::InverseCostOfMovement) | `dist(w1, w2) + min(-b1 - -b2, -b2 - -b1)` |
//! | [`DiagonalDistanceUniform`](HeuristicMode::DiagonalDistanceUniform) | `bias(w1) * max(Δ)` |
//! | [`DiagonalDistance`](HeuristicMode::DiagonalDistance) | `bias(w1) * 1.414 * (max(Δ) - min(Δ))` |
//! | [`HScore`](HeuristicMode::HScore) | `bias(w1)` |
//! | [`Incremental`](HeuristicMode::Incremental) | `parent score + bias(w1)` |
//! | [`Drunk`](HeuristicMode::Drunk) | uniform in `[min(b1, b2), max(b1, b2))` |
//!
//! Drunk falls back to `min(b1, b2)` when the range is empty or either bias
//! is infinite.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngExt};
use waygraph_core::Vec3;

/// Diagonal step factor used by [`HeuristicMode::DiagonalDistance`].
const DIAGONAL: f32 = 1.414;

/// The data a heuristic needs about one waypoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub position: Vec3,
    pub bias: f32,
}

impl Sample {
    #[inline]
    pub const fn new(position: Vec3, bias: f32) -> Self {
        Self { position, bias }
    }
}

/// Selects how candidate waypoints are scored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HeuristicMode {
    /// Straight-line distance to the goal plus the candidate's bias.
    #[default]
    Geometric,
    /// Axis-aligned (L1) distance plus bias. Suited to 4-way grids.
    Manhattan,
    /// Straight-line distance plus the absolute bias difference.
    CostOfMovement,
    /// Straight-line distance minus the absolute bias difference.
    InverseCostOfMovement,
    /// Bias scaled by the largest axis difference.
    DiagonalDistanceUniform,
    /// Bias scaled by the spread between largest and smallest axis difference.
    DiagonalDistance,
    /// The candidate's bias alone.
    HScore,
    /// The parent's score accumulated with the candidate's bias.
    Incremental,
    /// A random score between the two biases. Not reproducible.
    Drunk,
}

impl HeuristicMode {
    /// All modes in declaration order.
    pub const ALL: [HeuristicMode; 9] = [
        Self::Geometric,
        Self::Manhattan,
        Self::CostOfMovement,
        Self::InverseCostOfMovement,
        Self::DiagonalDistanceUniform,
        Self::DiagonalDistance,
        Self::HScore,
        Self::Incremental,
        Self::Drunk,
    ];

    /// Whether the same inputs always produce the same score.
    #[inline]
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Self::Drunk)
    }

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Geometric => "geometric",
            Self::Manhattan => "manhattan",
            Self::CostOfMovement => "cost-of-movement",
            Self::InverseCostOfMovement => "inverse-cost-of-movement",
            Self::DiagonalDistanceUniform => "diagonal-distance-uniform",
            Self::DiagonalDistance => "diagonal-distance",
            Self::HScore => "h-score",
            Self::Incremental => "incremental",
            Self::Drunk => "drunk",
        }
    }

    /// Score `w1` (the candidate) against `w2` (the goal).
    ///
    /// `parent` is the score of the node `w1` is reached from, `None` for
    /// the start node. Only [`Incremental`](Self::Incremental) reads it and
    /// only [`Drunk`](Self::Drunk) draws from `rng`.
    pub fn score(
        self,
        parent: Option<f32>,
        w1: Sample,
        w2: Sample,
        ignore_bias: bool,
        rng: &mut impl Rng,
    ) -> f32 {
        let h1 = if ignore_bias { 0.0 } else { w1.bias };
        let h2 = if ignore_bias { 0.0 } else { w2.bias };
        match self {
            Self::Geometric => w1.position.distance(w2.position) + h1,
            Self::Manhattan => w1.position.abs_diff(w2.position).component_sum() + h1,
            Self::CostOfMovement => {
                // Both operands are the same value; kept as the formula reads.
                let cost = (h2 - h1).abs().max((h1 - h2).abs());
                w1.position.distance(w2.position) + cost
            }
            Self::InverseCostOfMovement => {
                let (n1, n2) = (-h1, -h2);
                let cost = (n1 - n2).min(n2 - n1);
                w1.position.distance(w2.position) + cost
            }
            Self::DiagonalDistanceUniform => h1 * w1.position.abs_diff(w2.position).max_component(),
            Self::DiagonalDistance => {
                let d = w1.position.abs_diff(w2.position);
                h1 * DIAGONAL * (d.max_component() - d.min_component())
            }
            Self::HScore => h1,
            Self::Incremental => parent.unwrap_or(0.0) + h1,
            Self::Drunk => {
                let (lo, hi) = (h1.min(h2), h1.max(h2));
                if lo >= hi || !lo.is_finite() || !hi.is_finite() {
                    lo
                } else if (hi - lo).is_finite() {
                    rng.random_range(lo..hi)
                } else {
                    // The span overflows; interpolate without forming it.
                    let t: f32 = rng.random();
                    lo * (1.0 - t) + hi * t
                }
            }
        }
    }
}

impl fmt::Display for HeuristicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown heuristic mode \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for HeuristicMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn s(x: f32, y: f32, z: f32, bias: f32) -> Sample {
        Sample::new(Vec3::new(x, y, z), bias)
    }

    #[test]
    fn geometric() {
        let w1 = s(0.0, 0.0, 0.0, 2.0);
        let w2 = s(3.0, 4.0, 0.0, 9.0);
        let mut r = rng();
        assert!(close(HeuristicMode::Geometric.score(None, w1, w2, false, &mut r), 7.0));
        assert!(close(HeuristicMode::Geometric.score(None, w1, w2, true, &mut r), 5.0));
    }

    #[test]
    fn manhattan() {
        let w1 = s(1.0, -1.0, 2.0, 0.5);
        let w2 = s(4.0, 1.0, 0.0, 0.0);
        let mut r = rng();
        // 3 + 2 + 2 + 0.5
        assert!(close(HeuristicMode::Manhattan.score(None, w1, w2, false, &mut r), 7.5));
    }

    #[test]
    fn cost_of_movement_uses_bias_difference() {
        let w1 = s(0.0, 0.0, 0.0, 1.0);
        let w2 = s(0.0, 2.0, 0.0, 4.0);
        let mut r = rng();
        let m = HeuristicMode::CostOfMovement;
        assert!(close(m.score(None, w1, w2, false, &mut r), 5.0));
        // Symmetric in the biases.
        let w1b = s(0.0, 0.0, 0.0, 4.0);
        let w2b = s(0.0, 2.0, 0.0, 1.0);
        assert!(close(m.score(None, w1b, w2b, false, &mut r), 5.0));
        assert!(close(m.score(None, w1, w2, true, &mut r), 2.0));
    }

    #[test]
    fn inverse_cost_of_movement_subtracts_bias_difference() {
        let w1 = s(0.0, 0.0, 0.0, 1.0);
        let w2 = s(0.0, 2.0, 0.0, 4.0);
        let mut r = rng();
        let m = HeuristicMode::InverseCostOfMovement;
        // 2 + min(-1 - -4, -4 - -1) = 2 + min(3, -3)
        assert!(close(m.score(None, w1, w2, false, &mut r), -1.0));
        assert!(close(m.score(None, w1, w2, true, &mut r), 2.0));
    }

    #[test]
    fn diagonal_distance_uniform() {
        let w1 = s(0.0, 0.0, 0.0, 2.0);
        let w2 = s(1.0, 5.0, 3.0, 0.0);
        let mut r = rng();
        let m = HeuristicMode::DiagonalDistanceUniform;
        assert!(close(m.score(None, w1, w2, false, &mut r), 10.0));
        assert!(close(m.score(None, w1, w2, true, &mut r), 0.0));
    }

    #[test]
    fn diagonal_distance() {
        let w1 = s(0.0, 0.0, 0.0, 2.0);
        let w2 = s(1.0, 5.0, 3.0, 0.0);
        let mut r = rng();
        // 2 * 1.414 * (5 - 1)
        let got = HeuristicMode::DiagonalDistance.score(None, w1, w2, false, &mut r);
        assert!(close(got, 11.312));
    }

    #[test]
    fn h_score_is_bias() {
        let w1 = s(9.0, 9.0, 9.0, 1.25);
        let w2 = s(0.0, 0.0, 0.0, 7.0);
        let mut r = rng();
        assert!(close(HeuristicMode::HScore.score(None, w1, w2, false, &mut r), 1.25));
        assert!(close(HeuristicMode::HScore.score(None, w1, w2, true, &mut r), 0.0));
    }

    #[test]
    fn incremental_accumulates_parent() {
        let w1 = s(0.0, 0.0, 0.0, 1.5);
        let w2 = s(5.0, 0.0, 0.0, 0.0);
        let mut r = rng();
        let m = HeuristicMode::Incremental;
        assert!(close(m.score(None, w1, w2, false, &mut r), 1.5));
        assert!(close(m.score(Some(4.0), w1, w2, false, &mut r), 5.5));
        assert!(close(m.score(Some(4.0), w1, w2, true, &mut r), 4.0));
    }

    #[test]
    fn drunk_stays_within_bias_range() {
        let w1 = s(0.0, 0.0, 0.0, 5.0);
        let w2 = s(1.0, 0.0, 0.0, 2.0);
        let mut r = rng();
        for _ in 0..200 {
            let v = HeuristicMode::Drunk.score(None, w1, w2, false, &mut r);
            assert!((2.0..5.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn drunk_with_equal_biases_is_constant() {
        let w1 = s(0.0, 0.0, 0.0, 3.0);
        let w2 = s(1.0, 0.0, 0.0, 3.0);
        let mut r = rng();
        assert_eq!(HeuristicMode::Drunk.score(None, w1, w2, false, &mut r), 3.0);
        assert_eq!(HeuristicMode::Drunk.score(None, w1, w2, true, &mut r), 0.0);
    }

    #[test]
    fn drunk_with_infinite_bias_is_lower_bound() {
        let w1 = s(0.0, 0.0, 0.0, f32::INFINITY);
        let w2 = s(1.0, 0.0, 0.0, 2.0);
        let mut r = rng();
        let m = HeuristicMode::Drunk;
        assert_eq!(m.score(None, w1, w2, false, &mut r), 2.0);
        assert_eq!(m.score(None, w2, w1, false, &mut r), 2.0);
        let sunk = s(0.0, 0.0, 0.0, f32::NEG_INFINITY);
        assert_eq!(m.score(None, sunk, w2, false, &mut r), f32::NEG_INFINITY);
    }

    #[test]
    fn drunk_with_extreme_biases_stays_finite() {
        let w1 = s(0.0, 0.0, 0.0, f32::MAX);
        let w2 = s(1.0, 0.0, 0.0, -f32::MAX);
        let mut r = rng();
        for _ in 0..200 {
            let v = HeuristicMode::Drunk.score(None, w1, w2, false, &mut r);
            assert!(v.is_finite(), "{v} is not finite");
            assert!((-f32::MAX..=f32::MAX).contains(&v));
        }
    }

    #[test]
    fn bias_raises_score() {
        let goal = s(4.0, 0.0, 0.0, 0.0);
        let mut r = rng();
        for m in [
            HeuristicMode::Geometric,
            HeuristicMode::Manhattan,
            HeuristicMode::HScore,
        ] {
            let low = m.score(None, s(1.0, 1.0, 0.0, 0.0), goal, false, &mut r);
            let high = m.score(None, s(1.0, 1.0, 0.0, 0.5), goal, false, &mut r);
            assert!(high > low, "{m}: {high} <= {low}");
        }
    }

    #[test]
    fn only_drunk_is_nondeterministic() {
        let nondet: Vec<_> = HeuristicMode::ALL
            .into_iter()
            .filter(|m| !m.is_deterministic())
            .collect();
        assert_eq!(nondet, [HeuristicMode::Drunk]);
    }

    #[test]
    fn names_parse_back() {
        for m in HeuristicMode::ALL {
            assert_eq!(m.to_string().parse::<HeuristicMode>(), Ok(m));
        }
        assert_eq!(
            "Cost-Of-Movement".parse::<HeuristicMode>(),
            Ok(HeuristicMode::CostOfMovement));
        assert!("vector3".parse::<HeuristicMode>().is_err());
        assert_eq!(HeuristicMode::default(), HeuristicMode::Geometric);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serde_names_match_display() {
        for m in HeuristicMode::ALL {
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{m}\""));
        }
    }
}
