//! State discretization: mapping raw continuous observations onto a finite
//! state space.
//!
//! The grid carves the observation space along three axes — time to the next
//! obstacle, player height, and (for airborne obstacles) flight level — and
//! reserves two extra states: index 0 for the terminal/fail state and index 1
//! for "no obstacle visible yet". Every real-valued observation maps to some
//! bucket; out-of-range values are clamped by the nearest-neighbor search
//! rather than rejected.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Observation,
};

/// Reserved state index for the terminal/fail state.
pub const FAIL_STATE: usize = 0;

/// Reserved state index for "no obstacle has spawned yet".
pub const NO_OBSTACLE_STATE: usize = 1;

/// Immutable discretization grid.
///
/// Constructed once from configuration; defines the size of the state space
/// and the observation-to-index mapping for the lifetime of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizationGrid {
    time_buckets: Vec<f64>,
    height_buckets: Vec<f64>,
    flight_buckets: Vec<f64>,
}

impl DiscretizationGrid {
    /// Create a grid from three ascending bucket axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuckets`] if any axis is empty, contains a
    /// non-finite value, or is not strictly ascending.
    pub fn new(
        time_buckets: Vec<f64>,
        height_buckets: Vec<f64>,
        flight_buckets: Vec<f64>,
    ) -> Result<Self> {
        validate_axis("time", &time_buckets)?;
        validate_axis("height", &height_buckets)?;
        validate_axis("flight-level", &flight_buckets)?;
        Ok(Self {
            time_buckets,
            height_buckets,
            flight_buckets,
        })
    }

    /// Total number of discrete states: one cell per
    /// (obstacle-slot × time-bucket × height-bucket) combination, plus the
    /// two reserved states. Airborne obstacles get one slot per flight level;
    /// all ground obstacles share a single composite slot.
    pub fn num_states(&self) -> usize {
        (1 + self.flight_buckets.len()) * self.time_buckets.len() * self.height_buckets.len() + 2
    }

    /// Map an observation to its discrete state index.
    ///
    /// Pure and deterministic: the same input always yields the same index.
    /// A crashed tick maps to [`FAIL_STATE`] regardless of the observation;
    /// an absent observation maps to [`NO_OBSTACLE_STATE`].
    pub fn state_index(&self, observation: Option<&Observation>, crashed: bool) -> usize {
        if crashed {
            return FAIL_STATE;
        }
        let Some(obs) = observation else {
            return NO_OBSTACLE_STATE;
        };

        let slot = if obs.kind.is_airborne() {
            nearest(&self.flight_buckets, obs.config)
        } else {
            self.flight_buckets.len()
        };
        // An infinite time-to-obstacle (stalled game, speed <= 0) belongs in
        // the farthest bucket, not wherever the distance scan happens to stop.
        let time_idx = if obs.time_to_obstacle.is_finite() {
            nearest(&self.time_buckets, obs.time_to_obstacle)
        } else {
            self.time_buckets.len() - 1
        };
        let height_idx = nearest(&self.height_buckets, obs.height);

        slot * self.time_buckets.len() * self.height_buckets.len()
            + time_idx * self.height_buckets.len()
            + height_idx
            + 2
    }

    pub fn time_buckets(&self) -> &[f64] {
        &self.time_buckets
    }

    pub fn height_buckets(&self) -> &[f64] {
        &self.height_buckets
    }

    pub fn flight_buckets(&self) -> &[f64] {
        &self.flight_buckets
    }
}

/// Index of the bucket closest to `value` by absolute difference.
///
/// Exact ties resolve to the lowest index: a later bucket replaces the
/// current best only on a strict improvement.
fn nearest(buckets: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = (buckets[0] - value).abs();
    for (idx, &bucket) in buckets.iter().enumerate().skip(1) {
        let dist = (bucket - value).abs();
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    best
}

fn validate_axis(axis: &'static str, buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(Error::InvalidBuckets {
            axis,
            message: "axis must contain at least one bucket".to_string(),
        });
    }
    if buckets.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidBuckets {
            axis,
            message: "bucket values must be finite".to_string(),
        });
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidBuckets {
            axis,
            message: "bucket values must be strictly ascending".to_string(),
        });
    }
    Ok(())
}
