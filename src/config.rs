//! Configuration for agent creation.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    mdp::{DiscretizationGrid, SolverConfig},
    types::PTERODACTYL_FLIGHT_LEVELS,
    utils::linspace,
};

/// Configuration for creating a learning agent.
///
/// Builder-style: start from [`AgentConfig::default`] and override what the
/// run needs.
///
/// # Examples
///
/// ```
/// use trex::config::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_time_axis(10, 0.8)
///     .with_discount(0.99)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of time-to-obstacle buckets
    pub time_buckets: usize,
    /// Upper bound of the time axis, in seconds
    pub max_time: f64,
    /// Number of player-height buckets
    pub height_buckets: usize,
    /// Upper bound of the height axis, in game pixels
    pub max_height: f64,
    /// Discount factor γ for value iteration
    pub discount: f64,
    /// Convergence tolerance for value iteration
    pub tolerance: f64,
    /// Optional sweep cap for value iteration
    pub max_sweeps: Option<usize>,
    /// Initial probability of acting greedily
    pub initial_greed: f64,
    /// Per-episode increment of the greed coefficient (clamped at 1)
    pub greed_step: f64,
    /// Reward for transitioning into the fail state
    pub crash_reward: f64,
    /// Reward for passing an obstacle without crashing
    pub pass_reward: f64,
    /// Random seed for the policy RNG
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            time_buckets: 20,
            max_time: 1.0,
            height_buckets: 8,
            max_height: 100.0,
            discount: 0.995,
            tolerance: 0.01,
            max_sweeps: None,
            initial_greed: 0.0,
            greed_step: 0.01,
            crash_reward: -1000.0,
            pass_reward: 10.0,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Set the resolution and range of the time-to-obstacle axis.
    pub fn with_time_axis(mut self, buckets: usize, max_time: f64) -> Self {
        self.time_buckets = buckets;
        self.max_time = max_time;
        self
    }

    /// Set the resolution and range of the player-height axis.
    pub fn with_height_axis(mut self, buckets: usize, max_height: f64) -> Self {
        self.height_buckets = buckets;
        self.max_height = max_height;
        self
    }

    /// Set the discount factor.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the value-iteration convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Cap value iteration at a maximum number of sweeps.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = Some(max_sweeps);
        self
    }

    /// Set the initial greed coefficient and its per-episode increment.
    pub fn with_greed_schedule(mut self, initial: f64, step: f64) -> Self {
        self.initial_greed = initial;
        self.greed_step = step;
        self
    }

    /// Set the crash and pass rewards. The qualitative ordering
    /// crash ≪ 0 < pass is required for sensible avoidance behavior.
    pub fn with_rewards(mut self, crash: f64, pass: f64) -> Self {
        self.crash_reward = crash;
        self.pass_reward = pass;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] on empty axes, a greed
    /// coefficient outside `[0, 1]`, rewards that break the
    /// crash ≪ 0 < pass ordering, or solver parameters rejected by
    /// [`SolverConfig::validate`].
    pub fn validate(&self) -> Result<()> {
        if self.time_buckets == 0 || self.height_buckets == 0 {
            return Err(Error::InvalidConfiguration {
                message: "time and height axes need at least one bucket each".to_string(),
            });
        }
        if !(self.max_time > 0.0) || !(self.max_height > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: "axis upper bounds must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.initial_greed) {
            return Err(Error::InvalidConfiguration {
                message: format!("initial greed must be in [0, 1], got {}", self.initial_greed),
            });
        }
        if !(self.greed_step >= 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("greed step must be non-negative, got {}", self.greed_step),
            });
        }
        if !(self.crash_reward < 0.0 && self.pass_reward > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: "crash reward must be negative and pass reward positive".to_string(),
            });
        }
        self.solver_config().validate()
    }

    /// Materialize the discretization grid: evenly spaced time and height
    /// buckets plus the fixed pterodactyl flight levels.
    pub fn build_grid(&self) -> Result<DiscretizationGrid> {
        DiscretizationGrid::new(
            linspace(0.0, self.max_time, self.time_buckets),
            linspace(0.0, self.max_height, self.height_buckets),
            PTERODACTYL_FLIGHT_LEVELS.to_vec(),
        )
    }

    /// The value-iteration parameters of this configuration.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            discount: self.discount,
            tolerance: self.tolerance,
            max_sweeps: self.max_sweeps,
        }
    }
}
