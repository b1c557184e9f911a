//! Synchronous value iteration over the estimated MDP.
//!
//! Runs at episode boundaries, immediately after re-estimation, and must
//! finish before the next episode's first action is requested. The Bellman
//! optimality operator is a γ-contraction under the sup-norm for
//! `0 < γ < 1`, so the sweep converges to a unique fixed point from any
//! finite starting vector; warm-starting from the previous solution only
//! speeds it up.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    mdp::model::MdpModel,
    types::MODELED_ACTIONS,
    utils::dot,
};

/// Parameters of the value-iteration sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Discount factor γ, strictly between 0 and 1.
    pub discount: f64,
    /// Convergence tolerance on the sup-norm change between sweeps.
    pub tolerance: f64,
    /// Optional safety cap on the number of sweeps. `None` runs to
    /// convergence, which is the reference behavior.
    pub max_sweeps: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: 0.995,
            tolerance: 0.01,
            max_sweeps: None,
        }
    }
}

impl SolverConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `0 < discount < 1`,
    /// `tolerance > 0`, and any sweep cap is non-zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount must be in (0, 1), got {}", self.discount),
            });
        }
        if !(self.tolerance > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }
        if self.max_sweeps == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max_sweeps must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of one call to [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Number of full sweeps performed.
    pub sweeps: usize,
    /// Sup-norm change of the final sweep.
    pub residual: f64,
    /// Whether the residual fell below the tolerance.
    pub converged: bool,
}

/// Run value iteration to the fixed point of the Bellman optimality
/// operator, updating the model's value vector in place.
///
/// Each sweep computes, for every state,
/// `value[s] ← reward[s] + γ * max_a Σ_s' P[s][a][s'] * value[s']`
/// over the two decision-relevant actions, and terminates when the maximum
/// absolute change across all states falls below the tolerance.
///
/// Hitting a configured sweep cap before convergence is recoverable: the
/// best-effort value vector is kept, a warning is logged, and the report
/// carries `converged: false`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if the config fails validation.
pub fn solve(model: &mut MdpModel, config: &SolverConfig) -> Result<SolveReport> {
    config.validate()?;

    let num_states = model.num_states();
    let mut sweeps = 0;

    loop {
        let mut new_value = Vec::with_capacity(num_states);
        for state in 0..num_states {
            let best = (0..MODELED_ACTIONS)
                .map(|slot| dot(model.probs_row(state, slot), model.value()))
                .fold(f64::NEG_INFINITY, f64::max);
            new_value.push(model.reward()[state] + config.discount * best);
        }

        let residual = new_value
            .iter()
            .zip(model.value())
            .map(|(new, old)| (new - old).abs())
            .fold(0.0, f64::max);

        *model.value_mut() = new_value;
        sweeps += 1;

        if residual < config.tolerance {
            return Ok(SolveReport {
                sweeps,
                residual,
                converged: true,
            });
        }
        if config.max_sweeps.is_some_and(|cap| sweeps >= cap) {
            log::warn!(
                "value iteration stopped at the {sweeps}-sweep cap with residual {residual:.6} \
                 (tolerance {}); keeping the best-effort value vector",
                config.tolerance
            );
            return Ok(SolveReport {
                sweeps,
                residual,
                converged: false,
            });
        }
    }
}
