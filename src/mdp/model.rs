//! The approximate MDP model: transition counts, maximum-likelihood
//! estimates, reward statistics, and the value vector.
//!
//! This is the single mutable training-state object of the agent. All
//! mutation flows through [`MdpModel::record`] (experience accumulation) and
//! [`MdpModel::reestimate`] (maximum-likelihood recomputation); the value
//! vector is updated by the solver in [`crate::mdp::solver`].

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Action, MODELED_ACTIONS},
    utils::dot,
};

/// Tabular MDP parameters over a fixed, finite state space.
///
/// Created once with uniform transition priors and zero counts, rewards, and
/// values; counts accumulate for the model's entire lifetime (there is no
/// per-episode reset or decay), so the estimates grow more confident as more
/// episodes run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdpModel {
    num_states: usize,
    /// `transition_counts[s][a][s']`: observed (state, action, next-state)
    /// frequencies.
    transition_counts: Vec<Vec<Vec<u64>>>,
    /// `transition_probs[s][a][..]`: a probability distribution over next
    /// states; every row sums to 1 at all times.
    transition_probs: Vec<Vec<Vec<f64>>>,
    /// Running reward sum per next-state.
    reward_totals: Vec<f64>,
    /// Number of reward observations per next-state.
    reward_counts: Vec<u64>,
    /// Mean-reward estimate per state.
    reward: Vec<f64>,
    /// Estimated optimal value per state.
    value: Vec<f64>,
}

impl MdpModel {
    /// Create a model with uniform transition priors (`1/num_states`) and
    /// all counts, rewards, and values at zero.
    pub fn new(num_states: usize) -> Self {
        let uniform = 1.0 / num_states as f64;
        Self {
            num_states,
            transition_counts: vec![vec![vec![0; num_states]; MODELED_ACTIONS]; num_states],
            transition_probs: vec![vec![vec![uniform; num_states]; MODELED_ACTIONS]; num_states],
            reward_totals: vec![0.0; num_states],
            reward_counts: vec![0; num_states],
            reward: vec![0.0; num_states],
            value: vec![0.0; num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Record one observed transition and its reward.
    ///
    /// The reward is attributed to the post-transition state, not the action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateOutOfRange`] for indices outside
    /// `[0, num_states)` and [`Error::UnmodeledAction`] for actions the model
    /// keeps no statistics for (duck). Indices produced by the discretizer
    /// are always in range.
    pub fn record(
        &mut self,
        prev_state: usize,
        action: Action,
        next_state: usize,
        reward: f64,
    ) -> Result<()> {
        let slot = action.model_slot().ok_or_else(|| Error::UnmodeledAction {
            action: action.to_string(),
        })?;
        self.check_state(prev_state)?;
        self.check_state(next_state)?;

        self.transition_counts[prev_state][slot][next_state] += 1;
        self.reward_totals[next_state] += reward;
        self.reward_counts[next_state] += 1;
        Ok(())
    }

    /// Recompute transition probabilities and mean rewards from the
    /// accumulated counts (maximum-likelihood estimation).
    ///
    /// Only rows with at least one observed transition are overwritten;
    /// unvisited rows keep their prior, so no row is ever normalized by a
    /// zero total. Likewise, only states with at least one reward
    /// observation get a new mean-reward estimate.
    pub fn reestimate(&mut self) {
        for state in 0..self.num_states {
            for slot in 0..MODELED_ACTIONS {
                let counts = &self.transition_counts[state][slot];
                let total: u64 = counts.iter().sum();
                if total == 0 {
                    continue;
                }
                let row = &mut self.transition_probs[state][slot];
                for (prob, &count) in row.iter_mut().zip(counts) {
                    *prob = count as f64 / total as f64;
                }
            }
        }

        for state in 0..self.num_states {
            if self.reward_counts[state] > 0 {
                self.reward[state] = self.reward_totals[state] / self.reward_counts[state] as f64;
            }
        }
    }

    /// Expected value of taking `action` in `state` under the current
    /// transition estimates: `Σ_s' P[state][action][s'] * value[s']`.
    pub fn action_value(&self, state: usize, action: Action) -> Result<f64> {
        let slot = action.model_slot().ok_or_else(|| Error::UnmodeledAction {
            action: action.to_string(),
        })?;
        self.check_state(state)?;
        Ok(dot(&self.transition_probs[state][slot], &self.value))
    }

    /// Transition-probability row for a (state, action) pair.
    pub fn transition_probs(&self, state: usize, action: Action) -> Result<&[f64]> {
        let slot = action.model_slot().ok_or_else(|| Error::UnmodeledAction {
            action: action.to_string(),
        })?;
        self.check_state(state)?;
        Ok(&self.transition_probs[state][slot])
    }

    /// Transition-count row for a (state, action) pair.
    pub fn transition_counts(&self, state: usize, action: Action) -> Result<&[u64]> {
        let slot = action.model_slot().ok_or_else(|| Error::UnmodeledAction {
            action: action.to_string(),
        })?;
        self.check_state(state)?;
        Ok(&self.transition_counts[state][slot])
    }

    /// Current mean-reward estimates.
    pub fn reward(&self) -> &[f64] {
        &self.reward
    }

    /// Current value vector.
    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// Total number of recorded transitions across all (state, action) pairs.
    pub fn total_transitions(&self) -> u64 {
        self.transition_counts
            .iter()
            .flatten()
            .flatten()
            .sum()
    }

    pub(crate) fn value_mut(&mut self) -> &mut Vec<f64> {
        &mut self.value
    }

    /// Infallible row access for the solver; `slot` must be a modeled action
    /// slot and `state` in range.
    pub(crate) fn probs_row(&self, state: usize, slot: usize) -> &[f64] {
        &self.transition_probs[state][slot]
    }

    fn check_state(&self, index: usize) -> Result<()> {
        if index < self.num_states {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                index,
                num_states: self.num_states,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_prior_rows_sum_to_one() {
        let model = MdpModel::new(18);
        for state in 0..18 {
            for action in [Action::Run, Action::Jump] {
                let sum: f64 = model.transition_probs(state, action).unwrap().iter().sum();
                assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_single_transition_becomes_certain() {
        let mut model = MdpModel::new(18);
        model.record(5, Action::Jump, 7, 10.0).unwrap();
        model.reestimate();

        let row = model.transition_probs(5, Action::Jump).unwrap();
        assert_eq!(row[7], 1.0);
        for (idx, &prob) in row.iter().enumerate() {
            if idx != 7 {
                assert_eq!(prob, 0.0);
            }
        }
        assert_eq!(model.reward()[7], 10.0);
    }

    #[test]
    fn test_unvisited_rows_keep_prior() {
        let mut model = MdpModel::new(4);
        model.record(2, Action::Run, 0, -1000.0).unwrap();
        model.reestimate();

        let untouched = model.transition_probs(2, Action::Jump).unwrap();
        assert!(untouched.iter().all(|&p| p == 0.25));
        // State 3 saw no reward; its estimate stays at the initial zero.
        assert_eq!(model.reward()[3], 0.0);
    }

    #[test]
    fn test_rows_sum_to_one_after_reestimate() {
        let mut model = MdpModel::new(6);
        model.record(2, Action::Run, 3, 0.0).unwrap();
        model.record(2, Action::Run, 4, 10.0).unwrap();
        model.record(2, Action::Run, 3, 0.0).unwrap();
        model.record(3, Action::Jump, 0, -1000.0).unwrap();
        model.reestimate();

        for state in 0..6 {
            for action in [Action::Run, Action::Jump] {
                let sum: f64 = model.transition_probs(state, action).unwrap().iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "row ({state}, {action}) sums to {sum}");
            }
        }
        let row = model.transition_probs(2, Action::Run).unwrap();
        assert!((row[3] - 2.0 / 3.0).abs() < 1e-12);
        assert!((row[4] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reward_is_running_mean() {
        let mut model = MdpModel::new(4);
        model.record(1, Action::Run, 2, 10.0).unwrap();
        model.record(1, Action::Jump, 2, 0.0).unwrap();
        model.reestimate();
        assert_eq!(model.reward()[2], 5.0);

        // Counts are cumulative: a later episode folds into the same mean.
        model.record(3, Action::Run, 2, 10.0).unwrap();
        model.reestimate();
        assert!((model.reward()[2] - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_record_rejects_duck_and_bad_indices() {
        let mut model = MdpModel::new(4);
        assert!(matches!(
            model.record(1, Action::Duck, 2, 0.0),
            Err(Error::UnmodeledAction { .. })
        ));
        assert!(matches!(
            model.record(4, Action::Run, 2, 0.0),
            Err(Error::StateOutOfRange { .. })
        ));
        assert!(matches!(
            model.record(1, Action::Run, 9, 0.0),
            Err(Error::StateOutOfRange { .. })
        ));
    }
}
