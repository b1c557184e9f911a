//! Epsilon-greedy action selection over the current value function.
//!
//! The decision set is an explicitly declared subset of the modeled actions.
//! By default it is run and jump; duck is deliberately left out, mirroring
//! the observation that the game can be beaten without it.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    mdp::model::MdpModel,
    types::Action,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Epsilon-greedy policy.
///
/// The `greed` coefficient passed to [`EpsilonGreedyPolicy::select`] is the
/// probability of choosing the greedy action; with the remaining probability
/// the policy picks uniformly among its decidable actions. The caller owns
/// the annealing schedule (the agent nudges the coefficient toward 1 after
/// every episode).
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPolicy {
    decidable: Vec<Action>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl EpsilonGreedyPolicy {
    /// Policy deciding between run and jump, with a nondeterministic RNG.
    pub fn new() -> Self {
        Self {
            decidable: vec![Action::Run, Action::Jump],
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Restrict the policy to a custom decision set.
    ///
    /// The first action in the set is the default: it wins all ties in the
    /// greedy comparison.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDecidableActions`] for an empty set and
    /// [`Error::UnmodeledAction`] if the set contains an action the model
    /// keeps no statistics for.
    pub fn with_decidable(mut self, actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(Error::NoDecidableActions);
        }
        if let Some(action) = actions.iter().find(|a| a.model_slot().is_none()) {
            return Err(Error::UnmodeledAction {
                action: action.to_string(),
            });
        }
        self.decidable = actions;
        Ok(self)
    }

    /// Seed the internal RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Select an action for `state`: greedy with probability `greed`,
    /// uniform among the decidable actions otherwise.
    ///
    /// Any `greed` in `[0, 1]` is accepted; values above 1 behave like 1
    /// (always greedy) and values below 0 like 0 (always uniform).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateOutOfRange`] if `state` is not a valid index
    /// into the model.
    pub fn select(&mut self, model: &MdpModel, state: usize, greed: f64) -> Result<Action> {
        if self.rng.random::<f64>() < greed {
            self.greedy(model, state)
        } else {
            Ok(*self
                .decidable
                .choose(&mut self.rng)
                .expect("decidable set is never empty"))
        }
    }

    /// The greedy action for `state` under the current value function.
    ///
    /// Scores each decidable action by `Σ_s' P[state][a][s'] * value[s']`;
    /// a later action wins only by strictly exceeding the best score so far,
    /// so ties fall to the earliest action in the decision set.
    pub fn greedy(&self, model: &MdpModel, state: usize) -> Result<Action> {
        let mut best = self.decidable[0];
        let mut best_score = model.action_value(state, best)?;
        for &action in &self.decidable[1..] {
            let score = model.action_value(state, action)?;
            if score > best_score {
                best = action;
                best_score = score;
            }
        }
        Ok(best)
    }

    /// The configured decision set.
    pub fn decidable(&self) -> &[Action] {
        &self.decidable
    }

    pub(crate) fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

impl Default for EpsilonGreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Model where jumping from state 2 avoids a heavily penalized crash.
    fn jump_favoring_model() -> MdpModel {
        let mut model = MdpModel::new(4);
        for _ in 0..10 {
            model.record(2, Action::Run, 0, -1000.0).unwrap();
            model.record(2, Action::Jump, 1, 0.0).unwrap();
        }
        model.reestimate();
        crate::mdp::solver::solve(
            &mut model,
            &crate::mdp::solver::SolverConfig {
                discount: 0.9,
                tolerance: 1e-9,
                max_sweeps: None,
            },
        )
        .unwrap();
        model
    }

    #[test]
    fn test_full_greed_picks_the_greedy_action() {
        let model = jump_favoring_model();
        let mut policy = EpsilonGreedyPolicy::new().with_seed(7);
        for _ in 0..20 {
            assert_eq!(policy.select(&model, 2, 1.0).unwrap(), Action::Jump);
        }
    }

    #[test]
    fn test_ties_fall_to_run() {
        // Fresh model: every action value is identical.
        let model = MdpModel::new(4);
        let policy = EpsilonGreedyPolicy::new();
        assert_eq!(policy.greedy(&model, 2).unwrap(), Action::Run);
    }

    #[test]
    fn test_zero_greed_explores_uniformly() {
        let model = jump_favoring_model();
        let mut policy = EpsilonGreedyPolicy::new().with_seed(42);
        let mut saw_run = false;
        let mut saw_jump = false;
        for _ in 0..100 {
            match policy.select(&model, 2, 0.0).unwrap() {
                Action::Run => saw_run = true,
                Action::Jump => saw_jump = true,
                Action::Duck => panic!("duck is not decidable by default"),
            }
        }
        assert!(saw_run && saw_jump);
    }

    #[test]
    fn test_out_of_unit_greed_degrades_gracefully() {
        let model = jump_favoring_model();
        let mut policy = EpsilonGreedyPolicy::new().with_seed(3);
        assert_eq!(policy.select(&model, 2, 1.5).unwrap(), Action::Jump);
        assert!(policy.select(&model, 2, -0.5).is_ok());
    }

    #[test]
    fn test_decidable_set_is_validated() {
        assert!(
            EpsilonGreedyPolicy::new()
                .with_decidable(Vec::new())
                .is_err()
        );
        assert!(
            EpsilonGreedyPolicy::new()
                .with_decidable(vec![Action::Run, Action::Duck])
                .is_err()
        );
        let jump_only = EpsilonGreedyPolicy::new()
            .with_decidable(vec![Action::Jump])
            .unwrap();
        assert_eq!(jump_only.decidable(), &[Action::Jump]);
    }

    #[test]
    fn test_seeded_policies_agree() {
        let model = jump_favoring_model();
        let mut a = EpsilonGreedyPolicy::new().with_seed(11);
        let mut b = EpsilonGreedyPolicy::new().with_seed(11);
        for _ in 0..50 {
            assert_eq!(
                a.select(&model, 2, 0.5).unwrap(),
                b.select(&model, 2, 0.5).unwrap()
            );
        }
    }
}
