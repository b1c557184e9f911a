//! The learning agent: episode lifecycle, reward assignment, and the glue
//! between discretizer, model, solver, and policy.
//!
//! The agent owns the single mutable MDP model exclusively. During an
//! episode it only discretizes and accumulates; re-estimation and value
//! iteration happen at the episode boundary, before the next episode's
//! first action is requested.

use crate::{
    config::AgentConfig,
    error::Result,
    mdp::{
        DiscretizationGrid, EpsilonGreedyPolicy, MdpModel, SavedAgent, SolveReport, SolverConfig,
        TrainingMetadata, solve,
    },
    types::{Action, Observation},
};

/// Reinforcement-learning agent for the runner game.
pub struct Agent {
    grid: DiscretizationGrid,
    model: MdpModel,
    policy: EpsilonGreedyPolicy,
    solver: SolverConfig,
    greed: f64,
    greed_step: f64,
    crash_reward: f64,
    pass_reward: f64,
    episodes: usize,
    // Per-episode cursor: the "before" side of the next transition.
    prev_observation: Option<Observation>,
    prev_state: usize,
    last_action: Action,
}

impl Agent {
    /// Create a fresh agent: uniform transition priors, zero counts,
    /// rewards, and values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] or
    /// [`crate::Error::InvalidBuckets`] if the configuration is unusable.
    pub fn new(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.build_grid()?;
        let model = MdpModel::new(grid.num_states());
        Self::assemble(grid, model, config.initial_greed, config)
    }

    /// Restore an agent from a saved snapshot.
    ///
    /// The snapshot supplies the grid, the full model, and the greed
    /// coefficient; `config` supplies the knobs that are not persisted
    /// (solver parameters, rewards, annealing step, seed).
    ///
    /// # Errors
    ///
    /// Rejects snapshots with an unsupported version or a model whose shape
    /// disagrees with its grid, and configurations that fail validation.
    pub fn from_saved(saved: SavedAgent, config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        saved.validate()?;
        let episodes = saved.metadata.episodes_trained.unwrap_or(0);
        let mut agent = Self::assemble(saved.grid, saved.model, saved.greed, config)?;
        agent.episodes = episodes;
        Ok(agent)
    }

    fn assemble(
        grid: DiscretizationGrid,
        model: MdpModel,
        greed: f64,
        config: &AgentConfig,
    ) -> Result<Self> {
        let policy = match config.seed {
            Some(seed) => EpsilonGreedyPolicy::new().with_seed(seed),
            None => EpsilonGreedyPolicy::new(),
        };
        let prev_state = grid.state_index(None, false);
        Ok(Self {
            grid,
            model,
            policy,
            solver: config.solver_config(),
            greed,
            greed_step: config.greed_step,
            crash_reward: config.crash_reward,
            pass_reward: config.pass_reward,
            episodes: 0,
            prev_observation: None,
            prev_state,
            last_action: Action::Run,
        })
    }

    /// Prime the per-episode cursor with the first observation of a new
    /// episode.
    pub fn begin_episode(&mut self, observation: Option<Observation>) {
        self.prev_state = self.grid.state_index(observation.as_ref(), false);
        self.prev_observation = observation;
        self.last_action = Action::Run;
    }

    /// Choose the next action for the current state via the epsilon-greedy
    /// policy, remembering it for the transition recorded by
    /// [`Agent::observe`].
    ///
    /// # Errors
    ///
    /// Propagates policy errors; with a cursor produced by this agent the
    /// state index is always valid.
    pub fn act(&mut self) -> Result<Action> {
        let action = self.policy.select(&self.model, self.prev_state, self.greed)?;
        self.last_action = action;
        Ok(action)
    }

    /// Fold the tick's outcome into the model and advance the cursor.
    ///
    /// The reward goes to the post-transition state: the crash reward on a
    /// transition into the fail state, the pass reward when the distance to
    /// the next obstacle strictly increased without crashing (the previous
    /// obstacle fell behind), zero otherwise.
    ///
    /// # Errors
    ///
    /// Propagates recording errors; indices produced by the discretizer are
    /// always in range.
    pub fn observe(&mut self, observation: Option<Observation>, crashed: bool) -> Result<()> {
        let passed = !crashed
            && matches!(
                (self.prev_observation.as_ref(), observation.as_ref()),
                (Some(prev), Some(next)) if next.distance > prev.distance
            );
        let reward = if crashed {
            self.crash_reward
        } else if passed {
            self.pass_reward
        } else {
            0.0
        };

        let next_state = self.grid.state_index(observation.as_ref(), crashed);
        self.model
            .record(self.prev_state, self.last_action, next_state, reward)?;

        self.prev_observation = observation;
        self.prev_state = next_state;
        Ok(())
    }

    /// Close the episode: re-estimate the MDP from the accumulated counts,
    /// re-solve the value function, and make the policy a little greedier.
    ///
    /// Blocking and CPU-bound; runs between episodes only.
    ///
    /// # Errors
    ///
    /// Propagates solver configuration errors. Non-convergence under a
    /// sweep cap is not an error; it is reported through the
    /// [`SolveReport`].
    pub fn end_episode(&mut self) -> Result<SolveReport> {
        self.model.reestimate();
        let report = solve(&mut self.model, &self.solver)?;
        self.greed = (self.greed + self.greed_step).min(1.0);
        self.episodes += 1;
        Ok(report)
    }

    /// Snapshot the full learned state for persistence.
    pub fn snapshot(&self, mut metadata: TrainingMetadata) -> SavedAgent {
        metadata.episodes_trained = Some(self.episodes);
        if metadata.seed.is_none() {
            metadata.seed = self.policy_seed();
        }
        SavedAgent::new(self.grid.clone(), self.model.clone(), self.greed, metadata)
    }

    pub fn grid(&self) -> &DiscretizationGrid {
        &self.grid
    }

    pub fn model(&self) -> &MdpModel {
        &self.model
    }

    /// Current probability of acting greedily.
    pub fn greed(&self) -> f64 {
        self.greed
    }

    /// Number of completed episodes.
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Discrete index of the agent's current cursor state.
    pub fn current_state(&self) -> usize {
        self.prev_state
    }

    fn policy_seed(&self) -> Option<u64> {
        self.policy.rng_seed()
    }
}
