//! The episode loop.
//!
//! Single-threaded and synchronous: each tick asks the agent for an action,
//! executes it on the environment, and feeds the resulting observation back
//! into the agent. At the episode boundary the agent re-estimates its MDP
//! and re-solves the value function before the next episode begins.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::Agent,
    ports::{Environment, EpisodeObserver},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub episodes: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { episodes: 100 }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,
    /// Best score across all episodes
    pub best_score: u64,
    /// Total ticks across all episodes
    pub total_steps: usize,
    /// Average episode length in ticks
    pub mean_steps: f64,
}

impl TrainingResult {
    fn new(episodes: usize, best_score: u64, total_steps: usize) -> Self {
        let mean_steps = if episodes > 0 {
            total_steps as f64 / episodes as f64
        } else {
            0.0
        };
        Self {
            episodes,
            best_score,
            total_steps,
            mean_steps,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Episode loop driving one agent against one environment.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn EpisodeObserver>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn EpisodeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes.
    ///
    /// Each episode: restart the environment, prime the agent with the
    /// first observation, then tick (act, execute, observe) until the game
    /// stops playing; record the final crash transition and let the agent
    /// close the episode. The agent's model is mutated in place and keeps
    /// accumulating across episodes.
    ///
    /// # Errors
    ///
    /// Propagates environment, agent, and observer errors. Value-iteration
    /// non-convergence under a sweep cap is not an error.
    pub fn run(
        &mut self,
        agent: &mut Agent,
        environment: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut best_score = 0;
        let mut total_steps = 0;

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            environment.restart()?;
            agent.begin_episode(environment.observe()?);

            while environment.is_playing()? {
                let state = agent.current_state();
                let action = agent.act()?;
                environment.execute(action)?;

                let crashed = environment.is_crashed()?;
                let observation = environment.observe()?;
                agent.observe(observation, crashed)?;
                total_steps += 1;

                for observer in &mut self.observers {
                    observer.on_step(episode, state, action)?;
                }

                if crashed {
                    break;
                }
            }

            let score = environment.score()?;
            best_score = best_score.max(score);

            let report = agent.end_episode()?;
            for observer in &mut self.observers {
                observer.on_episode_end(episode, score, &report)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            best_score,
            total_steps,
        ))
    }
}
