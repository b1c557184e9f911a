//! Observer port - hooks for watching a training run.
//!
//! Displaying progress to an operator is outside the core; anything that
//! wants to watch training (a progress bar, a metrics logger, a test)
//! implements this trait and is attached to the pipeline.

use crate::{Result, mdp::SolveReport, types::Action};

/// Observer of training events.
///
/// All hooks default to no-ops, so implementations only override what they
/// care about. Events arrive in order: `on_training_start`, then per
/// episode `on_episode_start`, a series of `on_step`, `on_episode_end`,
/// and finally `on_training_end`.
pub trait EpisodeObserver {
    /// Called once before the first episode.
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let _ = total_episodes;
        Ok(())
    }

    /// Called at the start of each episode.
    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        let _ = episode;
        Ok(())
    }

    /// Called after each tick with the discrete state the agent acted from
    /// and the action it chose.
    fn on_step(&mut self, episode: usize, state: usize, action: Action) -> Result<()> {
        let _ = (episode, state, action);
        Ok(())
    }

    /// Called when an episode terminates, after re-estimation and
    /// value iteration.
    fn on_episode_end(&mut self, episode: usize, score: u64, report: &SolveReport) -> Result<()> {
        let _ = (episode, score, report);
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
