//! Environment port - abstraction over the live game.
//!
//! The mechanism that reads game state and physically executes actions
//! (a browser session, an emulator, a recorded trace) lives behind this
//! trait; the core only ever sees observations and flags.

use crate::{
    Result,
    types::{Action, Observation},
};

/// The game collaborator as seen by the episode loop.
///
/// Implementations are queried once per tick. The episode loop treats the
/// environment as the single source of truth for liveness (`is_playing`) and
/// failure (`is_crashed`); `observe` may legitimately return `None` until
/// the first obstacle has spawned.
pub trait Environment {
    /// Start a new run, resetting the game to its initial state.
    fn restart(&mut self) -> Result<()>;

    /// Current raw observation, or `None` while no obstacle is visible.
    fn observe(&mut self) -> Result<Option<Observation>>;

    /// Whether the player has crashed into an obstacle.
    fn is_crashed(&mut self) -> Result<bool>;

    /// Whether the game is running (not paused, not game over).
    fn is_playing(&mut self) -> Result<bool>;

    /// Physically execute an action (jump, duck, or keep running).
    fn execute(&mut self, action: Action) -> Result<()>;

    /// Score of the current run.
    fn score(&mut self) -> Result<u64>;
}
