//! Tabular reinforcement learning for a side-scrolling runner game
//!
//! This crate provides:
//! - A state discretizer mapping raw game observations onto a finite grid
//! - An approximate MDP model accumulating transition and reward statistics
//! - A value-iteration solver recomputing the optimal value function at
//!   every episode boundary
//! - An epsilon-greedy policy over a declared subset of decidable actions
//! - Lossless persistence of the full learned parameter set
//!
//! The live game, action execution, and operator display are external
//! collaborators reached through the traits in [`ports`].

pub mod adapters;
pub mod agent;
pub mod config;
pub mod error;
pub mod mdp;
pub mod pipeline;
pub mod ports;
pub mod types;
pub mod utils;

pub use agent::Agent;
pub use config::AgentConfig;
pub use error::{Error, Result};
pub use mdp::{
    DiscretizationGrid, EpsilonGreedyPolicy, FAIL_STATE, MdpModel, NO_OBSTACLE_STATE, SavedAgent,
    SolveReport, SolverConfig, TrainingMetadata,
};
pub use types::{Action, MODELED_ACTIONS, Observation, ObstacleKind, PTERODACTYL_FLIGHT_LEVELS};
