//! The approximate MDP engine: discretization, experience accumulation,
//! maximum-likelihood estimation, value iteration, and epsilon-greedy
//! action selection.

pub mod grid;
pub mod model;
pub mod policy;
pub mod serialization;
pub mod solver;

pub use grid::{DiscretizationGrid, FAIL_STATE, NO_OBSTACLE_STATE};
pub use model::MdpModel;
pub use policy::EpsilonGreedyPolicy;
pub use serialization::{SavedAgent, TrainingMetadata};
pub use solver::{SolveReport, SolverConfig, solve};
