//! Versioned save envelope for the full MDP parameter set.
//!
//! Everything the agent learns round-trips through [`SavedAgent`]: the
//! discretization grid, transition counts and probabilities, reward
//! statistics, the value vector, and the current greed coefficient. Actual
//! storage goes through the [`crate::ports::AgentRepository`] port and its
//! adapters.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    mdp::{grid::DiscretizationGrid, model::MdpModel},
};

/// Context recorded alongside a saved agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of episodes the agent has trained for
    pub episodes_trained: Option<usize>,
    /// Best score reached during training
    pub best_score: Option<u64>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Timestamp when saved
    pub saved_at: Option<String>,
}

/// A complete, self-describing agent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub grid: DiscretizationGrid,
    pub model: MdpModel,
    /// Greed coefficient at save time, so a restored agent resumes its
    /// annealing schedule instead of restarting it.
    pub greed: f64,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(
        grid: DiscretizationGrid,
        model: MdpModel,
        greed: f64,
        metadata: TrainingMetadata,
    ) -> Self {
        Self {
            version: Self::VERSION,
            grid,
            model,
            greed,
            metadata,
        }
    }

    /// Validate the snapshot's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSaveVersion`] for a version this build
    /// does not understand, and [`Error::ModelShapeMismatch`] if the model's
    /// state count disagrees with the grid that defines it.
    pub fn validate(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSaveVersion {
                version: self.version,
                expected: Self::VERSION,
            });
        }
        if self.grid.num_states() != self.model.num_states() {
            return Err(Error::ModelShapeMismatch {
                expected: self.grid.num_states(),
                got: self.model.num_states(),
            });
        }
        Ok(())
    }
}
