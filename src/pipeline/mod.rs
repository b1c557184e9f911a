//! Training pipeline: the episode loop that drives an agent against an
//! environment.

pub mod training;

pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};
