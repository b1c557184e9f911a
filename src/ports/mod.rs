//! Ports: trait boundaries between the learning core and its collaborators.
//!
//! The game itself, training observation, and persistent storage are all
//! external concerns; the core talks to them only through the traits defined
//! here, and adapters supply concrete implementations.

pub mod environment;
pub mod observer;
pub mod repository;

pub use environment::Environment;
pub use observer::EpisodeObserver;
pub use repository::AgentRepository;
