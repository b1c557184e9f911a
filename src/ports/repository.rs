//! Repository port for agent persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage layer for saved agents.

use std::path::Path;

use crate::{Result, mdp::SavedAgent};

/// Port for persisting and loading agent snapshots.
///
/// Abstracts the storage format so callers can pick MessagePack, JSON, or
/// anything else without coupling the core to a serializer. Loading a
/// missing or corrupt file surfaces an error; the caller decides whether to
/// fall back to a fresh agent.
pub trait AgentRepository {
    /// Save a snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization
    /// fails.
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()>;

    /// Load a snapshot from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not deserialize into a valid snapshot.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
