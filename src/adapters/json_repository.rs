//! JSON implementation of the agent repository.
//!
//! Human-readable storage via serde_json. Floats are printed with full
//! round-trip precision, so numeric arrays survive a save/load cycle with
//! their exact values.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, mdp::SavedAgent, ports::AgentRepository};

/// JSON-based agent repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for JsonRepository {
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, saved)?;

        log::info!("saved agent snapshot to {}", path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let reader = BufReader::new(file);

        let saved: SavedAgent = serde_json::from_reader(reader)?;
        saved.validate()?;

        log::info!("loaded agent snapshot from {}", path.display());
        Ok(saved)
    }
}
