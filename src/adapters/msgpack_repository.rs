//! MessagePack implementation of the agent repository.
//!
//! Compact binary storage via rmp_serde. Integer counts round-trip
//! bit-for-bit and floats are stored in their native binary representation,
//! so a load reproduces every array of the saved model exactly.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, mdp::SavedAgent, ports::AgentRepository};

/// MessagePack-based agent repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, saved).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        log::info!("saved agent snapshot to {}", path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedAgent =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        saved.validate()?;

        log::info!("loaded agent snapshot from {}", path.display());
        Ok(saved)
    }
}
