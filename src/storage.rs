//! World persistence
//!
//! A save is the complete world plus the exact random stream position,
//! so a resumed run continues the same timeline bit for bit. The
//! schema version and domain registry are checked on load before the
//! world is rebuilt.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::Day;
use crate::core::Result;
use crate::sim::ages::AgeMachine;
use crate::sim::events::MythLog;
use crate::sim::gods::GodSystem;
use crate::sim::population::Population;

/// Bumped whenever the save layout changes incompatibly
pub const SCHEMA_VERSION: u32 = 1;

/// A complete serialized world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub schema_version: u32,
    /// Domain names in registry order, checked on resume
    pub domains: Vec<String>,
    pub seed: u64,
    pub stream_position: u128,
    pub day: Day,
    pub ages: AgeMachine,
    pub population: Population,
    pub gods: GodSystem,
    pub myths: MythLog,
    #[serde(default)]
    pub pending_disaster: bool,
}

/// Where saves live
pub trait Storage {
    fn save(&self, state: &SaveState) -> Result<()>;
    /// `None` means no save exists yet, which is not an error
    fn load(&self) -> Result<Option<SaveState>>;
}

/// Pretty-printed JSON in a single file
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn save(&self, state: &SaveState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), day = state.day, "world saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        debug!(path = %self.path.display(), day = state.day, "world loaded");
        Ok(Some(state))
    }
}
