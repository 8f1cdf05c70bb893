//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation day counter (one tick = one day)
pub type Day = u64;

/// Unique identifier for citizens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitizenId(pub u32);

/// Unique identifier for factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

/// Unique identifier for gods
///
/// A re-emergent god in a domain that previously lost one gets a fresh
/// id: it is a new entity, not a resurrection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GodId(pub u32);

/// Unique identifier for myths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MythId(pub u32);

/// The six belief domains, fixed for the life of the world
///
/// Every belief vector, doctrine bias, and aggregation is keyed by this
/// enum. The discriminant doubles as the array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    River,
    Flame,
    Sky,
    War,
    Harvest,
    Memory,
}

impl Domain {
    pub const COUNT: usize = 6;

    pub const ALL: [Domain; Domain::COUNT] = [
        Domain::River,
        Domain::Flame,
        Domain::Sky,
        Domain::War,
        Domain::Harvest,
        Domain::Memory,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::River => "river",
            Domain::Flame => "flame",
            Domain::Sky => "sky",
            Domain::War => "war",
            Domain::Harvest => "harvest",
            Domain::Memory => "memory",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
