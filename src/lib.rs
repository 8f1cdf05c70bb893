//! Chronicle - Emergent Mythology Simulator

pub mod control;
pub mod core;
pub mod sim;
pub mod storage;

pub use crate::core::{ChronicleError, Result};
