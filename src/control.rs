//! Shared handle for driving a simulation
//!
//! Wraps the engine in `Arc<RwLock>` so an interactive front end and a
//! background stepper can observe and steer the same world. All
//! stepping goes through the write lock, so ticks stay serialized and
//! deterministic.

use std::sync::{Arc, RwLock};

use crate::core::types::{Day, Domain};
use crate::core::Result;
use crate::sim::engine::{SimulationEngine, TickResult, WorldSnapshot};
use crate::storage::Storage;

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<SimulationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    // A poisoned lock only means another thread panicked mid-tick;
    // the world data itself is still consistent, so recover it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, SimulationEngine> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SimulationEngine> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn step(&self) -> TickResult {
        self.write().advance()
    }

    pub fn step_n(&self, days: u64) -> Vec<TickResult> {
        self.write().run(days)
    }

    pub fn schedule_disaster(&self) {
        self.write().schedule_disaster();
    }

    pub fn force_belief(&self, domain: Domain, value: f32) {
        self.write().force_belief(domain, value);
    }

    pub fn day(&self) -> Day {
        self.read().day()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.read().snapshot()
    }

    pub fn save_to(&self, storage: &dyn Storage) -> Result<()> {
        let state = self.read().to_save_state();
        storage.save(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    fn shared() -> SharedEngine {
        let engine = SimulationEngine::genesis(SimulationConfig::default(), 42).unwrap();
        SharedEngine::new(engine)
    }

    #[test]
    fn test_clones_observe_the_same_world() {
        let handle = shared();
        let observer = handle.clone();

        handle.step_n(5);
        assert_eq!(observer.day(), 5);
        assert_eq!(observer.snapshot().day, 5);
    }

    #[test]
    fn test_steering_through_the_handle() {
        let handle = shared();
        handle.force_belief(Domain::Flame, 0.8);
        let snapshot = handle.snapshot();
        assert!((snapshot.mean_belief[Domain::Flame.index()] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_steps_from_two_threads_stay_serialized() {
        let handle = shared();
        let other = handle.clone();

        let worker = std::thread::spawn(move || {
            other.step_n(10);
        });
        handle.step_n(10);
        worker.join().unwrap();

        assert_eq!(handle.day(), 20);
    }
}
