//! Core simulation loop
//!
//! The engine owns the entire world state and the single random
//! stream, and advances it one day at a time. Every stream draw passes
//! through here in a fixed order, so a (seed, day) pair names exactly
//! one world.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::rng::RandomStream;
use crate::core::types::{Day, Domain};
use crate::core::{ChronicleError, Result};
use crate::sim::ages::{Age, AgeMachine};
use crate::sim::events::{self, Myth, MythLog, WorldEvent};
use crate::sim::gods::{BeliefField, God, GodSystem};
use crate::sim::population::Population;
use crate::storage::{SaveState, SCHEMA_VERSION};

/// Everything that happened during one day
#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub day: Day,
    pub age: Age,
    pub day_in_age: u32,
    pub event: Option<WorldEvent>,
    pub age_transition: Option<Age>,
    pub born_gods: Vec<God>,
    pub faded_gods: Vec<God>,
    pub new_myths: Vec<Myth>,
}

/// Read-only summary of the world for external observers
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub day: Day,
    pub age: Age,
    pub day_in_age: u32,
    pub living_citizens: usize,
    pub factions: usize,
    pub gods: Vec<God>,
    pub myth_count: usize,
    pub mean_belief: [f32; Domain::COUNT],
}

/// The world and its one source of randomness
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
    rng: RandomStream,
    day: Day,
    ages: AgeMachine,
    population: Population,
    gods: GodSystem,
    myths: MythLog,
    pending_disaster: bool,
}

impl SimulationEngine {
    /// Create a world from nothing
    ///
    /// Genesis draw order: age duration, then factions and citizens.
    pub fn genesis(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = RandomStream::new(seed);
        let ages = AgeMachine::genesis(&config, &mut rng);
        let population = Population::genesis(&config, &mut rng);

        info!(
            seed,
            citizens = population.citizens.len(),
            factions = population.factions.len(),
            "world created"
        );

        Ok(Self {
            config,
            rng,
            day: 0,
            ages,
            population,
            gods: GodSystem::new(),
            myths: MythLog::new(),
            pending_disaster: false,
        })
    }

    /// Advance the world by one day
    ///
    /// Fixed order: age tick, event roll (or pending disaster), event
    /// application, myth rolls, god processing.
    pub fn advance(&mut self) -> TickResult {
        self.day += 1;
        let age_transition = self.ages.tick(&self.config, &mut self.rng);
        if let Some(age) = age_transition {
            info!(day = self.day, age = age.name(), "a new age dawns");
        }
        let tone = *self.ages.traits(&self.config);

        let event = if self.pending_disaster {
            self.pending_disaster = false;
            Some(events::generate_disaster(&mut self.rng))
        } else {
            events::generate(&tone, &self.config, &mut self.rng)
        };

        let mut new_myths = Vec::new();
        if let Some(event) = &event {
            debug!(day = self.day, event = %event.name, magnitude = event.magnitude, "event struck");
            self.population.apply_event(event, &tone, &mut self.rng);
            new_myths = self.interpret_event(event);
        }

        let (born_gods, faded_gods) = self.gods.process(
            &self.population,
            self.day,
            &self.config.thresholds,
            &mut self.rng,
        );
        for god in &born_gods {
            info!(day = self.day, god = %god.name, domain = god.domain.as_str(), "a god is born");
        }
        for god in &faded_gods {
            info!(day = self.day, god = %god.name, domain = god.domain.as_str(), "a god fades");
        }

        TickResult {
            day: self.day,
            age: self.ages.current(),
            day_in_age: self.ages.day_in_age(),
            event,
            age_transition,
            born_gods,
            faded_gods,
            new_myths,
        }
    }

    /// Each faction may record the event as a myth, colored by its
    /// doctrine
    fn interpret_event(&mut self, event: &WorldEvent) -> Vec<Myth> {
        let mut recorded = Vec::new();
        for faction in &self.population.factions {
            if !self.rng.chance(self.config.myth_chance) {
                continue;
            }
            let text = format!("The {} witnessed {}", faction.name, event.description);
            let confidence = faction.bias(event.primary_domain);
            let myth = self.myths.record(
                text,
                faction.id,
                event.primary_domain,
                confidence,
                self.day,
            );
            recorded.push(myth.clone());
        }
        recorded
    }

    /// Advance several days, returning every tick
    pub fn run(&mut self, days: u64) -> Vec<TickResult> {
        (0..days).map(|_| self.advance()).collect()
    }

    /// Scripted perturbation: pin a domain's belief across the living
    /// population
    pub fn force_belief(&mut self, domain: Domain, value: f32) {
        self.population.set_belief_for_all(domain, value);
    }

    /// Queue a disaster; the next day's event roll is replaced by it
    pub fn schedule_disaster(&mut self) {
        self.pending_disaster = true;
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_age(&self) -> Age {
        self.ages.current()
    }

    pub fn age_state(&self) -> &AgeMachine {
        &self.ages
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn gods(&self) -> &GodSystem {
        &self.gods
    }

    pub fn myths(&self) -> &MythLog {
        &self.myths
    }

    pub fn belief_fields(&self) -> [BeliefField; Domain::COUNT] {
        GodSystem::aggregate(&self.population)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let fields = self.belief_fields();
        WorldSnapshot {
            day: self.day,
            age: self.ages.current(),
            day_in_age: self.ages.day_in_age(),
            living_citizens: self.population.living_count(),
            factions: self.population.factions.len(),
            gods: self.gods.roster().to_vec(),
            myth_count: self.myths.len(),
            mean_belief: fields.map(|f| f.mean),
        }
    }

    /// Capture the full world, including the exact stream position
    pub fn to_save_state(&self) -> SaveState {
        SaveState {
            schema_version: SCHEMA_VERSION,
            domains: Domain::ALL.iter().map(|d| d.as_str().to_string()).collect(),
            seed: self.rng.seed(),
            stream_position: self.rng.position(),
            day: self.day,
            ages: self.ages.clone(),
            population: self.population.clone(),
            gods: self.gods.clone(),
            myths: self.myths.clone(),
            pending_disaster: self.pending_disaster,
        }
    }

    /// Rebuild a world from a save, resuming the stream mid-flight
    ///
    /// A resumed world produces the same future as one that never
    /// stopped.
    pub fn resume(state: SaveState, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if state.schema_version != SCHEMA_VERSION {
            return Err(ChronicleError::SchemaMismatch {
                expected: SCHEMA_VERSION,
                found: state.schema_version,
            });
        }
        let expected: Vec<String> = Domain::ALL.iter().map(|d| d.as_str().to_string()).collect();
        if state.domains != expected {
            return Err(ChronicleError::DomainMismatch(format!(
                "save lists [{}]",
                state.domains.join(", ")
            )));
        }

        let rng = RandomStream::resume(state.seed, state.stream_position);
        info!(day = state.day, seed = state.seed, "world resumed");

        Ok(Self {
            config,
            rng,
            day: state.day,
            ages: state.ages,
            population: state.population,
            gods: state.gods,
            myths: state.myths,
            pending_disaster: state.pending_disaster,
        })
    }
}
