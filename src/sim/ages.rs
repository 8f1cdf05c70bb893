//! Age cycle management
//!
//! The world moves through six ages in a fixed, perpetual cycle. Each
//! age carries a tone (event rate, emotional bias, belief growth) that
//! modulates every other system, and a duration drawn from the random
//! stream when the age begins.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::{AgeTraits, SimulationConfig};
use crate::core::rng::RandomStream;

/// The six ages of the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Age {
    Emergence,
    Order,
    Strain,
    Collapse,
    Silence,
    Rebirth,
}

impl Age {
    pub const ALL: [Age; 6] = [
        Age::Emergence,
        Age::Order,
        Age::Strain,
        Age::Collapse,
        Age::Silence,
        Age::Rebirth,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The next age in cycle order, wrapping after Rebirth
    pub fn next(self) -> Age {
        Age::ALL[(self.index() + 1) % Age::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Age::Emergence => "Emergence",
            Age::Order => "Order",
            Age::Strain => "Strain",
            Age::Collapse => "Collapse",
            Age::Silence => "Silence",
            Age::Rebirth => "Rebirth",
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State machine driving the age cycle
///
/// Strictly cyclical and perpetual: it cannot halt and has no error
/// conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeMachine {
    current: Age,
    /// Days spent in the current age
    day_in_age: u32,
    /// Drawn duration of the current age
    duration: u32,
}

impl AgeMachine {
    /// Start a new cycle at Emergence, drawing its duration
    pub fn genesis(config: &SimulationConfig, rng: &mut RandomStream) -> Self {
        let current = Age::Emergence;
        let duration = draw_duration(current, config, rng);
        Self {
            current,
            day_in_age: 0,
            duration,
        }
    }

    pub fn current(&self) -> Age {
        self.current
    }

    pub fn day_in_age(&self) -> u32 {
        self.day_in_age
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn traits<'a>(&self, config: &'a SimulationConfig) -> &'a AgeTraits {
        &config.ages[self.current.index()]
    }

    /// Advance one day; returns the new age if the cycle turned over
    pub fn tick(&mut self, config: &SimulationConfig, rng: &mut RandomStream) -> Option<Age> {
        self.day_in_age += 1;
        if self.day_in_age >= self.duration {
            self.current = self.current.next();
            self.day_in_age = 0;
            self.duration = draw_duration(self.current, config, rng);
            Some(self.current)
        } else {
            None
        }
    }
}

fn draw_duration(age: Age, config: &SimulationConfig, rng: &mut RandomStream) -> u32 {
    let traits = &config.ages[age.index()];
    rng.range_u32(traits.min_days, traits.max_days)
}
