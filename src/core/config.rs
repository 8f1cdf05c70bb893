//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their
//! purpose. Malformed values are rejected at genesis, never discovered
//! mid-run.

use serde::{Deserialize, Serialize};

use crate::core::error::{ChronicleError, Result};

/// Tonal parameters for one age of the cycle
///
/// Indexed by `Age::index()`; the table order matches the cycle order
/// Emergence, Order, Strain, Collapse, Silence, Rebirth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgeTraits {
    /// Minimum days the age lasts
    pub min_days: u32,
    /// Maximum days the age lasts; the actual duration is drawn
    /// uniformly in [min_days, max_days] when the age begins
    pub max_days: u32,
    /// Probability that any given day produces an event
    pub event_rate: f32,
    /// Multiplier on belief deltas from events
    pub belief_growth: f32,
    /// Weighting on fear deltas from events
    pub fear_modifier: f32,
    /// Weighting on gratitude deltas from events
    pub gratitude_modifier: f32,
    /// Additive shift to event magnitude
    pub magnitude_boost: f32,
    /// Shifts events toward gratitude (positive) or fear (negative)
    pub positive_bias: f32,
}

/// Thresholds governing god emergence and fading
///
/// The defaults are the canonical constants; tests pin exactness
/// against them (4 qualifying days never births, 5 always does).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GodThresholds {
    /// Minimum mean belief across living citizens to qualify a day
    pub belief: f32,
    /// Minimum coherence (agreement among believers) to qualify a day
    pub coherence: f32,
    /// Consecutive qualifying days before a god is born
    pub birth_days: u32,
    /// Mean belief below this advances the fade counter
    pub fade_belief: f32,
    /// Consecutive weak days before a living god fades
    pub fade_days: u32,
}

impl Default for GodThresholds {
    fn default() -> Self {
        Self {
            belief: 0.6,
            coherence: 0.5,
            birth_days: 5,
            fade_belief: 0.3,
            fade_days: 7,
        }
    }
}

/// Configuration for a full simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD GENESIS ===
    /// Number of factions created at genesis
    pub initial_factions: u32,
    /// Citizens generated per faction at genesis
    pub citizens_per_faction: u32,
    /// Citizens with no faction allegiance at genesis
    pub unaffiliated_citizens: u32,
    /// Lower bound of each starting per-domain belief
    pub initial_belief_min: f32,
    /// Upper bound of each starting per-domain belief
    ///
    /// Kept well below the emergence threshold (0.6) so gods never
    /// appear before any history has happened.
    pub initial_belief_max: f32,
    /// Lower bound of starting fear and gratitude
    pub initial_emotion_min: f32,
    /// Upper bound of starting fear and gratitude
    pub initial_emotion_max: f32,

    // === EVENTS AND MYTHS ===
    /// Chance that a generated event carries a secondary domain
    pub secondary_domain_chance: f32,
    /// Chance per faction per event to record the event as a myth
    pub myth_chance: f32,

    // === GODS ===
    pub thresholds: GodThresholds,

    // === AGES ===
    /// Per-age tone table, in cycle order
    pub ages: [AgeTraits; 6],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_factions: 3,
            citizens_per_faction: 8,
            unaffiliated_citizens: 5,
            initial_belief_min: 0.0,
            initial_belief_max: 0.3,
            initial_emotion_min: 0.1,
            initial_emotion_max: 0.4,
            secondary_domain_chance: 0.3,
            myth_chance: 0.3,
            thresholds: GodThresholds::default(),
            ages: [
                // Emergence: frequent formative events, belief takes root
                AgeTraits {
                    min_days: 20,
                    max_days: 40,
                    event_rate: 0.6,
                    belief_growth: 1.2,
                    fear_modifier: 0.3,
                    gratitude_modifier: 0.7,
                    magnitude_boost: 0.1,
                    positive_bias: 0.1,
                },
                // Order: calm, grateful, steady
                AgeTraits {
                    min_days: 30,
                    max_days: 60,
                    event_rate: 0.4,
                    belief_growth: 1.0,
                    fear_modifier: 0.2,
                    gratitude_modifier: 0.8,
                    magnitude_boost: -0.1,
                    positive_bias: 0.2,
                },
                // Strain: cracks appear, fear creeps in
                AgeTraits {
                    min_days: 25,
                    max_days: 45,
                    event_rate: 0.7,
                    belief_growth: 1.1,
                    fear_modifier: 0.6,
                    gratitude_modifier: 0.4,
                    magnitude_boost: 0.1,
                    positive_bias: -0.1,
                },
                // Collapse: violent, terrifying, faith erodes
                AgeTraits {
                    min_days: 15,
                    max_days: 30,
                    event_rate: 0.9,
                    belief_growth: 0.8,
                    fear_modifier: 0.9,
                    gratitude_modifier: 0.1,
                    magnitude_boost: 0.3,
                    positive_bias: -0.3,
                },
                // Silence: little happens, belief withers
                AgeTraits {
                    min_days: 10,
                    max_days: 25,
                    event_rate: 0.2,
                    belief_growth: 0.5,
                    fear_modifier: 0.5,
                    gratitude_modifier: 0.3,
                    magnitude_boost: -0.2,
                    positive_bias: 0.0,
                },
                // Rebirth: hope returns, belief grows fastest
                AgeTraits {
                    min_days: 15,
                    max_days: 35,
                    event_rate: 0.5,
                    belief_growth: 1.3,
                    fear_modifier: 0.4,
                    gratitude_modifier: 0.6,
                    magnitude_boost: 0.0,
                    positive_bias: 0.2,
                },
            ],
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    ///
    /// Missing keys fall back to defaults; the result is validated.
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ChronicleError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed configuration before the world exists
    pub fn validate(&self) -> Result<()> {
        let total_citizens =
            self.initial_factions * self.citizens_per_faction + self.unaffiliated_citizens;
        if total_citizens == 0 {
            return Err(invalid("world must start with at least one citizen"));
        }

        check_unit("secondary_domain_chance", self.secondary_domain_chance)?;
        check_unit("myth_chance", self.myth_chance)?;
        check_unit("initial_belief_min", self.initial_belief_min)?;
        check_unit("initial_belief_max", self.initial_belief_max)?;
        check_unit("initial_emotion_min", self.initial_emotion_min)?;
        check_unit("initial_emotion_max", self.initial_emotion_max)?;
        if self.initial_belief_min > self.initial_belief_max {
            return Err(invalid("initial belief range is inverted"));
        }
        if self.initial_emotion_min > self.initial_emotion_max {
            return Err(invalid("initial emotion range is inverted"));
        }

        let t = &self.thresholds;
        check_unit("thresholds.belief", t.belief)?;
        check_unit("thresholds.coherence", t.coherence)?;
        check_unit("thresholds.fade_belief", t.fade_belief)?;
        if t.birth_days == 0 {
            return Err(invalid("thresholds.birth_days must be at least 1"));
        }
        if t.fade_days == 0 {
            return Err(invalid("thresholds.fade_days must be at least 1"));
        }

        for (i, age) in self.ages.iter().enumerate() {
            if age.min_days == 0 {
                return Err(invalid(&format!("age {} has zero duration", i)));
            }
            if age.min_days > age.max_days {
                return Err(invalid(&format!("age {} duration range is inverted", i)));
            }
            check_unit("event_rate", age.event_rate)?;
            if age.belief_growth <= 0.0 {
                return Err(invalid(&format!("age {} belief_growth must be positive", i)));
            }
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> ChronicleError {
    ChronicleError::InvalidConfig(msg.to_string())
}

fn check_unit(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(&format!("{} must be within [0, 1], got {}", name, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_duration_age_rejected() {
        let mut config = SimulationConfig::default();
        config.ages[2].min_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let mut config = SimulationConfig::default();
        config.ages[0].min_days = 50;
        config.ages[0].max_days = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut config = SimulationConfig::default();
        config.thresholds.belief = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.thresholds.coherence = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_counter_days_rejected() {
        let mut config = SimulationConfig::default();
        config.thresholds.birth_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_world_rejected() {
        let mut config = SimulationConfig::default();
        config.initial_factions = 0;
        config.unaffiliated_citizens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_overrides_merge_with_defaults() {
        let toml_str = r#"
            initial_factions = 5
            myth_chance = 0.5
        "#;
        let config: SimulationConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.initial_factions, 5);
        assert_eq!(config.myth_chance, 0.5);
        // Untouched keys keep their defaults
        assert_eq!(config.citizens_per_faction, 8);
        assert_eq!(config.thresholds.birth_days, 5);
    }
}
