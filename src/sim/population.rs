//! Citizens, factions, and the belief they carry
//!
//! The population aggregate owns every citizen and faction. Beliefs and
//! emotions move only through event application (and scripted
//! perturbations); every value is clamped to [0, 1] on the way in.

use serde::{Deserialize, Serialize};

use crate::core::config::{AgeTraits, SimulationConfig};
use crate::core::rng::RandomStream;
use crate::core::types::{CitizenId, Domain, FactionId};
use crate::sim::events::WorldEvent;
use crate::sim::names;

/// Per-citizen belief strength in each domain, always within [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefVector {
    values: [f32; Domain::COUNT],
}

impl BeliefVector {
    pub fn get(&self, domain: Domain) -> f32 {
        self.values[domain.index()]
    }

    pub fn set(&mut self, domain: Domain, value: f32) {
        self.values[domain.index()] = value.clamp(0.0, 1.0);
    }

    /// Shift one domain by a delta, clamping the result
    pub fn nudge(&mut self, domain: Domain, delta: f32) {
        self.set(domain, self.get(domain) + delta);
    }
}

/// A citizen of the world
///
/// Dead citizens are kept for history but contribute nothing to
/// aggregate belief.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    pub name: String,
    pub faction: Option<FactionId>,
    pub beliefs: BeliefVector,
    pub fear: f32,
    pub gratitude: f32,
    pub alive: bool,
}

impl Citizen {
    fn generate(
        id: CitizenId,
        faction: Option<FactionId>,
        config: &SimulationConfig,
        rng: &mut RandomStream,
    ) -> Self {
        let name = names::citizen_name(rng);
        let mut beliefs = BeliefVector::default();
        for domain in Domain::ALL {
            beliefs.set(
                domain,
                rng.range_f32(config.initial_belief_min, config.initial_belief_max),
            );
        }
        let fear = rng.range_f32(config.initial_emotion_min, config.initial_emotion_max);
        let gratitude = rng.range_f32(config.initial_emotion_min, config.initial_emotion_max);
        Self {
            id,
            name,
            faction,
            beliefs,
            fear,
            gratitude,
            alive: true,
        }
    }

    pub fn update_emotion(&mut self, fear_delta: f32, gratitude_delta: f32) {
        self.fear = (self.fear + fear_delta).clamp(0.0, 1.0);
        self.gratitude = (self.gratitude + gratitude_delta).clamp(0.0, 1.0);
    }
}

/// A faction with a doctrinal bias over the domains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    /// Receptiveness weighting per domain; favored domains sit in
    /// 0.7..1.0, the rest in 0.1..0.4
    pub doctrine: [f32; Domain::COUNT],
}

impl Faction {
    fn generate(id: FactionId, rng: &mut RandomStream) -> Self {
        let name = names::faction_name(rng);

        let mut doctrine = [0.0; Domain::COUNT];
        for slot in doctrine.iter_mut() {
            *slot = rng.range_f32(0.1, 0.4);
        }

        // Favor one or two domains, chosen without replacement
        let favored_count = rng.range_u32(1, 2);
        let first = rng.range_u32(0, (Domain::COUNT - 1) as u32) as usize;
        doctrine[first] = rng.range_f32(0.7, 1.0);
        if favored_count == 2 {
            let offset = rng.range_u32(1, (Domain::COUNT - 1) as u32) as usize;
            let second = (first + offset) % Domain::COUNT;
            doctrine[second] = rng.range_f32(0.7, 1.0);
        }

        Self { id, name, doctrine }
    }

    pub fn bias(&self, domain: Domain) -> f32 {
        self.doctrine[domain.index()]
    }
}

/// The living (and dead) population of the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    pub citizens: Vec<Citizen>,
    pub factions: Vec<Faction>,
}

impl Population {
    /// Populate a fresh world: factions with their members, then the
    /// unaffiliated stragglers
    pub fn genesis(config: &SimulationConfig, rng: &mut RandomStream) -> Self {
        let mut citizens = Vec::new();
        let mut factions = Vec::new();
        let mut next_citizen = 0;

        for f in 0..config.initial_factions {
            let faction_id = FactionId(f);
            factions.push(Faction::generate(faction_id, rng));
            for _ in 0..config.citizens_per_faction {
                citizens.push(Citizen::generate(
                    CitizenId(next_citizen),
                    Some(faction_id),
                    config,
                    rng,
                ));
                next_citizen += 1;
            }
        }

        for _ in 0..config.unaffiliated_citizens {
            citizens.push(Citizen::generate(
                CitizenId(next_citizen),
                None,
                config,
                rng,
            ));
            next_citizen += 1;
        }

        Self { citizens, factions }
    }

    pub fn living(&self) -> impl Iterator<Item = &Citizen> {
        self.citizens.iter().filter(|c| c.alive)
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn members_of(&self, id: FactionId) -> impl Iterator<Item = &Citizen> {
        self.citizens
            .iter()
            .filter(move |c| c.faction == Some(id))
    }

    /// Doctrinal bias for a citizen's allegiance; unaffiliated citizens
    /// take events at face value
    pub fn faction_bias(&self, faction: Option<FactionId>, domain: Domain) -> f32 {
        faction
            .and_then(|id| self.faction(id))
            .map_or(1.0, |f| f.bias(domain))
    }

    /// Apply an event's belief and emotion deltas to every living
    /// citizen, scaled by age tone, faction bias, and per-citizen
    /// variance drawn from the stream
    pub fn apply_event(&mut self, event: &WorldEvent, tone: &AgeTraits, rng: &mut RandomStream) {
        let factions = &self.factions;
        for citizen in self.citizens.iter_mut().filter(|c| c.alive) {
            let bias = citizen
                .faction
                .and_then(|id| factions.iter().find(|f| f.id == id))
                .map_or(1.0, |f| f.bias(event.primary_domain));

            let belief_delta =
                event.belief_impact * tone.belief_growth * rng.range_f32(0.8, 1.2);
            citizen.beliefs.nudge(event.primary_domain, belief_delta * bias);

            if let Some(secondary) = event.secondary_domain {
                citizen.beliefs.nudge(secondary, belief_delta * 0.5 * bias);
            }

            let fear_delta = event.fear_impact * tone.fear_modifier * rng.range_f32(0.8, 1.2);
            let gratitude_delta =
                event.gratitude_impact * tone.gratitude_modifier * rng.range_f32(0.8, 1.2);
            citizen.update_emotion(fear_delta, gratitude_delta);
        }
    }

    /// Scripted perturbation: pin every living citizen's belief in one
    /// domain to a value
    pub fn set_belief_for_all(&mut self, domain: Domain, value: f32) {
        for citizen in self.citizens.iter_mut().filter(|c| c.alive) {
            citizen.beliefs.set(domain, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::WorldEvent;

    fn test_event(primary: Domain, belief_impact: f32) -> WorldEvent {
        WorldEvent {
            name: "The Test Omen".to_string(),
            description: "Something stirs".to_string(),
            primary_domain: primary,
            secondary_domain: None,
            fear_impact: 0.2,
            gratitude_impact: 0.1,
            belief_impact,
            magnitude: 0.5,
        }
    }

    #[test]
    fn test_belief_vector_clamps() {
        let mut beliefs = BeliefVector::default();
        beliefs.set(Domain::War, 1.7);
        assert_eq!(beliefs.get(Domain::War), 1.0);
        beliefs.nudge(Domain::War, -3.0);
        assert_eq!(beliefs.get(Domain::War), 0.0);
    }

    #[test]
    fn test_genesis_counts() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let population = Population::genesis(&config, &mut rng);

        assert_eq!(population.factions.len(), 3);
        assert_eq!(population.citizens.len(), 3 * 8 + 5);
        assert_eq!(population.living_count(), 29);

        let unaffiliated = population
            .citizens
            .iter()
            .filter(|c| c.faction.is_none())
            .count();
        assert_eq!(unaffiliated, 5);

        for faction in &population.factions {
            assert_eq!(population.members_of(faction.id).count(), 8);
        }
    }

    #[test]
    fn test_genesis_beliefs_within_initial_range() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(9);
        let population = Population::genesis(&config, &mut rng);

        for citizen in &population.citizens {
            for domain in Domain::ALL {
                let b = citizen.beliefs.get(domain);
                assert!(b >= config.initial_belief_min && b <= config.initial_belief_max);
            }
        }
    }

    #[test]
    fn test_doctrine_has_favored_domain() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(5);
        let population = Population::genesis(&config, &mut rng);

        for faction in &population.factions {
            let favored = faction.doctrine.iter().filter(|&&w| w >= 0.7).count();
            assert!((1..=2).contains(&favored));
        }
    }

    #[test]
    fn test_unaffiliated_bias_is_neutral() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(5);
        let population = Population::genesis(&config, &mut rng);
        assert_eq!(population.faction_bias(None, Domain::Sky), 1.0);
    }

    #[test]
    fn test_apply_event_moves_primary_belief() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng);
        population.set_belief_for_all(Domain::Harvest, 0.2);

        let tone = config.ages[0];
        population.apply_event(&test_event(Domain::Harvest, 0.4), &tone, &mut rng);

        for citizen in population.living() {
            assert!(citizen.beliefs.get(Domain::Harvest) > 0.2);
        }
    }

    #[test]
    fn test_dead_citizens_untouched_by_events() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng);
        population.citizens[0].alive = false;
        let before = population.citizens[0].beliefs;

        let tone = config.ages[0];
        population.apply_event(&test_event(Domain::River, 0.5), &tone, &mut rng);

        assert_eq!(population.citizens[0].beliefs, before);
    }

    #[test]
    fn test_beliefs_bounded_after_many_events() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(8);
        let mut population = Population::genesis(&config, &mut rng);
        let tone = config.ages[0];

        for _ in 0..200 {
            population.apply_event(&test_event(Domain::Flame, 0.6), &tone, &mut rng);
        }

        for citizen in &population.citizens {
            for domain in Domain::ALL {
                let b = citizen.beliefs.get(domain);
                assert!((0.0..=1.0).contains(&b));
            }
            assert!((0.0..=1.0).contains(&citizen.fear));
            assert!((0.0..=1.0).contains(&citizen.gratitude));
        }
    }
}
