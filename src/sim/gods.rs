//! Emergent god system
//!
//! Every domain runs its own small state machine over the day's
//! aggregate belief. Sustained, coherent faith raises a god; sustained
//! neglect fades one. Domains never interact: several gods can be born
//! on the same day, and a faded domain starts over from nothing.

use serde::{Deserialize, Serialize};

use crate::core::config::GodThresholds;
use crate::core::rng::RandomStream;
use crate::core::types::{Day, Domain, GodId};
use crate::sim::names;
use crate::sim::population::Population;

/// Citizens believing above this count as believers in the field
const BELIEVER_THRESHOLD: f32 = 0.3;

/// An emergent deity
///
/// Faded gods stay in the roster as history; a later god of the same
/// domain is a distinct entity with its own id and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct God {
    pub id: GodId,
    pub name: String,
    pub domain: Domain,
    pub birth_day: Day,
    /// Mean belief across living citizens, refreshed every tick
    pub belief_strength: f32,
    /// Agreement among believers, refreshed every tick
    pub coherence: f32,
    pub alive: bool,
    pub faded_day: Option<Day>,
}

/// One day's aggregated belief for a domain
#[derive(Debug, Clone, Copy)]
pub struct BeliefField {
    pub domain: Domain,
    /// Mean belief over living citizens; 0 when nobody lives
    pub mean: f32,
    /// 1 − variance × 4, clamped to [0, 1]
    pub coherence: f32,
    pub believers: usize,
}

/// Per-domain progress toward or away from godhood
///
/// Birth and fade counters are mutually exclusive by construction: a
/// domain is either counting qualifying days (Dormant/Ascending) or
/// counting weak days (Living/Fading), never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CultState {
    Dormant,
    Ascending { qualifying_days: u32 },
    Living { god: GodId },
    Fading { god: GodId, weak_days: u32 },
}

/// Tracks every domain's cult state and the full god roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodSystem {
    cults: [CultState; Domain::COUNT],
    roster: Vec<God>,
    next_id: u32,
}

impl Default for GodSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GodSystem {
    pub fn new() -> Self {
        Self {
            cults: [
                CultState::Dormant,
                CultState::Dormant,
                CultState::Dormant,
                CultState::Dormant,
                CultState::Dormant,
                CultState::Dormant,
            ],
            roster: Vec::new(),
            next_id: 0,
        }
    }

    pub fn cult(&self, domain: Domain) -> &CultState {
        &self.cults[domain.index()]
    }

    pub fn roster(&self) -> &[God] {
        &self.roster
    }

    pub fn living(&self) -> impl Iterator<Item = &God> {
        self.roster.iter().filter(|g| g.alive)
    }

    pub fn living_god_of(&self, domain: Domain) -> Option<&God> {
        self.living().find(|g| g.domain == domain)
    }

    pub fn god(&self, id: GodId) -> Option<&God> {
        self.roster.iter().find(|g| g.id == id)
    }

    /// Compute the day's belief field for every domain
    pub fn aggregate(population: &Population) -> [BeliefField; Domain::COUNT] {
        Domain::ALL.map(|domain| {
            let beliefs: Vec<f32> = population
                .living()
                .map(|c| c.beliefs.get(domain))
                .collect();
            if beliefs.is_empty() {
                return BeliefField {
                    domain,
                    mean: 0.0,
                    coherence: 0.0,
                    believers: 0,
                };
            }

            let n = beliefs.len() as f32;
            let mean = beliefs.iter().sum::<f32>() / n;
            let variance = beliefs.iter().map(|b| (b - mean) * (b - mean)).sum::<f32>() / n;
            // Scale variance so a full 0/1 split (variance 0.25) means
            // zero coherence
            let coherence = (1.0 - variance * 4.0).clamp(0.0, 1.0);
            let believers = beliefs.iter().filter(|&&b| b > BELIEVER_THRESHOLD).count();

            BeliefField {
                domain,
                mean,
                coherence,
                believers,
            }
        })
    }

    /// Advance every domain's state machine one day
    ///
    /// Returns the gods born and faded today, in domain order. God
    /// naming is the only stream consumer here, so days without births
    /// leave the stream untouched.
    pub fn process(
        &mut self,
        population: &Population,
        day: Day,
        thresholds: &GodThresholds,
        rng: &mut RandomStream,
    ) -> (Vec<God>, Vec<God>) {
        let fields = Self::aggregate(population);
        let mut born = Vec::new();
        let mut faded = Vec::new();

        for domain in Domain::ALL {
            let field = fields[domain.index()];
            let qualifies =
                field.mean >= thresholds.belief && field.coherence >= thresholds.coherence;

            let next = match self.cults[domain.index()].clone() {
                CultState::Dormant => {
                    if qualifies {
                        self.ascend(domain, 1, field, day, thresholds, rng, &mut born)
                    } else {
                        CultState::Dormant
                    }
                }
                CultState::Ascending { qualifying_days } => {
                    if qualifies {
                        self.ascend(
                            domain,
                            qualifying_days + 1,
                            field,
                            day,
                            thresholds,
                            rng,
                            &mut born,
                        )
                    } else {
                        // Any failing day resets the climb entirely
                        CultState::Dormant
                    }
                }
                CultState::Living { god } => {
                    self.refresh(god, field);
                    if field.mean < thresholds.fade_belief {
                        self.weaken(god, 1, day, thresholds, &mut faded)
                    } else {
                        CultState::Living { god }
                    }
                }
                CultState::Fading { god, weak_days } => {
                    self.refresh(god, field);
                    if field.mean < thresholds.fade_belief {
                        self.weaken(god, weak_days + 1, day, thresholds, &mut faded)
                    } else {
                        // Faith recovered; the fade counter resets
                        CultState::Living { god }
                    }
                }
            };

            self.cults[domain.index()] = next;
        }

        (born, faded)
    }

    /// One more qualifying day; births a god when the counter reaches
    /// the threshold
    #[allow(clippy::too_many_arguments)]
    fn ascend(
        &mut self,
        domain: Domain,
        qualifying_days: u32,
        field: BeliefField,
        day: Day,
        thresholds: &GodThresholds,
        rng: &mut RandomStream,
        born: &mut Vec<God>,
    ) -> CultState {
        if qualifying_days < thresholds.birth_days {
            return CultState::Ascending { qualifying_days };
        }

        let id = GodId(self.next_id);
        self.next_id += 1;
        let god = God {
            id,
            name: names::god_name(domain, rng),
            domain,
            birth_day: day,
            belief_strength: field.mean,
            coherence: field.coherence,
            alive: true,
            faded_day: None,
        };
        born.push(god.clone());
        self.roster.push(god);
        CultState::Living { god: id }
    }

    /// One more weak day; fades the god when the counter reaches the
    /// threshold
    fn weaken(
        &mut self,
        god: GodId,
        weak_days: u32,
        day: Day,
        thresholds: &GodThresholds,
        faded: &mut Vec<God>,
    ) -> CultState {
        if weak_days < thresholds.fade_days {
            return CultState::Fading { god, weak_days };
        }

        if let Some(entry) = self.roster.iter_mut().find(|g| g.id == god) {
            entry.alive = false;
            entry.faded_day = Some(day);
            faded.push(entry.clone());
        }
        CultState::Dormant
    }

    fn refresh(&mut self, god: GodId, field: BeliefField) {
        if let Some(entry) = self.roster.iter_mut().find(|g| g.id == god) {
            entry.belief_strength = field.mean;
            entry.coherence = field.coherence;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    fn forced_population(domain: Domain, level: f32) -> Population {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng);
        population.set_belief_for_all(domain, level);
        population
    }

    #[test]
    fn test_coherence_is_one_for_uniform_beliefs() {
        let population = forced_population(Domain::River, 0.7);
        let fields = GodSystem::aggregate(&population);
        let field = fields[Domain::River.index()];
        assert!((field.mean - 0.7).abs() < 1e-6);
        assert!((field.coherence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_coherence_is_zero_for_full_split() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng);
        // Even 0/1 split has variance 0.25, scaled to zero coherence
        let n = population.citizens.len();
        for (i, citizen) in population.citizens.iter_mut().enumerate() {
            let value = if i < n / 2 { 0.0 } else { 1.0 };
            citizen.beliefs.set(Domain::War, value);
        }
        // Need an exact half split for variance to hit 0.25
        if n % 2 == 1 {
            population.citizens[0].alive = false;
        }

        let fields = GodSystem::aggregate(&population);
        let field = fields[Domain::War.index()];
        assert!(field.coherence < 0.01);
    }

    #[test]
    fn test_empty_population_yields_zero_field() {
        let config = SimulationConfig::default();
        let mut rng = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng);
        for citizen in population.citizens.iter_mut() {
            citizen.alive = false;
        }

        let fields = GodSystem::aggregate(&population);
        for field in &fields {
            assert_eq!(field.mean, 0.0);
            assert_eq!(field.coherence, 0.0);
            assert_eq!(field.believers, 0);
        }
    }

    #[test]
    fn test_birth_on_exactly_fifth_qualifying_day() {
        let thresholds = GodThresholds::default();
        let population = forced_population(Domain::Flame, 0.7);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        for day in 1..=4 {
            let (born, _) = system.process(&population, day, &thresholds, &mut rng);
            assert!(born.is_empty(), "no god before day 5");
        }
        let (born, _) = system.process(&population, 5, &thresholds, &mut rng);
        assert_eq!(born.len(), 1);
        assert_eq!(born[0].domain, Domain::Flame);
        assert_eq!(born[0].birth_day, 5);
        assert!(matches!(system.cult(Domain::Flame), CultState::Living { .. }));
    }

    #[test]
    fn test_failing_day_resets_birth_counter() {
        let thresholds = GodThresholds::default();
        let mut population = forced_population(Domain::Sky, 0.7);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        for day in 1..=4 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        // Day 5 fails; the streak dies with it
        population.set_belief_for_all(Domain::Sky, 0.1);
        let (born, _) = system.process(&population, 5, &thresholds, &mut rng);
        assert!(born.is_empty());
        assert_eq!(*system.cult(Domain::Sky), CultState::Dormant);

        // Four more qualifying days still are not enough
        population.set_belief_for_all(Domain::Sky, 0.7);
        for day in 6..=9 {
            let (born, _) = system.process(&population, day, &thresholds, &mut rng);
            assert!(born.is_empty());
        }
        let (born, _) = system.process(&population, 10, &thresholds, &mut rng);
        assert_eq!(born.len(), 1);
    }

    #[test]
    fn test_fade_on_exactly_seventh_weak_day() {
        let thresholds = GodThresholds::default();
        let mut population = forced_population(Domain::Memory, 0.7);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        for day in 1..=5 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        assert!(system.living_god_of(Domain::Memory).is_some());

        population.set_belief_for_all(Domain::Memory, 0.0);
        for day in 6..=11 {
            let (_, faded) = system.process(&population, day, &thresholds, &mut rng);
            assert!(faded.is_empty(), "no fade before the seventh weak day");
        }
        let (_, faded) = system.process(&population, 12, &thresholds, &mut rng);
        assert_eq!(faded.len(), 1);
        assert_eq!(faded[0].faded_day, Some(12));
        assert_eq!(*system.cult(Domain::Memory), CultState::Dormant);
    }

    #[test]
    fn test_recovery_resets_fade_counter() {
        let thresholds = GodThresholds::default();
        let mut population = forced_population(Domain::Harvest, 0.7);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        for day in 1..=5 {
            system.process(&population, day, &thresholds, &mut rng);
        }

        // Six weak days, then recovery, then six more weak days: the
        // god survives both stretches
        population.set_belief_for_all(Domain::Harvest, 0.0);
        for day in 6..=11 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        population.set_belief_for_all(Domain::Harvest, 0.5);
        system.process(&population, 12, &thresholds, &mut rng);
        assert!(matches!(
            system.cult(Domain::Harvest),
            CultState::Living { .. }
        ));

        population.set_belief_for_all(Domain::Harvest, 0.0);
        for day in 13..=18 {
            let (_, faded) = system.process(&population, day, &thresholds, &mut rng);
            assert!(faded.is_empty());
        }
    }

    #[test]
    fn test_no_second_god_while_one_lives() {
        let thresholds = GodThresholds::default();
        let population = forced_population(Domain::River, 0.9);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        let mut total_born = 0;
        for day in 1..=30 {
            let (born, _) = system.process(&population, day, &thresholds, &mut rng);
            total_born += born.len();
        }
        assert_eq!(total_born, 1);
        assert_eq!(system.living().count(), 1);
    }

    #[test]
    fn test_reemergence_is_a_new_identity() {
        let thresholds = GodThresholds::default();
        let mut population = forced_population(Domain::War, 0.8);
        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);

        for day in 1..=5 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        let first = system.living_god_of(Domain::War).unwrap().id;

        population.set_belief_for_all(Domain::War, 0.0);
        for day in 6..=12 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        assert!(system.living_god_of(Domain::War).is_none());

        population.set_belief_for_all(Domain::War, 0.8);
        for day in 13..=17 {
            system.process(&population, day, &thresholds, &mut rng);
        }
        let second = system.living_god_of(Domain::War).unwrap().id;

        assert_ne!(first, second);
        assert_eq!(system.roster().len(), 2);
    }

    #[test]
    fn test_simultaneous_births_across_domains() {
        let thresholds = GodThresholds::default();
        let config = SimulationConfig::default();
        let mut rng_pop = RandomStream::new(42);
        let mut population = Population::genesis(&config, &mut rng_pop);
        population.set_belief_for_all(Domain::River, 0.8);
        population.set_belief_for_all(Domain::Flame, 0.8);

        let mut system = GodSystem::new();
        let mut rng = RandomStream::new(1);
        let mut born_total = Vec::new();
        for day in 1..=5 {
            let (born, _) = system.process(&population, day, &thresholds, &mut rng);
            born_total.extend(born);
        }

        assert_eq!(born_total.len(), 2);
        let domains: Vec<Domain> = born_total.iter().map(|g| g.domain).collect();
        assert!(domains.contains(&Domain::River));
        assert!(domains.contains(&Domain::Flame));
    }
}
