//! Scripted end-to-end scenarios mixing steering verbs with the
//! ordinary daily loop.

use chronicle::control::SharedEngine;
use chronicle::core::config::SimulationConfig;
use chronicle::core::types::Domain;
use chronicle::sim::engine::SimulationEngine;
use chronicle::sim::gods::GodSystem;

fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.initial_belief_min = 0.0;
    config.initial_belief_max = 0.0;
    for age in config.ages.iter_mut() {
        age.event_rate = 0.0;
    }
    config
}

#[test]
fn steered_ascension_through_the_shared_handle() {
    let engine = SimulationEngine::genesis(quiet_config(), 42).unwrap();
    let handle = SharedEngine::new(engine);

    for _ in 0..5 {
        handle.force_belief(Domain::River, 0.7);
        handle.step();
    }

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.day, 5);
    let living: Vec<_> = snapshot.gods.iter().filter(|g| g.alive).collect();
    assert_eq!(living.len(), 1);
    assert_eq!(living[0].domain, Domain::River);
    assert_eq!(living[0].birth_day, 5);
}

#[test]
fn disaster_shakes_belief_and_emotion() {
    let mut engine = SimulationEngine::genesis(quiet_config(), 42).unwrap();
    let before = engine.snapshot().mean_belief;

    engine.schedule_disaster();
    let tick = engine.advance();
    let event = tick.event.expect("scheduled disaster must fire");
    assert_eq!(event.magnitude, 1.0);

    let after = engine.snapshot().mean_belief;
    let domain = event.primary_domain.index();
    assert!(
        after[domain] > before[domain],
        "disaster should move belief in its domain"
    );
}

#[test]
fn myths_accumulate_in_an_eventful_world() {
    // Events every single day, myths recorded often
    let mut config = SimulationConfig::default();
    config.myth_chance = 1.0;
    for age in config.ages.iter_mut() {
        age.event_rate = 1.0;
    }

    let mut engine = SimulationEngine::genesis(config, 42).unwrap();
    engine.run(20);

    // Every day produced an event, and every faction recorded it
    assert_eq!(engine.myths().len(), 20 * engine.population().factions.len());
    for myth in engine.myths().iter() {
        assert!(myth.text.starts_with("The "));
        assert!(myth.day >= 1 && myth.day <= 20);
    }
}

#[test]
fn long_run_keeps_every_value_in_bounds() {
    let mut config = SimulationConfig::default();
    for age in config.ages.iter_mut() {
        age.event_rate = 1.0;
    }
    let mut engine = SimulationEngine::genesis(config, 13).unwrap();
    engine.run(300);

    for citizen in &engine.population().citizens {
        for domain in Domain::ALL {
            let b = citizen.beliefs.get(domain);
            assert!((0.0..=1.0).contains(&b), "belief out of bounds: {}", b);
        }
        assert!((0.0..=1.0).contains(&citizen.fear));
        assert!((0.0..=1.0).contains(&citizen.gratitude));
    }

    for field in GodSystem::aggregate(engine.population()) {
        assert!((0.0..=1.0).contains(&field.mean));
        assert!((0.0..=1.0).contains(&field.coherence));
        assert!(field.believers <= engine.population().living_count());
    }
}

#[test]
fn emergent_gods_appear_in_a_long_unscripted_run() {
    // Generous event rates and growth push some domain over the
    // threshold without any steering
    let mut config = SimulationConfig::default();
    for age in config.ages.iter_mut() {
        age.event_rate = 1.0;
        age.belief_growth = 1.5;
        age.positive_bias = 0.3;
    }

    let mut engine = SimulationEngine::genesis(config, 42).unwrap();
    engine.run(500);

    assert!(
        !engine.gods().roster().is_empty(),
        "500 eventful days should raise at least one god"
    );
}
