//! Chronicle - Entry Point
//!
//! Runs the closed-world mythology simulation from the command line:
//! creates or resumes a world, advances it day by day with narration,
//! and writes the full state back to the save file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chronicle::core::config::SimulationConfig;
use chronicle::core::Result;
use chronicle::sim::engine::SimulationEngine;
use chronicle::sim::narration::Narrator;
use chronicle::storage::{JsonFileStorage, Storage};

#[derive(Parser)]
#[command(name = "chronicle", about = "A closed-world emergent mythology simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Advance the world, creating it if no save exists
    Run {
        /// Days to simulate
        #[arg(long, default_value_t = 30)]
        days: u64,
        /// World seed, used only when creating a fresh world
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Save file location
        #[arg(long, default_value = "chronicle.json")]
        save: PathBuf,
        /// Ignore any existing save and start over
        #[arg(long)]
        fresh: bool,
        /// Suppress narration
        #[arg(long)]
        quiet: bool,
        /// Narrate every day, not just the notable ones
        #[arg(long)]
        verbose: bool,
        /// Optional TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize a saved world without advancing it
    Status {
        /// Save file location
        #[arg(long, default_value = "chronicle.json")]
        save: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chronicle=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            days,
            seed,
            save,
            fresh,
            quiet,
            verbose,
            config,
        } => run(days, seed, save, fresh, quiet, verbose, config),
        Command::Status { save } => status(save),
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    days: u64,
    seed: u64,
    save: PathBuf,
    fresh: bool,
    quiet: bool,
    verbose: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => SimulationConfig::load_from_toml(&path)?,
        None => SimulationConfig::default(),
    };

    let storage = JsonFileStorage::new(save);
    let existing = if fresh { None } else { storage.load()? };

    let (mut engine, world_seed) = match existing {
        Some(state) => {
            let seed = state.seed;
            println!("Resuming world at day {} (seed {})", state.day, seed);
            (SimulationEngine::resume(state, config)?, seed)
        }
        None => {
            println!("Creating world with seed {}", seed);
            (SimulationEngine::genesis(config, seed)?, seed)
        }
    };

    let mut narrator = Narrator::new(world_seed, verbose);
    for _ in 0..days {
        let tick = engine.advance();
        if !quiet {
            for line in narrator.describe_tick(&tick) {
                println!("{}", line);
            }
        }
    }

    storage.save(&engine.to_save_state())?;
    print_summary(&engine);
    Ok(())
}

fn status(save: PathBuf) -> Result<()> {
    let storage = JsonFileStorage::new(&save);
    match storage.load()? {
        Some(state) => {
            let config = SimulationConfig::default();
            let engine = SimulationEngine::resume(state, config)?;
            print_summary(&engine);
        }
        None => println!("No save found at {}", save.display()),
    }
    Ok(())
}

fn print_summary(engine: &SimulationEngine) {
    let snapshot = engine.snapshot();
    println!();
    println!(
        "Day {} · Age of {} (day {} of the age)",
        snapshot.day,
        snapshot.age.name(),
        snapshot.day_in_age
    );
    println!(
        "{} living citizens in {} factions · {} myths recorded",
        snapshot.living_citizens, snapshot.factions, snapshot.myth_count
    );

    let living: Vec<_> = snapshot.gods.iter().filter(|g| g.alive).collect();
    if living.is_empty() {
        println!("No gods walk the world.");
    } else {
        for god in living {
            println!(
                "{}, God of {} (born day {}, belief {:.2}, coherence {:.2})",
                god.name, god.domain, god.birth_day, god.belief_strength, god.coherence
            );
        }
    }
    let faded = snapshot.gods.iter().filter(|g| !g.alive).count();
    if faded > 0 {
        println!("{} gods have faded into legend.", faded);
    }
}
