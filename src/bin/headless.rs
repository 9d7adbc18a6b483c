//! Runs the arena without a window, for soak tests and reproducible logs.

use clap::Parser;
use log::{LevelFilter, error, info};
use std::process::ExitCode;
use wreckfield::config::{self, ArenaConfig};
use wreckfield::{Arena, ArenaEvent, ControlInput, logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Wreckfield simulation", long_about = None)]
struct Args {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Number of autonomous vehicles to spawn.
    #[arg(long, default_value_t = config::DEFAULT_AUTONOMOUS_COUNT)]
    autonomous: usize,

    /// Probability that a ground cell becomes a hazard zone.
    #[arg(long, default_value_t = config::HAZARD_DENSITY)]
    hazard_density: f64,

    /// RNG seed for a reproducible run. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Hold the player's throttle down for the whole run.
    #[arg(long)]
    auto_drive: bool,

    /// Hold the player's trigger down for the whole run.
    #[arg(long)]
    auto_fire: bool,

    /// How many times to restart after a game over before stopping.
    #[arg(long, default_value_t = 0)]
    restarts: u32,

    /// Debug filter to specify log topics (e.g., "motion,collision,weapon")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Default)]
struct RunSummary {
    ticks: u64,
    shots: u64,
    hits: u64,
    collisions: u64,
    destroyed: u64,
    games: u64,
    best_score: u64,
}

impl RunSummary {
    fn record(&mut self, event: &ArenaEvent) {
        match event {
            ArenaEvent::Fired { .. } => self.shots += 1,
            ArenaEvent::Hit { .. } => self.hits += 1,
            ArenaEvent::Collision { .. } => self.collisions += 1,
            ArenaEvent::Destroyed { .. } => self.destroyed += 1,
            ArenaEvent::GameOver { score } => {
                self.games += 1;
                self.best_score = self.best_score.max(*score);
            }
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = args.log_level.parse().unwrap_or(LevelFilter::Info);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let arena_config = ArenaConfig {
        seed: args.seed,
        autonomous_count: args.autonomous,
        hazard_density: args.hazard_density,
        ..Default::default()
    };
    let mut arena = match Arena::new(arena_config) {
        Ok(arena) => arena,
        Err(e) => {
            error!("Failed to create arena: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = ControlInput {
        fire: args.auto_fire,
        auto_drive: args.auto_drive,
        ..Default::default()
    };

    let mut summary = RunSummary::default();
    let mut restarts_left = args.restarts;
    for _ in 0..args.ticks {
        if arena.is_game_over() {
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            arena.restart();
        }

        arena.tick(input);
        summary.ticks += 1;
        for event in arena.drain_events() {
            summary.record(&event);
        }
    }
    summary.best_score = summary.best_score.max(arena.score());

    info!(
        "Seed {}: {} ticks, {} games, best score {}",
        arena.seed(),
        summary.ticks,
        summary.games,
        summary.best_score
    );
    info!(
        "{} shots, {} hits, {} collisions, {} vehicles destroyed",
        summary.shots, summary.hits, summary.collisions, summary.destroyed
    );
    println!(
        "seed={} ticks={} games={} best_score={} player_health={:.1}",
        arena.seed(),
        summary.ticks,
        summary.games,
        summary.best_score,
        arena.player().health
    );

    ExitCode::SUCCESS
}
