mod game;
mod particles;
mod render;

use clap::Parser;
use log::{LevelFilter, error, info};
use macroquad::prelude::*;
use wreckfield::config::{self, ArenaConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use wreckfield::logging;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of autonomous vehicles to spawn.
    #[arg(long, default_value_t = config::DEFAULT_AUTONOMOUS_COUNT)]
    autonomous: usize,

    /// Probability that a ground cell becomes a hazard zone.
    #[arg(long, default_value_t = config::HAZARD_DENSITY)]
    hazard_density: f64,

    /// RNG seed for a reproducible arena. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "motion,collision,weapon")
    /// Available topics: motion, collision, weapon, hazard, arena
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Wreckfield".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let log_level = args.log_level.parse().unwrap_or(LevelFilter::Info);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Wreckfield...");

    let arena_config = ArenaConfig {
        seed: args.seed,
        autonomous_count: args.autonomous,
        hazard_density: args.hazard_density,
        ..Default::default()
    };

    let mut game = match game::Game::new(arena_config) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create arena: {}", e);
            std::process::exit(1);
        }
    };

    game.run().await;
}
