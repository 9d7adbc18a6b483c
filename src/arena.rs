use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

use crate::collision;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::events::ArenaEvent;
use crate::hazard::{self, HazardZone};
use crate::motion::{self, ControlInput};
use crate::projectile;
use crate::vehicle::{Vehicle, VehicleId};

/// The simulation context: every vehicle, the hazard field and the session state.
///
/// Index 0 of the vehicle set is always the player. Front-ends read state through
/// the accessors and drain `ArenaEvent`s once per frame.
#[derive(Debug)]
pub struct Arena {
    config: ArenaConfig,
    seed: u64,
    vehicles: Vec<Vehicle>,
    hazards: Vec<HazardZone>,
    rng: StdRng,
    score: u64,
    game_over: bool,
    tick_count: u64,
    events: VecDeque<ArenaEvent>,
}

impl Arena {
    /// Builds a new arena: validates the config, lays out the hazard field and
    /// spawns the player plus `autonomous_count` autonomous vehicles.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        log::info!(
            "Creating arena: extent {}, {} autonomous vehicles, seed {}",
            config.extent,
            config.autonomous_count,
            seed
        );

        let hazards = hazard::generate(config.extent, config.hazard_density, &mut rng);
        let mut events = VecDeque::new();
        let vehicles = spawn_vehicles(&config, &mut rng, &mut events);

        Ok(Arena {
            config,
            seed,
            vehicles,
            hazards,
            rng,
            score: 0,
            game_over: false,
            tick_count: 0,
            events,
        })
    }

    /// Runs exactly one simulation step with the player's current intents.
    ///
    /// Does nothing once the game is over; call `restart` to play again.
    pub fn tick(&mut self, input: ControlInput) {
        if self.game_over {
            return;
        }
        self.tick_count += 1;

        // Phase 1: motion, player first, then fire requests
        self.vehicles[0].set_controls(input);
        for vehicle in self.vehicles.iter_mut() {
            if !motion::integrate(vehicle, &mut self.rng) {
                continue;
            }
            if let Some(shot) = vehicle.fire_weapon() {
                self.events.push_back(ArenaEvent::Fired {
                    vehicle: vehicle.id,
                    position: shot.position,
                });
            }
        }

        // Phase 2: vehicle contacts
        let impacts = collision::resolve_all(&mut self.vehicles, &mut self.events);

        // Phase 3: projectiles
        projectile::advance_all(&mut self.vehicles, &mut self.events);
        let hits = projectile::resolve_hits(&mut self.vehicles, &mut self.events);

        // Phase 4: hazards only ever hurt the player
        let hazard_damage = hazard::apply(&self.hazards, &mut self.vehicles[0], &mut self.events);

        if impacts > 0 || hits > 0 || hazard_damage > 0.0 {
            crate::debug_arena!(
                self.tick_count,
                "{} impacts, {} hits, {:.2} hazard damage",
                impacts,
                hits,
                hazard_damage
            );
        }

        // Phase 5: lifecycle
        if self.vehicles[0].is_destroyed() {
            self.game_over = true;
            self.events.push_back(ArenaEvent::GameOver { score: self.score });
            log::info!("Tick {} game over, final score {}", self.tick_count, self.score);
        } else {
            self.score += 1;
        }
    }

    /// Replaces the whole vehicle set with a fresh one and resets the session.
    /// The hazard field is kept.
    pub fn restart(&mut self) {
        log::info!(
            "Restarting after Tick {} with score {}",
            self.tick_count,
            self.score
        );
        self.events.push_back(ArenaEvent::Restarted);
        self.vehicles = spawn_vehicles(&self.config, &mut self.rng, &mut self.events);
        self.score = 0;
        self.game_over = false;
        self.tick_count = 0;
    }

    pub fn player(&self) -> &Vehicle {
        &self.vehicles[0]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Mutable view of the vehicle set for scripted scenarios. The set itself
    /// cannot grow or shrink.
    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    pub fn hazards(&self) -> &[HazardZone] {
        &self.hazards
    }

    /// Swaps in a hand-made hazard field.
    pub fn set_hazards(&mut self, hazards: Vec<HazardZone>) {
        self.hazards = hazards;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Hands every pending event to the caller, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ArenaEvent> + '_ {
        self.events.drain(..)
    }
}

// Player at index 0, then autonomous vehicles with ids 1..=N
fn spawn_vehicles(
    config: &ArenaConfig,
    rng: &mut StdRng,
    events: &mut VecDeque<ArenaEvent>,
) -> Vec<Vehicle> {
    let mut vehicles = Vec::with_capacity(config.autonomous_count + 1);
    vehicles.push(Vehicle::player());
    for id in 1..=config.autonomous_count {
        vehicles.push(Vehicle::random_autonomous(id as VehicleId, config.extent, rng));
    }

    for vehicle in &vehicles {
        events.push_back(ArenaEvent::Spawned {
            vehicle: vehicle.id,
            position: vehicle.position,
        });
    }
    log::info!("Spawned {} vehicles.", vehicles.len());
    vehicles
}
