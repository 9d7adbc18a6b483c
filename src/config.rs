//! Configuration constants for the vehicle arena simulation.

use crate::error::ArenaError;

// Arena layout
pub const ARENA_EXTENT: f32 = 1000.0; // Side length of the square play field in world units
pub const MAX_ARENA_EXTENT: f32 = 10_000.0; // Hazard generation scans (extent / cell)^2 cells
pub const HAZARD_CELL_SIZE: f32 = 5.0; // Ground grid cell size; one hazard occupies one cell
pub const HAZARD_DENSITY: f64 = 0.02; // Chance that any grid cell becomes a hazard zone
pub const HAZARD_DAMAGE_PER_TICK: f32 = 0.2; // Damage per tick while the player sits inside a zone
pub const DEFAULT_AUTONOMOUS_COUNT: usize = 50;
pub const MAX_AUTONOMOUS_COUNT: usize = 500; // Pairwise collision checks are O(n^2)

// Rendering configuration (front-end only)
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 800;
pub const VIEW_HEIGHT_UNITS: f32 = 40.0; // World units visible vertically

// Vehicle body
pub const VEHICLE_RADIUS: f32 = 2.5;
pub const VEHICLE_ELASTICITY: f32 = 0.5; // Restitution used by the collision initiator
pub const VEHICLE_RIDE_HEIGHT: f32 = 0.5; // Height of the chassis above the ground plane
pub const MAX_HEALTH: f32 = 100.0;

// Vehicle drive
pub const ACCELERATION: f32 = 0.02; // Speed gained per tick under throttle
pub const DECELERATION: f32 = 0.01; // Coasting decay unit (applied twice per tick)
pub const MAX_ROTATION_RATE: f32 = 0.05; // Radians per tick
pub const VELOCITY_SMOOTHING: f32 = 0.1; // Low-pass factor toward the heading velocity
pub const VELOCITY_DECAY: f32 = 0.95; // Per-tick velocity damping
pub const VELOCITY_DECAY_COLLIDING: f32 = 0.8; // Damping while recovering from an impact

pub const PLAYER_MAX_SPEED: f32 = 0.8;
pub const PLAYER_MASS: f32 = 2.0;
pub const AUTONOMOUS_MAX_SPEED: f32 = 0.5;
pub const AUTONOMOUS_MASS: f32 = 1.0;
pub const AUTONOMOUS_CRUISE_MIN: f32 = 0.2; // Fraction of max speed
pub const AUTONOMOUS_CRUISE_MAX: f32 = 0.4; // Fraction of max speed

// Autopilot
pub const AI_STEER_INTERVAL: u32 = 100; // Ticks between heading changes
pub const AI_FIRE_CHANCE: f64 = 0.01; // Per-tick chance an autonomous vehicle pulls the trigger

// Collision response
pub const COLLISION_COOLDOWN_TICKS: u32 = 30;
pub const IMPULSE_FACTOR: f32 = 1.5; // Amplifies the elastic impulse for a harder knock
pub const COLLISION_TURN_FACTOR: f32 = 0.2; // Rotation nudge toward the impact angle
pub const COLLISION_SPEED_RETAINED: f32 = 0.3; // Fraction of speed kept after an impact
pub const CONTACT_EPSILON: f32 = 1e-6; // Below this center distance the fallback normal is used

// Weapons
pub const FIRE_COOLDOWN_TICKS: u32 = 10;
pub const PROJECTILE_LIFETIME_TICKS: u32 = 30;
pub const PROJECTILE_SPEED: f32 = 3.0; // Units per tick
pub const MUZZLE_HEIGHT: f32 = 0.5; // Added on top of the ride height
pub const PROJECTILE_HIT_RADIUS: f32 = 2.5;
pub const PROJECTILE_DAMAGE: f32 = 25.0;

/// Per-session arena settings, usually filled from command line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub autonomous_count: usize,
    pub hazard_density: f64,
    pub extent: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            seed: None,
            autonomous_count: DEFAULT_AUTONOMOUS_COUNT,
            hazard_density: HAZARD_DENSITY,
            extent: ARENA_EXTENT,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.autonomous_count > MAX_AUTONOMOUS_COUNT {
            return Err(ArenaError::TooManyVehicles {
                requested: self.autonomous_count,
                max: MAX_AUTONOMOUS_COUNT,
            });
        }
        if !(0.0..=1.0).contains(&self.hazard_density) {
            return Err(ArenaError::InvalidHazardDensity(self.hazard_density));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(ArenaError::InvalidExtent(self.extent));
        }
        if self.extent > MAX_ARENA_EXTENT {
            return Err(ArenaError::ExtentTooLarge {
                requested: self.extent,
                max: MAX_ARENA_EXTENT,
            });
        }
        Ok(())
    }
}
