use crate::config;
use crate::motion::ControlInput;
use crate::projectile::Projectile;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub type VehicleId = u32;

/// Player vehicle always carries this id.
pub const PLAYER_ID: VehicleId = 0;

// Represents the possible states of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Alive,
    Destroyed, // Terminal until the arena replaces the vehicle set
}

/// State carried by the autopilot between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Autopilot {
    pub ai_timer: u32, // Ticks since the last heading change
}

/// Who drives the vehicle. The motion integrator matches on this once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Player(ControlInput),
    Autonomous(Autopilot),
}

// Represents a vehicle in the arena
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub role: Role,
    pub status: VehicleStatus,
    /// Position on the ground plane; `y` holds the world z coordinate.
    pub position: Vec2,
    pub heading: f32, // Radians, 0 faces +z
    pub velocity: Vec2,
    pub speed: f32, // Signed scalar along the heading
    pub rotation_rate: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_rotation_rate: f32,
    pub health: f32,
    pub mass: f32,
    pub radius: f32,
    pub elasticity: f32,
    pub is_colliding: bool,
    pub collision_cooldown: u32,
    pub last_collision_point: Option<Vec2>,
    pub fire_cooldown: u32,
    pub active_projectiles: Vec<Projectile>, // Spawn order
}

impl Vehicle {
    fn with_role(id: VehicleId, role: Role, max_speed: f32, mass: f32) -> Self {
        Vehicle {
            id,
            role,
            status: VehicleStatus::Alive,
            position: Vec2::ZERO,
            heading: 0.0,
            velocity: Vec2::ZERO,
            speed: 0.0,
            rotation_rate: 0.0,
            max_speed,
            acceleration: config::ACCELERATION,
            deceleration: config::DECELERATION,
            max_rotation_rate: config::MAX_ROTATION_RATE,
            health: config::MAX_HEALTH,
            mass,
            radius: config::VEHICLE_RADIUS,
            elasticity: config::VEHICLE_ELASTICITY,
            is_colliding: false,
            collision_cooldown: 0,
            last_collision_point: None,
            fire_cooldown: 0,
            active_projectiles: Vec::new(),
        }
    }

    /// Creates the player vehicle, parked at the origin facing +z.
    pub fn player() -> Self {
        Self::with_role(
            PLAYER_ID,
            Role::Player(ControlInput::default()),
            config::PLAYER_MAX_SPEED,
            config::PLAYER_MASS,
        )
    }

    /// Creates an autonomous vehicle at `position`, already cruising.
    pub fn autonomous(id: VehicleId, position: Vec2, heading: f32, speed: f32) -> Self {
        let mut vehicle = Self::with_role(
            id,
            Role::Autonomous(Autopilot::default()),
            config::AUTONOMOUS_MAX_SPEED,
            config::AUTONOMOUS_MASS,
        );
        vehicle.position = position;
        vehicle.heading = heading;
        vehicle.speed = speed;
        vehicle
    }

    /// Creates an autonomous vehicle somewhere inside a square of side `extent`
    /// centered on the origin, with a random heading and cruise speed.
    pub fn random_autonomous<R: Rng>(id: VehicleId, extent: f32, rng: &mut R) -> Self {
        let half = extent / 2.0;
        let position = Vec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half));
        let heading = rng.gen_range(0.0..TAU);
        let cruise = rng.gen_range(config::AUTONOMOUS_CRUISE_MIN..config::AUTONOMOUS_CRUISE_MAX);
        Self::autonomous(id, position, heading, cruise * config::AUTONOMOUS_MAX_SPEED)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player(_))
    }

    pub fn is_destroyed(&self) -> bool {
        self.status == VehicleStatus::Destroyed
    }

    /// Replaces the player's intents for the coming tick. Ignored for autonomous vehicles.
    pub fn set_controls(&mut self, input: ControlInput) {
        if let Role::Player(controls) = &mut self.role {
            *controls = input;
        }
    }

    /// Subtracts `amount` from health, flooring at zero.
    ///
    /// Returns true only on the tick the vehicle transitions to `Destroyed`; the
    /// caller is responsible for announcing it. Negative or non-finite amounts are
    /// ignored so health can never rise.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            return false;
        }

        self.health = (self.health - amount).max(0.0);

        if self.health <= 0.0 && self.status != VehicleStatus::Destroyed {
            self.status = VehicleStatus::Destroyed;
            self.speed = 0.0;
            self.rotation_rate = 0.0;
            log::info!("Vehicle {} destroyed!", self.id);
            return true;
        }
        false
    }

    /// Fires the forward gun. Returns the new projectile, or None while the gun cools down.
    pub fn fire_weapon(&mut self) -> Option<Projectile> {
        if self.fire_cooldown > 0 {
            crate::debug_weapon!(
                self.id,
                "Trigger ignored, cooldown {} ticks",
                self.fire_cooldown
            );
            return None;
        }

        let projectile = Projectile::launch(self.id, self.position, self.heading);
        self.active_projectiles.push(projectile);
        self.fire_cooldown = config::FIRE_COOLDOWN_TICKS;

        crate::debug_weapon!(
            self.id,
            "Fired projectile from ({:.2}, {:.2}) heading {:.2}, {} in flight",
            self.position.x,
            self.position.y,
            self.heading,
            self.active_projectiles.len()
        );
        Some(projectile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_player_defaults() {
        let player = Vehicle::player();
        assert_eq!(player.id, PLAYER_ID);
        assert!(player.is_player());
        assert_eq!(player.position, Vec2::ZERO);
        assert_eq!(player.speed, 0.0);
        assert_eq!(player.health, config::MAX_HEALTH);
        assert_eq!(player.mass, config::PLAYER_MASS);
        assert!(!player.is_destroyed());
    }

    #[test]
    fn test_random_autonomous_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 1..=100 {
            let vehicle = Vehicle::random_autonomous(id, 1000.0, &mut rng);
            assert!(!vehicle.is_player());
            assert!(vehicle.position.x.abs() <= 500.0 && vehicle.position.y.abs() <= 500.0);
            assert!((0.0..TAU).contains(&vehicle.heading));
            let fraction = vehicle.speed / vehicle.max_speed;
            assert!(
                fraction >= config::AUTONOMOUS_CRUISE_MIN - 1e-5
                    && fraction <= config::AUTONOMOUS_CRUISE_MAX + 1e-5,
                "cruise fraction {} out of range",
                fraction
            );
        }
    }

    #[test]
    fn test_lethal_damage_destroys_once() {
        let mut vehicle = Vehicle::player();
        vehicle.health = 25.0;

        assert!(vehicle.apply_damage(25.0));
        assert_eq!(vehicle.health, 0.0);
        assert!(vehicle.is_destroyed());

        // Already destroyed: no second transition, health stays floored
        assert!(!vehicle.apply_damage(25.0));
        assert!(!vehicle.apply_damage(0.2));
        assert_eq!(vehicle.health, 0.0);
    }

    #[test]
    fn test_damage_never_heals() {
        let mut vehicle = Vehicle::player();
        vehicle.apply_damage(10.0);
        assert_approx_eq!(vehicle.health, 90.0);

        assert!(!vehicle.apply_damage(-50.0));
        assert!(!vehicle.apply_damage(f32::NAN));
        assert_approx_eq!(vehicle.health, 90.0);
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut vehicle = Vehicle::player();
        assert!(vehicle.apply_damage(1000.0));
        assert_eq!(vehicle.health, 0.0);
    }

    #[test]
    fn test_fire_weapon_respects_cooldown() {
        let mut vehicle = Vehicle::player();

        let projectile = vehicle.fire_weapon().expect("first shot should fire");
        assert_eq!(projectile.owner, PLAYER_ID);
        assert_eq!(vehicle.fire_cooldown, config::FIRE_COOLDOWN_TICKS);
        assert_eq!(vehicle.active_projectiles.len(), 1);

        assert!(vehicle.fire_weapon().is_none());
        assert_eq!(vehicle.active_projectiles.len(), 1);
    }

    #[test]
    fn test_set_controls_only_affects_player() {
        let input = ControlInput {
            accelerate: true,
            ..Default::default()
        };

        let mut player = Vehicle::player();
        player.set_controls(input);
        assert_eq!(player.role, Role::Player(input));

        let mut drone = Vehicle::autonomous(1, Vec2::ZERO, 0.0, 0.1);
        drone.set_controls(input);
        assert_eq!(drone.role, Role::Autonomous(Autopilot::default()));
    }
}
