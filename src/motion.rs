//! Per-tick vehicle kinematics.
//!
//! Players are driven by their latest `ControlInput`; autonomous vehicles wander by
//! picking a new turn rate every `AI_STEER_INTERVAL` ticks. Both share the same
//! heading/velocity/position update afterwards.

use crate::config;
use crate::utils;
use crate::vehicle::{Role, Vehicle};
use rand::Rng;

/// Steering dead zone for continuous (drag) input.
pub const STEERING_DEAD_ZONE: f32 = 0.1;

/// Player intents for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    /// Cruise toggle: holds the throttle down while set.
    pub auto_drive: bool,
}

impl ControlInput {
    /// Maps a continuous steering amount (e.g. a normalized drag distance) onto the
    /// turn intents. Values inside the dead zone, or non-finite values, clear both.
    pub fn with_steering(mut self, amount: f32) -> Self {
        if amount.is_finite() {
            self.turn_left = amount < -STEERING_DEAD_ZONE;
            self.turn_right = amount > STEERING_DEAD_ZONE;
        } else {
            self.turn_left = false;
            self.turn_right = false;
        }
        self
    }

    /// Intents as the integrator sees them, with auto-drive folded into the throttle.
    pub fn effective(self) -> Self {
        ControlInput {
            accelerate: self.accelerate || self.auto_drive,
            ..self
        }
    }
}

/// Advances one vehicle by exactly one tick.
///
/// Returns true when the vehicle wants to fire this tick; the caller decides
/// whether the gun is ready.
pub fn integrate<R: Rng>(vehicle: &mut Vehicle, rng: &mut R) -> bool {
    if vehicle.is_destroyed() {
        vehicle.speed = 0.0;
        vehicle.rotation_rate = 0.0;
        return false;
    }

    vehicle.collision_cooldown = vehicle.collision_cooldown.saturating_sub(1);
    if vehicle.collision_cooldown == 0 {
        vehicle.is_colliding = false;
        vehicle.last_collision_point = None;
    }

    let wants_fire = match vehicle.role {
        Role::Player(controls) => {
            let controls = controls.effective();
            apply_throttle(vehicle, &controls);
            controls.fire
        }
        Role::Autonomous(ref mut autopilot) => {
            autopilot.ai_timer += 1;
            if autopilot.ai_timer >= config::AI_STEER_INTERVAL {
                autopilot.ai_timer = 0;
                vehicle.rotation_rate = rng.gen_range(-1.0f32..1.0) * vehicle.max_rotation_rate;
                crate::debug_motion!(
                    vehicle.id,
                    "Autopilot steering, new rotation rate {:.4}",
                    vehicle.rotation_rate
                );
            }
            rng.gen_bool(config::AI_FIRE_CHANCE)
        }
    };

    vehicle.heading += vehicle.rotation_rate;

    let target = utils::heading_vector(vehicle.heading) * vehicle.speed;
    vehicle.velocity += (target - vehicle.velocity) * config::VELOCITY_SMOOTHING;
    vehicle.position += vehicle.velocity;

    let decay = if vehicle.is_colliding {
        config::VELOCITY_DECAY_COLLIDING
    } else {
        config::VELOCITY_DECAY
    };
    vehicle.velocity *= decay;

    vehicle.fire_cooldown = vehicle.fire_cooldown.saturating_sub(1);

    wants_fire
}

// Speed and turn response to player intents
fn apply_throttle(vehicle: &mut Vehicle, controls: &ControlInput) {
    if controls.accelerate {
        vehicle.speed = (vehicle.speed + vehicle.acceleration).min(vehicle.max_speed);
    } else if controls.brake {
        vehicle.speed = (vehicle.speed - vehicle.acceleration).max(-vehicle.max_speed);
    } else if vehicle.speed.abs() < vehicle.deceleration {
        vehicle.speed = 0.0;
    } else {
        vehicle.speed -= utils::sign(vehicle.speed) * vehicle.deceleration * 2.0;
    }

    vehicle.rotation_rate = if controls.turn_right {
        -vehicle.max_rotation_rate
    } else if controls.turn_left {
        vehicle.max_rotation_rate
    } else {
        0.0
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Autopilot;
    use assert_approx_eq::assert_approx_eq;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn player_with(input: ControlInput) -> Vehicle {
        let mut player = Vehicle::player();
        player.set_controls(input);
        player
    }

    #[test]
    fn test_accelerate_caps_at_max_speed() {
        let mut player = player_with(ControlInput {
            accelerate: true,
            ..Default::default()
        });
        let mut rng = rng();

        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.speed, config::ACCELERATION);

        for _ in 0..100 {
            integrate(&mut player, &mut rng);
        }
        assert_approx_eq!(player.speed, config::PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_brake_caps_at_reverse_max() {
        let mut player = player_with(ControlInput {
            brake: true,
            ..Default::default()
        });
        let mut rng = rng();
        for _ in 0..100 {
            integrate(&mut player, &mut rng);
        }
        assert_approx_eq!(player.speed, -config::PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_coasting_decays_then_snaps_to_zero() {
        let mut player = Vehicle::player();
        player.speed = 0.1;
        let mut rng = rng();

        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.speed, 0.1 - config::DECELERATION * 2.0);

        player.speed = config::DECELERATION * 0.5;
        integrate(&mut player, &mut rng);
        assert_eq!(player.speed, 0.0);

        player.speed = -0.1;
        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.speed, -0.1 + config::DECELERATION * 2.0);
    }

    #[test]
    fn test_auto_drive_holds_throttle() {
        let mut player = player_with(ControlInput {
            auto_drive: true,
            ..Default::default()
        });
        let mut rng = rng();
        integrate(&mut player, &mut rng);
        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.speed, config::ACCELERATION * 2.0);
    }

    #[test]
    fn test_turn_intents() {
        let mut rng = rng();

        let mut player = player_with(ControlInput {
            turn_left: true,
            ..Default::default()
        });
        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.rotation_rate, config::MAX_ROTATION_RATE);
        assert_approx_eq!(player.heading, config::MAX_ROTATION_RATE);

        let mut player = player_with(ControlInput {
            turn_right: true,
            ..Default::default()
        });
        integrate(&mut player, &mut rng);
        assert_approx_eq!(player.rotation_rate, -config::MAX_ROTATION_RATE);

        player.set_controls(ControlInput::default());
        integrate(&mut player, &mut rng);
        assert_eq!(player.rotation_rate, 0.0);
    }

    #[test]
    fn test_velocity_smoothing_and_decay() {
        let mut player = Vehicle::player();
        player.set_controls(ControlInput {
            accelerate: true,
            ..Default::default()
        });
        player.speed = 0.5 - config::ACCELERATION; // Reaches 0.5 this tick
        let mut rng = rng();

        integrate(&mut player, &mut rng);

        // Heading 0 faces +z: target (0, 0.5), smoothed by 0.1 -> 0.05
        assert_approx_eq!(player.position.x, 0.0);
        assert_approx_eq!(player.position.y, 0.05);
        // Decay applied after the position update
        assert_approx_eq!(player.velocity.y, 0.05 * config::VELOCITY_DECAY);
    }

    #[test]
    fn test_colliding_uses_stronger_decay() {
        let mut player = Vehicle::player();
        player.velocity = Vec2::new(1.0, 0.0);
        player.is_colliding = true;
        player.collision_cooldown = 5;
        let mut rng = rng();

        integrate(&mut player, &mut rng);

        // Smoothing pulls 1.0 toward 0 by 10%, then the impact damping applies
        assert_approx_eq!(player.position.x, 0.9);
        assert_approx_eq!(player.velocity.x, 0.9 * config::VELOCITY_DECAY_COLLIDING);
        assert_eq!(player.collision_cooldown, 4);
        assert!(player.is_colliding);
    }

    #[test]
    fn test_cooldown_expiry_clears_collision_state() {
        let mut player = Vehicle::player();
        player.is_colliding = true;
        player.collision_cooldown = 1;
        player.last_collision_point = Some(Vec2::new(1.0, 1.0));
        player.fire_cooldown = 1;
        let mut rng = rng();

        integrate(&mut player, &mut rng);

        assert_eq!(player.collision_cooldown, 0);
        assert!(!player.is_colliding);
        assert_eq!(player.last_collision_point, None);
        assert_eq!(player.fire_cooldown, 0);

        integrate(&mut player, &mut rng);
        assert_eq!(player.fire_cooldown, 0);
    }

    #[test]
    fn test_destroyed_vehicle_is_frozen() {
        let mut player = Vehicle::player();
        player.velocity = Vec2::new(1.0, 1.0);
        player.speed = 0.5;
        player.rotation_rate = 0.05;
        player.apply_damage(1000.0);
        player.speed = 0.5;
        player.rotation_rate = 0.05;
        let mut rng = rng();

        let wants_fire = integrate(&mut player, &mut rng);

        assert!(!wants_fire);
        assert_eq!(player.speed, 0.0);
        assert_eq!(player.rotation_rate, 0.0);
        assert_eq!(player.position, Vec2::ZERO);
    }

    #[test]
    fn test_autopilot_keeps_speed_and_steers_on_interval() {
        let mut drone = Vehicle::autonomous(1, Vec2::ZERO, 0.0, 0.15);
        let mut rng = rng();

        for _ in 0..config::AI_STEER_INTERVAL - 1 {
            integrate(&mut drone, &mut rng);
        }
        assert_eq!(drone.rotation_rate, 0.0);
        assert_eq!(
            drone.role,
            Role::Autonomous(Autopilot {
                ai_timer: config::AI_STEER_INTERVAL - 1
            })
        );

        integrate(&mut drone, &mut rng);
        assert_eq!(drone.role, Role::Autonomous(Autopilot { ai_timer: 0 }));
        assert!(drone.rotation_rate.abs() <= config::MAX_ROTATION_RATE);
        assert_approx_eq!(drone.speed, 0.15);
    }

    #[test]
    fn test_player_fire_intent_passes_through() {
        let mut player = player_with(ControlInput {
            fire: true,
            ..Default::default()
        });
        let mut rng = rng();
        assert!(integrate(&mut player, &mut rng));
    }

    #[test]
    fn test_steering_dead_zone() {
        let input = ControlInput::default().with_steering(-0.5);
        assert!(input.turn_left && !input.turn_right);

        let input = ControlInput::default().with_steering(0.05);
        assert!(!input.turn_left && !input.turn_right);

        let input = ControlInput::default().with_steering(0.3);
        assert!(!input.turn_left && input.turn_right);

        let input = ControlInput {
            turn_left: true,
            ..Default::default()
        }
        .with_steering(f32::NAN);
        assert!(!input.turn_left && !input.turn_right);
    }
}
