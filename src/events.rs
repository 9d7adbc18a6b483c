//! Notifications emitted by the simulation for the rendering side.
//!
//! The arena never waits on these; front-ends drain the queue once per frame and
//! schedule whatever cosmetic effects they like.

use glam::{Vec2, Vec3};

use crate::vehicle::VehicleId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    /// A vehicle entered the arena (start or restart).
    Spawned { vehicle: VehicleId, position: Vec2 },
    /// A projectile left the muzzle.
    Fired { vehicle: VehicleId, position: Vec3 },
    /// An impulse was resolved between two vehicles.
    Collision { a: VehicleId, b: VehicleId, point: Vec2 },
    /// A projectile struck a vehicle at the closest point of approach.
    Hit {
        owner: VehicleId,
        target: VehicleId,
        point: Vec3,
    },
    ProjectileExpired { owner: VehicleId, position: Vec3 },
    /// Health reached zero.
    Destroyed { vehicle: VehicleId, position: Vec2 },
    /// The player is standing in hazard zone `zone` this tick.
    HazardContact { zone: usize },
    GameOver { score: u64 },
    Restarted,
}
