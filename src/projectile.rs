//! Projectile ballistics and hit-testing.
//!
//! Projectiles fly in a straight line at constant velocity and live in their
//! owner's `active_projectiles`. Hits use a closest-point-of-approach test against
//! each candidate's center rather than a swept volume.

use glam::{Vec2, Vec3};
use std::collections::VecDeque;

use crate::config;
use crate::events::ArenaEvent;
use crate::utils;
use crate::vehicle::{Vehicle, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: VehicleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub remaining_lifetime: u32, // Ticks
}

/// A registered hit: index of the struck vehicle and the impact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target: usize,
    pub point: Vec3,
}

impl Projectile {
    /// Creates a projectile leaving a vehicle at `position` facing `heading`.
    pub fn launch(owner: VehicleId, position: Vec2, heading: f32) -> Self {
        let direction = utils::heading_vector(heading);
        Projectile {
            owner,
            position: utils::lift(position, config::VEHICLE_RIDE_HEIGHT + config::MUZZLE_HEIGHT),
            velocity: utils::lift(direction, 0.0) * config::PROJECTILE_SPEED,
            remaining_lifetime: config::PROJECTILE_LIFETIME_TICKS,
        }
    }

    /// Moves one tick. Returns false once the lifetime has run out.
    pub fn advance(&mut self) -> bool {
        self.position += self.velocity;
        self.remaining_lifetime = self.remaining_lifetime.saturating_sub(1);
        self.remaining_lifetime > 0
    }

    /// Finds the first live vehicle (in index order, skipping `owner_index`) whose
    /// center lies ahead of the projectile and within the hit radius of its line
    /// of travel.
    pub fn hit_test(&self, owner_index: usize, vehicles: &[Vehicle]) -> Option<Hit> {
        let origin = utils::planar(self.position);
        let direction = utils::planar(self.velocity).normalize_or_zero();

        vehicles.iter().enumerate().find_map(|(index, target)| {
            if index == owner_index || target.is_destroyed() {
                return None;
            }

            let to_target = target.position - origin;
            let along = to_target.dot(direction);
            if along <= 0.0 {
                return None; // Behind the projectile
            }

            let closest = origin + direction * along;
            if closest.distance(target.position) < config::PROJECTILE_HIT_RADIUS {
                Some(Hit {
                    target: index,
                    point: utils::lift(closest, self.position.y),
                })
            } else {
                None
            }
        })
    }
}

/// Advances every projectile of every vehicle, dropping the ones that expire.
pub fn advance_all(vehicles: &mut [Vehicle], events: &mut VecDeque<ArenaEvent>) {
    for vehicle in vehicles.iter_mut() {
        let owner = vehicle.id;
        vehicle.active_projectiles.retain_mut(|projectile| {
            if projectile.advance() {
                true
            } else {
                crate::debug_weapon!(owner, "Projectile expired");
                events.push_back(ArenaEvent::ProjectileExpired {
                    owner,
                    position: projectile.position,
                });
                false
            }
        });
    }
}

/// Hit-tests every projectile in flight and applies damage for each hit.
///
/// Projectiles are visited owner by owner in index order and in spawn order within
/// an owner. A projectile that hits is removed on the spot, so it can never hit
/// twice, and later projectiles see the damage already dealt this tick.
pub fn resolve_hits(vehicles: &mut [Vehicle], events: &mut VecDeque<ArenaEvent>) -> usize {
    let mut hits = 0;

    for owner_index in 0..vehicles.len() {
        let mut k = 0;
        while k < vehicles[owner_index].active_projectiles.len() {
            let projectile = vehicles[owner_index].active_projectiles[k];

            let Some(hit) = projectile.hit_test(owner_index, vehicles) else {
                k += 1;
                continue;
            };

            // Removing keeps the remaining projectiles in spawn order
            vehicles[owner_index].active_projectiles.remove(k);
            hits += 1;

            let target = &mut vehicles[hit.target];
            let destroyed = target.apply_damage(config::PROJECTILE_DAMAGE);
            log::info!(
                "Vehicle {} hit by vehicle {}, health remaining: {:.2}",
                target.id,
                projectile.owner,
                target.health
            );

            events.push_back(ArenaEvent::Hit {
                owner: projectile.owner,
                target: target.id,
                point: hit.point,
            });
            if destroyed {
                events.push_back(ArenaEvent::Destroyed {
                    vehicle: target.id,
                    position: target.position,
                });
            }
        }
    }

    hits
}
