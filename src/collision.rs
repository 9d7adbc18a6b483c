//! Vehicle-vs-vehicle collision detection and response
//!
//! Every vehicle is a circle on the ground plane. Overlapping pairs are always
//! pushed apart; the velocity impulse is rate-limited by a per-vehicle cooldown so
//! a pair grinding against each other does not bounce every tick.

use glam::Vec2;

use crate::config;
use crate::events::ArenaEvent;
use crate::vehicle::Vehicle;
use std::collections::VecDeque;

/// Overlap between two vehicles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the second vehicle toward the first
    pub normal: Vec2,
    /// Penetration depth (sum of radii minus center distance)
    pub overlap: f32,
    /// Midpoint between the two centers
    pub point: Vec2,
}

/// Unit direction from `from` to `to`, falling back to +X when the points coincide.
fn separation_axis(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let distance = delta.length();
    if distance < config::CONTACT_EPSILON {
        (Vec2::X, distance)
    } else {
        (delta / distance, distance)
    }
}

/// Returns the contact if the two collision circles overlap.
pub fn detect(a: &Vehicle, b: &Vehicle) -> Option<Contact> {
    let (normal, distance) = separation_axis(b.position, a.position);
    let min_distance = a.radius + b.radius;

    if distance < min_distance {
        Some(Contact {
            normal,
            overlap: min_distance - distance,
            point: (a.position + b.position) * 0.5,
        })
    } else {
        None
    }
}

/// Pushes the pair apart by half the overlap each and records the contact point.
pub fn correct(a: &mut Vehicle, b: &mut Vehicle, contact: &Contact) {
    let push = contact.normal * contact.overlap * 0.5;
    a.position += push;
    b.position -= push;

    a.last_collision_point = Some(contact.point);
    b.last_collision_point = Some(contact.point);
}

/// Applies the elastic impulse between `a` (the initiator) and `b`.
///
/// Returns false when skipped: either vehicle still cooling down from an earlier
/// impact, or the relative velocity along the normal is positive.
pub fn resolve(a: &mut Vehicle, b: &mut Vehicle) -> bool {
    if a.collision_cooldown > 0 || b.collision_cooldown > 0 {
        return false;
    }

    let (normal, _) = separation_axis(a.position, b.position);

    let velocity_along_normal = (a.velocity - b.velocity).dot(normal);
    if velocity_along_normal > 0.0 {
        return false;
    }

    // Initiator's restitution only
    let restitution = a.elasticity;
    let impulse = -(1.0 + restitution) * velocity_along_normal / (1.0 / a.mass + 1.0 / b.mass);

    a.velocity -= normal * (impulse / a.mass) * config::IMPULSE_FACTOR;
    b.velocity += normal * (impulse / b.mass) * config::IMPULSE_FACTOR;

    a.is_colliding = true;
    b.is_colliding = true;
    a.collision_cooldown = config::COLLISION_COOLDOWN_TICKS;
    b.collision_cooldown = config::COLLISION_COOLDOWN_TICKS;

    let collision_angle = normal.y.atan2(normal.x);
    // Raw difference: headings are never normalized
    a.rotation_rate = (collision_angle - a.heading) * config::COLLISION_TURN_FACTOR;
    b.rotation_rate = (collision_angle - b.heading) * config::COLLISION_TURN_FACTOR;

    a.speed *= config::COLLISION_SPEED_RETAINED;
    b.speed *= config::COLLISION_SPEED_RETAINED;

    true
}

/// Mutable references to two distinct vehicles, `i < j`.
fn pair_mut(vehicles: &mut [Vehicle], i: usize, j: usize) -> (&mut Vehicle, &mut Vehicle) {
    let (head, tail) = vehicles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Runs detection, correction and impulse resolution over every live pair.
///
/// Pairs are visited in ascending index order (player first), so when one vehicle
/// overlaps several others only its first pair in that order can resolve an
/// impulse this tick; the cooldown it sets gates the rest.
pub fn resolve_all(vehicles: &mut [Vehicle], events: &mut VecDeque<ArenaEvent>) -> usize {
    let mut impacts = 0;

    for i in 0..vehicles.len() {
        for j in (i + 1)..vehicles.len() {
            if vehicles[i].is_destroyed() || vehicles[j].is_destroyed() {
                continue;
            }

            let (a, b) = pair_mut(vehicles, i, j);
            let Some(contact) = detect(a, b) else {
                continue;
            };

            correct(a, b, &contact);

            if resolve(a, b) {
                impacts += 1;
                crate::debug_collision!(
                    a.id,
                    "Impact with vehicle {} at ({:.2}, {:.2}), overlap {:.3}",
                    b.id,
                    contact.point.x,
                    contact.point.y,
                    contact.overlap
                );
                events.push_back(ArenaEvent::Collision {
                    a: a.id,
                    b: b.id,
                    point: contact.point,
                });
            }
        }
    }

    impacts
}
