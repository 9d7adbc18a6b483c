//! Static damage zones laid over the ground grid.

use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

use crate::config;
use crate::events::ArenaEvent;
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardZone {
    pub center: Vec2,
    pub half_size: f32,
    pub damage_per_tick: f32,
}

impl HazardZone {
    /// True when `point` is strictly inside the zone's radius.
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.half_size
    }
}

/// Scans the ground grid covering `[-extent/2, extent/2]` on both axes and turns
/// each cell into a hazard with probability `density`.
pub fn generate<R: Rng>(extent: f32, density: f64, rng: &mut R) -> Vec<HazardZone> {
    let cell = config::HAZARD_CELL_SIZE;
    let half_extent = extent / 2.0;
    let steps = (extent / cell).floor() as i32;
    let density = density.clamp(0.0, 1.0);

    let mut zones = Vec::new();
    for ix in 0..=steps {
        let x = -half_extent + ix as f32 * cell;
        for iz in 0..=steps {
            let z = -half_extent + iz as f32 * cell;
            if rng.gen_bool(density) {
                zones.push(HazardZone {
                    center: Vec2::new(x + cell / 2.0, z + cell / 2.0),
                    half_size: cell / 2.0,
                    damage_per_tick: config::HAZARD_DAMAGE_PER_TICK,
                });
            }
        }
    }

    log::info!(
        "Placed {} hazard zones over a {}x{} grid.",
        zones.len(),
        steps + 1,
        steps + 1
    );
    zones
}

/// Damages `vehicle` once for every zone it stands in and returns the total taken.
/// Destroyed vehicles are skipped.
pub fn apply(zones: &[HazardZone], vehicle: &mut Vehicle, events: &mut VecDeque<ArenaEvent>) -> f32 {
    if vehicle.is_destroyed() {
        return 0.0;
    }

    let mut damage = 0.0;
    let mut destroyed = false;
    for (index, zone) in zones.iter().enumerate() {
        if zone.contains(vehicle.position) {
            damage += zone.damage_per_tick;
            destroyed |= vehicle.apply_damage(zone.damage_per_tick);
            events.push_back(ArenaEvent::HazardContact { zone: index });
            crate::debug_hazard!(
                vehicle.id,
                "Inside hazard {} at ({:.1}, {:.1}), health {:.2}",
                index,
                zone.center.x,
                zone.center.y,
                vehicle.health
            );
        }
    }

    if destroyed {
        events.push_back(ArenaEvent::Destroyed {
            vehicle: vehicle.id,
            position: vehicle.position,
        });
    }
    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn zone_at(x: f32, z: f32) -> HazardZone {
        HazardZone {
            center: Vec2::new(x, z),
            half_size: 2.5,
            damage_per_tick: 0.2,
        }
    }

    #[test]
    fn test_generate_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(100.0, 0.0, &mut rng).is_empty());

        // 100 / 5 = 20 steps, inclusive on both ends
        let zones = generate(100.0, 1.0, &mut rng);
        assert_eq!(zones.len(), 21 * 21);
        assert_eq!(zones[0].center, Vec2::new(-47.5, -47.5));
        assert_eq!(zones[0].half_size, 2.5);
        assert_eq!(zones[0].damage_per_tick, config::HAZARD_DAMAGE_PER_TICK);
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let a = generate(200.0, 0.1, &mut StdRng::seed_from_u64(9));
        let b = generate(200.0, 0.1, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_damage_is_continuous_per_tick() {
        let zones = vec![zone_at(0.0, 0.0)];
        let mut player = Vehicle::player();
        let mut events = VecDeque::new();

        for _ in 0..10 {
            apply(&zones, &mut player, &mut events);
        }
        assert_approx_eq!(player.health, config::MAX_HEALTH - 2.0, 1e-4);
        assert_eq!(events.len(), 10);
    }

    #[test]
    fn test_overlapping_zones_stack() {
        let zones = vec![zone_at(1.0, 0.0), zone_at(-1.0, 0.0), zone_at(50.0, 50.0)];
        let mut player = Vehicle::player();
        let mut events = VecDeque::new();

        let taken = apply(&zones, &mut player, &mut events);
        assert_approx_eq!(taken, 0.4, 1e-6);
        assert_approx_eq!(player.health, config::MAX_HEALTH - 0.4, 1e-4);
        assert_eq!(
            events.into_iter().collect::<Vec<_>>(),
            vec![
                ArenaEvent::HazardContact { zone: 0 },
                ArenaEvent::HazardContact { zone: 1 }
            ]
        );
    }

    #[test]
    fn test_outside_zone_is_safe() {
        let zones = vec![zone_at(2.5, 0.0)];
        let mut player = Vehicle::player();
        let mut events = VecDeque::new();

        assert_eq!(apply(&zones, &mut player, &mut events), 0.0);
        assert_eq!(player.health, config::MAX_HEALTH);
        assert!(events.is_empty());
    }

    #[test]
    fn test_hazard_can_destroy_and_then_stops() {
        let zones = vec![zone_at(0.0, 0.0)];
        let mut player = Vehicle::player();
        player.health = 0.1;
        let mut events = VecDeque::new();

        apply(&zones, &mut player, &mut events);
        assert!(player.is_destroyed());
        assert_eq!(player.health, 0.0);
        assert!(matches!(events.back(), Some(ArenaEvent::Destroyed { vehicle: 0, .. })));

        events.clear();
        assert_eq!(apply(&zones, &mut player, &mut events), 0.0);
        assert!(events.is_empty());
    }
}
