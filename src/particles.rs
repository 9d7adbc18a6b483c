use macroquad::prelude::{Color, GRAY, ORANGE, RED, Vec2, YELLOW, draw_circle};
use rand::Rng;
use rand::rngs::ThreadRng;

use wreckfield::events::ArenaEvent;

// A single cosmetic particle in ground-plane coordinates (x, z)
#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: Color,
    lifetime: f32, // Seconds remaining
    initial_lifetime: f32,
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, color: Color, lifetime: f32) -> Self {
        Particle {
            position,
            velocity,
            color,
            lifetime,
            initial_lifetime: lifetime,
        }
    }

    fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.lifetime -= dt;

        let fade_factor = (self.lifetime / self.initial_lifetime).max(0.0);
        self.color.a = fade_factor;
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}

/// Fire-and-forget effects spawned from arena events. Purely visual; uses its own
/// RNG so it never disturbs the simulation.
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: ThreadRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem {
            particles: Vec::new(),
            rng: rand::thread_rng(),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // Spawns a radial burst of particles
    pub fn spawn_burst(&mut self, position: Vec2, color: Color, count: usize, max_speed: f32, lifetime: f32) {
        for _ in 0..count {
            let angle = self.rng.r#gen::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.r#gen::<f32>() * max_speed;
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let particle_lifetime = lifetime * (0.5 + self.rng.r#gen::<f32>() * 0.5);

            self.particles.push(Particle::new(position, velocity, color, particle_lifetime));
        }
    }

    /// Schedules the effect for one arena event, if it has one.
    pub fn spawn_for_event(&mut self, event: &ArenaEvent) {
        match *event {
            ArenaEvent::Fired { position, .. } => {
                self.spawn_burst(Vec2::new(position.x, position.z), YELLOW, 4, 6.0, 0.15);
            }
            ArenaEvent::Hit { point, .. } => {
                self.spawn_burst(Vec2::new(point.x, point.z), ORANGE, 12, 10.0, 0.4);
            }
            ArenaEvent::Collision { point, .. } => {
                self.spawn_burst(Vec2::new(point.x, point.y), GRAY, 8, 5.0, 0.3);
            }
            ArenaEvent::Destroyed { position, .. } => {
                self.spawn_burst(Vec2::new(position.x, position.y), RED, 40, 15.0, 1.0);
                self.spawn_burst(Vec2::new(position.x, position.y), ORANGE, 20, 8.0, 0.8);
            }
            ArenaEvent::Spawned { .. }
            | ArenaEvent::ProjectileExpired { .. }
            | ArenaEvent::HazardContact { .. }
            | ArenaEvent::GameOver { .. }
            | ArenaEvent::Restarted => {}
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_alive()
        });
    }

    /// Draws every live particle. Expects the world camera to be active.
    pub fn draw(&self) {
        for particle in &self.particles {
            draw_circle(particle.position.x, particle.position.y, 0.25, particle.color);
        }
    }
}
