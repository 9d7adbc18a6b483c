use crate::particles::ParticleSystem;
use crate::render::Renderer;
use log::info;
use macroquad::prelude::{
    KeyCode, MouseButton, get_frame_time, is_key_down, is_key_pressed, is_mouse_button_down,
    is_mouse_button_pressed, mouse_position, next_frame, screen_width,
};
use wreckfield::arena::Arena;
use wreckfield::config::ArenaConfig;
use wreckfield::error::ArenaError;
use wreckfield::motion::ControlInput;

// Fraction of the screen width a drag must cover for full steering
const DRAG_SPAN: f32 = 0.25;

/// Normalized steering from a horizontal drag, positive to the right.
fn drag_steering(origin_x: f32, current_x: f32, screen_width: f32) -> f32 {
    let span = screen_width * DRAG_SPAN;
    if span <= 0.0 {
        return f32::NAN;
    }
    ((current_x - origin_x) / span).clamp(-1.0, 1.0)
}

/// One interactive session: owns the arena and everything that only exists to
/// present it.
pub struct Game {
    pub arena: Arena,
    pub particle_system: ParticleSystem,
    renderer: Renderer,
    auto_drive: bool,
    drag_origin: Option<f32>,
}

impl Game {
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        let arena = Arena::new(config)?;
        info!(
            "Arena ready: {} vehicles, {} hazard zones, seed {}",
            arena.vehicles().len(),
            arena.hazards().len(),
            arena.seed()
        );

        Ok(Game {
            arena,
            particle_system: ParticleSystem::new(),
            renderer: Renderer::new(),
            auto_drive: false,
            drag_origin: None,
        })
    }

    /// Runs the main loop: one simulation tick per rendered frame.
    pub async fn run(&mut self) {
        info!("Starting main loop...");

        while !Renderer::window_should_close() {
            if self.arena.is_game_over() {
                if is_key_pressed(KeyCode::Space) {
                    self.particle_system.clear();
                    self.arena.restart();
                }
            } else {
                let input = self.read_controls();
                self.arena.tick(input);
            }

            for event in self.arena.drain_events() {
                self.particle_system.spawn_for_event(&event);
            }
            self.particle_system.update(get_frame_time());

            self.renderer
                .draw_frame(&self.arena, &self.particle_system, self.auto_drive);
            next_frame().await;
        }

        info!(
            "Exiting Wreckfield after Tick {}, score {}.",
            self.arena.tick_count(),
            self.arena.score()
        );
    }

    // Keyboard drives, a horizontal mouse drag steers
    fn read_controls(&mut self) -> ControlInput {
        if is_key_pressed(KeyCode::A) {
            self.auto_drive = !self.auto_drive;
            info!("Auto-drive {}", if self.auto_drive { "on" } else { "off" });
        }

        let input = ControlInput {
            accelerate: is_key_down(KeyCode::Up),
            brake: is_key_down(KeyCode::Down),
            turn_left: is_key_down(KeyCode::Left),
            turn_right: is_key_down(KeyCode::Right),
            fire: is_key_down(KeyCode::Space),
            auto_drive: self.auto_drive,
        };

        let (mouse_x, _) = mouse_position();
        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag_origin = Some(mouse_x);
        } else if !is_mouse_button_down(MouseButton::Left) {
            self.drag_origin = None;
        }

        match self.drag_origin {
            Some(origin) => input.with_steering(drag_steering(origin, mouse_x, screen_width())),
            None => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_steering_is_normalized() {
        assert_eq!(drag_steering(500.0, 500.0, 1000.0), 0.0);
        assert_eq!(drag_steering(500.0, 625.0, 1000.0), 0.5);
        assert_eq!(drag_steering(500.0, 0.0, 1000.0), -1.0);
        assert!(drag_steering(0.0, 10.0, 0.0).is_nan());
    }

    #[test]
    fn test_drag_right_turns_right() {
        let input = ControlInput::default().with_steering(drag_steering(100.0, 300.0, 1000.0));
        assert!(input.turn_right);
        assert!(!input.turn_left);
    }
}
