use crate::particles::ParticleSystem;
use macroquad::prelude::*;
use wreckfield::arena::Arena;
use wreckfield::config::{self, VIEW_HEIGHT_UNITS};
use wreckfield::utils;
use wreckfield::vehicle::Vehicle;

const GRID_SPACING: f32 = config::HAZARD_CELL_SIZE * 2.0;
const PLAYER_COLOR: Color = Color::new(0.3, 0.7, 1.0, 1.0);
const HAZARD_COLOR: Color = Color::new(0.6, 0.1, 0.6, 0.6);

// Ground-plane point (x, z) in the world camera's space
fn ground(x: f32, z: f32) -> Vec2 {
    Vec2::new(x, z)
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Green at full health, through yellow, to red
fn health_gradient_color(ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio > 0.5 {
        let t = (ratio - 0.5) * 2.0;
        Color::new(1.0 - t, 1.0, 0.0, 1.0)
    } else {
        let t = ratio * 2.0;
        Color::new(1.0, t, 0.0, 1.0)
    }
}

/// Top-down view that follows the player.
///
/// The world x axis is mirrored on screen so that a left turn (positive rotation)
/// moves the car toward the left edge, with +z pointing up.
pub struct Renderer {
    view_height: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            view_height: VIEW_HEIGHT_UNITS,
        }
    }

    fn world_camera(&self, focus: Vec2) -> Camera2D {
        let aspect = screen_width() / screen_height().max(1.0);
        Camera2D {
            target: focus,
            zoom: vec2(-2.0 / (self.view_height * aspect), 2.0 / self.view_height),
            ..Default::default()
        }
    }

    pub fn draw_frame(&self, arena: &Arena, particles: &ParticleSystem, auto_drive: bool) {
        clear_background(Color::from_rgba(24, 26, 30, 255));

        let player = arena.player();
        let focus = ground(player.position.x, player.position.y);
        set_camera(&self.world_camera(focus));

        let half_w = self.view_height * screen_width() / screen_height().max(1.0) / 2.0;
        let half_h = self.view_height / 2.0;
        let visible = Rect::new(focus.x - half_w, focus.y - half_h, half_w * 2.0, half_h * 2.0);

        Self::draw_ground(visible, arena.config().extent);
        Self::draw_hazards(arena, visible);
        for vehicle in arena.vehicles() {
            Self::draw_vehicle(vehicle);
        }
        Self::draw_projectiles(arena);
        particles.draw();

        set_default_camera();
        self.draw_hud(arena, auto_drive);

        if arena.is_game_over() {
            self.draw_announcement("GAME OVER", &format!("Score {}", arena.score()));
        }
    }

    fn draw_ground(visible: Rect, extent: f32) {
        let grid_color = Color::from_rgba(40, 44, 52, 255);
        let start_x = (visible.x / GRID_SPACING).floor() * GRID_SPACING;
        let start_z = (visible.y / GRID_SPACING).floor() * GRID_SPACING;

        let mut x = start_x;
        while x <= visible.right() {
            draw_line(x, visible.y, x, visible.bottom(), 0.05, grid_color);
            x += GRID_SPACING;
        }
        let mut z = start_z;
        while z <= visible.bottom() {
            draw_line(visible.x, z, visible.right(), z, 0.05, grid_color);
            z += GRID_SPACING;
        }

        let half = extent / 2.0;
        draw_rectangle_lines(-half, -half, extent, extent, 0.5, GRAY);
    }

    fn draw_hazards(arena: &Arena, visible: Rect) {
        for zone in arena.hazards() {
            let size = zone.half_size * 2.0;
            let corner = ground(zone.center.x - zone.half_size, zone.center.y - zone.half_size);
            if visible.overlaps(&Rect::new(corner.x, corner.y, size, size)) {
                draw_rectangle(corner.x, corner.y, size, size, HAZARD_COLOR);
            }
        }
    }

    fn draw_vehicle(vehicle: &Vehicle) {
        let center = ground(vehicle.position.x, vehicle.position.y);
        let forward = utils::heading_vector(vehicle.heading);
        let nose = center + Vec2::new(forward.x, forward.y) * vehicle.radius * 1.4;

        let body_color = if vehicle.is_destroyed() {
            DARKGRAY
        } else if vehicle.is_player() {
            PLAYER_COLOR
        } else {
            health_gradient_color(vehicle.health / config::MAX_HEALTH)
        };

        draw_circle(center.x, center.y, vehicle.radius, faded_color(body_color, 0.85));
        draw_circle_lines(center.x, center.y, vehicle.radius, 0.15, WHITE);
        if !vehicle.is_destroyed() {
            draw_line(center.x, center.y, nose.x, nose.y, 0.3, WHITE);
        }

        if let Some(point) = vehicle.last_collision_point {
            draw_circle(point.x, point.y, 0.4, ORANGE);
        }
    }

    fn draw_projectiles(arena: &Arena) {
        for vehicle in arena.vehicles() {
            for projectile in &vehicle.active_projectiles {
                draw_circle(projectile.position.x, projectile.position.z, 0.3, YELLOW);
            }
        }
    }

    fn draw_hud(&self, arena: &Arena, auto_drive: bool) {
        let player = arena.player();
        let padding = 12.0;

        draw_text(&format!("SCORE {}", arena.score()), padding, 28.0, 28.0, WHITE);

        let bar_width = 200.0;
        let ratio = player.health / config::MAX_HEALTH;
        draw_rectangle(padding, 40.0, bar_width, 12.0, Color::from_rgba(54, 58, 70, 255));
        draw_rectangle(padding, 40.0, bar_width * ratio, 12.0, health_gradient_color(ratio));
        draw_text(
            &format!("HEALTH {:.0}", player.health),
            padding + bar_width + 10.0,
            51.0,
            18.0,
            LIGHTGRAY,
        );

        let alive = arena.vehicles().iter().filter(|v| !v.is_destroyed()).count();
        draw_text(&format!("VEHICLES {}", alive), padding, 74.0, 18.0, LIGHTGRAY);

        if auto_drive {
            draw_text("AUTO", padding, 96.0, 18.0, SKYBLUE);
        }

        draw_text(&format!("FPS {}", get_fps()), screen_width() - 80.0, 20.0, 18.0, GRAY);
    }

    fn draw_announcement(&self, msg: &str, detail: &str) {
        let rect_width = 420.0;
        let rect_height = 140.0;
        let x = screen_width() / 2.0 - rect_width / 2.0;
        let y = screen_height() / 2.0 - rect_height / 2.0;
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let dims = measure_text(msg, None, 40, 1.0);
        draw_text(msg, x + (rect_width - dims.width) / 2.0, y + 48.0, 40.0, RED);

        let dims = measure_text(detail, None, 26, 1.0);
        draw_text(detail, x + (rect_width - dims.width) / 2.0, y + 84.0, 26.0, WHITE);

        let hint = "Press SPACE to restart, ESC to exit";
        let dims = measure_text(hint, None, 18, 1.0);
        draw_text(hint, x + (rect_width - dims.width) / 2.0, y + rect_height - 16.0, 18.0, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}
