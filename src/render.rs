use crate::arena::Arena;
use crate::config::{SENSOR_ANGLE_OFFSET, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::entity::Entity;
use crate::food::Food;
use crate::light::Light;
use crate::robot::Robot;
use crate::types::{GameStatus, Pose, RgbColor};
use crate::utils;
use macroquad::prelude::*;

const HUD_FONT_SIZE: f32 = 18.0;
const LABEL_FONT_SIZE: f32 = 14.0;

// Conversion helpers
fn pose_to_vec2(p: Pose) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

fn rgb_to_color(c: RgbColor, alpha: u8) -> Color {
    Color::from_rgba(c.r, c.g, c.b, alpha)
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

fn brighten_color(color: Color, amount: f32) -> Color {
    Color::new(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

// Handles rendering the simulation state using macroquad
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw_frame(
        &mut self,
        arena: &Arena,
        paused: bool,
        time_accumulator: f32,
        tick_duration: f32,
        announcement: Option<&str>,
    ) {
        clear_background(BLACK);

        let alpha = (time_accumulator / tick_duration).clamp(0.0, 1.0) as f64;
        Self::draw_arena_boundaries(arena);
        for entity in arena.entities() {
            match entity {
                Entity::Robot(robot) => Self::draw_robot(robot, alpha),
                Entity::Light(light) => Self::draw_light(light, alpha),
                Entity::Food(food) => Self::draw_food(food),
            }
            Self::draw_entity_label(entity, alpha);
        }
        Self::draw_hud(arena, paused);

        if let Some(msg) = announcement {
            Self::draw_announcement(msg);
        }
    }

    fn draw_arena_boundaries(arena: &Arena) {
        let (width, height) = arena.dimensions();
        draw_rectangle_lines(
            1.0,
            1.0,
            width as f32 - 2.0,
            height as f32 - 2.0,
            2.0,
            GRAY,
        );
    }

    fn draw_robot(robot: &Robot, alpha: f64) {
        let interp = utils::lerp_pose(robot.prev_pose, robot.pose, alpha);
        let center = pose_to_vec2(interp);
        let radius = robot.radius as f32;
        let body_color = rgb_to_color(robot.color, 255);

        draw_circle(center.x, center.y, radius, body_color);
        draw_circle_lines(center.x, center.y, radius, 1.5, brighten_color(body_color, 0.4));

        // Nose line showing the interpolated heading
        let heading_rad = (interp.heading as f32).to_radians();
        let nose = center + Vec2::new(heading_rad.cos(), heading_rad.sin()) * radius;
        draw_line(center.x, center.y, nose.x, nose.y, 2.0, WHITE);

        // Light and food sensors share the two rim mounts
        for offset in [-SENSOR_ANGLE_OFFSET, SENSOR_ANGLE_OFFSET] {
            let mount_rad = (interp.heading + offset).to_radians() as f32;
            let dot = center + Vec2::new(mount_rad.cos(), mount_rad.sin()) * radius;
            draw_circle(dot.x, dot.y, 2.5, GOLD);
            draw_circle(dot.x, dot.y, 1.2, LIME);
        }
    }

    fn draw_light(light: &Light, alpha: f64) {
        let interp = utils::lerp_pose(light.prev_pose, light.pose, alpha);
        let center = pose_to_vec2(interp);
        let radius = light.radius as f32;
        let fill = rgb_to_color(light.color, 235);

        draw_circle(center.x, center.y, radius, fill);
        draw_circle_lines(center.x, center.y, radius, 1.0, GRAY);
    }

    fn draw_food(food: &Food) {
        let center = pose_to_vec2(food.pose);
        let radius = food.radius as f32;
        let fill = rgb_to_color(food.color, 255);

        // Already-found food stays in place but fades out
        if food.captured {
            draw_circle(center.x, center.y, radius, faded_color(fill, 0.35));
            draw_circle_lines(center.x, center.y, radius, 1.0, faded_color(fill, 0.8));
        } else {
            draw_circle(center.x, center.y, radius, fill);
            draw_circle_lines(center.x, center.y, radius, 1.0, brighten_color(fill, 0.3));
        }
    }

    fn draw_entity_label(entity: &Entity, alpha: f64) {
        let interp = utils::lerp_pose(entity.prev_pose(), entity.pose(), alpha);
        let label = entity.name();
        let dims = measure_text(&label, None, LABEL_FONT_SIZE as u16, 1.0);
        draw_text(
            &label,
            interp.x as f32 - dims.width / 2.0,
            (interp.y - entity.radius()) as f32 - 6.0,
            LABEL_FONT_SIZE,
            LIGHTGRAY,
        );
    }

    fn draw_hud(arena: &Arena, paused: bool) {
        let status = if paused {
            "Paused"
        } else {
            match arena.game_status() {
                GameStatus::Playing => "Playing",
                GameStatus::Won => "Won",
                GameStatus::Lost => "Lost",
            }
        };
        let hud = format!(
            "{} | Tick {} | {} robots of {} entities | FPS {}",
            status,
            arena.tick(),
            arena.robots().count(),
            arena.entities().len(),
            get_fps()
        );
        draw_text(&hud, 10.0, 20.0, HUD_FONT_SIZE, WHITE);
    }

    fn draw_announcement(msg: &str) {
        let rect_width = 500.0;
        let rect_height = 120.0;
        let x = (WINDOW_WIDTH as f32 / 2.0) - (rect_width / 2.0);
        let y = (WINDOW_HEIGHT as f32 / 2.0) - (rect_height / 2.0);
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let font_size_announcement = 32.0;
        let text_dims = measure_text(msg, None, font_size_announcement as u16, 1.0);
        let text_x = x + (rect_width - text_dims.width) / 2.0;
        let text_y =
            y + (rect_height - font_size_announcement) / 2.0 + font_size_announcement * 0.7;
        draw_text(msg, text_x, text_y, font_size_announcement, WHITE);

        let hint = "Press ESC to exit";
        let hint_size = 18.0;
        let hint_dims = measure_text(hint, None, hint_size as u16, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        draw_text(hint, hint_x, y + rect_height - hint_size - 10.0, hint_size, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }

    pub fn is_key_down(key: KeyCode) -> bool {
        is_key_down(key)
    }

    pub fn is_key_pressed(key: KeyCode) -> bool {
        is_key_pressed(key)
    }
}
