use crate::config;
use crate::motion_behavior;
use crate::motion_handler::MotionHandler;
use crate::types::{EntityType, Pose, RgbColor};

// A roaming light source. Lights drift in straight lines and back out of
// collisions with walls or each other in a scripted reverse arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub id: u32,
    pub pose: Pose,
    pub prev_pose: Pose, // Pose at the previous tick, for render interpolation
    pub radius: f64,
    pub color: RgbColor,
    pub motion_handler: MotionHandler,
}

impl Light {
    pub fn new(id: u32, pose: Pose) -> Self {
        let mut motion_handler = MotionHandler::new();
        motion_handler.set_velocity(config::LIGHT_SPEED, config::LIGHT_SPEED);
        Light {
            id,
            pose,
            prev_pose: pose,
            radius: config::LIGHT_RADIUS,
            color: config::LIGHT_COLOR,
            motion_handler,
        }
    }

    pub fn timestep_update(&mut self, dt: u32) {
        self.prev_pose = self.pose;
        self.pose = motion_behavior::update_pose(dt as f64, self.motion_handler.velocity, &self.pose);
    }

    /// Walls always knock a light into its recovery arc.
    pub fn handle_wall_collision(&mut self) {
        self.arc_movement();
        self.motion_handler
            .set_velocity(config::LIGHT_SPEED, config::LIGHT_SPEED);
    }

    /// Lights bounce off each other but roll straight through robots and
    /// food, which resolve the overlap on their side.
    pub fn handle_entity_collision(&mut self, other: EntityType) {
        if other == EntityType::Light {
            self.arc_movement();
            self.motion_handler
                .set_velocity(config::LIGHT_SPEED, config::LIGHT_SPEED);
        }
    }

    // Backs the light out of a collision along a widening arc. The wheel
    // velocities are written raw here; the collision handler restores the
    // roaming speed once the script finishes.
    fn arc_movement(&mut self) {
        let mut dt: i32 = 10;
        let mut angle: f64 = 180.0;
        while dt >= 0 {
            self.pose.heading = (self.pose.heading + angle).rem_euclid(360.0);
            self.motion_handler.set_velocity(
                self.motion_handler.velocity.left - 1.0,
                self.motion_handler.velocity.right + 1.0,
            );
            self.pose =
                motion_behavior::update_pose(dt as f64, self.motion_handler.velocity, &self.pose);
            if angle > 0.0 {
                angle += 10.0;
            } else {
                angle = -angle + 10.0;
            }
            dt -= 1;
        }
    }

    pub fn reset(&mut self, pose: Pose) {
        self.pose = pose;
        self.prev_pose = pose;
        self.radius = config::LIGHT_RADIUS;
        self.color = config::LIGHT_COLOR;
        self.motion_handler
            .set_velocity(config::LIGHT_SPEED, config::LIGHT_SPEED);
    }
}
