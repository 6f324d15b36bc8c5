use crate::config;
use crate::debug_motion;
use crate::debug_robot;
use crate::debug_sensor;
use crate::motion_behavior;
use crate::motion_handler::{MotionHandler, SteeringPolicy, clamp_vel};
use crate::sensor::Sensor;
use crate::types::{EntityType, Pose, RgbColor};

// An autonomous robot. Two light sensors and two food sensors sit on the
// front rim at 40 degrees either side of the heading; their readings feed
// the steering policy picked by the behavior flag. Hunger builds over time
// and is only cleared by driving close enough to food.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    pub id: u32,
    pub pose: Pose,
    pub prev_pose: Pose, // Pose at the previous tick, for render interpolation
    pub radius: f64,
    pub color: RgbColor,
    pub motion_handler: MotionHandler,
    pub lives: u32,
    pub tick_counter: u32, // Ticks since spawn or the last meal
    pub arcing: bool,      // Collision recovery arc in progress
    pub arc_timer: u32,
    pub hungry: bool,
    pub really_hungry: bool,
    pub behavior_flag: u32, // Odd steers by fear, even by exploration
    pub food_enabled: bool,
    pub left_light_sensor: Sensor,
    pub right_light_sensor: Sensor,
    pub left_food_sensor: Sensor,
    pub right_food_sensor: Sensor,
}

impl Robot {
    pub fn new(id: u32, behavior_flag: u32, pose: Pose, radius: f64) -> Self {
        let mut motion_handler = MotionHandler::new();
        motion_handler.set_velocity(config::ROBOT_INIT_SPEED, config::ROBOT_INIT_SPEED);
        let mut robot = Robot {
            id,
            pose,
            prev_pose: pose,
            radius,
            color: config::ROBOT_COLOR,
            motion_handler,
            lives: config::ROBOT_LIVES,
            tick_counter: 0,
            arcing: false,
            arc_timer: 0,
            hungry: false,
            really_hungry: false,
            behavior_flag,
            food_enabled: true,
            left_light_sensor: Sensor::light(),
            right_light_sensor: Sensor::light(),
            left_food_sensor: Sensor::food(),
            right_food_sensor: Sensor::food(),
        };
        robot.refresh_sensor_positions();
        robot
    }

    /// Mount point of the left sensor pair: 40 degrees counterclockwise of
    /// the heading, on the rim.
    pub fn pose_left_sensor(&self) -> Pose {
        let angle = (self.pose.heading - config::SENSOR_ANGLE_OFFSET).to_radians();
        Pose::new(
            self.pose.x + self.radius * angle.cos(),
            self.pose.y + self.radius * angle.sin(),
        )
    }

    /// Mount point of the right sensor pair: 40 degrees clockwise of the
    /// heading, on the rim.
    pub fn pose_right_sensor(&self) -> Pose {
        let angle = (self.pose.heading + config::SENSOR_ANGLE_OFFSET).to_radians();
        Pose::new(
            self.pose.x + self.radius * angle.cos(),
            self.pose.y + self.radius * angle.sin(),
        )
    }

    pub fn refresh_sensor_positions(&mut self) {
        let left = self.pose_left_sensor();
        let right = self.pose_right_sensor();
        self.left_light_sensor.position = left;
        self.left_food_sensor.position = left;
        self.right_light_sensor.position = right;
        self.right_food_sensor.position = right;
    }

    /// Advances the robot one tick: integrate the pose, clear the sensor
    /// accumulators for the new tick, and run the state machine.
    pub fn timestep_update(&mut self, dt: u32) {
        self.prev_pose = self.pose;
        self.pose = motion_behavior::update_pose(dt as f64, self.motion_handler.velocity, &self.pose);
        self.left_light_sensor.zero_reading();
        self.right_light_sensor.zero_reading();
        self.left_food_sensor.zero_reading();
        self.right_food_sensor.zero_reading();
        self.tick_counter += 1;
        self.state_update();
    }

    // Per-tick bookkeeping for the arc and hunger machinery.
    fn state_update(&mut self) {
        if self.arcing {
            self.arc_timer += 1;
            self.motion_handler
                .set_velocity(config::ARC_SPEED, config::ARC_SPEED);
            self.arc_movement();
        }
        if self.arc_timer == config::ARC_DURATION_TICKS {
            self.arc_timer = 0;
            self.arcing = false;
            debug_robot!(self.id, self.tick_counter, "arc complete");
        }
        if self.tick_counter == config::HUNGER_ONSET_TICK {
            self.hungry = true;
            debug_robot!(self.id, self.tick_counter, "hunger onset");
        }
        if !self.food_enabled {
            // Nothing to eat means nothing to crave.
            self.hungry = false;
        }
        if self.tick_counter >= config::REALLY_HUNGRY_TICK && self.hungry {
            if !self.really_hungry {
                debug_robot!(self.id, self.tick_counter, "really hungry, ignoring lights");
            }
            self.motion_handler
                .set_velocity(config::REALLY_HUNGRY_SPEED, config::REALLY_HUNGRY_SPEED);
            self.really_hungry = true;
        } else {
            self.really_hungry = false;
        }
        if self.hungry {
            if self.tick_counter < config::REALLY_HUNGRY_TICK {
                // Blink on tick parity to signal hunger.
                self.color = if self.tick_counter % 2 == 1 {
                    config::ROBOT_BLINK_COLOR_A
                } else {
                    config::ROBOT_BLINK_COLOR_B
                };
            } else {
                self.color = config::ROBOT_STARVED_COLOR;
            }
        }
    }

    // One tick of the recovery arc: pick up speed and keep the sensor
    // mounts tracking the moving pose.
    fn arc_movement(&mut self) {
        self.motion_handler.increase_speed();
        self.refresh_sensor_positions();
    }

    fn begin_arc(&mut self) {
        self.arcing = true;
        self.arc_timer = 0;
        self.pose.heading =
            (self.pose.heading + config::COLLISION_HEADING_JUMP).rem_euclid(360.0);
        self.lives = self.lives.saturating_sub(1);
        debug_robot!(
            self.id,
            self.tick_counter,
            "collision, arcing away at heading {:.1}",
            self.pose.heading
        );
    }

    pub fn handle_wall_collision(&mut self) {
        self.begin_arc();
    }

    /// Robots shove past lights and food without reacting; only another
    /// robot triggers the recovery arc.
    pub fn handle_entity_collision(&mut self, other: EntityType) {
        if other == EntityType::Robot {
            self.begin_arc();
        }
    }

    /// Reacts to one other entity this tick. Light readings pick the wheel
    /// velocities through the robot's steering policy unless it is really
    /// hungry; food either gets eaten or, while hungry, chased down with
    /// the aggression policy. Returns true when this call consumed food.
    pub fn decide_motion(
        &mut self,
        other_type: EntityType,
        other_pose: Pose,
        other_radius: f64,
    ) -> bool {
        self.refresh_sensor_positions();
        let mut consumed = false;
        match other_type {
            EntityType::Light => {
                if !self.really_hungry {
                    self.left_light_sensor.calculate_reading(&other_pose);
                    self.right_light_sensor.calculate_reading(&other_pose);
                    let l = self.left_light_sensor.reading;
                    let r = self.right_light_sensor.reading;
                    let policy = if self.behavior_flag % 2 == 1 {
                        SteeringPolicy::Fear
                    } else {
                        SteeringPolicy::Exploratory
                    };
                    let v = policy.update_velocity(l, r, self.motion_handler.max_speed);
                    self.motion_handler.velocity = v;
                    debug_motion!(
                        self.id,
                        self.tick_counter,
                        "{:?} readings ({:.3}, {:.3}) -> wheels ({:.2}, {:.2})",
                        policy,
                        l,
                        r,
                        v.left,
                        v.right
                    );
                }
            }
            EntityType::Food => {
                if self.is_food_consumed(&other_pose, other_radius) {
                    self.hungry = false;
                    self.tick_counter = 0;
                    self.color = config::ROBOT_COLOR;
                    self.motion_handler
                        .set_velocity(config::ROBOT_INIT_SPEED, config::ROBOT_INIT_SPEED);
                    consumed = true;
                    debug_robot!(self.id, "ate food, hunger cleared");
                } else if self.hungry {
                    self.left_food_sensor.calculate_reading(&other_pose);
                    self.right_food_sensor.calculate_reading(&other_pose);
                    let l = self.left_food_sensor.reading;
                    let r = self.right_food_sensor.reading;
                    debug_sensor!(
                        self.id,
                        self.tick_counter,
                        "food readings ({:.3}, {:.3})",
                        l,
                        r
                    );
                    let v = SteeringPolicy::Aggression.update_velocity(
                        l,
                        r,
                        self.motion_handler.max_speed,
                    );
                    self.motion_handler.velocity = v;
                }
            }
            EntityType::Robot => {}
        }
        // Hungry or arcing robots get a straight-line speed boost. The left
        // wheel value seeds both wheels, matching the long-standing motion
        // tuning.
        if self.hungry || self.arcing {
            let boosted = clamp_vel(
                self.motion_handler.velocity.left + config::HUNGER_BOOST,
                self.motion_handler.max_speed,
            );
            self.motion_handler.set_velocity(boosted, boosted);
        }
        consumed
    }

    pub fn is_food_consumed(&self, other_pose: &Pose, other_radius: f64) -> bool {
        self.pose.distance_to(other_pose)
            <= self.radius + other_radius + config::FOOD_CAPTURE_MARGIN
    }

    /// A robot that has been hungry too long is beyond saving.
    pub fn starving(&self) -> bool {
        self.tick_counter >= config::STARVING_TICK && self.hungry
    }

    pub fn set_sensitivity_to_light(&mut self, base: f64) {
        self.left_light_sensor.base = base;
        self.right_light_sensor.base = base;
    }

    pub fn set_food_enabled(&mut self, enabled: bool) {
        self.food_enabled = enabled;
    }

    /// Returns the robot to spawn state at a fresh pose and radius. Lives
    /// carry across resets.
    pub fn reset(&mut self, pose: Pose, radius: f64) {
        self.pose = pose;
        self.prev_pose = pose;
        self.radius = radius;
        self.color = config::ROBOT_COLOR;
        self.motion_handler.max_speed = config::ROBOT_MAX_SPEED;
        self.motion_handler
            .set_velocity(config::ROBOT_INIT_SPEED, config::ROBOT_INIT_SPEED);
        self.tick_counter = 0;
        self.arcing = false;
        self.arc_timer = 0;
        self.hungry = false;
        self.really_hungry = false;
        self.left_light_sensor.zero_reading();
        self.right_light_sensor.zero_reading();
        self.left_food_sensor.zero_reading();
        self.right_food_sensor.zero_reading();
        self.refresh_sensor_positions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn robot_at(x: f64, y: f64, behavior_flag: u32) -> Robot {
        Robot::new(0, behavior_flag, Pose::new(x, y), 10.0)
    }

    #[test]
    fn test_new_robot_defaults() {
        let robot = robot_at(600.0, 600.0, 1);
        assert_approx_eq!(robot.motion_handler.velocity.left, 5.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 5.0);
        assert_eq!(robot.lives, config::ROBOT_LIVES);
        assert_eq!(robot.color, config::ROBOT_COLOR);
        assert!(!robot.hungry);
        assert!(!robot.arcing);
        assert!(robot.food_enabled);
    }

    #[test]
    fn test_sensor_mounts_straddle_heading() {
        let robot = robot_at(0.0, 0.0, 1);
        let left = robot.pose_left_sensor();
        let right = robot.pose_right_sensor();
        let expected_x = 10.0 * 40.0f64.to_radians().cos();
        let expected_y = 10.0 * 40.0f64.to_radians().sin();
        assert_approx_eq!(left.x, expected_x, 1e-9);
        assert_approx_eq!(left.y, -expected_y, 1e-9);
        assert_approx_eq!(right.x, expected_x, 1e-9);
        assert_approx_eq!(right.y, expected_y, 1e-9);
    }

    #[test]
    fn test_timestep_advances_and_clears_readings() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.left_light_sensor.reading = 123.0;
        robot.right_food_sensor.reading = 456.0;
        robot.timestep_update(1);
        assert_approx_eq!(robot.pose.x, 105.0);
        assert_approx_eq!(robot.left_light_sensor.reading, 0.0);
        assert_approx_eq!(robot.right_food_sensor.reading, 0.0);
        assert_eq!(robot.tick_counter, 1);
        assert_approx_eq!(robot.prev_pose.x, 100.0);
    }

    #[test]
    fn test_hunger_starts_at_onset_tick() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.tick_counter = config::HUNGER_ONSET_TICK - 1;
        robot.timestep_update(1);
        assert!(robot.hungry);
    }

    #[test]
    fn test_no_hunger_when_food_disabled() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.set_food_enabled(false);
        robot.tick_counter = config::HUNGER_ONSET_TICK - 1;
        robot.timestep_update(1);
        assert!(!robot.hungry);
        robot.tick_counter = config::STARVING_TICK;
        robot.timestep_update(1);
        assert!(!robot.hungry);
        assert!(!robot.starving());
    }

    #[test]
    fn test_hunger_blink_follows_tick_parity() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.hungry = true;
        robot.tick_counter = 700; // next tick is odd
        robot.timestep_update(1);
        assert_eq!(robot.color, config::ROBOT_BLINK_COLOR_A);
        robot.timestep_update(1);
        assert_eq!(robot.color, config::ROBOT_BLINK_COLOR_B);
    }

    #[test]
    fn test_really_hungry_threshold() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.hungry = true;
        robot.tick_counter = config::REALLY_HUNGRY_TICK - 1;
        robot.timestep_update(1);
        assert!(robot.really_hungry);
        assert_approx_eq!(robot.motion_handler.velocity.left, config::REALLY_HUNGRY_SPEED);
        assert_approx_eq!(robot.motion_handler.velocity.right, config::REALLY_HUNGRY_SPEED);
        assert_eq!(robot.color, config::ROBOT_STARVED_COLOR);
    }

    #[test]
    fn test_really_hungry_clears_when_fed() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.hungry = true;
        robot.tick_counter = config::REALLY_HUNGRY_TICK;
        robot.state_update();
        assert!(robot.really_hungry);
        // Eating resets the clock, the next state pass drops the flag.
        robot.decide_motion(EntityType::Food, Pose::new(105.0, 100.0), 20.0);
        assert!(!robot.hungry);
        robot.timestep_update(1);
        assert!(!robot.really_hungry);
    }

    #[test]
    fn test_starving_needs_hunger_and_time() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.tick_counter = config::STARVING_TICK;
        assert!(!robot.starving());
        robot.hungry = true;
        assert!(robot.starving());
        robot.tick_counter = config::STARVING_TICK - 1;
        assert!(!robot.starving());
    }

    #[test]
    fn test_wall_collision_starts_arc() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.handle_wall_collision();
        assert!(robot.arcing);
        assert_eq!(robot.arc_timer, 0);
        assert_approx_eq!(robot.pose.heading, config::COLLISION_HEADING_JUMP);
        assert_eq!(robot.lives, config::ROBOT_LIVES - 1);
    }

    #[test]
    fn test_only_robot_contact_starts_arc() {
        let mut robot = robot_at(100.0, 100.0, 1);
        robot.handle_entity_collision(EntityType::Light);
        robot.handle_entity_collision(EntityType::Food);
        assert!(!robot.arcing);
        robot.handle_entity_collision(EntityType::Robot);
        assert!(robot.arcing);
    }

    #[test]
    fn test_arc_runs_for_its_duration() {
        let mut robot = robot_at(400.0, 400.0, 1);
        robot.handle_wall_collision();
        for _ in 0..(config::ARC_DURATION_TICKS - 1) {
            robot.state_update();
            assert!(robot.arcing);
            // Pinned to arc speed, then one increase.
            assert_approx_eq!(robot.motion_handler.velocity.left, config::ARC_SPEED + 1.0);
            assert_approx_eq!(robot.motion_handler.velocity.right, config::ARC_SPEED + 1.0);
        }
        robot.state_update();
        assert!(!robot.arcing);
        assert_eq!(robot.arc_timer, 0);
    }

    #[test]
    fn test_fear_maxes_out_near_light() {
        // Fear wiring with a light close by saturates both sensors and
        // drives both wheels at max speed.
        let mut robot = robot_at(600.0, 600.0, 1);
        robot.decide_motion(EntityType::Light, Pose::new(620.0, 620.0), config::LIGHT_RADIUS);
        assert_approx_eq!(robot.motion_handler.velocity.left, 10.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 10.0);
    }

    #[test]
    fn test_exploratory_cruises_far_from_light() {
        let mut robot = robot_at(600.0, 600.0, 2);
        robot.decide_motion(EntityType::Light, Pose::new(1250.0, 600.0), config::LIGHT_RADIUS);
        assert_approx_eq!(robot.motion_handler.velocity.left, 10.0, 1e-6);
        assert_approx_eq!(robot.motion_handler.velocity.right, 10.0, 1e-6);
    }

    #[test]
    fn test_really_hungry_ignores_light() {
        let mut robot = robot_at(600.0, 600.0, 2);
        robot.hungry = true;
        robot.really_hungry = true;
        robot.motion_handler.set_velocity(7.0, 7.0);
        robot.decide_motion(EntityType::Light, Pose::new(620.0, 620.0), config::LIGHT_RADIUS);
        assert_approx_eq!(robot.left_light_sensor.reading, 0.0);
        assert_approx_eq!(robot.right_light_sensor.reading, 0.0);
        // Only the hunger boost touched the wheels.
        assert_approx_eq!(robot.motion_handler.velocity.left, 10.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 10.0);
    }

    #[test]
    fn test_eating_resets_hunger_state() {
        let mut robot = robot_at(600.0, 600.0, 1);
        robot.hungry = true;
        robot.tick_counter = 1000;
        robot.color = config::ROBOT_BLINK_COLOR_A;
        let consumed = robot.decide_motion(EntityType::Food, Pose::new(620.0, 620.0), 20.0);
        assert!(consumed);
        assert!(!robot.hungry);
        assert_eq!(robot.tick_counter, 0);
        assert_eq!(robot.color, config::ROBOT_COLOR);
        assert_approx_eq!(robot.motion_handler.velocity.left, config::ROBOT_INIT_SPEED);
        assert_approx_eq!(robot.motion_handler.velocity.right, config::ROBOT_INIT_SPEED);
    }

    #[test]
    fn test_hungry_robot_chases_food() {
        let mut robot = robot_at(600.0, 600.0, 1);
        robot.hungry = true;
        robot.tick_counter = 1000;
        let consumed = robot.decide_motion(EntityType::Food, Pose::new(700.0, 600.0), 20.0);
        assert!(!consumed);
        assert!(robot.left_food_sensor.reading > 0.0);
        assert!(robot.right_food_sensor.reading > 0.0);
        assert_approx_eq!(robot.left_light_sensor.reading, 0.0);
        // Aggression saturates toward nearby food, then the hunger boost
        // holds the pair at max.
        assert_approx_eq!(robot.motion_handler.velocity.left, 10.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 10.0);
    }

    #[test]
    fn test_sated_robot_ignores_distant_food() {
        let mut robot = robot_at(600.0, 600.0, 1);
        let consumed = robot.decide_motion(EntityType::Food, Pose::new(700.0, 600.0), 20.0);
        assert!(!consumed);
        assert_approx_eq!(robot.left_food_sensor.reading, 0.0);
        assert_approx_eq!(robot.motion_handler.velocity.left, 5.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 5.0);
    }

    #[test]
    fn test_boost_seeds_both_wheels_from_left() {
        let mut robot = robot_at(600.0, 600.0, 1);
        robot.arcing = true;
        robot.motion_handler.set_velocity(3.0, 9.0);
        robot.decide_motion(EntityType::Robot, Pose::new(900.0, 900.0), 10.0);
        assert_approx_eq!(robot.motion_handler.velocity.left, 8.0);
        assert_approx_eq!(robot.motion_handler.velocity.right, 8.0);
    }

    #[test]
    fn test_exact_capture_margin_consumes() {
        let robot = robot_at(0.0, 0.0, 1);
        // radius 10 + radius 20 + margin 5
        assert!(robot.is_food_consumed(&Pose::new(35.0, 0.0), 20.0));
        assert!(!robot.is_food_consumed(&Pose::new(35.1, 0.0), 20.0));
    }

    #[test]
    fn test_sensitivity_applies_to_light_sensors_only() {
        let mut robot = robot_at(0.0, 0.0, 1);
        robot.set_sensitivity_to_light(1.01);
        assert_approx_eq!(robot.left_light_sensor.base, 1.01);
        assert_approx_eq!(robot.right_light_sensor.base, 1.01);
        assert_approx_eq!(robot.left_food_sensor.base, config::DEFAULT_LIGHT_SENSITIVITY);
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut robot = robot_at(600.0, 600.0, 1);
        robot.hungry = true;
        robot.really_hungry = true;
        robot.arcing = true;
        robot.arc_timer = 7;
        robot.tick_counter = 2900;
        robot.color = config::ROBOT_STARVED_COLOR;
        robot.motion_handler.set_velocity(9.0, 9.0);
        robot.left_light_sensor.reading = 800.0;
        robot.reset(Pose::new(50.0, 50.0), 12.0);
        assert!(!robot.hungry);
        assert!(!robot.really_hungry);
        assert!(!robot.arcing);
        assert_eq!(robot.arc_timer, 0);
        assert_eq!(robot.tick_counter, 0);
        assert_eq!(robot.color, config::ROBOT_COLOR);
        assert_approx_eq!(robot.radius, 12.0);
        assert_approx_eq!(robot.motion_handler.velocity.left, config::ROBOT_INIT_SPEED);
        assert_approx_eq!(robot.left_light_sensor.reading, 0.0);
        assert_approx_eq!(robot.pose.x, 50.0);
    }
}
