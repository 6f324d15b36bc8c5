use crate::config;
use crate::types::WheelVelocity;

// Keeps a wheel velocity in the legal band. Non-positive commands reset
// to the floor speed rather than stopping or reversing the robot.
pub fn clamp_vel(vel: f64, max_speed: f64) -> f64 {
    if vel <= 0.0 {
        config::ROBOT_SPEED_FLOOR
    } else if vel > max_speed {
        max_speed
    } else {
        vel
    }
}

// How a robot's sensor pair is wired to its wheels. The connection scheme
// decides whether the robot runs from, wanders past, or charges a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringPolicy {
    Fear,        // Direct positive: each sensor drives its own wheel
    Exploratory, // Cross negative: each sensor brakes the opposite wheel
    Aggression,  // Cross positive: each sensor drives the opposite wheel
}

impl SteeringPolicy {
    /// Maps a left/right sensor reading pair to a new wheel velocity.
    /// Both wheels are fully overwritten and clamped.
    pub fn update_velocity(
        &self,
        left_reading: f64,
        right_reading: f64,
        max_speed: f64,
    ) -> WheelVelocity {
        match self {
            SteeringPolicy::Fear => WheelVelocity {
                left: clamp_vel(max_speed * 100.0 * left_reading / 0.5, max_speed),
                right: clamp_vel(max_speed * 100.0 * right_reading / 0.5, max_speed),
            },
            SteeringPolicy::Exploratory => WheelVelocity {
                left: clamp_vel(max_speed * (1.0 - right_reading / 0.5), max_speed),
                right: clamp_vel(max_speed * (1.0 - left_reading / 0.5), max_speed),
            },
            SteeringPolicy::Aggression => WheelVelocity {
                left: clamp_vel(max_speed * 100.0 * right_reading / 0.5, max_speed),
                right: clamp_vel(max_speed * 100.0 * left_reading / 0.5, max_speed),
            },
        }
    }
}

// Holds a mobile entity's wheel velocity pair and applies the direct
// movement commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionHandler {
    pub velocity: WheelVelocity,
    pub max_speed: f64,
    pub speed_delta: f64,
    pub angle_delta: f64,
}

impl MotionHandler {
    pub fn new() -> Self {
        MotionHandler {
            velocity: WheelVelocity::default(),
            max_speed: config::ROBOT_MAX_SPEED,
            speed_delta: config::ROBOT_SPEED_DELTA,
            angle_delta: config::ROBOT_TURN_DELTA,
        }
    }

    pub fn set_velocity(&mut self, left: f64, right: f64) {
        self.velocity = WheelVelocity::new(left, right);
    }

    fn clamp(&self, vel: f64) -> f64 {
        clamp_vel(vel, self.max_speed)
    }

    pub fn turn_left(&mut self) {
        self.velocity = WheelVelocity {
            left: self.clamp(self.velocity.left - self.angle_delta),
            right: self.clamp(self.velocity.right + self.angle_delta),
        };
    }

    pub fn turn_right(&mut self) {
        self.velocity = WheelVelocity {
            left: self.clamp(self.velocity.left + self.angle_delta),
            right: self.clamp(self.velocity.right - self.angle_delta),
        };
    }

    pub fn increase_speed(&mut self) {
        self.velocity = WheelVelocity {
            left: self.clamp(self.velocity.left + self.speed_delta),
            right: self.clamp(self.velocity.right + self.speed_delta),
        };
    }

    pub fn decrease_speed(&mut self) {
        self.velocity = WheelVelocity {
            left: self.clamp(self.velocity.left - self.speed_delta),
            right: self.clamp(self.velocity.right - self.speed_delta),
        };
    }
}

impl Default for MotionHandler {
    fn default() -> Self {
        MotionHandler::new()
    }
}
