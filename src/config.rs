//! Configuration constants for the robot arena simulation.

use crate::types::RgbColor;

// Arena
pub const ARENA_WIDTH: f64 = 1024.0; // Arena extent in world units (x)
pub const ARENA_HEIGHT: f64 = 768.0; // Arena extent in world units (y)
pub const WALL_MARGIN: f64 = 5.0; // Gap restored between a wall and an overlapping entity

// Random placement grid (factory)
pub const POSE_GRID_ORIGIN: f64 = 30.0; // First candidate coordinate on each axis
pub const POSE_GRID_STEP: f64 = 50.0; // Spacing between candidate coordinates
pub const POSE_GRID_COLS: u32 = 19; // Candidate columns across the arena
pub const POSE_GRID_ROWS: u32 = 14; // Candidate rows down the arena

// Robot
pub const ROBOT_MAX_SPEED: f64 = 10.0; // Upper wheel velocity clamp
pub const ROBOT_SPEED_FLOOR: f64 = 5.0; // Non-positive wheel velocities reset here
pub const ROBOT_INIT_SPEED: f64 = 5.0; // Both wheels at spawn and after eating
pub const ROBOT_MIN_RADIUS: u32 = 8; // Randomized body radius lower bound
pub const ROBOT_MAX_RADIUS: u32 = 14; // Randomized body radius upper bound (inclusive)
pub const ROBOT_SPEED_DELTA: f64 = 1.0; // Per-command speed increment
pub const ROBOT_TURN_DELTA: f64 = 1.0; // Per-command wheel differential
pub const ROBOT_LIVES: u32 = 9;
pub const WHEEL_BASE: f64 = 10.0; // Axle width for differential drive

// Collision recovery
pub const COLLISION_HEADING_JUMP: f64 = 170.0; // Degrees added to heading on impact
pub const ARC_DURATION_TICKS: u32 = 25; // Ticks a robot spends arcing away
pub const ARC_SPEED: f64 = 6.0; // Wheel velocity pinned while arcing

// Hunger timeline (ticks since last meal)
pub const HUNGER_ONSET_TICK: u32 = 620;
pub const REALLY_HUNGRY_TICK: u32 = 2400;
pub const STARVING_TICK: u32 = 3000;
pub const REALLY_HUNGRY_SPEED: f64 = 7.0; // Both wheels while really hungry
pub const HUNGER_BOOST: f64 = 5.0; // Added to wheel velocity while hungry or arcing
pub const FOOD_CAPTURE_MARGIN: f64 = 5.0; // Extra reach when eating

// Sensors
pub const SENSOR_ANGLE_OFFSET: f64 = 40.0; // Degrees off heading for left/right mounts
pub const SENSOR_READING_MAX: f64 = 1000.0;
pub const SENSOR_NUMERATOR: f64 = 1200.0;
pub const DEFAULT_LIGHT_SENSITIVITY: f64 = 1.08; // Falloff base, larger decays faster

// Light
pub const LIGHT_RADIUS: f64 = 30.0;
pub const LIGHT_SPEED: f64 = 5.0; // Both wheels while roaming

// Food
pub const FOOD_RADIUS: f64 = 20.0;

// Default population
pub const DEFAULT_ROBOT_COUNT: u32 = 5;
pub const DEFAULT_LIGHT_COUNT: u32 = 4;
pub const DEFAULT_FOOD_COUNT: u32 = 3;
pub const DEFAULT_FEAR_COUNT: u32 = 2; // Robots steering with the fear policy

// Entity colors
pub const ROBOT_COLOR: RgbColor = RgbColor::new(0, 0, 255);
pub const ROBOT_BLINK_COLOR_A: RgbColor = RgbColor::new(255, 0, 0); // Hunger blink, odd ticks
pub const ROBOT_BLINK_COLOR_B: RgbColor = RgbColor::new(0, 0, 255); // Hunger blink, even ticks
pub const ROBOT_STARVED_COLOR: RgbColor = RgbColor::new(255, 255, 0); // Really hungry and beyond
pub const LIGHT_COLOR: RgbColor = RgbColor::new(255, 255, 255);
pub const FOOD_COLOR: RgbColor = RgbColor::new(0, 128, 14);

// Simulation loop
pub const SIM_TICK_SECONDS: f64 = 0.05; // Wall-clock time per simulation tick

// Rendering
pub const WINDOW_WIDTH: i32 = 1024;
pub const WINDOW_HEIGHT: i32 = 768;
