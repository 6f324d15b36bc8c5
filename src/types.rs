//! Core value types shared across the simulation.

// A position plus facing direction in the arena.
// Heading is in degrees; call sites convert with .to_radians() for trig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64, // Degrees, kept in [0, 360) by movement code
}

impl Pose {
    pub fn new(x: f64, y: f64) -> Self {
        Pose {
            x,
            y,
            heading: 0.0,
        }
    }

    #[allow(dead_code)]
    pub fn with_heading(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }

    /// Euclidean distance between two poses (headings ignored).
    pub fn distance_to(&self, other: &Pose) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
        }
    }
}

// Left/right wheel speeds for a differential drive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelVelocity {
    pub left: f64,
    pub right: f64,
}

impl WheelVelocity {
    pub fn new(left: f64, right: f64) -> Self {
        WheelVelocity { left, right }
    }
}

// 8-bit RGB color, converted to the renderer's color type at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }
}

// Tag for the kinds of entity the arena can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Robot,
    Light,
    Food,
}

// Overall simulation outcome. Won is reserved for future win conditions;
// the current rules only ever settle on Lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    #[allow(dead_code)]
    Won,
    Lost,
}

// Commands accepted by the arena's control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncreaseSpeed,
    DecreaseSpeed,
    TurnLeft,
    TurnRight,
    Play,
    Pause,
    Reset,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_pose_distance() {
        let a = Pose::new(0.0, 0.0);
        let b = Pose::new(3.0, 4.0);
        assert_approx_eq!(a.distance_to(&b), 5.0);
        assert_approx_eq!(b.distance_to(&a), 5.0);
        assert_approx_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_pose_distance_ignores_heading() {
        let a = Pose::with_heading(10.0, 10.0, 90.0);
        let b = Pose::with_heading(10.0, 10.0, 270.0);
        assert_approx_eq!(a.distance_to(&b), 0.0);
    }
}
