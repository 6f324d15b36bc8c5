use crate::config;
use crate::types::{Pose, RgbColor};

// A stationary food source. Robots eat by closing within capture range;
// the arena records the capture on the flag here.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub id: u32,
    pub pose: Pose,
    pub radius: f64,
    pub color: RgbColor,
    pub captured: bool,
}

impl Food {
    pub fn new(id: u32, pose: Pose) -> Self {
        Food {
            id,
            pose,
            radius: config::FOOD_RADIUS,
            color: config::FOOD_COLOR,
            captured: false,
        }
    }

    /// Returns the food to an uneaten state at a fresh position.
    pub fn reset(&mut self, pose: Pose) {
        self.pose = pose;
        self.radius = config::FOOD_RADIUS;
        self.color = config::FOOD_COLOR;
        self.captured = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_new_food() {
        let food = Food::new(1, Pose::new(100.0, 200.0));
        assert_eq!(food.id, 1);
        assert!(!food.captured);
        assert_approx_eq!(food.radius, config::FOOD_RADIUS);
        assert_eq!(food.color, config::FOOD_COLOR);
    }

    #[test]
    fn test_reset_clears_capture() {
        let mut food = Food::new(1, Pose::new(100.0, 200.0));
        food.captured = true;
        food.reset(Pose::new(300.0, 400.0));
        assert!(!food.captured);
        assert_approx_eq!(food.pose.x, 300.0);
        assert_approx_eq!(food.pose.y, 400.0);
    }
}
