use crate::food::Food;
use crate::light::Light;
use crate::robot::Robot;
use crate::types::{EntityType, Pose};

// Everything that can live in the arena. A closed set: collision dispatch
// and the query surface match on the variant instead of downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Robot(Robot),
    Light(Light),
    Food(Food),
}

impl Entity {
    #[allow(dead_code)]
    pub fn id(&self) -> u32 {
        match self {
            Entity::Robot(r) => r.id,
            Entity::Light(l) => l.id,
            Entity::Food(f) => f.id,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Entity::Robot(_) => EntityType::Robot,
            Entity::Light(_) => EntityType::Light,
            Entity::Food(_) => EntityType::Food,
        }
    }

    /// Display name for HUD and log lines.
    pub fn name(&self) -> String {
        match self {
            Entity::Robot(r) => format!("Robot {}", r.id),
            Entity::Light(l) => format!("Light {}", l.id),
            Entity::Food(f) => format!("Food {}", f.id),
        }
    }

    pub fn pose(&self) -> Pose {
        match self {
            Entity::Robot(r) => r.pose,
            Entity::Light(l) => l.pose,
            Entity::Food(f) => f.pose,
        }
    }

    /// Pose at the previous tick. Immobile entities report their current
    /// pose so interpolation is a no-op for them.
    pub fn prev_pose(&self) -> Pose {
        match self {
            Entity::Robot(r) => r.prev_pose,
            Entity::Light(l) => l.prev_pose,
            Entity::Food(f) => f.pose,
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            Entity::Robot(r) => r.radius,
            Entity::Light(l) => l.radius,
            Entity::Food(f) => f.radius,
        }
    }

    pub fn is_mobile(&self) -> bool {
        !matches!(self, Entity::Food(_))
    }

    /// Moves the entity without touching its heading. Used by the arena
    /// when it backs entities out of overlaps.
    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            Entity::Robot(r) => {
                r.pose.x = x;
                r.pose.y = y;
            }
            Entity::Light(l) => {
                l.pose.x = x;
                l.pose.y = y;
            }
            Entity::Food(f) => {
                f.pose.x = x;
                f.pose.y = y;
            }
        }
    }

    pub fn timestep_update(&mut self, dt: u32) {
        match self {
            Entity::Robot(r) => r.timestep_update(dt),
            Entity::Light(l) => l.timestep_update(dt),
            Entity::Food(_) => {}
        }
    }

    pub fn handle_wall_collision(&mut self) {
        match self {
            Entity::Robot(r) => r.handle_wall_collision(),
            Entity::Light(l) => l.handle_wall_collision(),
            Entity::Food(_) => {}
        }
    }

    pub fn handle_entity_collision(&mut self, other: EntityType) {
        match self {
            Entity::Robot(r) => r.handle_entity_collision(other),
            Entity::Light(l) => l.handle_entity_collision(other),
            Entity::Food(_) => {}
        }
    }

    pub fn as_robot(&self) -> Option<&Robot> {
        match self {
            Entity::Robot(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_robot_mut(&mut self) -> Option<&mut Robot> {
        match self {
            Entity::Robot(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_food_mut(&mut self) -> Option<&mut Food> {
        match self {
            Entity::Food(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_variant_surface() {
        let robot = Entity::Robot(Robot::new(3, 1, Pose::new(10.0, 20.0), 9.0));
        assert_eq!(robot.entity_type(), EntityType::Robot);
        assert_eq!(robot.id(), 3);
        assert_eq!(robot.name(), "Robot 3");
        assert!(robot.is_mobile());

        let food = Entity::Food(Food::new(1, Pose::new(5.0, 5.0)));
        assert_eq!(food.entity_type(), EntityType::Food);
        assert_eq!(food.name(), "Food 1");
        assert!(!food.is_mobile());

        let light = Entity::Light(Light::new(2, Pose::new(1.0, 2.0)));
        assert_eq!(light.name(), "Light 2");
        assert!(light.is_mobile());
    }

    #[test]
    fn test_set_position_keeps_heading() {
        let mut entity = Entity::Robot(Robot::new(0, 1, Pose::with_heading(10.0, 20.0, 45.0), 9.0));
        entity.set_position(100.0, 200.0);
        assert_approx_eq!(entity.pose().x, 100.0);
        assert_approx_eq!(entity.pose().y, 200.0);
        assert_approx_eq!(entity.pose().heading, 45.0);
    }

    #[test]
    fn test_food_ignores_updates_and_collisions() {
        let mut entity = Entity::Food(Food::new(0, Pose::new(50.0, 50.0)));
        entity.timestep_update(1);
        entity.handle_wall_collision();
        entity.handle_entity_collision(EntityType::Robot);
        assert_approx_eq!(entity.pose().x, 50.0);
        assert_approx_eq!(entity.pose().y, 50.0);
    }
}
