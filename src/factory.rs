use crate::config;
use crate::entity::Entity;
use crate::food::Food;
use crate::light::Light;
use crate::robot::Robot;
use crate::types::Pose;
use rand::prelude::*;
use rand::rngs::StdRng;

// Builds entities with randomized placement and sequential per-type ids.
// The RNG is owned here and seedable, so a fixed seed reproduces an entire
// arena layout.
#[derive(Debug)]
pub struct EntityFactory {
    rng: StdRng,
    robot_count: u32,
    light_count: u32,
    food_count: u32,
    next_behavior_flag: u32, // Alternates new robots between fear and exploration
}

impl EntityFactory {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        EntityFactory {
            rng,
            robot_count: 0,
            light_count: 0,
            food_count: 0,
            next_behavior_flag: 0,
        }
    }

    /// Restarts id assignment for a fresh population. The RNG keeps its
    /// state so layouts do not repeat within a run.
    pub fn reset(&mut self) {
        self.robot_count = 0;
        self.light_count = 0;
        self.food_count = 0;
        self.next_behavior_flag = 0;
    }

    pub fn create_robot(&mut self) -> Entity {
        self.robot_count += 1;
        self.next_behavior_flag += 1;
        let pose = self.random_pose();
        let radius = self.random_robot_radius();
        Entity::Robot(Robot::new(
            self.robot_count,
            self.next_behavior_flag,
            pose,
            radius,
        ))
    }

    pub fn create_light(&mut self) -> Entity {
        self.light_count += 1;
        let pose = self.random_pose();
        Entity::Light(Light::new(self.light_count, pose))
    }

    pub fn create_food(&mut self) -> Entity {
        self.food_count += 1;
        let pose = self.random_pose();
        Entity::Food(Food::new(self.food_count, pose))
    }

    /// A random cell on the placement grid, clear of the arena walls.
    pub fn random_pose(&mut self) -> Pose {
        let col = self.rng.gen_range(0..config::POSE_GRID_COLS);
        let row = self.rng.gen_range(0..config::POSE_GRID_ROWS);
        Pose::new(
            config::POSE_GRID_ORIGIN + f64::from(col) * config::POSE_GRID_STEP,
            config::POSE_GRID_ORIGIN + f64::from(row) * config::POSE_GRID_STEP,
        )
    }

    pub fn random_robot_radius(&mut self) -> f64 {
        f64::from(
            self.rng
                .gen_range(config::ROBOT_MIN_RADIUS..=config::ROBOT_MAX_RADIUS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityType;

    #[test]
    fn test_ids_are_sequential_per_type() {
        let mut factory = EntityFactory::new(Some(7));
        assert_eq!(factory.create_robot().id(), 1);
        assert_eq!(factory.create_robot().id(), 2);
        assert_eq!(factory.create_light().id(), 1);
        assert_eq!(factory.create_food().id(), 1);
        assert_eq!(factory.create_robot().id(), 3);
    }

    #[test]
    fn test_behavior_flags_alternate() {
        let mut factory = EntityFactory::new(Some(7));
        let flags: Vec<u32> = (0..4)
            .map(|_| match factory.create_robot() {
                Entity::Robot(r) => r.behavior_flag,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(flags, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_poses_land_on_grid_inside_arena() {
        let mut factory = EntityFactory::new(Some(42));
        for _ in 0..100 {
            let pose = factory.random_pose();
            let col = (pose.x - config::POSE_GRID_ORIGIN) / config::POSE_GRID_STEP;
            let row = (pose.y - config::POSE_GRID_ORIGIN) / config::POSE_GRID_STEP;
            assert!(
                (col - col.round()).abs() < 1e-9 && (row - row.round()).abs() < 1e-9,
                "pose ({}, {}) off the placement grid",
                pose.x,
                pose.y
            );
            assert!(pose.x > 0.0 && pose.x < config::ARENA_WIDTH);
            assert!(pose.y > 0.0 && pose.y < config::ARENA_HEIGHT);
        }
    }

    #[test]
    fn test_robot_radius_in_range() {
        let mut factory = EntityFactory::new(Some(42));
        for _ in 0..50 {
            let radius = factory.random_robot_radius();
            assert!(radius >= f64::from(config::ROBOT_MIN_RADIUS));
            assert!(radius <= f64::from(config::ROBOT_MAX_RADIUS));
        }
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let mut a = EntityFactory::new(Some(99));
        let mut b = EntityFactory::new(Some(99));
        for _ in 0..10 {
            let ea = a.create_robot();
            let eb = b.create_robot();
            assert_eq!(ea.pose(), eb.pose());
            assert_eq!(ea.radius(), eb.radius());
        }
    }

    #[test]
    fn test_reset_restarts_ids() {
        let mut factory = EntityFactory::new(Some(7));
        factory.create_robot();
        factory.create_robot();
        factory.reset();
        let robot = factory.create_robot();
        assert_eq!(robot.id(), 1);
        assert_eq!(robot.entity_type(), EntityType::Robot);
    }
}
