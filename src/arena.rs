use crate::config;
use crate::debug_arena;
use crate::entity::Entity;
use crate::factory::EntityFactory;
use crate::robot::Robot;
use crate::types::{Command, EntityType, GameStatus, Pose};
use log::info;

// Which boundary a mobile entity ran into. The y axis grows downward, so
// the top wall sits at y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wall {
    Right,
    Left,
    Bottom,
    Top,
}

// The simulation world. Owns every entity in one contiguous vector with
// index lists for the mobile and robot subsets, and drives the fixed-step
// update: integrate, starve-check, resolve collisions, decide motion.
#[derive(Debug)]
pub struct Arena {
    width: f64,
    height: f64,
    factory: EntityFactory,
    entities: Vec<Entity>,
    mobile_index: Vec<usize>,
    robot_index: Vec<usize>,
    game_status: GameStatus,
    tick: u32,
}

impl Arena {
    pub fn new(width: f64, height: f64, factory: EntityFactory) -> Self {
        Arena {
            width,
            height,
            factory,
            entities: Vec::new(),
            mobile_index: Vec::new(),
            robot_index: Vec::new(),
            game_status: GameStatus::Playing,
            tick: 0,
        }
    }

    // Appends an entity and wires it into the mobile and robot index lists.
    fn push_entity(&mut self, entity: Entity) {
        if entity.is_mobile() {
            self.mobile_index.push(self.entities.len());
        }
        if entity.entity_type() == EntityType::Robot {
            self.robot_index.push(self.entities.len());
        }
        self.entities.push(entity);
    }

    /// Seeds a fresh robot population. Any existing entities are dropped
    /// and id assignment restarts, so robots are always added first.
    pub fn add_robots(&mut self, quantity: u32) {
        self.entities.clear();
        self.mobile_index.clear();
        self.robot_index.clear();
        self.factory.reset();
        for _ in 0..quantity {
            let robot = self.factory.create_robot();
            self.push_entity(robot);
        }
        info!("Added {} robots to the arena", quantity);
    }

    pub fn add_lights(&mut self, quantity: u32) {
        for _ in 0..quantity {
            let light = self.factory.create_light();
            self.push_entity(light);
        }
        info!("Added {} lights to the arena", quantity);
    }

    pub fn add_food(&mut self, quantity: u32) {
        for _ in 0..quantity {
            let food = self.factory.create_food();
            self.push_entity(food);
        }
        info!("Added {} food sources to the arena", quantity);
    }

    /// Assigns the fear policy to the first `fear_count` robots and the
    /// exploratory policy to the rest, and pushes the sensing knobs down
    /// to every robot.
    pub fn set_behavior_sensitivity(
        &mut self,
        fear_count: u32,
        light_base: f64,
        food_enabled: bool,
    ) {
        let mut remaining = fear_count;
        for k in 0..self.robot_index.len() {
            let i = self.robot_index[k];
            if let Some(robot) = self.entities[i].as_robot_mut() {
                if remaining > 0 {
                    robot.behavior_flag = 1;
                    remaining -= 1;
                } else {
                    robot.behavior_flag = 0;
                }
                robot.set_sensitivity_to_light(light_base);
                robot.set_food_enabled(food_enabled);
            }
        }
    }

    /// Advances the simulation by one fixed step. The wall-clock delta
    /// only gates the call: non-positive deltas are ignored and any
    /// positive delta runs exactly one unit step. Callers own real-time
    /// accumulation.
    pub fn advance_time(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }
        self.tick += 1;
        self.update_entities_timestep();
    }

    fn update_entities_timestep(&mut self) {
        // Move every mobile entity.
        for k in 0..self.mobile_index.len() {
            let i = self.mobile_index[k];
            self.entities[i].timestep_update(1);
        }

        // A starving robot ends the run.
        for k in 0..self.robot_index.len() {
            let i = self.robot_index[k];
            let starving = self.entities[i]
                .as_robot()
                .map(|r| r.starving())
                .unwrap_or(false);
            if starving {
                if self.game_status != GameStatus::Lost {
                    info!("{} starved, simulation lost", self.entities[i].name());
                }
                self.game_status = GameStatus::Lost;
            }
        }

        // Resolve wall and entity overlaps for each mobile entity, letting
        // the entity react to what it hit.
        for k in 0..self.mobile_index.len() {
            let i = self.mobile_index[k];
            if let Some(wall) = self.collision_wall(i) {
                self.adjust_wall_overlap(i, wall);
                self.entities[i].handle_wall_collision();
                debug_arena!(self.tick, "{} hit the {:?} wall", self.entities[i].name(), wall);
            }
            for j in 0..self.entities.len() {
                if j == i {
                    continue;
                }
                if self.is_colliding(i, j) {
                    self.adjust_entity_overlap(i, j);
                    let other_type = self.entities[j].entity_type();
                    self.entities[i].handle_entity_collision(other_type);
                    debug_arena!(
                        self.tick,
                        "{} collided with {}",
                        self.entities[i].name(),
                        self.entities[j].name()
                    );
                }
            }
        }

        // Let every robot react to everything else in the arena.
        for k in 0..self.robot_index.len() {
            let i = self.robot_index[k];
            for j in 0..self.entities.len() {
                if j == i {
                    continue;
                }
                let other_type = self.entities[j].entity_type();
                let other_pose = self.entities[j].pose();
                let other_radius = self.entities[j].radius();
                let consumed = match self.entities[i].as_robot_mut() {
                    Some(robot) => robot.decide_motion(other_type, other_pose, other_radius),
                    None => false,
                };
                if consumed {
                    if let Some(food) = self.entities[j].as_food_mut() {
                        food.captured = true;
                    }
                }
            }
        }
    }

    // First boundary the entity's circle reaches, if any.
    fn collision_wall(&self, i: usize) -> Option<Wall> {
        let pose = self.entities[i].pose();
        let radius = self.entities[i].radius();
        if pose.x + radius >= self.width {
            Some(Wall::Right)
        } else if pose.x - radius <= 0.0 {
            Some(Wall::Left)
        } else if pose.y + radius >= self.height {
            Some(Wall::Bottom)
        } else if pose.y - radius <= 0.0 {
            Some(Wall::Top)
        } else {
            None
        }
    }

    // Places the entity back inside the violated bound with a small gap.
    fn adjust_wall_overlap(&mut self, i: usize, wall: Wall) {
        let pose = self.entities[i].pose();
        let clearance = self.entities[i].radius() + config::WALL_MARGIN;
        match wall {
            Wall::Right => self.entities[i].set_position(self.width - clearance, pose.y),
            Wall::Left => self.entities[i].set_position(clearance, pose.y),
            Wall::Top => self.entities[i].set_position(pose.x, clearance),
            Wall::Bottom => self.entities[i].set_position(pose.x, self.height - clearance),
        }
    }

    // Circle overlap test, inclusive: exact touching counts.
    fn is_colliding(&self, i: usize, j: usize) -> bool {
        let distance = self.entities[i].pose().distance_to(&self.entities[j].pose());
        distance <= self.entities[i].radius() + self.entities[j].radius()
    }

    // Backs the mobile entity out along the line between centers until the
    // circles just touch. Coincident centers fall back to pushing along
    // the x axis rather than producing a degenerate angle.
    fn adjust_entity_overlap(&mut self, i: usize, j: usize) {
        let mobile = self.entities[i].pose();
        let other = self.entities[j].pose();
        let delta_x = mobile.x - other.x;
        let delta_y = mobile.y - other.y;
        let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();
        let distance_to_move =
            self.entities[i].radius() + self.entities[j].radius() - distance;
        let angle = if distance < 1e-9 {
            0.0
        } else {
            delta_y.atan2(delta_x)
        };
        self.entities[i].set_position(
            mobile.x + angle.cos() * distance_to_move,
            mobile.y + angle.sin() * distance_to_move,
        );
    }

    /// Routes a control command. Movement commands reach every robot's
    /// motion handler; play and pause belong to the presentation layer and
    /// pass through untouched.
    pub fn accept_command(&mut self, command: Command) {
        match command {
            Command::IncreaseSpeed => self.for_each_robot(|r| r.motion_handler.increase_speed()),
            Command::DecreaseSpeed => self.for_each_robot(|r| r.motion_handler.decrease_speed()),
            Command::TurnLeft => self.for_each_robot(|r| r.motion_handler.turn_left()),
            Command::TurnRight => self.for_each_robot(|r| r.motion_handler.turn_right()),
            Command::Reset => self.reset(),
            Command::Play | Command::Pause | Command::None => {}
        }
    }

    fn for_each_robot(&mut self, mut f: impl FnMut(&mut Robot)) {
        for k in 0..self.robot_index.len() {
            let i = self.robot_index[k];
            if let Some(robot) = self.entities[i].as_robot_mut() {
                f(robot);
            }
        }
    }

    /// Starts a new game: every entity is re-randomized in place, keeping
    /// its id and storage slot, and play resumes.
    pub fn reset(&mut self) {
        self.game_status = GameStatus::Playing;
        self.tick = 0;
        for i in 0..self.entities.len() {
            let pose = self.factory.random_pose();
            match &mut self.entities[i] {
                Entity::Robot(robot) => {
                    let radius = self.factory.random_robot_radius();
                    robot.reset(pose, radius);
                }
                Entity::Light(light) => light.reset(pose),
                Entity::Food(food) => food.reset(pose),
            }
        }
        info!("Arena reset, new game");
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn robots(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.robot_index
            .iter()
            .filter_map(|&i| self.entities[i].as_robot())
    }

    pub fn game_status(&self) -> GameStatus {
        self.game_status
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }
}
