use crate::arena::Arena;
use crate::config;
use crate::factory::EntityFactory;
use crate::render::Renderer;
use crate::types::{Command, GameStatus};
use log::info;
use macroquad::prelude::{get_frame_time, next_frame, KeyCode};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("At least one robot is required")]
    NoRobots,
    #[error("Light sensitivity must be a finite value greater than 1.0 (got {0})")]
    InvalidSensitivity(f64),
    #[error("Fear count {fear} exceeds robot count {robots}")]
    FearCountTooLarge { fear: u32, robots: u32 },
}

/// Population and behavior knobs for a new simulation.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub robot_count: u32,
    pub light_count: u32,
    pub food_count: u32,
    pub fear_count: u32,
    pub light_sensitivity: f64,
    pub food_enabled: bool,
    pub seed: Option<u64>,
}

impl GameOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.robot_count == 0 {
            return Err(ConfigError::NoRobots);
        }
        if !self.light_sensitivity.is_finite() || self.light_sensitivity <= 1.0 {
            return Err(ConfigError::InvalidSensitivity(self.light_sensitivity));
        }
        if self.fear_count > self.robot_count {
            return Err(ConfigError::FearCountTooLarge {
                fear: self.fear_count,
                robots: self.robot_count,
            });
        }
        Ok(())
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            robot_count: config::DEFAULT_ROBOT_COUNT,
            light_count: config::DEFAULT_LIGHT_COUNT,
            food_count: config::DEFAULT_FOOD_COUNT,
            fear_count: config::DEFAULT_FEAR_COUNT,
            light_sensitivity: config::DEFAULT_LIGHT_SENSITIVITY,
            food_enabled: true,
            seed: None,
        }
    }
}

/// The Game struct encapsulates the state and logic for running the simulation
pub struct Game {
    pub arena: Arena,
    paused: bool,
    time_accumulator: f32,
    tick_duration: f32,
}

impl Game {
    /// Create a new game instance with a populated arena
    pub fn new(options: GameOptions) -> Result<Self, Box<dyn std::error::Error>> {
        options.validate()?;

        if let Some(seed) = options.seed {
            info!("Seeding entity placement with {}", seed);
        }
        let factory = EntityFactory::new(options.seed);
        let mut arena = Arena::new(config::ARENA_WIDTH, config::ARENA_HEIGHT, factory);
        info!(
            "Arena created at {}x{}.",
            config::ARENA_WIDTH,
            config::ARENA_HEIGHT
        );

        arena.add_robots(options.robot_count);
        arena.add_lights(options.light_count);
        arena.add_food(options.food_count);
        arena.set_behavior_sensitivity(
            options.fear_count,
            options.light_sensitivity,
            options.food_enabled,
        );
        info!(
            "Populated {} robots ({} fearful), {} lights, {} food sources.",
            options.robot_count, options.fear_count, options.light_count, options.food_count
        );

        Ok(Game {
            arena,
            paused: false,
            time_accumulator: 0.0,
            tick_duration: config::SIM_TICK_SECONDS as f32,
        })
    }

    /// Run the main game loop using the provided renderer
    pub async fn run(&mut self, renderer: &mut Renderer) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting main loop...");

        let mut announcement: Option<String> = None;
        let mut game_ended = false;

        while !Renderer::window_should_close() && self.arena.game_status() == GameStatus::Playing {
            self.process_input();

            // Time accumulation
            let frame_time = get_frame_time();
            self.time_accumulator += frame_time;

            // Fixed simulation update loop. While paused the elapsed time
            // still drains so resuming never replays a backlog of steps.
            while self.time_accumulator >= self.tick_duration {
                self.time_accumulator -= self.tick_duration;

                if !self.paused {
                    self.arena.advance_time(config::SIM_TICK_SECONDS);
                }

                if self.arena.game_status() != GameStatus::Playing {
                    break;
                }
            }

            renderer.draw_frame(
                &self.arena,
                self.paused,
                self.time_accumulator,
                self.tick_duration,
                None,
            );
            next_frame().await;
        }

        // Prepare announcement message
        match self.arena.game_status() {
            GameStatus::Lost => {
                game_ended = true;
                announcement = Some("Game Lost! A robot starved.".to_string());
            }
            GameStatus::Won => {
                game_ended = true;
                announcement = Some("Game Won!".to_string());
            }
            GameStatus::Playing => {}
        }
        info!("Exiting simulation at tick {}.", self.arena.tick());

        // After game over, show announcement and wait for ESC
        if game_ended {
            while !Renderer::window_should_close() {
                renderer.draw_frame(
                    &self.arena,
                    self.paused,
                    self.time_accumulator,
                    self.tick_duration,
                    announcement.as_deref(),
                );
                if Renderer::is_key_down(KeyCode::Escape) {
                    break;
                }
                next_frame().await;
            }
        }
        Ok(())
    }

    /// Advance the simulation without a window, stopping early if the
    /// game settles on a terminal status.
    pub fn run_headless(&mut self, ticks: u32) {
        info!("Running headless for up to {} ticks...", ticks);
        for _ in 0..ticks {
            self.arena.advance_time(config::SIM_TICK_SECONDS);
            if self.arena.game_status() != GameStatus::Playing {
                break;
            }
        }
        info!(
            "Headless run finished at tick {} with status {:?}.",
            self.arena.tick(),
            self.arena.game_status()
        );
    }

    // Translate this frame's input into a single arena command. The first
    // matching key wins; idle frames send the no-op command.
    fn process_input(&mut self) {
        let command = if Renderer::is_key_pressed(KeyCode::Up) {
            Command::IncreaseSpeed
        } else if Renderer::is_key_pressed(KeyCode::Down) {
            Command::DecreaseSpeed
        } else if Renderer::is_key_pressed(KeyCode::Left) {
            Command::TurnLeft
        } else if Renderer::is_key_pressed(KeyCode::Right) {
            Command::TurnRight
        } else if Renderer::is_key_pressed(KeyCode::P) {
            if self.paused {
                Command::Play
            } else {
                Command::Pause
            }
        } else if Renderer::is_key_pressed(KeyCode::R) {
            Command::Reset
        } else {
            Command::None
        };

        match command {
            Command::Pause => {
                self.paused = true;
                info!("Simulation paused");
            }
            Command::Play => {
                self.paused = false;
                info!("Simulation resumed");
            }
            Command::Reset => {
                self.paused = false;
                info!("New game started");
            }
            _ => {}
        }
        self.arena.accept_command(command);
    }
}
